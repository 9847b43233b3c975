use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, error::AdapterError, state::{Gauge, GaugeStake, StakePool}};

// ─── Reward accrual ────────────────────────────────────────────────────────
// Call before any change to gauge.total_staked or a stake amount.
// Streams reward_rate tokens per second pro-rata across staked shares.
pub fn update_reward_growth(gauge: &mut Gauge, now: i64) -> Result<()> {
    let dt = now.saturating_sub(gauge.last_update_ts);
    gauge.last_update_ts = now;

    if dt <= 0 || gauge.total_staked == 0 || gauge.reward_rate == 0 {
        return Ok(());
    }

    let accrued = (gauge.reward_rate as u128)
        .checked_mul(dt as u128)
        .ok_or(AdapterError::MathOverflow)?;

    // Divide-first to avoid u128 overflow: q * Q64 + r * Q64 / total_staked
    let total = gauge.total_staked as u128;
    let q = accrued / total;
    let r = accrued % total;
    let delta = q
        .checked_mul(Q64)
        .ok_or(AdapterError::MathOverflow)?
        .checked_add(r * Q64 / total)
        .ok_or(AdapterError::MathOverflow)?;

    gauge.reward_growth_global = gauge.reward_growth_global.saturating_add(delta);
    Ok(())
}

/// Fold growth since the stake's last checkpoint into rewards_owed.
/// `rewards_owed += amount * (growth − checkpoint) >> 64` (Q64.64 → integer)
pub fn accrue_rewards(stake: &mut GaugeStake, reward_growth_global: u128) -> Result<()> {
    let delta = reward_growth_global.saturating_sub(stake.reward_growth_checkpoint);
    let pending = (stake.amount as u128)
        .checked_mul(delta)
        .ok_or(AdapterError::MathOverflow)?
        >> 64;

    stake.rewards_owed = stake.rewards_owed.saturating_add(pending as u64);
    stake.reward_growth_checkpoint = reward_growth_global;
    Ok(())
}

/// Bring a stake current before shares are added. Freshness is decided by
/// `holder`, never by `amount`: a drained position (amount == 0 after a full
/// withdrawal) may still carry rewards_owed, which must survive a re-deposit.
/// Only a genuinely new account (holder unset) gets its fields initialised.
pub fn sync_stake_for_deposit(
    stake: &mut GaugeStake,
    holder: Pubkey,
    gauge: Pubkey,
    bump: u8,
    reward_growth_global: u128,
) -> Result<()> {
    if stake.holder == Pubkey::default() {
        stake.holder = holder;
        stake.gauge = gauge;
        stake.reward_growth_checkpoint = reward_growth_global;
        stake.rewards_owed = 0;
        stake.bump = bump;
        Ok(())
    } else {
        accrue_rewards(stake, reward_growth_global)
    }
}

// ─── Share math ────────────────────────────────────────────────────────────
/// LP shares minted for `amount` underlying at the current exchange rate.
pub fn shares_for_deposit(amount: u64, lp_supply: u64, reserve: u64) -> Result<u64> {
    require!(reserve > 0, AdapterError::InsufficientLiquidity);
    let shares = (amount as u128)
        .checked_mul(lp_supply as u128)
        .ok_or(AdapterError::MathOverflow)?
        / reserve as u128;
    Ok(shares as u64)
}

/// Underlying returned when redeeming `shares` LP shares.
pub fn amount_for_shares(shares: u64, reserve: u64, lp_supply: u64) -> Result<u64> {
    require!(lp_supply > 0, AdapterError::InsufficientLiquidity);
    let amount = (shares as u128)
        .checked_mul(reserve as u128)
        .ok_or(AdapterError::MathOverflow)?
        / lp_supply as u128;
    Ok(amount as u64)
}

// ─── Handler ───────────────────────────────────────────────────────────────
/// Deposit the beneficiary's entire underlying balance and stake the minted
/// LP shares into the gauge, atomically. An unseeded pool (lp_supply == 0)
/// has no exchange rate and is rejected — callers must seed first; the
/// adapter never self-guards by seeding.
pub fn handler(ctx: Context<DepositAll>) -> Result<()> {
    let amount = ctx.accounts.beneficiary_underlying.amount;
    require!(amount > 0, AdapterError::ZeroAmount);

    // Read pool state into locals before any mutable borrows
    let lp_supply = ctx.accounts.pool.lp_supply;
    let reserve = ctx.accounts.underlying_vault.amount;
    require!(lp_supply > 0, AdapterError::InsufficientLiquidity);

    let lp = shares_for_deposit(amount, lp_supply, reserve)?;
    require!(lp > 0, AdapterError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;
    update_reward_growth(&mut ctx.accounts.gauge, now)?;
    let growth = ctx.accounts.gauge.reward_growth_global;

    // Sync rewards then update the stake
    {
        let stake = &mut ctx.accounts.stake;
        sync_stake_for_deposit(
            stake,
            ctx.accounts.beneficiary.key(),
            ctx.accounts.gauge.key(),
            ctx.bumps.stake,
            growth,
        )?;
        stake.amount = stake
            .amount
            .checked_add(lp)
            .ok_or(AdapterError::MathOverflow)?;
    }

    ctx.accounts.gauge.total_staked = ctx
        .accounts
        .gauge
        .total_staked
        .checked_add(lp)
        .ok_or(AdapterError::MathOverflow)?;
    ctx.accounts.pool.lp_supply = lp_supply
        .checked_add(lp)
        .ok_or(AdapterError::MathOverflow)?;

    // Transfer the full underlying balance into the pool vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.beneficiary_underlying.to_account_info(),
                to: ctx.accounts.underlying_vault.to_account_info(),
                authority: ctx.accounts.beneficiary.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Deposited all: underlying={} staked_lp={}", amount, lp);
    Ok(())
}

#[derive(Accounts)]
pub struct DepositAll<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, StakePool>,

    #[account(
        mut,
        constraint = gauge.pool == pool.key() @ AdapterError::MintMismatch,
    )]
    pub gauge: Account<'info, Gauge>,

    #[account(
        init_if_needed,
        payer = beneficiary,
        space = GaugeStake::LEN,
        seeds = [STAKE_SEED, gauge.key().as_ref(), beneficiary.key().as_ref()],
        bump,
    )]
    pub stake: Account<'info, GaugeStake>,

    #[account(
        mut,
        constraint = underlying_vault.key() == pool.underlying_vault @ AdapterError::MintMismatch,
    )]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = beneficiary_underlying.mint == pool.underlying_mint @ AdapterError::MintMismatch,
        constraint = beneficiary_underlying.owner == beneficiary.key(),
    )]
    pub beneficiary_underlying: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_EXTRA_REWARDS;

    fn gauge_with(total_staked: u64, reward_rate: u64, last_update_ts: i64) -> Gauge {
        Gauge {
            pool: Pubkey::default(),
            authority: Pubkey::default(),
            authority_bump: 255,
            reward_mint: Pubkey::new_unique(),
            reward_vault: Pubkey::new_unique(),
            extra_reward_mints: [Pubkey::default(); MAX_EXTRA_REWARDS],
            total_staked,
            reward_rate,
            reward_growth_global: 0,
            last_update_ts,
            bump: 254,
        }
    }

    fn stake_with(amount: u64) -> GaugeStake {
        GaugeStake {
            holder: Pubkey::new_unique(),
            gauge: Pubkey::new_unique(),
            amount,
            reward_growth_checkpoint: 0,
            rewards_owed: 0,
            bump: 253,
        }
    }

    #[test]
    fn sole_staker_earns_the_full_stream() {
        let mut gauge = gauge_with(100, 5, 100);
        update_reward_growth(&mut gauge, 160).unwrap();

        let mut stake = stake_with(100);
        accrue_rewards(&mut stake, gauge.reward_growth_global).unwrap();

        // 5 tokens/s over 60s, one staker holding everything
        assert_eq!(stake.rewards_owed, 300);
    }

    #[test]
    fn rewards_split_pro_rata() {
        let mut gauge = gauge_with(4_000, 8, 0);
        update_reward_growth(&mut gauge, 1_000).unwrap();
        let growth = gauge.reward_growth_global;

        let mut quarter = stake_with(1_000);
        let mut rest = stake_with(3_000);
        accrue_rewards(&mut quarter, growth).unwrap();
        accrue_rewards(&mut rest, growth).unwrap();

        assert_eq!(quarter.rewards_owed, 2_000);
        assert_eq!(rest.rewards_owed, 6_000);
    }

    #[test]
    fn no_time_progress_accrues_nothing() {
        let mut gauge = gauge_with(1_000, 5, 100);
        update_reward_growth(&mut gauge, 160).unwrap();
        let mut stake = stake_with(1_000);
        accrue_rewards(&mut stake, gauge.reward_growth_global).unwrap();
        let after_first = stake.rewards_owed;

        // Second sync at the same timestamp — the claim-idempotence case
        update_reward_growth(&mut gauge, 160).unwrap();
        accrue_rewards(&mut stake, gauge.reward_growth_global).unwrap();
        assert_eq!(stake.rewards_owed, after_first);
    }

    #[test]
    fn empty_gauge_advances_clock_without_growth() {
        let mut gauge = gauge_with(0, 5, 100);
        update_reward_growth(&mut gauge, 500).unwrap();
        assert_eq!(gauge.reward_growth_global, 0);
        assert_eq!(gauge.last_update_ts, 500);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut gauge = gauge_with(1_000, 5, 100);
        update_reward_growth(&mut gauge, 50).unwrap();
        assert_eq!(gauge.reward_growth_global, 0);
    }

    #[test]
    fn redeposit_after_full_withdrawal_keeps_unclaimed_rewards() {
        let holder = Pubkey::new_unique();
        let gauge_key = Pubkey::new_unique();
        let mut gauge = gauge_with(0, 5, 100);

        // First deposit at t=100 stakes 100 shares into an empty gauge.
        let mut stake = GaugeStake {
            holder: Pubkey::default(),
            gauge: Pubkey::default(),
            amount: 0,
            reward_growth_checkpoint: 0,
            rewards_owed: 0,
            bump: 0,
        };
        update_reward_growth(&mut gauge, 100).unwrap();
        sync_stake_for_deposit(&mut stake, holder, gauge_key, 253, gauge.reward_growth_global)
            .unwrap();
        stake.amount += 100;
        gauge.total_staked += 100;
        assert_eq!(stake.holder, holder);
        assert_eq!(stake.gauge, gauge_key);

        // Full withdrawal at t=160: rewards synced, shares drained, owed kept.
        update_reward_growth(&mut gauge, 160).unwrap();
        accrue_rewards(&mut stake, gauge.reward_growth_global).unwrap();
        gauge.total_staked -= stake.amount;
        stake.amount = 0;
        assert_eq!(stake.rewards_owed, 300);

        // Re-deposit at t=200: the drained position is not a fresh account,
        // so its unclaimed rewards must survive.
        update_reward_growth(&mut gauge, 200).unwrap();
        sync_stake_for_deposit(&mut stake, holder, gauge_key, 253, gauge.reward_growth_global)
            .unwrap();
        stake.amount += 50;
        gauge.total_staked += 50;

        assert_eq!(stake.rewards_owed, 300);
        assert_eq!(stake.amount, 50);
    }

    #[test]
    fn shares_track_exchange_rate() {
        // 1:1 pool
        assert_eq!(shares_for_deposit(500, 1_000, 1_000).unwrap(), 500);
        // appreciated pool: 2 underlying per share
        assert_eq!(shares_for_deposit(500, 1_000, 2_000).unwrap(), 250);
    }

    #[test]
    fn deposit_into_empty_pool_has_no_rate() {
        assert!(shares_for_deposit(500, 1_000, 0).is_err());
    }

    #[test]
    fn redemption_is_pro_rata() {
        assert_eq!(amount_for_shares(250, 2_000, 1_000).unwrap(), 500);
        assert_eq!(amount_for_shares(0, 2_000, 1_000).unwrap(), 0);
    }
}
