use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, error::AdapterError, state::{Gauge, GaugeStake, StakePool}};

use super::deposit_all::{accrue_rewards, amount_for_shares, update_reward_growth};

/// Unstake the holder's full gauge balance, then redeem every share back to
/// underlying from the pool. A zero stake is a benign no-op, mirroring the
/// gauge's own withdraw(0). Accrued rewards are synced first and remain
/// claimable after the position is emptied.
pub fn handler(ctx: Context<WithdrawAll>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    update_reward_growth(&mut ctx.accounts.gauge, now)?;
    let growth = ctx.accounts.gauge.reward_growth_global;
    accrue_rewards(&mut ctx.accounts.stake, growth)?;

    let lp = ctx.accounts.stake.amount;
    if lp == 0 {
        msg!("Nothing staked — withdraw_all is a no-op");
        return Ok(());
    }

    // Read pool state before mutable borrows
    let lp_supply = ctx.accounts.pool.lp_supply;
    let reserve = ctx.accounts.underlying_vault.amount;
    let pool_key = ctx.accounts.pool.key();
    let authority_bump = ctx.accounts.pool.authority_bump;

    let amount = amount_for_shares(lp, reserve, lp_supply)?;

    ctx.accounts.stake.amount = 0;
    ctx.accounts.gauge.total_staked = ctx.accounts.gauge.total_staked.saturating_sub(lp);
    ctx.accounts.pool.lp_supply = lp_supply.saturating_sub(lp);

    // Redeem from the vault to the holder (PDA-signed)
    let seeds: &[&[u8]] = &[POOL_AUTHORITY_SEED, pool_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    if amount > 0 {
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.underlying_vault.to_account_info(),
                    to: ctx.accounts.holder_underlying.to_account_info(),
                    authority: ctx.accounts.pool_authority.to_account_info(),
                },
                signer,
            ),
            amount,
        )?;
    }

    msg!("Withdrew all: unstaked_lp={} underlying={}", lp, amount);
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawAll<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, StakePool>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = gauge.pool == pool.key() @ AdapterError::MintMismatch,
    )]
    pub gauge: Account<'info, Gauge>,

    #[account(
        mut,
        seeds = [STAKE_SEED, gauge.key().as_ref(), holder.key().as_ref()],
        bump = stake.bump,
        constraint = stake.holder == holder.key(),
        constraint = stake.gauge == gauge.key(),
    )]
    pub stake: Account<'info, GaugeStake>,

    #[account(
        mut,
        constraint = underlying_vault.key() == pool.underlying_vault @ AdapterError::MintMismatch,
    )]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_underlying.mint == pool.underlying_mint @ AdapterError::MintMismatch,
        constraint = holder_underlying.owner == holder.key(),
    )]
    pub holder_underlying: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
