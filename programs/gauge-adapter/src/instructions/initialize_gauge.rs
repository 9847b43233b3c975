use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, error::AdapterError, state::{Gauge, StakePool}};

/// Create the staking gauge for a pool.
/// The native reward mint occupies index 0 of the reward-token list; the
/// eight extra slots are stored verbatim (zero address = unused slot) so the
/// list order always mirrors gauge storage exactly.
pub fn handler(
    ctx: Context<InitializeGauge>,
    reward_rate: u64,
    extra_reward_mints: [Pubkey; MAX_EXTRA_REWARDS],
) -> Result<()> {
    require!(reward_rate > 0, AdapterError::InvalidRewardRate);

    let gauge = &mut ctx.accounts.gauge;
    gauge.pool = ctx.accounts.pool.key();
    gauge.authority = ctx.accounts.gauge_authority.key();
    gauge.authority_bump = ctx.bumps.gauge_authority;
    gauge.reward_mint = ctx.accounts.reward_mint.key();
    gauge.reward_vault = ctx.accounts.reward_vault.key();
    gauge.extra_reward_mints = extra_reward_mints;
    gauge.total_staked = 0;
    gauge.reward_rate = reward_rate;
    gauge.reward_growth_global = 0;
    gauge.last_update_ts = Clock::get()?.unix_timestamp;
    gauge.bump = ctx.bumps.gauge;

    msg!(
        "Gauge created: pool={} reward={} rate={}/s",
        gauge.pool,
        gauge.reward_mint,
        reward_rate
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeGauge<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub pool: Account<'info, StakePool>,

    pub reward_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        space = Gauge::LEN,
        seeds = [GAUGE_SEED, pool.key().as_ref()],
        bump,
    )]
    pub gauge: Account<'info, Gauge>,

    /// CHECK: PDA reward-vault authority — holds no data
    #[account(
        seeds = [GAUGE_AUTHORITY_SEED, gauge.key().as_ref()],
        bump,
    )]
    pub gauge_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        token::mint = reward_mint,
        token::authority = gauge_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
