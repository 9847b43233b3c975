use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, error::AdapterError, state::{Gauge, GaugeStake}};

use super::deposit_all::{accrue_rewards, update_reward_growth};

/// Claim the beneficiary's pending native rewards from the gauge vault.
/// Idempotent: a second claim with no intervening time progress finds
/// nothing owed and transfers nothing.
pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    update_reward_growth(&mut ctx.accounts.gauge, now)?;
    let growth = ctx.accounts.gauge.reward_growth_global;
    accrue_rewards(&mut ctx.accounts.stake, growth)?;

    let owed = ctx.accounts.stake.rewards_owed;
    if owed == 0 {
        msg!("No rewards to claim");
        return Ok(());
    }
    ctx.accounts.stake.rewards_owed = 0;

    let gauge_key = ctx.accounts.gauge.key();
    let authority_bump = ctx.accounts.gauge.authority_bump;
    let seeds: &[&[u8]] = &[GAUGE_AUTHORITY_SEED, gauge_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.beneficiary_reward.to_account_info(),
                authority: ctx.accounts.gauge_authority.to_account_info(),
            },
            signer,
        ),
        owed,
    )?;

    msg!("Rewards claimed: amount={}", owed);
    Ok(())
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub beneficiary: Signer<'info>,

    #[account(mut)]
    pub gauge: Account<'info, Gauge>,

    /// CHECK: PDA reward-vault authority
    #[account(
        seeds = [GAUGE_AUTHORITY_SEED, gauge.key().as_ref()],
        bump = gauge.authority_bump,
    )]
    pub gauge_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [STAKE_SEED, gauge.key().as_ref(), beneficiary.key().as_ref()],
        bump = stake.bump,
        constraint = stake.holder == beneficiary.key(),
        constraint = stake.gauge == gauge.key(),
    )]
    pub stake: Account<'info, GaugeStake>,

    #[account(
        mut,
        constraint = reward_vault.key() == gauge.reward_vault @ AdapterError::MintMismatch,
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = beneficiary_reward.mint == gauge.reward_mint @ AdapterError::MintMismatch,
        constraint = beneficiary_reward.owner == beneficiary.key(),
    )]
    pub beneficiary_reward: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
