use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{error::AdapterError, state::StakePool};

use super::deposit_all::shares_for_deposit;

/// Establish or deepen the pool's exchange rate. The first seed mints shares
/// 1:1; later seeds mint pro-rata. Seed shares are credited to lp_supply but
/// to no position — they stay locked in the pool for its lifetime.
pub fn handler(ctx: Context<SeedLiquidity>, amount: u64) -> Result<()> {
    require!(amount > 0, AdapterError::ZeroAmount);

    let lp_supply = ctx.accounts.pool.lp_supply;
    let reserve = ctx.accounts.underlying_vault.amount;

    let shares = if lp_supply == 0 {
        amount
    } else {
        shares_for_deposit(amount, lp_supply, reserve)?
    };
    require!(shares > 0, AdapterError::ZeroAmount);

    ctx.accounts.pool.lp_supply = lp_supply
        .checked_add(shares)
        .ok_or(AdapterError::MathOverflow)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.provider_underlying.to_account_info(),
                to: ctx.accounts.underlying_vault.to_account_info(),
                authority: ctx.accounts.provider.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Pool seeded: amount={} locked_shares={}", amount, shares);
    Ok(())
}

#[derive(Accounts)]
pub struct SeedLiquidity<'info> {
    #[account(mut)]
    pub provider: Signer<'info>,

    #[account(mut)]
    pub pool: Account<'info, StakePool>,

    #[account(
        mut,
        constraint = underlying_vault.key() == pool.underlying_vault @ AdapterError::MintMismatch,
    )]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = provider_underlying.mint == pool.underlying_mint @ AdapterError::MintMismatch,
        constraint = provider_underlying.owner == provider.key(),
    )]
    pub provider_underlying: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
