use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, state::StakePool};

/// Create a new single-asset swap pool.
/// The PDA authority owns the vault — no human key controls the funds.
/// The pool starts empty; seed_liquidity must run before any deposit.
pub fn handler(ctx: Context<InitializePool>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.authority = ctx.accounts.pool_authority.key();
    pool.authority_bump = ctx.bumps.pool_authority;
    pool.underlying_mint = ctx.accounts.underlying_mint.key();
    pool.underlying_vault = ctx.accounts.underlying_vault.key();
    pool.lp_supply = 0;
    pool.bump = ctx.bumps.pool;

    msg!("Pool created: underlying={}", ctx.accounts.underlying_mint.key());
    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub underlying_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        space = StakePool::LEN,
        seeds = [POOL_SEED, underlying_mint.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, StakePool>,

    /// CHECK: PDA vault authority — owns the vault, holds no data
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        token::mint = underlying_mint,
        token::authority = pool_authority,
    )]
    pub underlying_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
