use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, error::AdapterError, state::SwapRoute};

/// Create the reward → underlying swap route used by harvest.
/// Reserves are seeded by plain SPL transfers into the two vaults; the route
/// tracks no LP accounting of its own.
pub fn handler(ctx: Context<InitializeRoute>, fee_rate_bps: u16) -> Result<()> {
    require!(fee_rate_bps >= 1 && fee_rate_bps <= 100, AdapterError::InvalidFeeRate);

    let route = &mut ctx.accounts.route;
    route.authority = ctx.accounts.route_authority.key();
    route.authority_bump = ctx.bumps.route_authority;
    route.reward_mint = ctx.accounts.reward_mint.key();
    route.underlying_mint = ctx.accounts.underlying_mint.key();
    route.reward_vault = ctx.accounts.reward_vault.key();
    route.underlying_vault = ctx.accounts.underlying_vault.key();
    route.fee_rate_bps = fee_rate_bps;
    route.bump = ctx.bumps.route;

    msg!(
        "Route created: {} -> {} fee={}bps",
        route.reward_mint,
        route.underlying_mint,
        fee_rate_bps
    );
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRoute<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    pub reward_mint: Account<'info, Mint>,
    pub underlying_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        space = SwapRoute::LEN,
        seeds = [ROUTE_SEED, reward_mint.key().as_ref(), underlying_mint.key().as_ref()],
        bump,
    )]
    pub route: Account<'info, SwapRoute>,

    /// CHECK: PDA vault authority — owns both vaults, holds no data
    #[account(
        seeds = [ROUTE_AUTHORITY_SEED, route.key().as_ref()],
        bump,
    )]
    pub route_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        token::mint = reward_mint,
        token::authority = route_authority,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = creator,
        token::mint = underlying_mint,
        token::authority = route_authority,
    )]
    pub underlying_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
