/// Gauge-Adapter — stateless yield adapter over a liquidity gauge.
///
/// 8 instructions:
///   initialize_pool   — create a single-asset swap pool with PDA authority
///   seed_liquidity    — establish the pool's exchange rate (locked shares)
///   initialize_gauge  — create the staking gauge and its reward vault
///   initialize_route  — create the reward → underlying swap route
///   deposit_all       — deposit the caller's full underlying balance and stake
///   withdraw_all      — unstake everything and redeem back to underlying
///   claim_rewards     — pull accrued native rewards; no-op when none pending
///   harvest_all       — claim, then convert rewards to underlying if possible

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Gauge-Adapter",
    project_url:      "https://github.com/gauge-adapter/gauge-adapter",
    contacts:         "email:security@gauge-adapter.dev",
    policy:           "Please report security vulnerabilities by email. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/gauge-adapter/gauge-adapter",
    preferred_languages: "en"
}

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("AoLMauGFv5JnukMHDFHvwwEEP7iKEimMa1VcKuYCzNPc");

#[program]
pub mod gauge_adapter {
    use super::*;

    /// Create a single-asset swap pool. PDA controls the vault — no human key.
    pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
        initialize_pool::handler(ctx)
    }

    /// Deposit underlying and mint locked LP shares to establish the pool's
    /// exchange rate. Depositors cannot enter an unseeded pool.
    pub fn seed_liquidity(ctx: Context<SeedLiquidity>, amount: u64) -> Result<()> {
        seed_liquidity::handler(ctx, amount)
    }

    /// Create the staking gauge for a pool. Index 0 of the reward-token list
    /// is always the native reward mint; the eight extra slots are stored
    /// verbatim, zero address included.
    pub fn initialize_gauge(
        ctx: Context<InitializeGauge>,
        reward_rate: u64,
        extra_reward_mints: [Pubkey; 8],
    ) -> Result<()> {
        initialize_gauge::handler(ctx, reward_rate, extra_reward_mints)
    }

    /// Create the constant-product route used by harvest to convert the
    /// native reward into the pool's underlying token.
    pub fn initialize_route(ctx: Context<InitializeRoute>, fee_rate_bps: u16) -> Result<()> {
        initialize_route::handler(ctx, fee_rate_bps)
    }

    /// Deposit the beneficiary's entire underlying balance into the pool and
    /// stake the resulting LP shares in the gauge, in one atomic forward.
    pub fn deposit_all(ctx: Context<DepositAll>) -> Result<()> {
        deposit_all::handler(ctx)
    }

    /// Unstake the holder's full gauge balance and redeem the shares back to
    /// underlying. Accrued rewards stay claimable afterwards.
    pub fn withdraw_all(ctx: Context<WithdrawAll>) -> Result<()> {
        withdraw_all::handler(ctx)
    }

    /// Claim pending native rewards. Succeeds with no transfer when nothing
    /// has accrued since the last claim.
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        claim_rewards::handler(ctx)
    }

    /// Claim pending rewards, then swap the beneficiary's full reward balance
    /// into underlying through the route. An empty route skips the conversion
    /// instead of failing — the claim still stands.
    pub fn harvest_all(ctx: Context<HarvestAll>) -> Result<()> {
        harvest_all::handler(ctx)
    }
}
