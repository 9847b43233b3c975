/// PDA seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority";
pub const GAUGE_SEED: &[u8] = b"gauge";
pub const GAUGE_AUTHORITY_SEED: &[u8] = b"gauge_authority";
pub const STAKE_SEED: &[u8] = b"stake";
pub const ROUTE_SEED: &[u8] = b"route";
pub const ROUTE_AUTHORITY_SEED: &[u8] = b"route_authority";

/// Extra reward-token slots a gauge carries beyond its native reward mint.
/// An unset slot holds `Pubkey::default()`.
pub const MAX_EXTRA_REWARDS: usize = 8;

/// Entries returned by the reward-token list: native mint + extra slots.
pub const REWARD_TOKEN_SLOTS: usize = 1 + MAX_EXTRA_REWARDS;

/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Q64.64 fixed-point scale (reward growth accumulator)
pub const Q64: u128 = 1u128 << 64;
