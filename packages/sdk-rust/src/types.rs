//! Public result types returned by [`crate::GaugeAdapterClient`].
//!
//! Everything is `Serialize` so CLI and service callers can emit JSON
//! without re-shaping.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

fn pubkey_as_string<S>(pk: &Pubkey, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&pk.to_string())
}

fn pubkeys_as_strings<S>(pks: &[Pubkey; 9], s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(pks.len()))?;
    for pk in pks {
        seq.serialize_element(&pk.to_string())?;
    }
    seq.end()
}

/// Result of deploying a pool (and its vault) for an underlying mint.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePoolResult {
    pub signature: String,
    #[serde(serialize_with = "pubkey_as_string")]
    pub pool: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub underlying_vault: Pubkey,
}

/// Result of attaching a gauge to an existing pool.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGaugeResult {
    pub signature: String,
    #[serde(serialize_with = "pubkey_as_string")]
    pub gauge: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub reward_vault: Pubkey,
}

/// Result of registering a reward-to-underlying conversion route.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRouteResult {
    pub signature: String,
    #[serde(serialize_with = "pubkey_as_string")]
    pub route: Pubkey,
    pub fee_rate_bps: u16,
}

/// Result of a full-balance deposit.
#[derive(Debug, Clone, Serialize)]
pub struct DepositAllResult {
    pub signature: String,
    #[serde(serialize_with = "pubkey_as_string")]
    pub pool: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub gauge: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub stake: Pubkey,
    /// Underlying amount moved into the pool (the wallet's full balance).
    pub amount: u64,
}

/// Result of a full-position withdrawal.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawAllResult {
    pub signature: String,
    /// LP shares that were unstaked and burned.
    pub shares: u64,
    /// Underlying redeemed at the exchange rate of the withdrawal slot.
    pub estimated_amount: u64,
}

/// Result of claiming accrued native rewards.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimResult {
    pub signature: String,
    /// Rewards pending at preview time. The settled figure can only be
    /// higher, since the stream keeps accruing until the claim lands.
    pub estimated_rewards: u64,
}

/// Result of a harvest: claim plus conversion to underlying.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestResult {
    pub signature: String,
    pub estimated_rewards: u64,
    /// Quoted conversion output, `None` when the route could not quote
    /// (the claim still settles — conversion is skipped, not failed).
    pub estimated_underlying: Option<u64>,
}

/// Snapshot of a pool and its gauge for display.
#[derive(Debug, Clone, Serialize)]
pub struct PoolInfo {
    #[serde(serialize_with = "pubkey_as_string")]
    pub pool: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub gauge: Pubkey,
    #[serde(serialize_with = "pubkey_as_string")]
    pub underlying_mint: Pubkey,
    pub reserve: u64,
    pub lp_supply: u64,
    pub total_staked: u64,
    pub reward_rate: u64,
}

/// The adapter's reward-token list: always nine entries, native mint at
/// index 0, unused extra slots as the zero address.
#[derive(Debug, Clone, Serialize)]
pub struct RewardTokens {
    #[serde(serialize_with = "pubkey_as_string")]
    pub gauge: Pubkey,
    #[serde(serialize_with = "pubkeys_as_strings")]
    pub tokens: [Pubkey; 9],
}
