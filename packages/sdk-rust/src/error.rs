//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the Gauge-Adapter SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Discovery ────────────────────────────────────────────────────────────
    /// No pool exists for the given underlying mint.
    #[error("Pool not found for underlying mint {0}")]
    PoolNotFound(Pubkey),

    /// No gauge exists for the given pool.
    #[error("Gauge not found for pool {0}")]
    GaugeNotFound(Pubkey),

    /// The pool exists but holds no LP supply — no exchange rate available.
    #[error("Pool total supply is zero — seed it with seed-liquidity first")]
    NoLiquidity,

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in share / reward math")]
    MathOverflow,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
