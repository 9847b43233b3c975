use anchor_lang::prelude::*;

#[error_code]
pub enum AdapterError {
    #[msg("Pool total supply is zero — no exchange rate available")]
    InsufficientLiquidity,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Token mint does not match pool or gauge")]
    MintMismatch,
    #[msg("Fee rate must be 1–100 bps")]
    InvalidFeeRate,
    #[msg("Reward rate must be greater than zero")]
    InvalidRewardRate,
}
