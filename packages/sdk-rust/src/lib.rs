//! Gauge-Adapter Rust SDK
//!
//! Uniform yield-adapter client over a liquidity gauge and its swap pool on
//! Solana: deposit-all, withdraw-all, claim, harvest, and the read views the
//! adapter exposes — with zero boilerplate and no Anchor dependency.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gauge_adapter_sdk::GaugeAdapterClient;
//! use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GaugeAdapterClient::devnet();
//!     let keypair = Keypair::new(); // use your funded keypair
//!
//!     let underlying = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
//!
//!     // 1. Deposit the wallet's full underlying balance and stake it
//!     let deposit = client.deposit_all(&keypair, &underlying).await?;
//!     println!("Deposited {} — tx: {}", deposit.amount, deposit.signature);
//!
//!     // 2. The staked balance the gauge reports for us
//!     let staked = client.lp_token_balance(&keypair.pubkey(), &underlying).await?;
//!     println!("Staked: {staked}");
//!
//!     // 3. Later: claim rewards and convert them back to underlying
//!     client.harvest_all(&keypair, &underlying).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`GaugeAdapterClient::deposit_all`] | Deposit full underlying balance, stake the LP shares |
//! | [`GaugeAdapterClient::withdraw_all`] | Unstake everything, redeem back to underlying |
//! | [`GaugeAdapterClient::claim_rewards`] | Pull accrued native rewards (no-op when none) |
//! | [`GaugeAdapterClient::harvest_all`] | Claim, then convert rewards to underlying |
//! | [`GaugeAdapterClient::lp_token_balance`] | Staked balance exactly as the gauge records it |
//! | [`GaugeAdapterClient::all_amount_in_token`] | Position value in gauge-token units (1:1) |
//! | [`GaugeAdapterClient::reward_tokens`] | The 9-slot reward-token list, native mint first |
//! | [`GaugeAdapterClient::pool_info`] | Pool reserve, LP supply, exchange rate |

pub mod client;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use client::GaugeAdapterClient;
pub use error::{Error, Result};
pub use types::*;
