//! [`GaugeAdapterClient`] — the main entry point for integrations.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::{
    error::{Error, Result},
    instructions::{
        claim_rewards_ix, deposit_all_ix, derive_ata, derive_gauge, derive_pool, derive_route,
        derive_stake, harvest_all_ix, initialize_gauge_ix, initialize_pool_ix,
        initialize_route_ix, seed_liquidity_ix, withdraw_all_ix,
    },
    math::{amount_for_shares, pending_rewards, projected_reward_growth, route_amount_out},
    state::{
        parse_gauge, parse_pool, parse_route, parse_stake, parse_token_amount, GaugeState,
        PoolState, StakeState,
    },
    types::{
        ClaimResult, CreateGaugeResult, CreatePoolResult, CreateRouteResult, DepositAllResult,
        HarvestResult, PoolInfo, RewardTokens, WithdrawAllResult,
    },
};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEFAULT_PROGRAM_ID: &str = "AoLMauGFv5JnukMHDFHvwwEEP7iKEimMa1VcKuYCzNPc";
const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async gauge-adapter client for Solana.
///
/// Every operation is keyed by the underlying mint: the client derives the
/// pool, gauge, and per-holder stake addresses from it, so callers never
/// juggle PDAs themselves.
///
/// ```rust,no_run
/// # use gauge_adapter_sdk::GaugeAdapterClient;
/// # use solana_sdk::pubkey::Pubkey;
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GaugeAdapterClient::devnet();
/// let underlying = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
/// let info = client.pool_info(&underlying).await?;
/// println!("Reserve: {} / LP supply: {}", info.reserve, info.lp_supply);
/// # Ok(())
/// # }
/// ```
pub struct GaugeAdapterClient {
    rpc_url:    String,
    program_id: Pubkey,
}

impl GaugeAdapterClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:    rpc_url.into(),
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    // ── Deployment operations ─────────────────────────────────────────────────

    /// Create the pool (and its vault) for an underlying mint.
    ///
    /// A fresh keypair for the vault is generated internally and returned in
    /// the result — no need to provide it.
    pub async fn create_pool(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
    ) -> Result<CreatePoolResult> {
        let rpc = self.rpc();

        let vault = Keypair::new();
        let (pool, _) = derive_pool(underlying_mint, &self.program_id);

        let ix = initialize_pool_ix(
            &self.program_id,
            &payer.pubkey(),
            underlying_mint,
            &vault.pubkey(),
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[&vault]).await?;

        Ok(CreatePoolResult {
            signature:        sig.to_string(),
            pool,
            underlying_vault: vault.pubkey(),
        })
    }

    /// Seed a freshly created pool with permanently locked liquidity.
    ///
    /// Full-balance deposits require an exchange rate, and an empty pool has
    /// none — run this once after `create_pool` before anyone deposits.
    pub async fn seed_liquidity(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
        amount:          u64,
    ) -> Result<Signature> {
        let rpc = self.rpc();

        let (pool_addr, pool_state) = self.fetch_pool(&rpc, underlying_mint).await?;
        let provider_underlying = derive_ata(&payer.pubkey(), underlying_mint);

        let ix = seed_liquidity_ix(
            &self.program_id,
            &payer.pubkey(),
            &pool_addr,
            &pool_state.underlying_vault,
            &provider_underlying,
            amount,
        );
        self.sign_and_send(&rpc, &[ix], payer, &[]).await
    }

    /// Attach the reward gauge to an existing pool.
    ///
    /// `extra_reward_mints` fills the eight extra reward slots verbatim; pass
    /// `Pubkey::default()` for unused slots.
    pub async fn create_gauge(
        &self,
        payer:              &Keypair,
        underlying_mint:    &Pubkey,
        reward_mint:        &Pubkey,
        reward_rate:        u64,
        extra_reward_mints: &[Pubkey; 8],
    ) -> Result<CreateGaugeResult> {
        // Same bound the program enforces — fail before spending a transaction.
        if reward_rate == 0 {
            return Err(Error::InvalidArgument(
                "reward_rate must be greater than zero".into(),
            ));
        }
        let rpc = self.rpc();

        let vault = Keypair::new();
        let (pool, _)  = derive_pool(underlying_mint, &self.program_id);
        let (gauge, _) = derive_gauge(&pool, &self.program_id);

        let ix = initialize_gauge_ix(
            &self.program_id,
            &payer.pubkey(),
            &pool,
            reward_mint,
            &vault.pubkey(),
            reward_rate,
            extra_reward_mints,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[&vault]).await?;

        Ok(CreateGaugeResult {
            signature:    sig.to_string(),
            gauge,
            reward_vault: vault.pubkey(),
        })
    }

    /// Register the reward-to-underlying conversion route used by harvests.
    pub async fn create_route(
        &self,
        payer:           &Keypair,
        reward_mint:     &Pubkey,
        underlying_mint: &Pubkey,
        fee_rate_bps:    u16,
    ) -> Result<CreateRouteResult> {
        if !(1..=100).contains(&fee_rate_bps) {
            return Err(Error::InvalidArgument(format!(
                "fee_rate_bps {fee_rate_bps} is out of range (allowed: 1-100)"
            )));
        }
        let rpc = self.rpc();

        let reward_vault     = Keypair::new();
        let underlying_vault = Keypair::new();
        let (route, _) = derive_route(reward_mint, underlying_mint, &self.program_id);

        let ix = initialize_route_ix(
            &self.program_id,
            &payer.pubkey(),
            reward_mint,
            underlying_mint,
            &reward_vault.pubkey(),
            &underlying_vault.pubkey(),
            fee_rate_bps,
        );
        let sig = self
            .sign_and_send(&rpc, &[ix], payer, &[&reward_vault, &underlying_vault])
            .await?;

        Ok(CreateRouteResult { signature: sig.to_string(), route, fee_rate_bps })
    }

    // ── Adapter operations ────────────────────────────────────────────────────

    /// Deposit the wallet's full underlying balance and stake the LP shares.
    pub async fn deposit_all(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
    ) -> Result<DepositAllResult> {
        let rpc = self.rpc();

        let (pool_addr, pool_state) = self.fetch_pool(&rpc, underlying_mint).await?;
        if pool_state.lp_supply == 0 {
            return Err(Error::NoLiquidity);
        }
        let (gauge, _) = derive_gauge(&pool_addr, &self.program_id);
        let (stake, _) = derive_stake(&gauge, &payer.pubkey(), &self.program_id);

        let beneficiary_underlying = derive_ata(&payer.pubkey(), underlying_mint);
        let amount =
            parse_token_amount(&rpc.get_account_data(&beneficiary_underlying).await?)?;

        let ix = deposit_all_ix(
            &self.program_id,
            &payer.pubkey(),
            &pool_addr,
            &gauge,
            &pool_state.underlying_vault,
            &beneficiary_underlying,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(DepositAllResult {
            signature: sig.to_string(),
            pool:      pool_addr,
            gauge,
            stake,
            amount,
        })
    }

    /// Unstake the full position and redeem it back to underlying.
    ///
    /// A wallet with nothing staked settles as a harmless no-op on-chain.
    pub async fn withdraw_all(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
    ) -> Result<WithdrawAllResult> {
        let rpc = self.rpc();

        let (pool_addr, pool_state) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge, _) = derive_gauge(&pool_addr, &self.program_id);

        let shares = self
            .fetch_stake(&rpc, &gauge, &payer.pubkey())
            .await?
            .map(|s| s.amount)
            .unwrap_or(0);
        let reserve =
            parse_token_amount(&rpc.get_account_data(&pool_state.underlying_vault).await?)?;
        let estimated_amount = if shares == 0 {
            0
        } else {
            amount_for_shares(shares, reserve, pool_state.lp_supply)?
        };

        let holder_underlying = derive_ata(&payer.pubkey(), underlying_mint);
        let ix = withdraw_all_ix(
            &self.program_id,
            &payer.pubkey(),
            &pool_addr,
            &gauge,
            &pool_state.underlying_vault,
            &holder_underlying,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(WithdrawAllResult { signature: sig.to_string(), shares, estimated_amount })
    }

    /// Claim the wallet's accrued native rewards (no-op when none).
    pub async fn claim_rewards(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
    ) -> Result<ClaimResult> {
        let rpc = self.rpc();

        let (pool_addr, _) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge_addr, gauge_state) = self.fetch_gauge(&rpc, &pool_addr).await?;
        let estimated_rewards = self
            .pending_rewards_inner(&rpc, &gauge_addr, &gauge_state, &payer.pubkey())
            .await?;

        let beneficiary_reward = derive_ata(&payer.pubkey(), &gauge_state.reward_mint);
        let ix = claim_rewards_ix(
            &self.program_id,
            &payer.pubkey(),
            &gauge_addr,
            &gauge_state.reward_vault,
            &beneficiary_reward,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(ClaimResult { signature: sig.to_string(), estimated_rewards })
    }

    /// Claim rewards, then convert them to underlying through the registered
    /// route. When the route cannot quote, the claim still settles and the
    /// conversion is skipped on-chain — never a failed transaction.
    pub async fn harvest_all(
        &self,
        payer:           &Keypair,
        underlying_mint: &Pubkey,
    ) -> Result<HarvestResult> {
        let rpc = self.rpc();

        let (pool_addr, _) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge_addr, gauge_state) = self.fetch_gauge(&rpc, &pool_addr).await?;
        let estimated_rewards = self
            .pending_rewards_inner(&rpc, &gauge_addr, &gauge_state, &payer.pubkey())
            .await?;

        let (route_addr, _) =
            derive_route(&gauge_state.reward_mint, underlying_mint, &self.program_id);
        let route_state = parse_route(&rpc.get_account_data(&route_addr).await?)?;

        let beneficiary_reward = derive_ata(&payer.pubkey(), &gauge_state.reward_mint);
        let wallet_rewards = match rpc.get_account_data(&beneficiary_reward).await {
            Ok(data) => parse_token_amount(&data)?,
            Err(_) => 0,
        };

        let reserve_in =
            parse_token_amount(&rpc.get_account_data(&route_state.reward_vault).await?)?;
        let reserve_out =
            parse_token_amount(&rpc.get_account_data(&route_state.underlying_vault).await?)?;
        let estimated_underlying = route_amount_out(
            wallet_rewards.saturating_add(estimated_rewards),
            reserve_in,
            reserve_out,
            route_state.fee_rate_bps,
        )?;

        let beneficiary_underlying = derive_ata(&payer.pubkey(), underlying_mint);
        let ix = harvest_all_ix(
            &self.program_id,
            &payer.pubkey(),
            &gauge_addr,
            &gauge_state.reward_vault,
            &beneficiary_reward,
            &route_addr,
            &route_state.reward_vault,
            &route_state.underlying_vault,
            &beneficiary_underlying,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;

        Ok(HarvestResult {
            signature: sig.to_string(),
            estimated_rewards,
            estimated_underlying,
        })
    }

    // ── Read operations ───────────────────────────────────────────────────────

    /// The staked balance the gauge records for `holder` — exactly the figure
    /// the gauge itself accounts with, not a derived estimate. A wallet that
    /// never deposited reads as zero.
    pub async fn lp_token_balance(
        &self,
        holder:          &Pubkey,
        underlying_mint: &Pubkey,
    ) -> Result<u64> {
        let rpc = self.rpc();
        let (pool_addr, _) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge, _) = derive_gauge(&pool_addr, &self.program_id);
        Ok(self
            .fetch_stake(&rpc, &gauge, holder)
            .await?
            .map(|s| s.amount)
            .unwrap_or(0))
    }

    /// Position value in gauge-token units. Staked shares convert 1:1, so
    /// this always equals [`Self::lp_token_balance`].
    pub async fn all_amount_in_token(
        &self,
        holder:          &Pubkey,
        underlying_mint: &Pubkey,
    ) -> Result<u64> {
        self.lp_token_balance(holder, underlying_mint).await
    }

    /// The gauge's reward-token list: nine entries, native reward mint at
    /// index 0, then the eight extra slots verbatim (zero address = unused).
    pub async fn reward_tokens(&self, underlying_mint: &Pubkey) -> Result<RewardTokens> {
        let rpc = self.rpc();
        let (pool_addr, _) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge_addr, gauge_state) = self.fetch_gauge(&rpc, &pool_addr).await?;
        Ok(RewardTokens { gauge: gauge_addr, tokens: gauge_state.reward_token_list() })
    }

    /// Rewards `holder` could claim right now, including accrual since the
    /// gauge's last on-chain sync.
    pub async fn pending_rewards(
        &self,
        holder:          &Pubkey,
        underlying_mint: &Pubkey,
    ) -> Result<u64> {
        let rpc = self.rpc();
        let (pool_addr, _) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge_addr, gauge_state) = self.fetch_gauge(&rpc, &pool_addr).await?;
        self.pending_rewards_inner(&rpc, &gauge_addr, &gauge_state, holder).await
    }

    /// Fetch pool state plus gauge totals for display.
    pub async fn pool_info(&self, underlying_mint: &Pubkey) -> Result<PoolInfo> {
        let rpc = self.rpc();

        let (pool_addr, pool_state) = self.fetch_pool(&rpc, underlying_mint).await?;
        let (gauge_addr, gauge_state) = self.fetch_gauge(&rpc, &pool_addr).await?;
        let reserve =
            parse_token_amount(&rpc.get_account_data(&pool_state.underlying_vault).await?)?;

        Ok(PoolInfo {
            pool:            pool_addr,
            gauge:           gauge_addr,
            underlying_mint: pool_state.underlying_mint,
            reserve,
            lp_supply:       pool_state.lp_supply,
            total_staked:    gauge_state.total_staked,
            reward_rate:     gauge_state.reward_rate,
        })
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }

    async fn sign_and_send(
        &self,
        rpc:          &RpcClient,
        instructions: &[Instruction],
        payer:        &Keypair,
        extra:        &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend(extra.iter().map(|k| k as &dyn Signer));
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        Ok(rpc.send_and_confirm_transaction(&tx).await?)
    }

    async fn fetch_pool(
        &self,
        rpc:             &RpcClient,
        underlying_mint: &Pubkey,
    ) -> Result<(Pubkey, PoolState)> {
        let (pool_addr, _) = derive_pool(underlying_mint, &self.program_id);
        let data = rpc
            .get_account_data(&pool_addr)
            .await
            .map_err(|_| Error::PoolNotFound(*underlying_mint))?;
        Ok((pool_addr, parse_pool(&data)?))
    }

    async fn fetch_gauge(
        &self,
        rpc:  &RpcClient,
        pool: &Pubkey,
    ) -> Result<(Pubkey, GaugeState)> {
        let (gauge_addr, _) = derive_gauge(pool, &self.program_id);
        let data = rpc
            .get_account_data(&gauge_addr)
            .await
            .map_err(|_| Error::GaugeNotFound(*pool))?;
        Ok((gauge_addr, parse_gauge(&data)?))
    }

    /// `Ok(None)` when the holder has no stake account yet — that is a valid
    /// zero position, not an error.
    async fn fetch_stake(
        &self,
        rpc:    &RpcClient,
        gauge:  &Pubkey,
        holder: &Pubkey,
    ) -> Result<Option<StakeState>> {
        let (stake_addr, _) = derive_stake(gauge, holder, &self.program_id);
        let maybe = rpc
            .get_account_with_commitment(&stake_addr, CommitmentConfig::confirmed())
            .await?
            .value;
        match maybe {
            Some(acc) => Ok(Some(parse_stake(&acc.data)?)),
            None => Ok(None),
        }
    }

    /// Project the gauge's reward growth to the local wall clock and price
    /// the holder's position against it.
    async fn pending_rewards_inner(
        &self,
        rpc:         &RpcClient,
        gauge_addr:  &Pubkey,
        gauge_state: &GaugeState,
        holder:      &Pubkey,
    ) -> Result<u64> {
        let stake = match self.fetch_stake(rpc, gauge_addr, holder).await? {
            Some(s) => s,
            None => return Ok(0),
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(gauge_state.last_update_ts);
        let growth = projected_reward_growth(
            gauge_state.reward_growth_global,
            gauge_state.reward_rate,
            gauge_state.total_staked,
            gauge_state.last_update_ts,
            now,
        )?;
        pending_rewards(
            stake.amount,
            stake.rewards_owed,
            stake.reward_growth_checkpoint,
            growth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Argument validation fires before any RPC traffic, so these run offline.

    #[tokio::test]
    async fn zero_reward_rate_is_rejected_before_sending() {
        let client = GaugeAdapterClient::devnet();
        let payer = Keypair::new();
        let err = client
            .create_gauge(&payer, &Pubkey::new_unique(), &Pubkey::new_unique(), 0, &[Pubkey::default(); 8])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn out_of_range_route_fee_is_rejected_before_sending() {
        let client = GaugeAdapterClient::devnet();
        let payer = Keypair::new();
        for bps in [0u16, 101] {
            let err = client
                .create_route(&payer, &Pubkey::new_unique(), &Pubkey::new_unique(), bps)
                .await
                .unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
    }
}
