//! Low-level Anchor instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order mirrors the Anchor
//! `#[derive(Accounts)]` structs in the on-chain program exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.
//! Anchor account discriminators:    `sha256("account:{TypeName}")[..8]`.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use std::str::FromStr;

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub(crate) fn spl_token_id() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

pub(crate) fn ata_program_id() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

// ─── PDA seeds (mirrors programs/gauge-adapter/src/constants.rs) ─────────────

pub const POOL_SEED:            &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED:  &[u8] = b"pool_authority";
pub const GAUGE_SEED:           &[u8] = b"gauge";
pub const GAUGE_AUTHORITY_SEED: &[u8] = b"gauge_authority";
pub const STAKE_SEED:           &[u8] = b"stake";
pub const ROUTE_SEED:           &[u8] = b"route";
pub const ROUTE_AUTHORITY_SEED: &[u8] = b"route_authority";

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the pool PDA for an underlying mint.
pub fn derive_pool(underlying_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, underlying_mint.as_ref()], program_id)
}

/// Derive the pool-authority PDA that signs for vault redemptions.
pub fn derive_pool_authority(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_AUTHORITY_SEED, pool.as_ref()], program_id)
}

/// Derive the gauge PDA for a pool.
pub fn derive_gauge(pool: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GAUGE_SEED, pool.as_ref()], program_id)
}

/// Derive the gauge-authority PDA that signs for reward payouts.
pub fn derive_gauge_authority(gauge: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GAUGE_AUTHORITY_SEED, gauge.as_ref()], program_id)
}

/// Derive the per-holder stake PDA for a gauge.
pub fn derive_stake(gauge: &Pubkey, holder: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[STAKE_SEED, gauge.as_ref(), holder.as_ref()],
        program_id,
    )
}

/// Derive the swap-route PDA for a reward/underlying mint pair.
pub fn derive_route(
    reward_mint: &Pubkey,
    underlying_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ROUTE_SEED, reward_mint.as_ref(), underlying_mint.as_ref()],
        program_id,
    )
}

/// Derive the route-authority PDA that signs for route payouts.
pub fn derive_route_authority(route: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ROUTE_AUTHORITY_SEED, route.as_ref()], program_id)
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let token_prog = spl_token_id();
    Pubkey::find_program_address(
        &[wallet.as_ref(), token_prog.as_ref(), mint.as_ref()],
        &ata_program_id(),
    )
    .0
}

// ─── Discriminator ────────────────────────────────────────────────────────────

fn disc(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let h = solana_sdk::hash::hash(preimage.as_bytes());
    h.to_bytes()[..8].try_into().unwrap()
}

// ─── initialize_pool ──────────────────────────────────────────────────────────

/// Build the `initialize_pool` instruction.
///
/// `underlying_vault` must be a fresh keypair — it will be initialised as an
/// SPL token account owned by the pool authority, and must be included as an
/// additional signer when the transaction is submitted.
pub fn initialize_pool_ix(
    program_id:       &Pubkey,
    creator:          &Pubkey,
    underlying_mint:  &Pubkey,
    underlying_vault: &Pubkey,
) -> Instruction {
    let (pool, _)           = derive_pool(underlying_mint, program_id);
    let (pool_authority, _) = derive_pool_authority(&pool, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator,                true),   // mut + signer
            AccountMeta::new_readonly(*underlying_mint, false),
            AccountMeta::new(pool,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(*underlying_vault,       true),   // mut + signer (init)
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: disc("initialize_pool").to_vec(),
    }
}

// ─── seed_liquidity ───────────────────────────────────────────────────────────

/// Build the `seed_liquidity` instruction.
///
/// `underlying_vault` must be the pool's vault; `provider_underlying` must
/// hold the pool's underlying mint and be owned by `provider`.
pub fn seed_liquidity_ix(
    program_id:          &Pubkey,
    provider:            &Pubkey,
    pool:                &Pubkey,
    underlying_vault:    &Pubkey,
    provider_underlying: &Pubkey,
    amount:              u64,
) -> Instruction {
    let mut data = disc("seed_liquidity").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*provider,            true),   // mut + signer
            AccountMeta::new(*pool,                false),  // mut
            AccountMeta::new(*underlying_vault,    false),  // mut
            AccountMeta::new(*provider_underlying, false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
        ],
        data,
    }
}

// ─── initialize_gauge ─────────────────────────────────────────────────────────

/// Build the `initialize_gauge` instruction.
///
/// `reward_vault` must be a fresh keypair (additional signer).  The eight
/// `extra_reward_mints` slots are stored verbatim — pass
/// `Pubkey::default()` for unused slots.
pub fn initialize_gauge_ix(
    program_id:         &Pubkey,
    creator:            &Pubkey,
    pool:               &Pubkey,
    reward_mint:        &Pubkey,
    reward_vault:       &Pubkey,
    reward_rate:        u64,
    extra_reward_mints: &[Pubkey; 8],
) -> Instruction {
    let (gauge, _)           = derive_gauge(pool, program_id);
    let (gauge_authority, _) = derive_gauge_authority(&gauge, program_id);

    let mut data = disc("initialize_gauge").to_vec();
    data.extend_from_slice(&reward_rate.to_le_bytes());
    for mint in extra_reward_mints {
        data.extend_from_slice(mint.as_ref());
    }

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator,                 true),   // mut + signer
            AccountMeta::new_readonly(*pool,           false),
            AccountMeta::new_readonly(*reward_mint,    false),
            AccountMeta::new(gauge,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(gauge_authority, false),
            AccountMeta::new(*reward_vault,            true),   // mut + signer (init)
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── initialize_route ─────────────────────────────────────────────────────────

/// Build the `initialize_route` instruction.
///
/// Both vaults must be fresh keypairs (additional signers).
#[allow(clippy::too_many_arguments)]
pub fn initialize_route_ix(
    program_id:       &Pubkey,
    creator:          &Pubkey,
    reward_mint:      &Pubkey,
    underlying_mint:  &Pubkey,
    reward_vault:     &Pubkey,
    underlying_vault: &Pubkey,
    fee_rate_bps:     u16,
) -> Instruction {
    let (route, _)           = derive_route(reward_mint, underlying_mint, program_id);
    let (route_authority, _) = derive_route_authority(&route, program_id);

    let mut data = disc("initialize_route").to_vec();
    data.extend_from_slice(&fee_rate_bps.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*creator,                 true),   // mut + signer
            AccountMeta::new_readonly(*reward_mint,    false),
            AccountMeta::new_readonly(*underlying_mint, false),
            AccountMeta::new(route,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(route_authority, false),
            AccountMeta::new(*reward_vault,            true),   // mut + signer (init)
            AccountMeta::new(*underlying_vault,        true),   // mut + signer (init)
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── deposit_all ──────────────────────────────────────────────────────────────

/// Build the `deposit_all` instruction.
///
/// `beneficiary_underlying` must hold the pool's underlying mint and be owned
/// by `beneficiary`; its full balance is deposited.
#[allow(clippy::too_many_arguments)]
pub fn deposit_all_ix(
    program_id:             &Pubkey,
    beneficiary:            &Pubkey,
    pool:                   &Pubkey,
    gauge:                  &Pubkey,
    underlying_vault:       &Pubkey,
    beneficiary_underlying: &Pubkey,
) -> Instruction {
    let (stake, _) = derive_stake(gauge, beneficiary, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*beneficiary,            true),   // mut + signer
            AccountMeta::new(*pool,                   false),  // mut
            AccountMeta::new(*gauge,                  false),  // mut
            AccountMeta::new(stake,                   false),  // mut PDA (init_if_needed)
            AccountMeta::new(*underlying_vault,       false),  // mut
            AccountMeta::new(*beneficiary_underlying, false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(Pubkey::default(), false), // system program
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: disc("deposit_all").to_vec(),
    }
}

// ─── withdraw_all ─────────────────────────────────────────────────────────────

/// Build the `withdraw_all` instruction.
#[allow(clippy::too_many_arguments)]
pub fn withdraw_all_ix(
    program_id:        &Pubkey,
    holder:            &Pubkey,
    pool:              &Pubkey,
    gauge:             &Pubkey,
    underlying_vault:  &Pubkey,
    holder_underlying: &Pubkey,
) -> Instruction {
    let (pool_authority, _) = derive_pool_authority(pool, program_id);
    let (stake, _)          = derive_stake(gauge, holder, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*holder,             true),   // mut + signer
            AccountMeta::new(*pool,               false),  // mut
            AccountMeta::new_readonly(pool_authority, false),
            AccountMeta::new(*gauge,              false),  // mut
            AccountMeta::new(stake,               false),  // mut
            AccountMeta::new(*underlying_vault,   false),  // mut
            AccountMeta::new(*holder_underlying,  false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
        ],
        data: disc("withdraw_all").to_vec(),
    }
}

// ─── claim_rewards ────────────────────────────────────────────────────────────

/// Build the `claim_rewards` instruction.
pub fn claim_rewards_ix(
    program_id:         &Pubkey,
    beneficiary:        &Pubkey,
    gauge:              &Pubkey,
    reward_vault:       &Pubkey,
    beneficiary_reward: &Pubkey,
) -> Instruction {
    let (gauge_authority, _) = derive_gauge_authority(gauge, program_id);
    let (stake, _)           = derive_stake(gauge, beneficiary, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*beneficiary,        true),   // mut + signer
            AccountMeta::new(*gauge,              false),  // mut
            AccountMeta::new_readonly(gauge_authority, false),
            AccountMeta::new(stake,               false),  // mut
            AccountMeta::new(*reward_vault,       false),  // mut
            AccountMeta::new(*beneficiary_reward, false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
        ],
        data: disc("claim_rewards").to_vec(),
    }
}

// ─── harvest_all ──────────────────────────────────────────────────────────────

/// Build the `harvest_all` instruction.
///
/// Pass the route's vaults regardless of whether it currently holds reserves
/// — the program skips the conversion when the route is empty.
#[allow(clippy::too_many_arguments)]
pub fn harvest_all_ix(
    program_id:             &Pubkey,
    beneficiary:            &Pubkey,
    gauge:                  &Pubkey,
    reward_vault:           &Pubkey,
    beneficiary_reward:     &Pubkey,
    route:                  &Pubkey,
    route_reward_vault:     &Pubkey,
    route_underlying_vault: &Pubkey,
    beneficiary_underlying: &Pubkey,
) -> Instruction {
    let (gauge_authority, _) = derive_gauge_authority(gauge, program_id);
    let (stake, _)           = derive_stake(gauge, beneficiary, program_id);
    let (route_authority, _) = derive_route_authority(route, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*beneficiary,            true),   // mut + signer
            AccountMeta::new(*gauge,                  false),  // mut
            AccountMeta::new_readonly(gauge_authority, false),
            AccountMeta::new(stake,                   false),  // mut
            AccountMeta::new(*reward_vault,           false),  // mut
            AccountMeta::new(*beneficiary_reward,     false),  // mut
            AccountMeta::new_readonly(*route,         false),
            AccountMeta::new_readonly(route_authority, false),
            AccountMeta::new(*route_reward_vault,     false),  // mut
            AccountMeta::new(*route_underlying_vault, false),  // mut
            AccountMeta::new(*beneficiary_underlying, false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
        ],
        data: disc("harvest_all").to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_stable_and_distinct() {
        let names = [
            "initialize_pool",
            "seed_liquidity",
            "initialize_gauge",
            "initialize_route",
            "deposit_all",
            "withdraw_all",
            "claim_rewards",
            "harvest_all",
        ];
        let discs: Vec<[u8; 8]> = names.iter().map(|n| disc(n)).collect();
        for (i, a) in discs.iter().enumerate() {
            for b in discs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        // Stable across calls
        assert_eq!(disc("deposit_all"), disc("deposit_all"));
    }

    #[test]
    fn deposit_all_account_order_matches_program() {
        let program_id = Pubkey::new_unique();
        let beneficiary = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let gauge = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let ata = Pubkey::new_unique();

        let ix = deposit_all_ix(&program_id, &beneficiary, &pool, &gauge, &vault, &ata);
        let (stake, _) = derive_stake(&gauge, &beneficiary, &program_id);

        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[0].pubkey, beneficiary);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, pool);
        assert_eq!(ix.accounts[2].pubkey, gauge);
        assert_eq!(ix.accounts[3].pubkey, stake);
        assert!(!ix.accounts[3].is_signer && ix.accounts[3].is_writable);
        assert_eq!(ix.accounts[4].pubkey, vault);
        assert_eq!(ix.accounts[5].pubkey, ata);
        assert_eq!(&ix.data[..8], disc("deposit_all"));
    }

    #[test]
    fn initialize_gauge_encodes_rate_and_slots() {
        let program_id = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let reward_mint = Pubkey::new_unique();
        let reward_vault = Pubkey::new_unique();
        let mut extra = [Pubkey::default(); 8];
        extra[2] = Pubkey::new_unique();

        let ix = initialize_gauge_ix(
            &program_id, &creator, &pool, &reward_mint, &reward_vault, 77, &extra,
        );

        // disc(8) + rate(8) + 8 slots × 32
        assert_eq!(ix.data.len(), 8 + 8 + 256);
        assert_eq!(&ix.data[8..16], &77u64.to_le_bytes());
        assert_eq!(&ix.data[16 + 64..16 + 96], extra[2].as_ref());
    }

    #[test]
    fn pda_derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (pool_a, bump_a) = derive_pool(&mint, &program_id);
        let (pool_b, bump_b) = derive_pool(&mint, &program_id);
        assert_eq!(pool_a, pool_b);
        assert_eq!(bump_a, bump_b);

        let (gauge, _) = derive_gauge(&pool_a, &program_id);
        assert_ne!(gauge, pool_a);
    }
}
