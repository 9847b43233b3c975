//! On-chain account deserialization.
//!
//! Parses raw account bytes for `StakePool` (114 bytes), `Gauge` (434),
//! `GaugeStake` (105), and `SwapRoute` (172).  Byte offsets mirror the
//! Anchor `#[account]` layouts exactly.

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};

// ─── StakePool ────────────────────────────────────────────────────────────────

/// Deserialized `StakePool` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// authority(32)  authority_bump(1)  underlying_mint(32)  underlying_vault(32)
/// lp_supply(8)  bump(1)  = 114 bytes
/// ```
#[derive(Debug, Clone)]
pub struct PoolState {
    pub underlying_mint:  Pubkey,
    pub underlying_vault: Pubkey,
    pub lp_supply:        u64,
}

/// Deserialize a `StakePool` account from raw bytes.
pub fn parse_pool(data: &[u8]) -> Result<PoolState> {
    const EXPECTED: usize = 114;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("StakePool account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(PoolState {
        underlying_mint:  read_pubkey(data, 41)?,
        underlying_vault: read_pubkey(data, 73)?,
        lp_supply:        read_u64(data, 105)?,
    })
}

// ─── Gauge ────────────────────────────────────────────────────────────────────

/// Deserialized `Gauge` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// pool(32)  authority(32)  authority_bump(1)  reward_mint(32)  reward_vault(32)
/// extra_reward_mints(8 × 32)  total_staked(8)  reward_rate(8)
/// reward_growth_global(16)  last_update_ts(8)  bump(1)  = 434 bytes
/// ```
#[derive(Debug, Clone)]
pub struct GaugeState {
    pub pool:                 Pubkey,
    /// Native reward mint — always index 0 of the reward-token list.
    pub reward_mint:          Pubkey,
    pub reward_vault:         Pubkey,
    /// Extra reward slots, zero address = unused. Order mirrors storage.
    pub extra_reward_mints:   [Pubkey; 8],
    pub total_staked:         u64,
    pub reward_rate:          u64,
    /// Cumulative reward per staked share, Q64.64 fixed-point.
    pub reward_growth_global: u128,
    pub last_update_ts:       i64,
}

impl GaugeState {
    /// The 9-entry reward-token list the adapter exposes: native mint first,
    /// then the eight slots verbatim including zero-address padding.
    pub fn reward_token_list(&self) -> [Pubkey; 9] {
        let mut list = [Pubkey::default(); 9];
        list[0] = self.reward_mint;
        list[1..].copy_from_slice(&self.extra_reward_mints);
        list
    }
}

/// Deserialize a `Gauge` account from raw bytes.
pub fn parse_gauge(data: &[u8]) -> Result<GaugeState> {
    const EXPECTED: usize = 434;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Gauge account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    let mut extra = [Pubkey::default(); 8];
    for (i, slot) in extra.iter_mut().enumerate() {
        *slot = read_pubkey(data, 137 + i * 32)?;
    }
    Ok(GaugeState {
        pool:                 read_pubkey(data, 8)?,
        reward_mint:          read_pubkey(data, 73)?,
        reward_vault:         read_pubkey(data, 105)?,
        extra_reward_mints:   extra,
        total_staked:         read_u64(data, 393)?,
        reward_rate:          read_u64(data, 401)?,
        reward_growth_global: read_u128(data, 409)?,
        last_update_ts:       read_i64(data, 425)?,
    })
}

// ─── GaugeStake ───────────────────────────────────────────────────────────────

/// Deserialized `GaugeStake` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// holder(32)  gauge(32)  amount(8)
/// reward_growth_checkpoint(16)  rewards_owed(8)  bump(1)  = 105 bytes
/// ```
#[derive(Debug, Clone)]
pub struct StakeState {
    pub holder: Pubkey,
    pub gauge:  Pubkey,
    /// Staked LP shares — the balance the gauge itself records.
    pub amount: u64,
    /// Reward-growth snapshot at last sync (for pending-reward calculation).
    pub reward_growth_checkpoint: u128,
    /// Rewards already accounted for on-chain but not yet transferred.
    pub rewards_owed: u64,
}

/// Deserialize a `GaugeStake` account from raw bytes.
pub fn parse_stake(data: &[u8]) -> Result<StakeState> {
    const EXPECTED: usize = 105;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("GaugeStake account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(StakeState {
        holder:                   read_pubkey(data, 8)?,
        gauge:                    read_pubkey(data, 40)?,
        amount:                   read_u64(data, 72)?,
        reward_growth_checkpoint: read_u128(data, 80)?,
        rewards_owed:             read_u64(data, 96)?,
    })
}

// ─── SwapRoute ────────────────────────────────────────────────────────────────

/// Deserialized `SwapRoute` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// authority(32)  authority_bump(1)  reward_mint(32)  underlying_mint(32)
/// reward_vault(32)  underlying_vault(32)  fee_rate_bps(2)  bump(1)  = 172 bytes
/// ```
#[derive(Debug, Clone)]
pub struct RouteState {
    pub reward_mint:      Pubkey,
    pub underlying_mint:  Pubkey,
    pub reward_vault:     Pubkey,
    pub underlying_vault: Pubkey,
    pub fee_rate_bps:     u16,
}

/// Deserialize a `SwapRoute` account from raw bytes.
pub fn parse_route(data: &[u8]) -> Result<RouteState> {
    const EXPECTED: usize = 172;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("SwapRoute account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(RouteState {
        reward_mint:      read_pubkey(data, 41)?,
        underlying_mint:  read_pubkey(data, 73)?,
        reward_vault:     read_pubkey(data, 105)?,
        underlying_vault: read_pubkey(data, 137)?,
        fee_rate_bps:     read_u16(data, 169)?,
    })
}

// ─── SPL token account ────────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::ParseError {
            offset: 64,
            reason: format!("Token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data[offset..offset + 32]
        .try_into()
        .map_err(|_| Error::ParseError {
            offset,
            reason: "slice too short for Pubkey (32 bytes)".into(),
        })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let b: [u8; 2] = data[offset..offset + 2]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u16".into() })?;
    Ok(u16::from_le_bytes(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for i64".into() })?;
    Ok(i64::from_le_bytes(b))
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    let b: [u8; 16] = data[offset..offset + 16]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u128".into() })?;
    Ok(u128::from_le_bytes(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::from([byte; 32])
    }

    /// Build a Gauge account image the way the program serializes it.
    fn gauge_image() -> Vec<u8> {
        let mut data = vec![0u8; 434];
        data[8..40].copy_from_slice(pk(1).as_ref());    // pool
        data[40..72].copy_from_slice(pk(2).as_ref());   // authority
        data[72] = 255;                                 // authority_bump
        data[73..105].copy_from_slice(pk(3).as_ref());  // reward_mint
        data[105..137].copy_from_slice(pk(4).as_ref()); // reward_vault
        data[137..169].copy_from_slice(pk(5).as_ref()); // extra slot 0
        // slots 1–7 stay zeroed
        data[393..401].copy_from_slice(&42u64.to_le_bytes());  // total_staked
        data[401..409].copy_from_slice(&7u64.to_le_bytes());   // reward_rate
        data[409..425].copy_from_slice(&(3u128 << 64).to_le_bytes()); // growth
        data[425..433].copy_from_slice(&1_700_000_000i64.to_le_bytes());
        data[433] = 254;                                // bump
        data
    }

    #[test]
    fn parses_gauge_and_reward_token_list() {
        let gauge = parse_gauge(&gauge_image()).unwrap();
        assert_eq!(gauge.pool, pk(1));
        assert_eq!(gauge.reward_mint, pk(3));
        assert_eq!(gauge.total_staked, 42);
        assert_eq!(gauge.reward_rate, 7);
        assert_eq!(gauge.reward_growth_global, 3u128 << 64);
        assert_eq!(gauge.last_update_ts, 1_700_000_000);

        let list = gauge.reward_token_list();
        assert_eq!(list.len(), 9);
        assert_eq!(list[0], pk(3));
        assert_eq!(list[1], pk(5));
        assert_eq!(list[8], Pubkey::default());
    }

    #[test]
    fn parses_stake() {
        let mut data = vec![0u8; 105];
        data[8..40].copy_from_slice(pk(9).as_ref());
        data[40..72].copy_from_slice(pk(8).as_ref());
        data[72..80].copy_from_slice(&1_000u64.to_le_bytes());
        data[80..96].copy_from_slice(&(5u128 << 64).to_le_bytes());
        data[96..104].copy_from_slice(&33u64.to_le_bytes());
        data[104] = 253;

        let stake = parse_stake(&data).unwrap();
        assert_eq!(stake.holder, pk(9));
        assert_eq!(stake.gauge, pk(8));
        assert_eq!(stake.amount, 1_000);
        assert_eq!(stake.reward_growth_checkpoint, 5u128 << 64);
        assert_eq!(stake.rewards_owed, 33);
    }

    #[test]
    fn truncated_accounts_are_rejected() {
        assert!(parse_pool(&[0u8; 50]).is_err());
        assert!(parse_gauge(&[0u8; 433]).is_err());
        assert!(parse_stake(&[0u8; 10]).is_err());
        assert!(parse_route(&[0u8; 171]).is_err());
        assert!(parse_token_amount(&[0u8; 64]).is_err());
    }

    #[test]
    fn token_amount_reads_offset_64() {
        let mut data = vec![0u8; 165];
        data[64..72].copy_from_slice(&123_456u64.to_le_bytes());
        assert_eq!(parse_token_amount(&data).unwrap(), 123_456);
    }
}
