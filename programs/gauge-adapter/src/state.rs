use anchor_lang::prelude::*;

use crate::constants::{MAX_EXTRA_REWARDS, REWARD_TOKEN_SLOTS};

// ─── StakePool ─────────────────────────────────────────────────────────────
// Single-asset swap pool: underlying tokens in, LP shares out.
// LP shares are tracked in the account, not via an SPL mint; the exchange
// rate is underlying_vault.amount / lp_supply.
#[account]
pub struct StakePool {
    /// PDA that owns underlying_vault
    pub authority: Pubkey,          // 32
    pub authority_bump: u8,         // 1
    pub underlying_mint: Pubkey,    // 32
    pub underlying_vault: Pubkey,   // 32
    /// Total LP shares outstanding (seed liquidity + all staked positions)
    pub lp_supply: u64,             // 8
    pub bump: u8,                   // 1
}

impl StakePool {
    // 8 discriminator + 32+1+32+32+8+1 = 114
    pub const LEN: usize = 114;
}

// ─── Gauge ─────────────────────────────────────────────────────────────────
// Staking gauge bound to one pool. Streams the native reward token to
// stakers pro-rata via a Q64.64 per-share accumulator.
#[account]
pub struct Gauge {
    pub pool: Pubkey,                                    // 32
    /// PDA that owns reward_vault
    pub authority: Pubkey,                               // 32
    pub authority_bump: u8,                              // 1
    /// Native reward mint — always index 0 of the reward-token list
    pub reward_mint: Pubkey,                             // 32
    pub reward_vault: Pubkey,                            // 32
    /// Extra reward slots; Pubkey::default() marks an unused slot
    pub extra_reward_mints: [Pubkey; MAX_EXTRA_REWARDS], // 256
    /// Sum of all GaugeStake amounts
    pub total_staked: u64,                               // 8
    /// Reward tokens streamed per second, split pro-rata across stakers
    pub reward_rate: u64,                                // 8
    /// Cumulative reward per staked share, Q64.64 fixed-point
    pub reward_growth_global: u128,                      // 16
    pub last_update_ts: i64,                             // 8
    pub bump: u8,                                        // 1
}

impl Gauge {
    // 8 discriminator + 32+32+1+32+32+256+8+8+16+8+1 = 434
    pub const LEN: usize = 434;

    /// The full reward-token list: native reward mint first, then the eight
    /// extra slots verbatim (unused slots stay Pubkey::default()).
    pub fn reward_token_list(&self) -> [Pubkey; REWARD_TOKEN_SLOTS] {
        let mut list = [Pubkey::default(); REWARD_TOKEN_SLOTS];
        list[0] = self.reward_mint;
        list[1..].copy_from_slice(&self.extra_reward_mints);
        list
    }
}

// ─── GaugeStake ────────────────────────────────────────────────────────────
// One holder's staked LP shares in a single gauge. This is the position the
// adapter reports; the adapter itself stores nothing.
#[account]
pub struct GaugeStake {
    pub holder: Pubkey,                  // 32
    pub gauge: Pubkey,                   // 32
    /// Staked LP shares
    pub amount: u64,                     // 8
    /// Reward-growth snapshot at last sync
    pub reward_growth_checkpoint: u128,  // 16
    /// Accrued but unclaimed native reward tokens
    pub rewards_owed: u64,               // 8
    pub bump: u8,                        // 1
}

impl GaugeStake {
    // 8 + 32+32+8+16+8+1 = 105
    pub const LEN: usize = 105;
}

// ─── SwapRoute ─────────────────────────────────────────────────────────────
// Constant-product reward → underlying exchange used only by harvest.
// Reserves are seeded by plain SPL transfers into the vaults.
#[account]
pub struct SwapRoute {
    /// PDA that owns both vaults
    pub authority: Pubkey,          // 32
    pub authority_bump: u8,         // 1
    pub reward_mint: Pubkey,        // 32
    pub underlying_mint: Pubkey,    // 32
    pub reward_vault: Pubkey,       // 32
    pub underlying_vault: Pubkey,   // 32
    /// Swap fee in basis points (e.g. 30 = 0.30 %)
    pub fee_rate_bps: u16,          // 2
    pub bump: u8,                   // 1
}

impl SwapRoute {
    // 8 discriminator + 32+1+32+32+32+32+2+1 = 172
    pub const LEN: usize = 172;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn reward_token_list_has_nine_entries_native_first() {
        let mut gauge = Gauge {
            pool: pk(1),
            authority: pk(2),
            authority_bump: 255,
            reward_mint: pk(3),
            reward_vault: pk(4),
            extra_reward_mints: [Pubkey::default(); MAX_EXTRA_REWARDS],
            total_staked: 0,
            reward_rate: 1,
            reward_growth_global: 0,
            last_update_ts: 0,
            bump: 254,
        };
        gauge.extra_reward_mints[0] = pk(5);
        gauge.extra_reward_mints[3] = pk(6);

        let list = gauge.reward_token_list();
        assert_eq!(list.len(), 9);
        assert_eq!(list[0], pk(3));
        assert_eq!(list[1], pk(5));
        assert_eq!(list[4], pk(6));
        // Unused slots are reported verbatim as the zero address.
        assert_eq!(list[2], Pubkey::default());
        assert_eq!(list[8], Pubkey::default());
    }

    #[test]
    fn slot_order_mirrors_gauge_storage() {
        let mut extra = [Pubkey::default(); MAX_EXTRA_REWARDS];
        for (i, slot) in extra.iter_mut().enumerate() {
            *slot = pk(10 + i as u8);
        }
        let gauge = Gauge {
            pool: pk(1),
            authority: pk(2),
            authority_bump: 255,
            reward_mint: pk(9),
            reward_vault: pk(4),
            extra_reward_mints: extra,
            total_staked: 0,
            reward_rate: 1,
            reward_growth_global: 0,
            last_update_ts: 0,
            bump: 254,
        };
        let list = gauge.reward_token_list();
        for i in 0..MAX_EXTRA_REWARDS {
            assert_eq!(list[i + 1], gauge.extra_reward_mints[i]);
        }
    }
}
