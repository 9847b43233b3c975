//! Client-side mirrors of the on-chain share and reward math.
//!
//! Every function here reproduces the program's integer arithmetic exactly,
//! so previews computed off-chain match what a transaction would settle.

use crate::error::{Error, Result};

/// Q64.64 fixed-point scale used by the reward-growth accumulator.
pub const Q64: u128 = 1u128 << 64;

/// Basis-points denominator for route fees.
pub const BPS_DENOMINATOR: u128 = 10_000;

/// LP shares minted for a deposit at the pool's current exchange rate.
///
/// Mirrors the on-chain rule: pro-rata against the live reserve, floor
/// division. Fails with [`Error::NoLiquidity`] when the pool is unseeded,
/// because there is no exchange rate to price the deposit against.
pub fn shares_for_deposit(amount: u64, lp_supply: u64, reserve: u64) -> Result<u64> {
    if lp_supply == 0 || reserve == 0 {
        return Err(Error::NoLiquidity);
    }
    let shares = (amount as u128)
        .checked_mul(lp_supply as u128)
        .ok_or(Error::MathOverflow)?
        / reserve as u128;
    u64::try_from(shares).map_err(|_| Error::MathOverflow)
}

/// Underlying redeemed for burning `shares` at the current exchange rate.
pub fn amount_for_shares(shares: u64, reserve: u64, lp_supply: u64) -> Result<u64> {
    if lp_supply == 0 {
        return Err(Error::NoLiquidity);
    }
    let amount = (shares as u128)
        .checked_mul(reserve as u128)
        .ok_or(Error::MathOverflow)?
        / lp_supply as u128;
    u64::try_from(amount).map_err(|_| Error::MathOverflow)
}

/// Reward growth the gauge would carry if synced at `now`.
///
/// Streams `reward_rate` tokens per second across all staked shares,
/// accumulating in Q64.64 per-share units. A gauge with nothing staked
/// advances its clock without accruing, and a clock that appears to run
/// backwards is ignored. Mirrors the program's divide-first decomposition
/// so large totals cannot overflow the intermediate product.
pub fn projected_reward_growth(
    reward_growth_global: u128,
    reward_rate: u64,
    total_staked: u64,
    last_update_ts: i64,
    now: i64,
) -> Result<u128> {
    if now <= last_update_ts || total_staked == 0 {
        return Ok(reward_growth_global);
    }
    let elapsed = (now - last_update_ts) as u128;
    let accrued = (reward_rate as u128)
        .checked_mul(elapsed)
        .ok_or(Error::MathOverflow)?;
    let total = total_staked as u128;
    let growth = (accrued / total)
        .checked_mul(Q64)
        .and_then(|whole| whole.checked_add((accrued % total) * Q64 / total))
        .ok_or(Error::MathOverflow)?;
    reward_growth_global.checked_add(growth).ok_or(Error::MathOverflow)
}

/// Rewards a position could claim right now: the on-chain `rewards_owed`
/// plus everything accrued since its checkpoint.
pub fn pending_rewards(
    stake_amount: u64,
    rewards_owed: u64,
    reward_growth_checkpoint: u128,
    reward_growth_global: u128,
) -> Result<u64> {
    let delta = reward_growth_global
        .checked_sub(reward_growth_checkpoint)
        .ok_or(Error::MathOverflow)?;
    let accrued = (stake_amount as u128)
        .checked_mul(delta)
        .ok_or(Error::MathOverflow)?
        >> 64;
    let accrued = u64::try_from(accrued).map_err(|_| Error::MathOverflow)?;
    rewards_owed.checked_add(accrued).ok_or(Error::MathOverflow)
}

/// Constant-product output for converting rewards through a route, after
/// the route's fee. `None` when the route cannot quote: empty reserves or
/// an input so small the output rounds to zero.
pub fn route_amount_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_rate_bps: u16,
) -> Result<Option<u64>> {
    if reserve_in == 0 || reserve_out == 0 || amount_in == 0 {
        return Ok(None);
    }
    // Fee is floored first, then the net amount moves the curve. Same
    // decomposition as settlement, so the quote never drifts by a unit.
    let lp_fee = (amount_in as u128)
        .checked_mul(fee_rate_bps as u128)
        .ok_or(Error::MathOverflow)?
        / BPS_DENOMINATOR;
    let after_fees = amount_in as u128 - lp_fee;
    let amount_out = (reserve_out as u128)
        .checked_mul(after_fees)
        .ok_or(Error::MathOverflow)?
        / (reserve_in as u128)
            .checked_add(after_fees)
            .ok_or(Error::MathOverflow)?;
    let out = u64::try_from(amount_out).map_err(|_| Error::MathOverflow)?;
    if out == 0 {
        return Ok(None);
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_follow_exchange_rate() {
        // 2000 reserve backing 1000 shares: rate is 2 underlying per share.
        assert_eq!(shares_for_deposit(500, 1_000, 2_000).unwrap(), 250);
        assert_eq!(amount_for_shares(250, 2_000, 1_000).unwrap(), 500);
    }

    #[test]
    fn unseeded_pool_has_no_rate() {
        assert!(matches!(shares_for_deposit(500, 0, 0), Err(Error::NoLiquidity)));
        assert!(matches!(amount_for_shares(500, 0, 0), Err(Error::NoLiquidity)));
    }

    #[test]
    fn growth_streams_rate_over_time() {
        // 5 tokens/sec over 60s across 100 staked = 3 whole tokens per share.
        let growth = projected_reward_growth(0, 5, 100, 1_000, 1_060).unwrap();
        assert_eq!(growth, 3 * Q64);
    }

    #[test]
    fn growth_frozen_without_stakers_or_time() {
        assert_eq!(projected_reward_growth(7 * Q64, 5, 0, 1_000, 2_000).unwrap(), 7 * Q64);
        assert_eq!(projected_reward_growth(7 * Q64, 5, 100, 1_000, 1_000).unwrap(), 7 * Q64);
        // Clock regression is ignored, not an error.
        assert_eq!(projected_reward_growth(7 * Q64, 5, 100, 1_000, 900).unwrap(), 7 * Q64);
    }

    #[test]
    fn pending_combines_owed_and_accrued() {
        // 100 shares × 3 per-share growth since checkpoint, plus 10 banked.
        assert_eq!(pending_rewards(100, 10, Q64, 4 * Q64).unwrap(), 310);
    }

    #[test]
    fn pending_is_zero_at_checkpoint() {
        assert_eq!(pending_rewards(100, 0, 4 * Q64, 4 * Q64).unwrap(), 0);
    }

    #[test]
    fn route_quote_matches_constant_product() {
        // Same figures the program settles: 1000 in, balanced 10000/10000, 30 bps.
        assert_eq!(route_amount_out(1_000, 10_000, 10_000, 30).unwrap(), Some(906));
    }

    #[test]
    fn fee_floor_matches_settlement() {
        // 199 in at 99 bps: the fee floors to 1, net 198 moves the curve.
        // Keeping the fee in a scaled numerator instead would quote 193,
        // one unit under what the program settles.
        assert_eq!(route_amount_out(199, 10_000, 10_000, 99).unwrap(), Some(194));
    }

    #[test]
    fn route_declines_when_it_cannot_quote() {
        assert_eq!(route_amount_out(1_000, 0, 10_000, 30).unwrap(), None);
        assert_eq!(route_amount_out(1_000, 10_000, 0, 30).unwrap(), None);
        assert_eq!(route_amount_out(0, 10_000, 10_000, 30).unwrap(), None);
        // Dust input that floors to zero output.
        assert_eq!(route_amount_out(1, 1_000_000_000, 10, 30).unwrap(), None);
    }
}
