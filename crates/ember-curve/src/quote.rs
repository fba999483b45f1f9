use serde::{Deserialize, Serialize};

use crate::params::CurveParams;

/// Slippage buffer applied to the user's declared total spend: the ceiling
/// authorizes up to 110% of it.
const SLIPPAGE_NUM: u128 = 110;
const SLIPPAGE_DEN: u128 = 100;

const BPS_DENOMINATOR: u128 = 10_000;

/// Result of one quote: the token output the user can expect and the
/// maximum base-asset spend they authorize. Both in smallest units.
/// Recomputed whenever the spend amount changes, never mutated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveQuote {
    pub token_out: u64,
    pub max_base_cost: u64,
}

impl CurveQuote {
    pub const ZERO: CurveQuote = CurveQuote {
        token_out: 0,
        max_base_cost: 0,
    };
}

impl CurveParams {
    /// Quote a first buy for a desired total spend `S` in whole native
    /// units.
    ///
    /// The service charges its fee on top of a base cost, so the base is
    /// recovered by inverting the fee addition: `base = total * 10000 /
    /// (10000 + fee_bps)`, flooring so the base is never overstated relative
    /// to what the service will charge. The constant-product formula then
    /// maps the base to tokens, and the ceiling inflates the original total
    /// (not the recovered base) by the slippage buffer.
    ///
    /// Everything past the unit conversion is u128 floor division, so the
    /// result is reproducible bit-for-bit across platforms. A non-positive
    /// or non-finite spend is not an error: it quotes `(0, 0)`, the
    /// definition of "no purchase requested".
    pub fn quote_spend(&self, spend: f64) -> CurveQuote {
        if !spend.is_finite() || spend <= 0.0 {
            return CurveQuote::ZERO;
        }

        // The sole float step. The `as` cast saturates, so absurd spends
        // clamp instead of wrapping.
        let total = (spend * self.unit_scale as f64).floor() as u64 as u128;

        let base = total * BPS_DENOMINATOR / (BPS_DENOMINATOR + self.fee_bps as u128);
        let token_out = base * self.virtual_token_reserve as u128 / self.virtual_base_reserve as u128;
        let max_base_cost = total * SLIPPAGE_NUM / SLIPPAGE_DEN;

        CurveQuote {
            token_out: u64::try_from(token_out).unwrap_or(u64::MAX),
            max_base_cost: u64::try_from(max_base_cost).unwrap_or(u64::MAX),
        }
    }
}
