use serde::{Deserialize, Serialize};

/// Protocol constants seeding the constant-product bonding curve of a new
/// token. These must match the receiving service's economics model exactly;
/// a divergence silently skews what the user is actually charged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Fee charged on top of the base cost, in basis points (345 = 3.45%).
    pub fee_bps: u64,
    /// Virtual base-asset reserve, in smallest units.
    pub virtual_base_reserve: u64,
    /// Virtual token reserve, in smallest units.
    pub virtual_token_reserve: u64,
    /// Smallest units per whole native unit.
    pub unit_scale: u64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            fee_bps: 345,
            virtual_base_reserve: 30_000_000_001,
            virtual_token_reserve: 1_073_000_000_000_000,
            unit_scale: 1_000_000_000,
        }
    }
}
