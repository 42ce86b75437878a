//! Luminaire Utilization Factors
//!
//! Utilization factor (UF) for a general-purpose ceiling luminaire, indexed
//! by room index bucket and surface reflectance class. Rows follow the usual
//! catalogue presentation: room index 0.6 to 5.0, reflectance combinations
//! collapsed into three classes.
//!
//! | k    | low  | medium | high |
//! |------|------|--------|------|
//! | 0.60 | 0.28 | 0.33   | 0.39 |
//! | 1.00 | 0.39 | 0.45   | 0.51 |
//! | 2.00 | 0.52 | 0.58   | 0.64 |
//! | 5.00 | 0.66 | 0.71   | 0.76 |

use serde::{Deserialize, Serialize};

/// Surface reflectance class of ceiling/walls/floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Reflectance {
    /// Dark surfaces (ceiling ~0.5, walls ~0.3, floor ~0.1)
    Low,
    /// Typical office (ceiling ~0.7, walls ~0.5, floor ~0.2)
    #[default]
    Medium,
    /// White surfaces (ceiling ~0.8, walls ~0.7, floor ~0.3)
    High,
}

impl Reflectance {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 3] = ["low", "medium", "high"];

    fn column(&self) -> usize {
        match self {
            Reflectance::Low => 0,
            Reflectance::Medium => 1,
            Reflectance::High => 2,
        }
    }
}

/// One row of the utilization-factor table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationRow {
    /// Room index bucket
    pub room_index: f64,
    /// UF for low, medium, high reflectance
    pub factors: [f64; 3],
}

const fn row(room_index: f64, low: f64, medium: f64, high: f64) -> UtilizationRow {
    UtilizationRow {
        room_index,
        factors: [low, medium, high],
    }
}

/// Utilization factors, ascending by room index
pub static UTILIZATION_FACTORS: &[UtilizationRow] = &[
    row(0.60, 0.28, 0.33, 0.39),
    row(0.80, 0.34, 0.40, 0.46),
    row(1.00, 0.39, 0.45, 0.51),
    row(1.25, 0.43, 0.49, 0.55),
    row(1.50, 0.47, 0.53, 0.59),
    row(2.00, 0.52, 0.58, 0.64),
    row(2.50, 0.56, 0.62, 0.67),
    row(3.00, 0.59, 0.65, 0.70),
    row(4.00, 0.63, 0.69, 0.74),
    row(5.00, 0.66, 0.71, 0.76),
];

/// Room index bucket nearest to `room_index`.
///
/// Values outside the table snap to the first or last bucket. When the value
/// is exactly halfway between two buckets, the lower bucket is used.
pub fn nearest_row(room_index: f64) -> &'static UtilizationRow {
    let table = UTILIZATION_FACTORS;
    let upper = table.partition_point(|r| r.room_index < room_index);
    if upper == 0 {
        return &table[0];
    }
    if upper == table.len() {
        return &table[table.len() - 1];
    }
    let below = &table[upper - 1];
    let above = &table[upper];
    if above.room_index - room_index < room_index - below.room_index {
        above
    } else {
        below
    }
}

/// Utilization factor for a room index and reflectance class.
///
/// Returns the bucket actually used alongside the factor.
///
/// # Example
/// ```rust
/// use amp_core::tables::lighting::{utilization_factor, Reflectance};
///
/// let (bucket, uf) = utilization_factor(1.1, Reflectance::Medium);
/// assert_eq!(bucket, 1.0);
/// assert_eq!(uf, 0.45);
/// ```
pub fn utilization_factor(room_index: f64, reflectance: Reflectance) -> (f64, f64) {
    let row = nearest_row(room_index);
    (row.room_index, row.factors[reflectance.column()])
}
