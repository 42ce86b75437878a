//! American Wire Gauge Table
//!
//! AWG designations mapped to conductor cross-section in mm², ascending by
//! area. Used to translate North American gauge sizes into the metric
//! cross-sections the cable tables are keyed on.

use serde::Serialize;

use crate::errors::CalcResult;
use crate::validation;

/// One AWG size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AwgGauge {
    /// Gauge designation, e.g. "12" or "0000 (4/0)"
    pub awg: &'static str,
    /// Cross-sectional area (mm²)
    pub mm2: f64,
}

const fn gauge(awg: &'static str, mm2: f64) -> AwgGauge {
    AwgGauge { awg, mm2 }
}

/// AWG sizes, ascending by area
pub static AWG_TABLE: &[AwgGauge] = &[
    gauge("26", 0.129),
    gauge("24", 0.205),
    gauge("22", 0.326),
    gauge("20", 0.518),
    gauge("19", 0.653),
    gauge("18", 0.823),
    gauge("17", 1.04),
    gauge("16", 1.31),
    gauge("15", 1.65),
    gauge("14", 2.08),
    gauge("13", 2.62),
    gauge("12", 3.31),
    gauge("11", 4.17),
    gauge("10", 5.26),
    gauge("9", 6.63),
    gauge("8", 8.37),
    gauge("7", 10.5),
    gauge("6", 13.3),
    gauge("5", 16.8),
    gauge("4", 21.2),
    gauge("3", 26.7),
    gauge("2", 33.6),
    gauge("1", 42.4),
    gauge("0 (1/0)", 53.5),
    gauge("00 (2/0)", 67.4),
    gauge("000 (3/0)", 85.0),
    gauge("0000 (4/0)", 107.2),
];

/// Cross-section of an AWG designation.
///
/// Accepts the full label ("0000 (4/0)") or the short forms "4/0" / "0000".
pub fn awg_to_mm2(awg: &str) -> Option<f64> {
    let wanted = awg.trim();
    AWG_TABLE
        .iter()
        .find(|g| {
            g.awg == wanted
                || g.awg.split_whitespace().next() == Some(wanted)
                || g.awg.contains(&format!("({})", wanted))
        })
        .map(|g| g.mm2)
}

/// AWG size with the closest cross-section to `mm2`.
///
/// On an exact tie the smaller gauge area wins.
pub fn nearest_awg(mm2: f64) -> CalcResult<AwgGauge> {
    validation::positive("mm2", mm2)?;
    let mut best = AWG_TABLE[0];
    for g in AWG_TABLE.iter().skip(1) {
        if (g.mm2 - mm2).abs() < (best.mm2 - mm2).abs() {
            best = *g;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ascending() {
        assert!(AWG_TABLE.windows(2).all(|w| w[0].mm2 < w[1].mm2));
    }

    #[test]
    fn test_awg_to_mm2() {
        assert_eq!(awg_to_mm2("12"), Some(3.31));
        assert_eq!(awg_to_mm2("4/0"), Some(107.2));
        assert_eq!(awg_to_mm2("0000"), Some(107.2));
        assert_eq!(awg_to_mm2("0000 (4/0)"), Some(107.2));
        assert_eq!(awg_to_mm2("21"), None);
    }

    #[test]
    fn test_nearest_awg() {
        assert_eq!(nearest_awg(2.5).unwrap().awg, "13");
        assert_eq!(nearest_awg(4.0).unwrap().awg, "11");
        assert_eq!(nearest_awg(500.0).unwrap().awg, "0000 (4/0)");
        assert!(nearest_awg(0.0).is_err());
    }
}
