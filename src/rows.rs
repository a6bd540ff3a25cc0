//! Numeric row utilities shared by the text LUT codecs.
//!
//! CSP files are line-oriented: every numeric section is a whitespace
//! separated row of floats or integers. These helpers keep the splitting
//! and fixed-decimal joining in one place.

use crate::{LutError, LutResult};

/// Splits a line into floats.
pub fn parse_floats(line: &str) -> LutResult<Vec<f32>> {
    line.split_whitespace()
        .map(|s| {
            s.parse::<f32>()
                .map_err(|_| LutError::Parse(format!("invalid number: {s}")))
        })
        .collect()
}

/// Splits a line into unsigned integers.
pub fn parse_ints(line: &str) -> LutResult<Vec<usize>> {
    line.split_whitespace()
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| LutError::Parse(format!("invalid integer: {s}")))
        })
        .collect()
}

/// Joins values into a row with fixed decimal precision.
pub fn format_row(values: &[f32], decimals: usize) -> String {
    values
        .iter()
        .map(|v| format!("{v:.decimals$}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `n` evenly spaced samples over `[min, max]`.
///
/// `n` must be at least 2; the endpoints are always included.
pub fn linspace(min: f32, max: f32, n: usize) -> impl Iterator<Item = f32> {
    debug_assert!(n >= 2);
    (0..n).map(move |i| min + i as f32 * (max - min) / (n - 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_floats_row() {
        let row = parse_floats(" 0.0  0.5 1.0 ").unwrap();
        assert_eq!(row, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn parse_floats_rejects_garbage() {
        assert!(parse_floats("0.0 abc").is_err());
    }

    #[test]
    fn parse_ints_row() {
        assert_eq!(parse_ints("2 3 4").unwrap(), vec![2, 3, 4]);
        assert!(parse_ints("2.5").is_err());
    }

    #[test]
    fn format_row_fixed_decimals() {
        assert_eq!(format_row(&[0.0, 1.0], 7), "0.0000000 1.0000000");
        assert_eq!(format_row(&[0.125], 3), "0.125");
    }

    #[test]
    fn linspace_endpoints() {
        let v: Vec<f32> = linspace(-0.5, 1.5, 5).collect();
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], -0.5);
        assert_eq!(v[4], 1.5);
        assert!((v[2] - 0.5).abs() < 1e-6);
    }
}
