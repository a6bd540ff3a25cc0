//! Single-curve 1D lookup table.
//!
//! A [`Lut1D`] stores one transfer curve shared by all three channels.
//! Formats that are inherently three-channel (such as CSP) promote it to a
//! [`Lut3x1D`](crate::Lut3x1D) before serialization.

use crate::lut3x1d::{Domain, Lut3x1D};
use crate::{LutError, LutResult};

/// A one-dimensional lookup table with a single shared curve.
///
/// # Structure
///
/// - `table`: the sampled output values
/// - `domain`: the `[min, max]` input range the samples span
/// - `name` / `comments`: metadata carried verbatim through file round-trips
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1D {
    /// Sampled output values.
    pub table: Vec<f32>,
    /// Input domain as `[min, max]`.
    pub domain: [f32; 2],
    /// LUT title.
    pub name: String,
    /// Free-form comment lines.
    pub comments: Vec<String>,
}

impl Lut1D {
    /// Creates a LUT from a sampled curve.
    pub fn new(table: Vec<f32>, name: impl Into<String>, domain: [f32; 2]) -> LutResult<Self> {
        if table.is_empty() {
            return Err(LutError::UnsupportedShape("1D table must not be empty".into()));
        }
        Ok(Self {
            table,
            domain,
            name: name.into(),
            comments: Vec::new(),
        })
    }

    /// Creates an identity curve with `size` samples over `domain`.
    pub fn linear(size: usize, domain: [f32; 2]) -> Self {
        let table = crate::rows::linspace(domain[0], domain[1], size).collect();
        Self {
            table,
            domain,
            name: String::new(),
            comments: Vec::new(),
        }
    }

    /// Number of samples in the curve.
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Replicates the curve across three channels.
    pub fn to_3x1d(&self) -> Lut3x1D {
        Lut3x1D {
            table: self.table.iter().map(|&v| [v, v, v]).collect(),
            domain: Domain::Range {
                min: [self.domain[0]; 3],
                max: [self.domain[1]; 3],
            },
            name: self.name.clone(),
            comments: self.comments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_table() {
        let lut = Lut1D::linear(5, [0.0, 1.0]);
        assert_eq!(lut.size(), 5);
        assert_eq!(lut.table[0], 0.0);
        assert_eq!(lut.table[4], 1.0);
    }

    #[test]
    fn empty_table_rejected() {
        assert!(Lut1D::new(Vec::new(), "bad", [0.0, 1.0]).is_err());
    }

    #[test]
    fn promotes_to_three_channels() {
        let mut lut = Lut1D::linear(3, [0.0, 2.0]);
        lut.name = "ramp".into();
        let rgb = lut.to_3x1d();
        assert_eq!(rgb.size(), 3);
        assert_eq!(rgb.table[2], [2.0, 2.0, 2.0]);
        assert_eq!(rgb.name, "ramp");
        assert!(!rgb.is_domain_explicit());
    }
}
