//! Three-channel 1D lookup table.
//!
//! A [`Lut3x1D`] holds an independent curve per channel. The input domain
//! is either a shared `[min, max]` pair per channel (implicit, linearly
//! spaced samples) or an explicit per-sample position array, which is what
//! shaper curves with non-uniform spacing use.
//!
//! # Ragged channels
//!
//! When the three curves have different lengths on disk they are stored in
//! one rectangular buffer, right-padded with NaN. NaN is a sentinel here,
//! never a legitimate sample; [`Domain::channel_len`] recovers the real
//! per-channel length by counting the padding back off.

use crate::{LutError, LutResult};

/// Input domain of a [`Lut3x1D`].
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Shared `[min, max]` per channel; sample positions are linearly
    /// spaced over the range.
    Range {
        /// Per-channel domain minimum.
        min: [f32; 3],
        /// Per-channel domain maximum.
        max: [f32; 3],
    },
    /// Explicit per-sample input positions, one `[r, g, b]` row per
    /// sample, NaN-padded on the right per channel.
    Explicit(Vec<[f32; 3]>),
}

impl Domain {
    /// Unit range `[0, 1]` on all channels.
    pub fn unit() -> Self {
        Domain::Range {
            min: [0.0; 3],
            max: [1.0; 3],
        }
    }

    /// Real sample count of `channel`, with trailing NaN padding counted off.
    ///
    /// For a range domain the length is not stored here; callers use the
    /// table size instead.
    pub fn channel_len(&self, channel: usize) -> Option<usize> {
        match self {
            Domain::Range { .. } => None,
            Domain::Explicit(rows) => {
                let nans = rows.iter().filter(|row| row[channel].is_nan()).count();
                Some(rows.len() - nans)
            }
        }
    }

    /// First and last stored row, as per-channel `(min, max)` bounds.
    ///
    /// For an explicit domain this is the first two sample rows, which is
    /// what the CSP 1D writer emits as the synthetic pre-LUT range.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        match self {
            Domain::Range { min, max } => (*min, *max),
            Domain::Explicit(rows) => (rows[0], rows[1]),
        }
    }
}

/// A three-channel one-dimensional lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3x1D {
    /// One `[r, g, b]` output row per sample; ragged tables carry trailing
    /// NaN padding per channel.
    pub table: Vec<[f32; 3]>,
    /// Input domain.
    pub domain: Domain,
    /// LUT title.
    pub name: String,
    /// Free-form comment lines.
    pub comments: Vec<String>,
}

impl Lut3x1D {
    /// Creates a LUT from a table and domain.
    pub fn new(
        table: Vec<[f32; 3]>,
        name: impl Into<String>,
        domain: Domain,
    ) -> LutResult<Self> {
        if table.len() < 2 {
            return Err(LutError::UnsupportedShape(
                "3x1D table needs at least 2 samples".into(),
            ));
        }
        if let Domain::Explicit(rows) = &domain {
            if rows.len() != table.len() {
                return Err(LutError::UnsupportedShape(format!(
                    "explicit domain has {} rows, table has {}",
                    rows.len(),
                    table.len()
                )));
            }
        }
        Ok(Self {
            table,
            domain,
            name: name.into(),
            comments: Vec::new(),
        })
    }

    /// Creates per-channel identity ramps with `size` samples over the
    /// given range domain.
    pub fn linear(size: usize, min: [f32; 3], max: [f32; 3]) -> Self {
        let table = (0..size)
            .map(|i| {
                let t = i as f32 / (size - 1) as f32;
                [
                    min[0] + t * (max[0] - min[0]),
                    min[1] + t * (max[1] - min[1]),
                    min[2] + t * (max[2] - min[2]),
                ]
            })
            .collect();
        Self {
            table,
            domain: Domain::Range { min, max },
            name: String::new(),
            comments: Vec::new(),
        }
    }

    /// Number of sample rows, padding included.
    #[inline]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Whether the domain stores explicit per-sample positions.
    #[inline]
    pub fn is_domain_explicit(&self) -> bool {
        matches!(self.domain, Domain::Explicit(_))
    }

    /// Real sample count of `channel`: padded tables report the unpadded
    /// length, everything else the table size.
    pub fn channel_size(&self, channel: usize) -> usize {
        self.domain.channel_len(channel).unwrap_or_else(|| self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_channel_lengths() {
        let nan = f32::NAN;
        let domain = Domain::Explicit(vec![
            [0.0, 0.0, 0.0],
            [0.5, 0.4, 1.0],
            [1.0, 1.0, nan],
            [nan, 2.0, nan],
        ]);
        assert_eq!(domain.channel_len(0), Some(3));
        assert_eq!(domain.channel_len(1), Some(4));
        assert_eq!(domain.channel_len(2), Some(2));
    }

    #[test]
    fn range_domain_has_no_stored_length() {
        assert_eq!(Domain::unit().channel_len(0), None);
        let lut = Lut3x1D::linear(8, [0.0; 3], [1.0; 3]);
        assert_eq!(lut.channel_size(0), 8);
    }

    #[test]
    fn explicit_domain_must_match_table() {
        let rows = vec![[0.0; 3], [1.0; 3]];
        let table = vec![[0.0; 3], [0.5; 3], [1.0; 3]];
        assert!(Lut3x1D::new(table, "bad", Domain::Explicit(rows)).is_err());
    }

    #[test]
    fn linear_spans_domain() {
        let lut = Lut3x1D::linear(3, [-0.1, -0.2, -0.4], [1.5, 3.0, 6.0]);
        assert_eq!(lut.table[0], [-0.1, -0.2, -0.4]);
        assert_eq!(lut.table[2], [1.5, 3.0, 6.0]);
        assert_eq!(lut.domain.bounds().1, [1.5, 3.0, 6.0]);
    }
}
