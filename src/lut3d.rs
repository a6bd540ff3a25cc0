//! Dense 3D lookup table.
//!
//! A [`Lut3D`] maps RGB input to RGB output through a cube (or box, the
//! three axes may differ) of color values.

use crate::{LutError, LutResult};

/// A three-dimensional lookup table.
///
/// # Layout
///
/// Entries are stored in file row order, first axis fastest:
/// `index = r + size[0] * (g + size[1] * b)`. This is the column-major
/// (Fortran) flattening CSP uses on disk, so table rows serialize without
/// reordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3D {
    /// Flattened `[r, g, b]` output entries.
    pub table: Vec<[f32; 3]>,
    /// Grid size per axis `[size_r, size_g, size_b]`.
    pub size: [usize; 3],
    /// Per-channel input domain minimum.
    pub domain_min: [f32; 3],
    /// Per-channel input domain maximum.
    pub domain_max: [f32; 3],
    /// LUT title.
    pub name: String,
    /// Free-form comment lines.
    pub comments: Vec<String>,
}

impl Lut3D {
    /// Creates a LUT from flattened data in first-axis-fastest order.
    pub fn from_table(table: Vec<[f32; 3]>, size: [usize; 3]) -> LutResult<Self> {
        let expected = size[0] * size[1] * size[2];
        if table.len() != expected {
            return Err(LutError::Parse(format!(
                "table size mismatch: {}x{}x{} declares {} entries, found {}",
                size[0],
                size[1],
                size[2],
                expected,
                table.len()
            )));
        }
        Ok(Self {
            table,
            size,
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            name: String::new(),
            comments: Vec::new(),
        })
    }

    /// Creates an identity (pass-through) cube with `size` points per axis.
    pub fn identity(size: usize) -> Self {
        let mut table = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    let n = (size - 1) as f32;
                    table.push([r as f32 / n, g as f32 / n, b as f32 / n]);
                }
            }
        }
        Self {
            table,
            size: [size; 3],
            domain_min: [0.0; 3],
            domain_max: [1.0; 3],
            name: String::new(),
            comments: Vec::new(),
        }
    }

    /// Sets the input domain.
    pub fn with_domain(mut self, min: [f32; 3], max: [f32; 3]) -> Self {
        self.domain_min = min;
        self.domain_max = max;
        self
    }

    /// Total number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.size[0] * self.size[1] * self.size[2]
    }

    /// Index of grid position `(r, g, b)`.
    #[inline]
    pub fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size[0] * (g + self.size[1] * b)
    }
}
