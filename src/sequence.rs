//! LUT sequences and the top-level [`Lut`] value.
//!
//! A [`LutSequence`] chains two LUTs, applied first then second. CSP uses
//! it for "shaper + cube" pipelines (a per-channel pre-transform feeding a
//! dense 3D table) and for "pre-LUT + table" pairs of 1D curves.

use crate::{Lut1D, Lut3D, Lut3x1D};

/// An ordered pair of LUTs, applied `first` then `second`.
#[derive(Debug, Clone, PartialEq)]
pub struct LutSequence {
    /// Transform applied first.
    pub first: Box<Lut>,
    /// Transform applied second.
    pub second: Box<Lut>,
}

impl LutSequence {
    /// Creates a sequence from two LUT values.
    pub fn new(first: impl Into<Lut>, second: impl Into<Lut>) -> Self {
        Self {
            first: Box::new(first.into()),
            second: Box::new(second.into()),
        }
    }
}

/// Any LUT shape the CSP codec reads or writes.
///
/// [`read_csp`](crate::read_csp) returns `Lut3x1D`, `Lut3D` or `Sequence`;
/// [`write_csp`](crate::write_csp) additionally accepts a bare `Lut1D`,
/// which the writer promotes to three channels.
#[derive(Debug, Clone, PartialEq)]
pub enum Lut {
    /// Single shared curve.
    Lut1D(Lut1D),
    /// Independent curve per channel.
    Lut3x1D(Lut3x1D),
    /// Dense 3D table.
    Lut3D(Lut3D),
    /// Two-stage pipeline.
    Sequence(LutSequence),
}

impl From<Lut1D> for Lut {
    fn from(lut: Lut1D) -> Self {
        Lut::Lut1D(lut)
    }
}

impl From<Lut3x1D> for Lut {
    fn from(lut: Lut3x1D) -> Self {
        Lut::Lut3x1D(lut)
    }
}

impl From<Lut3D> for Lut {
    fn from(lut: Lut3D) -> Self {
        Lut::Lut3D(lut)
    }
}

impl From<LutSequence> for Lut {
    fn from(seq: LutSequence) -> Self {
        Lut::Sequence(seq)
    }
}
