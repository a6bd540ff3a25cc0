//! # csp-lut
//!
//! Reading and writing of Cinespace `.csp` color Look-Up-Tables.
//!
//! The CSP grammar is one text format carrying four structurally different
//! LUT shapes: a shared 1D curve, three per-channel curves, a dense 3D
//! cube, and a two-stage shaper-plus-cube pipeline. This crate provides
//! the typed representations and the bidirectional codec between them and
//! the on-disk format.
//!
//! # LUT types
//!
//! - [`Lut1D`] - a single curve shared by all channels
//! - [`Lut3x1D`] - independent per-channel curves, optionally with
//!   explicit (non-uniform, possibly ragged) sample positions
//! - [`Lut3D`] - a dense color cube
//! - [`LutSequence`] - an ordered pair of LUTs applied first-then-second
//! - [`Lut`] - the tagged union the codec consumes and produces
//!
//! # Usage
//!
//! ```rust
//! use csp_lut::{write_csp_to, Lut, Lut3D};
//!
//! let cube = Lut3D::identity(17);
//! let mut out = Vec::new();
//! write_csp_to(&mut out, &Lut::Lut3D(cube), 7).unwrap();
//! assert!(out.starts_with(b"CSPLUTV100"));
//! ```
//!
//! Which shape [`read_csp`] returns is decided by the numeric content of
//! the file's pre-LUT block; see the [`csp`] module documentation.
//!
//! # Dependencies
//!
//! - [`thiserror`] - error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut1d;
mod lut3d;
mod lut3x1d;
mod rows;
mod sequence;
pub mod csp;

pub use csp::{parse_csp, read_csp, write_csp, write_csp_to, write_csp_with_decimals};
pub use error::{LutError, LutResult};
pub use lut1d::Lut1D;
pub use lut3d::Lut3D;
pub use lut3x1d::{Domain, Lut3x1D};
pub use sequence::{Lut, LutSequence};
