//! Griddiff computes spatial derivatives of cell-centered field data on
//! structured grid patches, of the kind used by Berger-Oliger AMR codes. A
//! field is a ghost-padded array: its interior is surrounded by guard zones,
//! filled in from neighboring patches or boundary conditions before any
//! derivative is taken. Centered finite-difference stencils of order 2, 4, 6
//! and 8 are supported for first and second derivatives, along any axis of a
//! 1, 2 or 3 dimensional field. The order of accuracy is bound to the number
//! of ghost cells the stencil may read.
//!
//! ```
//! use griddiff::derivative::{Derivative, DerivativeSecondOrder};
//! use griddiff::field::Field;
//! use griddiff::index_space::{range1d, Axis};
//!
//! let engine = DerivativeSecondOrder::<1>::new("d2u/dx2", Axis::X, 4)?;
//! let data = Field::from_function(range1d(0..9), [4], |[i]| (i * i) as f64);
//! let mut derivative = Field::zeros(range1d(0..9), [0], 1);
//!
//! engine.compute_derivative(&mut derivative, &data, 1.0, None, 0, 0)?;
//! assert!((derivative.get([4], 0) - 2.0).abs() < 1e-10);
//! # Ok::<(), griddiff::error::Error>(())
//! ```

pub mod derivative;
pub mod error;
pub mod field;
pub mod index_space;
pub mod layout;
pub mod parallel;
pub mod stencil;

pub use error::{Error, Result};
