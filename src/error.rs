use core::ops::Range;
use thiserror::Error;
use crate::index_space::Axis;




/**
 * Errors raised by the derivative engine. Configuration errors are raised
 * when an engine is constructed; the others are precondition violations
 * detected at the start of a call, before the output field is touched.
 */
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {

    #[error("unsupported ghost width {0}: stencils exist for 1 to 4 ghost cells")]
    UnsupportedGhostWidth(usize),

    #[error("unsupported dimension {0}: only 1, 2 and 3 dimensional data is supported")]
    UnsupportedDimension(usize),

    #[error("axis {axis} does not exist in a {dim}-dimensional space")]
    AxisOutOfRange { axis: Axis, dim: usize },

    #[error("component {component} out of range on field with depth {depth}")]
    ComponentOutOfRange { component: usize, depth: usize },

    #[error("interior extents differ: input {input:?}, output {output:?}")]
    MismatchedExtent { input: Vec<usize>, output: Vec<usize> },

    #[error("grid spacing must be positive and finite, got {0}")]
    InvalidGridSpacing(f64),

    #[error("input data has {available} ghost cells on axis {axis}, but {required} are needed")]
    InsufficientGhosts { axis: Axis, required: usize, available: usize },

    #[error("restriction {restriction:?} is not contained in the output ghost box {ghost_box:?}")]
    RestrictionOutOfRange { restriction: Vec<Range<i64>>, ghost_box: Vec<Range<i64>> },
}




/**
 * Result type used throughout the crate.
 */
pub type Result<T> = std::result::Result<T, Error>;
