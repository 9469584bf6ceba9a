//! Finite-difference derivatives of cell-centered field data along one axis.
//! An engine is bound to an axis and a ghost width when it is constructed; the
//! ghost width selects the stencil, and thereby the order of accuracy, which
//! is twice the ghost width. A caller wanting fourth-order accuracy must
//! construct its engine with two ghost cells, and supply input data with at
//! least that many ghost cells on the axis of differentiation.

/**
 * Generate a derivative engine of one degree: a thin wrapper around the
 * shared core, with the `Derivative` implementation and a `Display` dump of
 * the configuration.
 */
macro_rules! derivative_engine {
    (
        $(#[$meta:meta])*
        $name:ident, $degree:expr
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name<const D: usize> {
            core: $crate::derivative::sweep::DerivativeCore<D>,
        }

        impl<const D: usize> $name<D> {

            /**
             * Create an engine differentiating along `axis` with
             * `ghost_width` ghost cells (1 through 4). Fails if the ghost
             * width is unsupported, or if the axis does not exist in `D`
             * dimensions.
             */
            pub fn new(
                name: impl Into<String>,
                axis: $crate::index_space::Axis,
                ghost_width: usize) -> $crate::error::Result<Self>
            {
                Ok(Self {
                    core: $crate::derivative::sweep::DerivativeCore::new(name.into(), $degree, axis, ghost_width)?,
                })
            }
        }

        impl<const D: usize> $crate::derivative::Derivative<D> for $name<D> {

            fn name(&self) -> &str {
                self.core.name()
            }

            fn axis(&self) -> $crate::index_space::Axis {
                self.core.axis()
            }

            fn degree(&self) -> $crate::stencil::Degree {
                $degree
            }

            fn stencil(&self) -> &'static $crate::stencil::Stencil {
                self.core.stencil()
            }

            fn num_derivative_ghosts(&self) -> [usize; D] {
                self.core.num_derivative_ghosts()
            }

            fn compute_derivative(
                &self,
                derivative: &mut $crate::field::Field<D>,
                data: &$crate::field::Field<D>,
                dx: f64,
                restriction: Option<&$crate::index_space::IndexSpace<D>>,
                derivative_component: usize,
                data_component: usize) -> $crate::error::Result<()>
            {
                self.core.apply(derivative, data, dx, restriction, derivative_component, data_component)
            }
        }

        impl<const D: usize> ::core::fmt::Display for $name<D> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                writeln!(f, "{}: {}", stringify!($name), self.core.name())?;
                writeln!(f, "    dimension = {}", D)?;
                writeln!(f, "    axis = {}", self.core.axis())?;
                writeln!(f, "    num_derivative_ghosts = {:?}", self.core.num_derivative_ghosts())?;
                writeln!(f, "    stencil = {}", self.core.stencil())
            }
        }
    };
}

mod first_order;
mod second_order;
mod sweep;

pub use first_order::DerivativeFirstOrder;
pub use second_order::DerivativeSecondOrder;

use crate::error::Result;
use crate::field::Field;
use crate::index_space::{Axis, IndexSpace};
use crate::stencil::{Degree, Stencil};




/**
 * Interface for an engine which differentiates one component of a field
 * along a fixed axis, writing the result into one component of another
 * field. Engines hold only immutable configuration, so one engine may be
 * shared between threads evaluating different patches.
 */
pub trait Derivative<const D: usize> {

    /// Return the name given to this engine, used in diagnostics.
    fn name(&self) -> &str;

    /// Return the axis of differentiation.
    fn axis(&self) -> Axis;

    /// Return the degree of the derivative.
    fn degree(&self) -> Degree;

    /// Return the stencil used by this engine.
    fn stencil(&self) -> &'static Stencil;

    /// Return the number of ghost cells the stencil reaches on each axis:
    /// the ghost width on the axis of differentiation, and zero elsewhere.
    fn num_derivative_ghosts(&self) -> [usize; D];

    /// Compute the derivative of component `data_component` of `data`, and
    /// write it to component `derivative_component` of `derivative`. The two
    /// fields must have the same interior extent, but may have different
    /// ghost widths. `dx` is the grid spacing along the axis of
    /// differentiation.
    ///
    /// If `restriction` is `None`, the derivative is computed over the whole
    /// ghost box of `derivative`, so `data` needs as many ghost cells as
    /// `derivative` on each axis, plus the ghost width of the stencil on the
    /// axis of differentiation. Otherwise the derivative is computed on the
    /// restriction only; it is given in the index space of `derivative` and
    /// must lie within its ghost box.
    ///
    /// All the preconditions are checked before anything is written, and a
    /// failed call leaves `derivative` untouched. Entries outside the
    /// evaluated range are never modified.
    fn compute_derivative(
        &self,
        derivative: &mut Field<D>,
        data: &Field<D>,
        dx: f64,
        restriction: Option<&IndexSpace<D>>,
        derivative_component: usize,
        data_component: usize) -> Result<()>;
}
