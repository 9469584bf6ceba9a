use log::debug;
use rayon::prelude::*;
use crate::derivative::Derivative;
use crate::error::{Error, Result};
use crate::field::Field;




/**
 * The data for evaluating a derivative on one patch: the input field, with
 * its ghost cells already filled, the output field, and the grid spacing of
 * the patch along the axis of differentiation.
 */
#[derive(Clone, Debug)]
pub struct PatchDerivative<const D: usize> {
    pub data: Field<D>,
    pub derivative: Field<D>,
    pub grid_spacing: f64,
}




/**
 * Evaluate a derivative engine on a group of patches, in parallel on the
 * Rayon thread pool. Each component of a patch's input is differentiated
 * into the same component of its output. Patches own their fields, so the
 * tasks write to disjoint memory and no synchronization is needed.
 *
 * If any patch fails a precondition, one of the errors is returned. A patch
 * whose output has fewer components than its input is rejected before
 * anything is written to it; other patches may have been evaluated.
 */
pub fn compute_derivative_patches<E, const D: usize>(engine: &E, patches: &mut [PatchDerivative<D>]) -> Result<()>
where
    E: Derivative<D> + Sync + ?Sized,
{
    debug!("{}: evaluating {} patches", engine.name(), patches.len());

    patches.par_iter_mut().try_for_each(|patch| {
        let depth = patch.data.depth();

        if patch.derivative.depth() < depth {
            return Err(Error::ComponentOutOfRange {
                component: depth - 1,
                depth: patch.derivative.depth(),
            })
        }
        for component in 0..depth {
            engine.compute_derivative(
                &mut patch.derivative,
                &patch.data,
                patch.grid_spacing,
                None,
                component,
                component)?;
        }
        Ok(())
    })
}
