use log::{debug, trace};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::index_space::{Axis, IndexSpace};
use crate::layout::Layout;
use crate::stencil::{Degree, Stencil};




/**
 * The configuration shared by the first and second derivative engines: a
 * name used in diagnostics, the axis of differentiation, and the stencil
 * selected by the ghost width.
 */
#[derive(Clone, Debug)]
pub(crate) struct DerivativeCore<const D: usize> {
    name: String,
    axis: Axis,
    stencil: &'static Stencil,
}




/**
 * A validated traversal: the divisor `dx^degree`, the local index range to
 * evaluate, and the layouts of the input and output buffers. Computed once
 * per call.
 */
#[derive(Debug, PartialEq)]
pub(crate) struct Sweep<const D: usize> {
    pub scale: f64,
    pub lower: [i64; D],
    pub dims: [usize; D],
    pub input: Layout<D>,
    pub output: Layout<D>,
}




// ============================================================================
impl<const D: usize> DerivativeCore<D> {

    pub fn new(name: String, degree: Degree, axis: Axis, ghost_width: usize) -> Result<Self> {
        if D < 1 || D > 3 {
            return Err(Error::UnsupportedDimension(D))
        }
        if axis.index() >= D {
            return Err(Error::AxisOutOfRange { axis, dim: D })
        }
        let stencil = Stencil::lookup(degree, ghost_width)?;

        debug!("{}: {} along {} with {} ghost cells", name, stencil, axis, ghost_width);

        Ok(Self { name, axis, stencil })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn stencil(&self) -> &'static Stencil {
        self.stencil
    }

    /**
     * Return the number of ghost cells the stencil reaches on each axis:
     * the ghost width on the axis of differentiation, zero elsewhere.
     */
    pub fn num_derivative_ghosts(&self) -> [usize; D] {
        let mut ghosts = [0; D];
        ghosts[self.axis.index()] = self.stencil.ghost_width();
        ghosts
    }

    /**
     * Check every precondition of a derivative evaluation and return the
     * traversal to perform. Nothing is written here. `None` means the
     * restriction is empty and there is nothing to do.
     */
    pub fn plan(
        &self,
        output: &Field<D>,
        input: &Field<D>,
        dx: f64,
        restriction: Option<&IndexSpace<D>>,
        output_component: usize,
        input_component: usize) -> Result<Option<Sweep<D>>>
    {
        if output_component >= output.depth() {
            return Err(Error::ComponentOutOfRange { component: output_component, depth: output.depth() })
        }
        if input_component >= input.depth() {
            return Err(Error::ComponentOutOfRange { component: input_component, depth: input.depth() })
        }

        let extent = input.interior().dim();

        if extent != output.interior().dim() {
            return Err(Error::MismatchedExtent {
                input: extent.to_vec(),
                output: output.interior().dim().to_vec(),
            })
        }
        let scale = dx.powi(self.stencil.degree().power());

        // The divisor must be usable too: dx^2 underflows to zero below
        // about 1e-154.
        if !(dx > 0.0 && scale > 0.0 && scale.is_finite()) {
            return Err(Error::InvalidGridSpacing(dx))
        }

        let reach = self.num_derivative_ghosts();
        let input_ghosts = input.ghosts();
        let output_ghosts = output.ghosts();
        let (lower, dims) = match restriction {
            None => {
                let mut lower = [0; D];
                let mut dims = [0; D];
                for n in 0..D {
                    lower[n] = -(output_ghosts[n] as i64);
                    dims[n] = extent[n] + 2 * output_ghosts[n];
                }
                (lower, dims)
            }
            Some(space) => {
                if space.is_empty() {
                    return Ok(None)
                }
                if !output.ghost_box().contains_space(space) {
                    return Err(Error::RestrictionOutOfRange {
                        restriction: space.clone().into(),
                        ghost_box: output.ghost_box().into(),
                    })
                }
                let local = space.translate(output.interior().start().map(|i| -i));
                (local.start(), local.dim())
            }
        };

        // The input must cover the range, widened by the stencil reach. For
        // the default range this is the output ghost width plus the reach.
        for n in 0..D {
            let below = reach[n] as i64 - lower[n];
            let above = lower[n] + dims[n] as i64 + reach[n] as i64 - extent[n] as i64;
            let required = below.max(above).max(0) as usize;

            if input_ghosts[n] < required {
                return Err(self.insufficient(n, required, input_ghosts[n]))
            }
        }

        Ok(Some(Sweep {
            scale,
            lower,
            dims,
            input: input.layout(),
            output: output.layout(),
        }))
    }

    /**
     * Validate the request, then apply the stencil over the requested range,
     * dividing by `dx` raised to the derivative degree.
     */
    pub fn apply(
        &self,
        output: &mut Field<D>,
        input: &Field<D>,
        dx: f64,
        restriction: Option<&IndexSpace<D>>,
        output_component: usize,
        input_component: usize) -> Result<()>
    {
        let sweep = match self.plan(output, input, dx, restriction, output_component, input_component)? {
            Some(sweep) => sweep,
            None => return Ok(()),
        };

        trace!(
            "{}: {} cells from {:?}, input component {} into output component {}",
            self.name,
            sweep.dims.iter().product::<usize>(),
            sweep.lower,
            input_component,
            output_component);

        let u = input.component(input_component);
        let du = output.component_mut(output_component);

        apply_stencil(self.stencil, self.axis, &sweep, u, du);
        Ok(())
    }

    fn insufficient(&self, axis: usize, required: usize, available: usize) -> Error {
        // The axis came out of a loop over 0..D, and D <= 3 was checked on
        // construction.
        let axis = Axis::from_index(axis).unwrap_or(self.axis);
        Error::InsufficientGhosts { axis, required, available }
    }
}




/**
 * The stride walk. Rows along the first axis are contiguous in both buffers,
 * so the range is traversed row by row, and each row is accumulated one
 * stencil tap at a time. The tap offset along the axis of differentiation is
 * a constant shift in the input buffer, so the inner loop is a plain
 * multiply-add over two slices.
 */
pub(crate) fn apply_stencil<const D: usize>(
    stencil: &Stencil,
    axis: Axis,
    sweep: &Sweep<D>,
    u: &[f64],
    du: &mut [f64])
{
    let len = sweep.dims[0];

    if sweep.dims.iter().any(|&n| n == 0) {
        return
    }

    let mut upper = sweep.lower;
    for n in 1..D {
        upper[n] += sweep.dims[n] as i64;
    }
    upper[0] += 1;

    let stride = sweep.input.stride(axis.index());
    let rows = IndexSpace::new(sweep.lower, upper);

    for row in rows.iter() {
        let i0 = sweep.input.offset(row) as isize;
        let o0 = sweep.output.offset(row);
        let dst = &mut du[o0 .. o0 + len];

        dst.iter_mut().for_each(|d| *d = 0.0);

        for (k, w) in stencil.taps() {
            let s0 = (i0 + k as isize * stride) as usize;
            let src = &u[s0 .. s0 + len];

            for (d, s) in dst.iter_mut().zip(src) {
                *d += w * s;
            }
        }
        dst.iter_mut().for_each(|d| *d /= sweep.scale);
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{DerivativeCore, Sweep};
    use crate::error::Error;
    use crate::field::Field;
    use crate::index_space::{range1d, range2d, Axis};
    use crate::layout::Layout;
    use crate::stencil::Degree;

    fn core2d(axis: Axis, g: usize) -> DerivativeCore<2> {
        DerivativeCore::new("test".to_string(), Degree::Second, axis, g).unwrap()
    }

    #[test]
    fn default_range_covers_the_output_ghost_box() {
        let input = Field::zeros(range2d(0..8, 0..5), [3, 2], 1);
        let output = Field::zeros(range2d(0..8, 0..5), [1, 2], 1);
        let sweep = core2d(Axis::X, 2).plan(&output, &input, 0.5, None, 0, 0).unwrap();

        assert_eq!(sweep, Some(Sweep {
            scale: 0.25,
            lower: [-1, -2],
            dims: [10, 9],
            input: Layout::new([8, 5], [3, 2]),
            output: Layout::new([8, 5], [1, 2]),
        }));
    }

    #[test]
    fn default_range_needs_ghosts_for_the_output_ring() {
        let input = Field::zeros(range2d(0..8, 0..5), [3, 1], 1);
        let output = Field::zeros(range2d(0..8, 0..5), [1, 2], 1);
        let error = core2d(Axis::X, 2).plan(&output, &input, 0.5, None, 0, 0).unwrap_err();
        assert_eq!(error, Error::InsufficientGhosts { axis: Axis::Y, required: 2, available: 1 });
    }

    #[test]
    fn restriction_is_translated_to_local_indexes() {
        let input = Field::zeros(range2d(10..18, 20..25), [2, 0], 1);
        let output = Field::zeros(range2d(10..18, 20..25), [0, 0], 1);
        let sweep = core2d(Axis::X, 2)
            .plan(&output, &input, 1.0, Some(&range2d(12..15, 21..23)), 0, 0)
            .unwrap()
            .unwrap();
        assert_eq!(sweep.lower, [2, 1]);
        assert_eq!(sweep.dims, [3, 2]);
    }

    #[test]
    fn restriction_reaching_past_the_input_ghosts_is_rejected() {
        let input = Field::zeros(range1d(0..8), [2], 1);
        let output = Field::zeros(range1d(0..8), [2], 1);
        let core = DerivativeCore::<1>::new("test".to_string(), Degree::First, Axis::X, 2).unwrap();

        assert!(core.plan(&output, &input, 1.0, Some(&range1d(0..8)), 0, 0).is_ok());
        assert_eq!(
            core.plan(&output, &input, 1.0, Some(&range1d(-1..8)), 0, 0),
            Err(Error::InsufficientGhosts { axis: Axis::X, required: 3, available: 2 }));
        assert!(matches!(
            core.plan(&output, &input, 1.0, Some(&range1d(0..11)), 0, 0),
            Err(Error::RestrictionOutOfRange { .. })));
    }

    #[test]
    fn restriction_errors_carry_the_bounds() {
        let input = Field::zeros(range2d(0..8, 0..5), [2, 1], 1);
        let output = Field::zeros(range2d(0..8, 0..5), [0, 1], 1);
        let error = core2d(Axis::X, 2)
            .plan(&output, &input, 1.0, Some(&range2d(2..9, 0..3)), 0, 0)
            .unwrap_err();
        assert_eq!(error, Error::RestrictionOutOfRange {
            restriction: vec![2..9, 0..3],
            ghost_box: vec![0..8, -1..6],
        });
    }

    #[test]
    fn spacings_whose_divisor_vanishes_are_rejected() {
        let input = Field::zeros(range1d(0..8), [1], 1);
        let mut output = Field::zeros(range1d(0..8), [0], 1);
        let second = DerivativeCore::<1>::new("test".to_string(), Degree::Second, Axis::X, 1).unwrap();
        let first = DerivativeCore::<1>::new("test".to_string(), Degree::First, Axis::X, 1).unwrap();

        for dx in [1e-170, 1e170, f64::NAN, -1.0] {
            assert!(matches!(
                second.apply(&mut output, &input, dx, None, 0, 0),
                Err(Error::InvalidGridSpacing(_))));
        }
        assert!(first.plan(&output, &input, 1e-170, None, 0, 0).is_ok());
        assert!(output.data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn empty_restriction_plans_nothing() {
        let input = Field::zeros(range1d(0..8), [1], 1);
        let output = Field::zeros(range1d(0..8), [0], 1);
        let core = DerivativeCore::<1>::new("test".to_string(), Degree::Second, Axis::X, 1).unwrap();
        assert_eq!(core.plan(&output, &input, 1.0, Some(&range1d(3..3)), 0, 0), Ok(None));
    }

    #[test]
    fn construction_rejects_bad_configurations() {
        assert_eq!(
            DerivativeCore::<2>::new("test".to_string(), Degree::First, Axis::Z, 1).unwrap_err(),
            Error::AxisOutOfRange { axis: Axis::Z, dim: 2 });
        assert_eq!(
            DerivativeCore::<4>::new("test".to_string(), Degree::First, Axis::X, 1).unwrap_err(),
            Error::UnsupportedDimension(4));
        assert_eq!(
            DerivativeCore::<3>::new("test".to_string(), Degree::First, Axis::X, 5).unwrap_err(),
            Error::UnsupportedGhostWidth(5));
    }

    #[test]
    fn reach_is_zero_off_axis() {
        assert_eq!(core2d(Axis::Y, 3).num_derivative_ghosts(), [0, 3]);
    }
}
