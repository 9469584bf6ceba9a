/**
 * Describes how a ghost-padded field is laid out in its linear buffer: the
 * number of ghost cells on each axis, and the stride of each axis. Axis 0 is
 * contiguous. Indexes handed to a layout are local, meaning relative to the
 * lower corner of the field interior, so the valid range on axis `a` is
 * `-ghosts[a] .. extent[a] + ghosts[a]`.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout<const D: usize> {
    ghosts: [usize; D],
    shape: [usize; D],
    strides: [usize; D],
}




// ============================================================================
impl<const D: usize> Layout<D> {

    pub fn new(extent: [usize; D], ghosts: [usize; D]) -> Self {
        let mut shape = [0; D];
        let mut strides = [0; D];
        let mut stride = 1;

        for n in 0..D {
            shape[n] = extent[n] + 2 * ghosts[n];
            strides[n] = stride;
            stride *= shape[n];
        }
        Self { ghosts, shape, strides }
    }

    /**
     * Return the stride of the given axis, as a signed offset.
     */
    pub fn stride(&self, axis: usize) -> isize {
        self.strides[axis] as isize
    }

    /**
     * Return the number of elements in the buffer for one component.
     */
    pub fn volume(&self) -> usize {
        self.shape.iter().product()
    }

    /**
     * Return the linear offset for the given local index.
     */
    pub fn offset(&self, index: [i64; D]) -> usize {
        let mut offset = 0;
        for n in 0..D {
            offset += (index[n] + self.ghosts[n] as i64) as usize * self.strides[n];
        }
        offset
    }

    /**
     * Return the number of elements one component would need, or `None` if
     * that number does not fit in a `usize`.
     */
    pub fn checked_volume(extent: [usize; D], ghosts: [usize; D]) -> Option<usize> {
        let mut volume: usize = 1;
        for n in 0..D {
            let shape = ghosts[n].checked_mul(2)?.checked_add(extent[n])?;
            volume = volume.checked_mul(shape)?;
        }
        Some(volume)
    }
}
