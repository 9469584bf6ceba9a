use serde::{Deserialize, Serialize};
use crate::index_space::IndexSpace;
use crate::layout::Layout;




/**
 * A field is a mapping from a rectangular, ghost-padded region of a
 * `D`-dimensional index space to `depth` scalar values per cell. The interior
 * is the region the field is responsible for; the ghost cells surrounding it
 * hold data filled in from neighboring patches or boundary conditions before
 * any stencil operation runs.
 *
 * The components are stored one after another in a single buffer. Within a
 * component, the first axis increases fastest (see [`Layout`]). Indexes
 * passed to `get` and `set` are global: they live in the same index space as
 * the interior box.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "FieldData<D>", try_from = "FieldData<D>")]
pub struct Field<const D: usize> {
    interior: IndexSpace<D>,
    ghosts: [usize; D],
    depth: usize,
    data: Vec<f64>,
}




// ============================================================================
impl<const D: usize> Field<D> {


    /**
     * Generate a field covering the given interior, with the given number of
     * ghost cells on each axis, with all values set to zero.
     */
    pub fn zeros(interior: IndexSpace<D>, ghosts: [usize; D], depth: usize) -> Self {
        let volume = Layout::new(interior.dim(), ghosts).volume();
        Self {
            interior,
            ghosts,
            depth,
            data: vec![0.0; volume * depth],
        }
    }


    /**
     * Generate a single-component field with values defined from a closure
     * on every cell, ghost cells included.
     */
    pub fn from_function<F>(interior: IndexSpace<D>, ghosts: [usize; D], f: F) -> Self
    where
        F: Fn([i64; D]) -> f64
    {
        Self::from_function_n(interior, ghosts, |index| [f(index)])
    }


    /**
     * Generate a multi-component field with values defined from a closure on
     * every cell, ghost cells included.
     */
    pub fn from_function_n<F, const NUM_FIELDS: usize>(interior: IndexSpace<D>, ghosts: [usize; D], f: F) -> Self
    where
        F: Fn([i64; D]) -> [f64; NUM_FIELDS]
    {
        let mut field = Self::zeros(interior, ghosts, NUM_FIELDS);
        let volume = field.layout().volume();

        for (n, index) in field.ghost_box().iter().enumerate() {
            for (q, value) in f(index).into_iter().enumerate() {
                field.data[q * volume + n] = value
            }
        }
        field
    }


    /**
     * Wrap an existing buffer. Panics if the buffer size does not match the
     * interior, ghost width, and depth.
     */
    pub fn from_vec(interior: IndexSpace<D>, ghosts: [usize; D], depth: usize, data: Vec<f64>) -> Self {
        let volume = Layout::new(interior.dim(), ghosts).volume();

        assert!(
            data.len() == volume * depth,
            "buffer has {} elements, but field needs {}", data.len(), volume * depth);

        Self { interior, ghosts, depth, data }
    }


    /**
     * Return the region of the index space this field is responsible for.
     */
    pub fn interior(&self) -> &IndexSpace<D> {
        &self.interior
    }


    /**
     * Return the number of ghost cells on each axis.
     */
    pub fn ghosts(&self) -> [usize; D] {
        self.ghosts
    }


    /**
     * Return the number of components.
     */
    pub fn depth(&self) -> usize {
        self.depth
    }


    /**
     * Return the interior extended by the ghost cells.
     */
    pub fn ghost_box(&self) -> IndexSpace<D> {
        let mut delta = [0; D];
        for (d, g) in delta.iter_mut().zip(self.ghosts) {
            *d = g as i64
        }
        self.interior.extend(delta)
    }


    /**
     * Return the memory layout of one component of this field.
     */
    pub fn layout(&self) -> Layout<D> {
        Layout::new(self.interior.dim(), self.ghosts)
    }


    /**
     * Return the buffer of the given component.
     */
    pub fn component(&self, component: usize) -> &[f64] {
        self.validate_component(component);
        let volume = self.layout().volume();
        &self.data[component * volume .. (component + 1) * volume]
    }


    /**
     * Return the mutable buffer of the given component.
     */
    pub fn component_mut(&mut self, component: usize) -> &mut [f64] {
        self.validate_component(component);
        let volume = self.layout().volume();
        &mut self.data[component * volume .. (component + 1) * volume]
    }


    /**
     * Return the whole buffer, all components.
     */
    pub fn data(&self) -> &[f64] {
        &self.data
    }


    /**
     * Sample the given component at the given global index.
     */
    pub fn get(&self, index: [i64; D], component: usize) -> f64 {
        let n = self.linear_index(index);
        self.component(component)[n]
    }


    /**
     * Overwrite the given component at the given global index.
     */
    pub fn set(&mut self, index: [i64; D], component: usize, value: f64) {
        let n = self.linear_index(index);
        self.component_mut(component)[n] = value
    }


    /**
     * Set every value, in every component, to the given value.
     */
    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|x| *x = value)
    }


    /**
     * Return an iterator over the global indexes and values of the given
     * component, restricted to the interior.
     */
    pub fn iter_interior(&self, component: usize) -> impl Iterator<Item = ([i64; D], f64)> + '_ {
        self.interior.iter().map(move |index| (index, self.get(index, component)))
    }

    fn linear_index(&self, index: [i64; D]) -> usize {
        self.validate_index(index);
        let lower = self.interior.start();
        let mut local = index;
        for n in 0..D {
            local[n] -= lower[n]
        }
        self.layout().offset(local)
    }

    fn validate_index(&self, index: [i64; D]) {
        if !self.ghost_box().contains(index) {
            panic!("index {:?} out of range on field {}", index, self.ghost_box());
        }
    }

    fn validate_component(&self, component: usize) {
        if component >= self.depth {
            panic!("component {} out of range on field with depth {}", component, self.depth);
        }
    }
}




/**
 * Serialized representation of a field. Arrays of generic length are
 * written as sequences.
 */
#[doc(hidden)]
#[derive(Serialize, Deserialize)]
pub struct FieldData<const D: usize> {
    interior: IndexSpace<D>,
    ghosts: Vec<usize>,
    depth: usize,
    data: Vec<f64>,
}

impl<const D: usize> From<Field<D>> for FieldData<D> {
    fn from(field: Field<D>) -> Self {
        Self {
            interior: field.interior,
            ghosts: field.ghosts.to_vec(),
            depth: field.depth,
            data: field.data,
        }
    }
}

impl<const D: usize> TryFrom<FieldData<D>> for Field<D> {
    type Error = String;

    fn try_from(raw: FieldData<D>) -> Result<Self, Self::Error> {
        let ghosts: [usize; D] = raw.ghosts
            .try_into()
            .map_err(|g: Vec<usize>| format!("expected {} ghost widths, got {}", D, g.len()))?;

        let lower = raw.interior.start();
        let dim = raw.interior.dim();

        for n in 0..D {
            let g = i64::try_from(ghosts[n]).ok();
            let lo = g.and_then(|g| lower[n].checked_sub(g));
            let hi = g.and_then(|g| lower[n].checked_add(dim[n] as i64)?.checked_add(g));

            if lo.is_none() || hi.is_none() {
                return Err(format!("ghost box of {} with {:?} ghost cells is too large", raw.interior, ghosts))
            }
        }
        let size = Layout::checked_volume(dim, ghosts)
            .and_then(|volume| volume.checked_mul(raw.depth))
            .ok_or_else(|| format!("field of depth {} on {} is too large", raw.depth, raw.interior))?;

        if raw.data.len() != size {
            return Err(format!("buffer has {} elements, but field needs {}", raw.data.len(), size))
        }
        Ok(Self {
            interior: raw.interior,
            ghosts,
            depth: raw.depth,
            data: raw.data,
        })
    }
}
