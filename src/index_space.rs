use core::fmt;
use core::ops::Range;
use serde::{Deserialize, Serialize};




/**
 * Identifier for a Cartesian axis
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}




// ============================================================================
impl Axis {

    /**
     * Return the position of this axis in an index tuple.
     */
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /**
     * Return the axis at the given position in an index tuple, if there is
     * one.
     */
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}




/**
 * Represents a rectangular region in a discrete, `D`-dimensional index
 * space. The index type is signed 64-bit integer. Each axis spans the
 * half-open range `lower..upper`.
 */
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Range<i64>>", try_from = "Vec<Range<i64>>")]
pub struct IndexSpace<const D: usize> {
    lower: [i64; D],
    upper: [i64; D],
}




// ============================================================================
impl<const D: usize> IndexSpace<D> {


    pub fn new(lower: [i64; D], upper: [i64; D]) -> Self {

        assert!(
            lower.iter().zip(&upper).all(|(l, u)| l <= u),
            "index space has negative volume");

        Self { lower, upper }
    }


    /**
     * Return the number of indexes on each axis.
     */
    pub fn dim(&self) -> [usize; D] {
        let mut dim = [0; D];
        for (n, d) in dim.iter_mut().enumerate() {
            *d = (self.upper[n] - self.lower[n]) as usize
        }
        dim
    }


    /**
     * Return the number of elements in this index space.
     */
    pub fn len(&self) -> usize {
        self.dim().iter().product()
    }


    /**
     * Determine whether this index space has zero volume.
     */
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn start(&self) -> [i64; D] {
        self.lower
    }


    /**
     * Determine whether this index space contains the given index.
     */
    pub fn contains(&self, index: [i64; D]) -> bool {
        (0..D).all(|n| self.lower[n] <= index[n] && index[n] < self.upper[n])
    }


    /**
     * Determine whether another index space is a subset of this one. The
     * empty set is a subset of any index space.
     */
    pub fn contains_space(&self, other: &Self) -> bool {
        other.is_empty() || (0..D).all(|n| {
            other.lower[n] >= self.lower[n] && other.upper[n] <= self.upper[n]
        })
    }


    /**
     * Expand this index space by a separate number of elements on each axis.
     * Negative entries trim the index space.
     */
    pub fn extend(&self, delta: [i64; D]) -> Self {
        let mut lower = self.lower;
        let mut upper = self.upper;
        for n in 0..D {
            lower[n] -= delta[n];
            upper[n] += delta[n];
        }
        Self::new(lower, upper)
    }


    /**
     * Shift this index space by the given offset.
     */
    pub fn translate(&self, offset: [i64; D]) -> Self {
        let mut lower = self.lower;
        let mut upper = self.upper;
        for n in 0..D {
            lower[n] += offset[n];
            upper[n] += offset[n];
        }
        Self { lower, upper }
    }


    /**
     * Return an iterator which traverses the index space with the first
     * index increasing fastest. This is the storage order of
     * [`crate::field::Field`].
     */
    pub fn iter(&self) -> Iter<D> {
        Iter {
            lower: self.lower,
            upper: self.upper,
            next: if self.is_empty() { None } else { Some(self.lower) },
        }
    }
}




// ============================================================================
impl<const D: usize> From<[Range<i64>; D]> for IndexSpace<D> {
    fn from(ranges: [Range<i64>; D]) -> Self {
        let mut lower = [0; D];
        let mut upper = [0; D];
        for (n, r) in ranges.iter().enumerate() {
            lower[n] = r.start;
            upper[n] = r.end;
        }
        Self::new(lower, upper)
    }
}

impl<const D: usize> From<IndexSpace<D>> for Vec<Range<i64>> {
    fn from(space: IndexSpace<D>) -> Self {
        (0..D).map(|n| space.lower[n]..space.upper[n]).collect()
    }
}

impl<const D: usize> TryFrom<Vec<Range<i64>>> for IndexSpace<D> {
    type Error = String;

    fn try_from(ranges: Vec<Range<i64>>) -> Result<Self, Self::Error> {
        if ranges.len() != D {
            return Err(format!("expected {} ranges, got {}", D, ranges.len()))
        }
        if ranges.iter().any(|r| r.start > r.end) {
            return Err("index space has negative volume".to_string())
        }
        if ranges.iter().any(|r| r.end.checked_sub(r.start).is_none()) {
            return Err("index space is too large".to_string())
        }
        let mut lower = [0; D];
        let mut upper = [0; D];
        for (n, r) in ranges.into_iter().enumerate() {
            lower[n] = r.start;
            upper[n] = r.end;
        }
        Ok(Self { lower, upper })
    }
}

impl<const D: usize> fmt::Display for IndexSpace<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for n in 0..D {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}..{}", self.lower[n], self.upper[n])?;
        }
        write!(f, ")")
    }
}




/**
 * Less imposing factory functions to construct IndexSpace objects.
 */
pub fn range1d(di: Range<i64>) -> IndexSpace<1> {
    IndexSpace::from([di])
}

pub fn range2d(di: Range<i64>, dj: Range<i64>) -> IndexSpace<2> {
    IndexSpace::from([di, dj])
}

pub fn range3d(di: Range<i64>, dj: Range<i64>, dk: Range<i64>) -> IndexSpace<3> {
    IndexSpace::from([di, dj, dk])
}




/**
 * Iterator over the indexes of an [`IndexSpace`], first axis fastest.
 */
pub struct Iter<const D: usize> {
    lower: [i64; D],
    upper: [i64; D],
    next: Option<[i64; D]>,
}

impl<const D: usize> Iterator for Iter<D> {
    type Item = [i64; D];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut index = current;

        self.next = None;

        for n in 0..D {
            index[n] += 1;
            if index[n] < self.upper[n] {
                self.next = Some(index);
                break;
            }
            index[n] = self.lower[n];
        }
        Some(current)
    }
}
