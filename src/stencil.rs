//! Centered finite-difference coefficients for the first and second
//! derivative. The tables are keyed by the number of ghost cells `g`
//! (1 through 4) the stencil reaches on either side of the center cell; the
//! accuracy order of each stencil is `2 g`.

use core::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};




/// The largest ghost width for which a stencil is tabulated.
pub const MAX_GHOST_WIDTH: usize = 4;




/**
 * The degree of a derivative
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    First,
    Second,
}




// ============================================================================
impl Degree {

    /**
     * Return the power of the grid spacing that divides the stencil sum.
     */
    pub fn power(self) -> i32 {
        match self {
            Degree::First => 1,
            Degree::Second => 2,
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degree::First => write!(f, "first"),
            Degree::Second => write!(f, "second"),
        }
    }
}




/**
 * A centered finite-difference stencil. Weights are stored for the offsets
 * `-g ..= g`, so the weight for offset `k` is at position `k + g`.
 */
#[derive(Debug, PartialEq)]
pub struct Stencil {
    degree: Degree,
    ghost_width: usize,
    weights: &'static [f64],
}




// ============================================================================
static FIRST: [Stencil; MAX_GHOST_WIDTH] = [
    Stencil {
        degree: Degree::First,
        ghost_width: 1,
        weights: &[-1.0 / 2.0, 0.0, 1.0 / 2.0],
    },
    Stencil {
        degree: Degree::First,
        ghost_width: 2,
        weights: &[
            1.0 / 12.0,
            -2.0 / 3.0,
            0.0,
            2.0 / 3.0,
            -1.0 / 12.0,
        ],
    },
    Stencil {
        degree: Degree::First,
        ghost_width: 3,
        weights: &[
            -1.0 / 60.0,
            3.0 / 20.0,
            -3.0 / 4.0,
            0.0,
            3.0 / 4.0,
            -3.0 / 20.0,
            1.0 / 60.0,
        ],
    },
    Stencil {
        degree: Degree::First,
        ghost_width: 4,
        weights: &[
            1.0 / 280.0,
            -4.0 / 105.0,
            1.0 / 5.0,
            -4.0 / 5.0,
            0.0,
            4.0 / 5.0,
            -1.0 / 5.0,
            4.0 / 105.0,
            -1.0 / 280.0,
        ],
    },
];

static SECOND: [Stencil; MAX_GHOST_WIDTH] = [
    Stencil {
        degree: Degree::Second,
        ghost_width: 1,
        weights: &[1.0, -2.0, 1.0],
    },
    Stencil {
        degree: Degree::Second,
        ghost_width: 2,
        weights: &[
            -1.0 / 12.0,
            4.0 / 3.0,
            -5.0 / 2.0,
            4.0 / 3.0,
            -1.0 / 12.0,
        ],
    },
    Stencil {
        degree: Degree::Second,
        ghost_width: 3,
        weights: &[
            1.0 / 90.0,
            -3.0 / 20.0,
            3.0 / 2.0,
            -49.0 / 18.0,
            3.0 / 2.0,
            -3.0 / 20.0,
            1.0 / 90.0,
        ],
    },
    Stencil {
        degree: Degree::Second,
        ghost_width: 4,
        weights: &[
            -1.0 / 560.0,
            8.0 / 315.0,
            -1.0 / 5.0,
            8.0 / 5.0,
            -205.0 / 72.0,
            8.0 / 5.0,
            -1.0 / 5.0,
            8.0 / 315.0,
            -1.0 / 560.0,
        ],
    },
];




// ============================================================================
impl Stencil {

    /**
     * Return the stencil for the given derivative degree and ghost width.
     * Ghost widths outside `1..=4` are a configuration error.
     */
    pub fn lookup(degree: Degree, ghost_width: usize) -> Result<&'static Stencil> {
        if ghost_width < 1 || ghost_width > MAX_GHOST_WIDTH {
            return Err(Error::UnsupportedGhostWidth(ghost_width))
        }
        let table = match degree {
            Degree::First => &FIRST,
            Degree::Second => &SECOND,
        };
        Ok(&table[ghost_width - 1])
    }

    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn ghost_width(&self) -> usize {
        self.ghost_width
    }

    /**
     * Return the order of accuracy, which is twice the ghost width.
     */
    pub fn order(&self) -> usize {
        2 * self.ghost_width
    }

    /**
     * Return the weight at the given offset from the center cell. Offsets
     * beyond the ghost width have zero weight.
     */
    pub fn weight(&self, offset: i64) -> f64 {
        let g = self.ghost_width as i64;
        if offset.abs() > g {
            0.0
        } else {
            self.weights[(offset + g) as usize]
        }
    }

    /**
     * Return the weights for offsets `-g ..= g`.
     */
    pub fn weights(&self) -> &'static [f64] {
        self.weights
    }

    /**
     * Return an iterator over the `(offset, weight)` pairs of this stencil,
     * in order of increasing offset.
     */
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        let g = self.ghost_width as i64;
        self.weights.iter().enumerate().map(move |(n, &w)| (n as i64 - g, w))
    }

    /**
     * Like `iter`, but skips the zero-weight taps (the center tap of a first
     * derivative stencil).
     */
    pub fn taps(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.iter().filter(|&(_, w)| w != 0.0)
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} derivative, order {}: [", self.degree, self.order())?;
        for (n, (k, w)) in self.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:+}: {}", k, w)?;
        }
        write!(f, "]")
    }
}
