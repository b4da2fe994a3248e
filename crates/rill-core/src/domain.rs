//! Rectangular grid geometry and per-axis periodicity.

use std::fmt;

use crate::error::ConfigError;

/// One of the two grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The x (column, `i`) axis.
    X,
    /// The y (row, `j`) axis.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Immutable description of the rectangular grid.
///
/// A domain is `lx × ly` split into `nx × ny` uniform cells, each axis
/// independently periodic or walled. All derived structures (fields, solver
/// plans) are sized from the domain at construction and never resized.
///
/// Velocities live on cell faces, pressure at cell centers (staggered
/// arrangement). On a walled axis the first face coincides with the wall and
/// is never updated by the integrator; [`ux_imin`](Domain::ux_imin) and
/// [`uy_jmin`](Domain::uy_jmin) give the first updatable face index.
#[derive(Clone, Debug)]
pub struct Domain {
    lx: f64,
    ly: f64,
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    periodic_x: bool,
    periodic_y: bool,
}

impl Domain {
    /// Fewest cells per axis the pressure solver can handle (the tridiagonal
    /// kernel needs at least three rows).
    pub const MIN_CELLS: usize = 3;

    /// Create a domain, validating extents and cell counts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an extent is non-positive, an axis has
    /// fewer than [`MIN_CELLS`](Self::MIN_CELLS) cells, or `periodic_x` is
    /// set with an odd `nx`.
    pub fn new(
        lx: f64,
        ly: f64,
        nx: usize,
        ny: usize,
        periodic_x: bool,
        periodic_y: bool,
    ) -> Result<Self, ConfigError> {
        if !(lx > 0.0) {
            return Err(ConfigError::NonPositiveExtent { axis: Axis::X, value: lx });
        }
        if !(ly > 0.0) {
            return Err(ConfigError::NonPositiveExtent { axis: Axis::Y, value: ly });
        }
        if nx < Self::MIN_CELLS {
            return Err(ConfigError::TooFewCells {
                axis: Axis::X,
                value: nx,
                minimum: Self::MIN_CELLS,
            });
        }
        if ny < Self::MIN_CELLS {
            return Err(ConfigError::TooFewCells {
                axis: Axis::Y,
                value: ny,
                minimum: Self::MIN_CELLS,
            });
        }
        if periodic_x && nx % 2 != 0 {
            return Err(ConfigError::OddPeriodicLength { value: nx });
        }
        Ok(Self {
            lx,
            ly,
            nx,
            ny,
            dx: lx / nx as f64,
            dy: ly / ny as f64,
            periodic_x,
            periodic_y,
        })
    }

    /// Domain extent along x.
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Domain extent along y.
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Number of cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Cell width `lx / nx`.
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Cell height `ly / ny`.
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Whether the x axis wraps periodically.
    pub fn periodic_x(&self) -> bool {
        self.periodic_x
    }

    /// Whether the y axis wraps periodically.
    pub fn periodic_y(&self) -> bool {
        self.periodic_y
    }

    /// Whether the given axis wraps periodically.
    pub fn periodic(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.periodic_x,
            Axis::Y => self.periodic_y,
        }
    }

    /// First updatable x-face index for `ux`.
    ///
    /// On a walled x axis the face at `i = 1` sits on the wall and is owned
    /// by the boundary condition, so updates start at `i = 2`.
    pub fn ux_imin(&self) -> usize {
        if self.periodic_x {
            1
        } else {
            2
        }
    }

    /// First updatable y-face index for `uy`; see [`ux_imin`](Self::ux_imin).
    pub fn uy_jmin(&self) -> usize {
        if self.periodic_y {
            1
        } else {
            2
        }
    }
}
