//! Planar coordinates and the bounded square the network lives on.
//!
//! Positions are plain Cartesian `(x, y)` pairs. The plane is the closed
//! square `[0, side] x [0, side]`; both edges are inside the plane.

use crate::error::{Error, Result};

/// A point in the 2-D sensor field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Position {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.
    ///
    /// Range checks compare against `radius * radius` so integer layouts
    /// such as a 3-4-5 triangle land exactly on the boundary.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Coordinate along an axis (0 = x, 1 = y).
    #[inline]
    pub(crate) fn axis(&self, axis: usize) -> f64 {
        if axis == 0 {
            self.x
        } else {
            self.y
        }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The closed square `[0, side] x [0, side]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    side: f64,
}

impl Plane {
    /// The 20 x 20 field.
    pub const DEFAULT: Self = Self { side: 20.0 };

    /// Create a plane with the given side length.
    pub fn new(side: f64) -> Result<Self> {
        if !side.is_finite() || side <= 0.0 {
            return Err(Error::InvalidPlane(side));
        }
        Ok(Self { side })
    }

    /// Side length (the largest legal coordinate).
    pub const fn side(&self) -> f64 {
        self.side
    }

    /// Whether a position lies inside the plane, edges included.
    pub fn contains(&self, position: &Position) -> bool {
        position.is_finite()
            && (0.0..=self.side).contains(&position.x)
            && (0.0..=self.side).contains(&position.y)
    }

    /// Fail with [`Error::OutOfBounds`] unless the position is inside.
    pub fn check(&self, position: &Position) -> Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                x: position.x,
                y: position.y,
                side: self.side,
            })
        }
    }
}
