//! Spatial primitives shared by every planner.
//!
//! Coordinates are expressed in the container's local frame along the
//! width, depth and height axes. Units are whatever the inventory uses;
//! nothing here converts between them.

use std::ops::Sub;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numerical tolerance for floating-point comparisons of extents.
pub const EPSILON_GENERAL: f64 = 1e-9;

/// A point (or an extent) in 3D space.
///
/// # Examples
/// ```
/// use stowage::types::Coordinates;
///
/// let corner = Coordinates::new(10.0, 20.0, 30.0);
/// assert_eq!(corner.volume(), 6000.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Coordinates {
    /// Creates a new coordinate triple.
    #[inline]
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// The container origin.
    #[inline]
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Product of all three components. Only meaningful for extents.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }

    /// Checks if all components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.depth.is_finite() && self.height.is_finite()
    }

    /// Checks if this extent fits within another one (component-wise <=).
    ///
    /// # Parameters
    /// * `outer` - The enclosing extent (e.g. container dimensions)
    /// * `tolerance` - Numerical tolerance for the comparison
    #[inline]
    pub fn fits_within(&self, outer: &Self, tolerance: f64) -> bool {
        self.width <= outer.width + tolerance
            && self.depth <= outer.depth + tolerance
            && self.height <= outer.height + tolerance
    }
}

impl Sub for Coordinates {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(
            self.width - rhs.width,
            self.depth - rhs.depth,
            self.height - rhs.height,
        )
    }
}

impl From<(f64, f64, f64)> for Coordinates {
    #[inline]
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self::new(tuple.0, tuple.1, tuple.2)
    }
}

/// Axis-aligned region occupied by an item inside a container.
///
/// Serialised as `{startCoordinates, endCoordinates}` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    #[serde(rename = "startCoordinates")]
    pub start: Coordinates,
    #[serde(rename = "endCoordinates")]
    pub end: Coordinates,
}

impl Position {
    /// Creates a new position from its two corners.
    #[inline]
    pub const fn new(start: Coordinates, end: Coordinates) -> Self {
        Self { start, end }
    }

    /// The region spanned by a container of the given dimensions.
    #[inline]
    pub const fn from_origin(dimensions: Coordinates) -> Self {
        Self::new(Coordinates::origin(), dimensions)
    }

    /// Size of the region along each axis.
    #[inline]
    pub fn extents(&self) -> Coordinates {
        self.end - self.start
    }

    /// Checks `end >= start` on every axis and that all values are finite.
    pub fn is_well_formed(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.end.width >= self.start.width
            && self.end.depth >= self.start.depth
            && self.end.height >= self.start.height
    }
}
