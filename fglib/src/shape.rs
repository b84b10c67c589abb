//! # Shapes
//!
//! Point lists with a fill/outline mode. fglib only stores shapes; turning
//! them into [`DrawAction`](crate::action::DrawAction)s is left to the
//! renderer that owns them.

use bitflags::bitflags;
use heapless::Vec;

use crate::error::{Error, Result};

/// Maximum number of points in a shape
pub const MAX_POINTS: usize = 4096;

bitflags! {
    /// How a shape is meant to be rendered
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShapeMode: u32 {
        /// Fill the interior
        const FILL = 0x01;
        /// Trace the edges
        const OUTLINE = 0x02;
    }
}

/// A 2-D integer coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An ordered set of points
#[derive(Debug, Clone)]
pub struct Shape {
    mode: ShapeMode,
    points: Vec<Point, MAX_POINTS>,
}

impl Shape {
    /// Build a shape from caller-supplied points
    pub fn new(points: &[Point], mode: ShapeMode) -> Result<Self> {
        let points = Vec::from_slice(points).map_err(|()| Error::TooManyPoints {
            count: points.len(),
            max: MAX_POINTS,
        })?;
        Ok(Self { mode, points })
    }

    /// Rendering mode
    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    /// Points in insertion order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest box containing every point, as (min, max) corners
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}
