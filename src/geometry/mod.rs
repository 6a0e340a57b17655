// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Integer layout geometry and the vertical-window polygon clipper.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod clip;

pub use clip::{
    clip, clip_and_shift, clip_rectangle, clip_side, point_on_line_at_x, reorder, shift,
    ClipBounds, Shift, Side,
};

/// A point in layout units (nanometres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its lower-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle {
    pub lower_left: Point,
    pub width: i64,
    pub height: i64,
}

impl Rectangle {
    pub fn new(lower_left: Point, width: i64, height: i64) -> Self {
        Self {
            lower_left,
            width,
            height,
        }
    }

    pub fn upper_right(&self) -> Result<Point, GeometryError> {
        let overflow = GeometryError::CoordinateOverflow {
            operation: "rectangle corner",
        };
        let x = self.lower_left.x.checked_add(self.width).ok_or(overflow.clone())?;
        let y = self.lower_left.y.checked_add(self.height).ok_or(overflow)?;
        Ok(Point::new(x, y))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("cannot re-root an empty ring")]
    EmptyRing,
    #[error("no unique point at x = {x} on the vertical line through {start} and {end}")]
    VerticalEdge { start: Point, end: Point, x: i64 },
    #[error("coordinate overflow in {operation}")]
    CoordinateOverflow { operation: &'static str },
    #[error("clip bounds are inverted: left {left} > right {right}")]
    InvertedBounds { left: i64, right: i64 },
}
