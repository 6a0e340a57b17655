//! Layout-to-C++ converter library
//!
//! Reads plain-text layout dumps, clips polygons to a vertical window and
//! emits C++ drawing code for them.

pub mod codegen;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod tech;

// Re-export commonly used types
pub use codegen::{generate, Conversion, ConvertOptions};
pub use error::{Error, Result};
pub use geometry::{ClipBounds, GeometryError, Point, Rectangle, Shift};
pub use layout::{Cell, LayerShapes, Library, Polygon};
pub use tech::{LayerInfo, Technology};
