// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::layout::{LayerKey, Units};

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },
    #[error("unsupported units {0}: all coordinates are assumed to be nanometres")]
    UnsupportedUnits(Units),
    #[error("cell {cell} has {count} instances")]
    UnsupportedInstances { cell: String, count: usize },
    #[error("layer {}/{} in cell {cell} has {count} paths", .layer.number, .layer.purpose)]
    UnsupportedPaths {
        cell: String,
        layer: LayerKey,
        count: usize,
    },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub type Result<T> = std::result::Result<T, Error>;
