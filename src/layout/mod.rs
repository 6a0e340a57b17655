// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Micro,
    Nano,
    Angstrom,
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Units::Micro => "MICRO",
            Units::Nano => "NANO",
            Units::Angstrom => "ANGSTROM",
        };
        f.write_str(name)
    }
}

/// GDS-style layer number and purpose (datatype).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerKey {
    pub number: u32,
    pub purpose: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub width: i64,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerShapes {
    pub layer: LayerKey,
    pub rectangles: Vec<Rectangle>,
    pub polygons: Vec<Polygon>,
    pub paths: Vec<Path>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    pub instances: Vec<String>,
    pub shapes: Vec<LayerShapes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub units: Units,
    pub cells: Vec<Cell>,
}

pub mod parser;
pub mod reader;
