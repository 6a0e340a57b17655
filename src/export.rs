// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// One emitted polygon vertex after clipping and shifting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexRecord {
    #[serde(rename = "Cell")]
    pub cell: String,
    #[serde(rename = "Layer")]
    pub layer: String,
    #[serde(rename = "Polygon")]
    pub polygon: usize,
    #[serde(rename = "Vertex")]
    pub vertex: usize,
    #[serde(rename = "X")]
    pub x: i64,
    #[serde(rename = "Y")]
    pub y: i64,
}

pub fn write_vertices<W: Write>(records: &[VertexRecord], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export emitted polygon vertices to a CSV file
pub fn export_vertices_to_csv<P: AsRef<Path>>(records: &[VertexRecord], file_path: P) -> Result<()> {
    let file = File::create(file_path)?;
    write_vertices(records, file)
}
