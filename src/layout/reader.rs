// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::fs;
use std::path::Path;

use log::{debug, error, info, warn};

use super::{parser::parse_library, Library};
use crate::error::{Error, Result};

pub struct LayoutReader;

impl LayoutReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Library> {
        let path_str = path.as_ref().display().to_string();
        info!("[LOAD] Loading layout file: {path_str}");

        let content = fs::read_to_string(path)?;
        debug!("[FILE] Layout file size: {} bytes", content.len());

        self.parse(&content, &path_str)
    }

    pub fn parse(&self, content: &str, origin: &str) -> Result<Library> {
        match parse_library(content) {
            Ok((remaining, library)) => {
                if !remaining.trim().is_empty() {
                    let offset = content.len() - remaining.len();
                    let line = content[..offset].matches('\n').count() + 1;
                    error!("[FAIL] Unparsed content in {origin} near line {line}");
                    return Err(Error::Parse {
                        what: origin.to_string(),
                        message: format!(
                            "unexpected input near line {line}: {:?}",
                            remaining.lines().next().unwrap_or_default()
                        ),
                    });
                }

                info!("[PASS] Layout parsed successfully!");
                let mut total_rects = 0;
                let mut total_polygons = 0;
                for cell in &library.cells {
                    for shapes in &cell.shapes {
                        total_rects += shapes.rectangles.len();
                        total_polygons += shapes.polygons.len();
                    }
                }
                info!(
                    "[INFO] Statistics: {} cells, {total_rects} rects, {total_polygons} polygons",
                    library.cells.len()
                );
                if library.cells.is_empty() {
                    warn!("[WARN] {origin} contains no cells");
                }
                Ok(library)
            }
            Err(e) => {
                error!("[FAIL] Failed to parse layout file: {e:?}");
                Err(Error::Parse {
                    what: origin.to_string(),
                    message: format!("{e:?}"),
                })
            }
        }
    }
}

impl Default for LayoutReader {
    fn default() -> Self {
        Self::new()
    }
}
