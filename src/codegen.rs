// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Emit C++ drawing code for a layout library.
//!
//! Every rectangle and polygon is clipped to the requested x-window and
//! shifted before it is written. Shapes that vanish are skipped.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::export::VertexRecord;
use crate::geometry::{clip_and_shift, clip_rectangle, ClipBounds, Point, Rectangle, Shift};
use crate::layout::{Cell, LayerShapes, Library, Units};
use crate::tech::Technology;

const ADD_POLYGON_START: &str = "layout->AddPolygon(Polygon({";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub bounds: ClipBounds,
    pub shift: Shift,
}

#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub code: String,
    /// Every emitted polygon vertex, in emission order.
    pub vertices: Vec<VertexRecord>,
    pub polygons_emitted: usize,
    pub polygons_dropped: usize,
    pub rectangles_emitted: usize,
    pub rectangles_dropped: usize,
}

fn format_point(point: Point) -> String {
    format!("Point({}, {})", point.x, point.y)
}

pub fn format_rectangle(rect: &Rectangle) -> Result<String> {
    Ok(format!(
        "layout->AddRectangle(Rectangle({}, {}));",
        format_point(rect.lower_left),
        format_point(rect.upper_right()?)
    ))
}

/// One `AddPolygon` statement, one vertex per line.
pub fn format_polygon(points: &[Point]) -> String {
    let separator = format!(",\n{}", " ".repeat(ADD_POLYGON_START.len()));
    let point_list = points
        .iter()
        .map(|&point| format_point(point))
        .collect::<Vec<String>>()
        .join(&separator);
    format!("{ADD_POLYGON_START}{point_list}}}));")
}

fn layer_label(shapes: &LayerShapes, tech: &Technology) -> String {
    match tech.lookup(shapes.layer) {
        Some(info) => info.full_name(),
        None => format!("{}/{}", shapes.layer.number, shapes.layer.purpose),
    }
}

fn convert_layer(
    cell: &Cell,
    shapes: &LayerShapes,
    tech: &Technology,
    options: &ConvertOptions,
    out: &mut Conversion,
) -> Result<()> {
    if !shapes.paths.is_empty() {
        return Err(Error::UnsupportedPaths {
            cell: cell.name.clone(),
            layer: shapes.layer,
            count: shapes.paths.len(),
        });
    }

    if let Some(info) = tech.lookup(shapes.layer) {
        out.code.push_str(&format!("// {}\n", info.comment()));
        out.code.push_str(&format!(
            "layout->SetActiveLayerByName(\"{}\");\n",
            info.full_name()
        ));
    }

    for rect in &shapes.rectangles {
        match clip_rectangle(rect, options.bounds)? {
            Some(clipped) => {
                let shifted = Rectangle::new(
                    options.shift.apply(clipped.lower_left)?,
                    clipped.width,
                    clipped.height,
                );
                out.code.push_str(&format_rectangle(&shifted)?);
                out.code.push('\n');
                out.rectangles_emitted += 1;
            }
            None => out.rectangles_dropped += 1,
        }
    }

    let label = layer_label(shapes, tech);
    for (index, polygon) in shapes.polygons.iter().enumerate() {
        let points = clip_and_shift(&polygon.vertices, options.bounds, options.shift)?;
        if points.is_empty() {
            debug!(
                "[CLIP] {}: polygon {index} on {label} clipped away",
                cell.name
            );
            out.polygons_dropped += 1;
            continue;
        }

        out.code.push_str(&format_polygon(&points));
        out.code.push('\n');
        out.polygons_emitted += 1;
        out.vertices
            .extend(points.iter().enumerate().map(|(vertex, point)| VertexRecord {
                cell: cell.name.clone(),
                layer: label.clone(),
                polygon: index,
                vertex,
                x: point.x,
                y: point.y,
            }));
    }

    out.code.push('\n');
    Ok(())
}

/// Generate drawing code for every cell in `library`.
pub fn generate(
    library: &Library,
    tech: &Technology,
    options: &ConvertOptions,
) -> Result<Conversion> {
    if library.units != Units::Nano {
        return Err(Error::UnsupportedUnits(library.units));
    }

    let mut out = Conversion::default();
    for cell in &library.cells {
        if !cell.instances.is_empty() {
            return Err(Error::UnsupportedInstances {
                cell: cell.name.clone(),
                count: cell.instances.len(),
            });
        }
        for shapes in &cell.shapes {
            convert_layer(cell, shapes, tech, options, &mut out)?;
        }
    }

    info!(
        "[INFO] Emitted {} polygons ({} clipped away), {} rects ({} clipped away)",
        out.polygons_emitted, out.polygons_dropped, out.rectangles_emitted, out.rectangles_dropped
    );
    Ok(out)
}
