// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! nom parser for the plain-text layout dump.
//!
//! ```text
//! UNITS NANO ;
//! CELL inverter
//!   LAYER 68 20
//!     RECT 0 0 100 200 ;
//!     POLYGON 0 0 10 0 10 10 0 10 ;
//!   END
//! END inverter
//! ```
//!
//! `#` starts a comment that runs to the end of the line.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, i64 as integer, multispace1, not_line_ending, u32 as unsigned},
    combinator::{map, value, verify},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};

use super::{Cell, LayerKey, LayerShapes, Library, Path, Polygon, Units};
use crate::geometry::{Point, Rectangle};

enum Shape {
    Rect(Rectangle),
    Polygon(Polygon),
    Path(Path),
}

enum CellItem {
    Instance(String),
    Layer(LayerShapes),
}

fn comment(input: &str) -> IResult<&str, &str> {
    preceded(char('#'), not_line_ending).parse(input)
}

/// Skip whitespace and comments.
fn sp(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, comment)))).parse(input)
}

fn keyword<'a>(input: &'a str, kw: &'static str) -> IResult<&'a str, &'a str> {
    let (input, _) = sp(input)?;
    tag(kw)(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    let (input, _) = sp(input)?;
    take_while1(|c: char| {
        c.is_alphanumeric() || c == '_' || c == '.' || c == '/' || c == '-' || c == '$'
    })(input)
}

fn number(input: &str) -> IResult<&str, i64> {
    preceded(sp, integer).parse(input)
}

fn point(input: &str) -> IResult<&str, Point> {
    let (input, x) = number(input)?;
    let (input, y) = number(input)?;
    Ok((input, Point::new(x, y)))
}

fn parse_units(input: &str) -> IResult<&str, Units> {
    let (input, _) = keyword(input, "UNITS")?;
    let (input, _) = sp(input)?;
    let (input, units) = alt((
        value(Units::Nano, tag("NANO")),
        value(Units::Micro, tag("MICRO")),
        value(Units::Angstrom, tag("ANGSTROM")),
    ))
    .parse(input)?;
    let (input, _) = keyword(input, ";")?;
    Ok((input, units))
}

fn parse_rect(input: &str) -> IResult<&str, Rectangle> {
    let (input, _) = keyword(input, "RECT")?;
    let (input, lower_left) = point(input)?;
    let (input, width) = number(input)?;
    let (input, height) = number(input)?;
    let (input, _) = keyword(input, ";")?;
    Ok((input, Rectangle::new(lower_left, width, height)))
}

fn parse_polygon(input: &str) -> IResult<&str, Polygon> {
    let (input, _) = keyword(input, "POLYGON")?;
    let (input, vertices) = many0(point).parse(input)?;
    let (input, _) = keyword(input, ";")?;
    Ok((input, Polygon { vertices }))
}

fn parse_path(input: &str) -> IResult<&str, Path> {
    let (input, _) = keyword(input, "PATH")?;
    let (input, width) = number(input)?;
    let (input, points) = many0(point).parse(input)?;
    let (input, _) = keyword(input, ";")?;
    Ok((input, Path { width, points }))
}

fn parse_shape(input: &str) -> IResult<&str, Shape> {
    alt((
        map(parse_rect, Shape::Rect),
        map(parse_polygon, Shape::Polygon),
        map(parse_path, Shape::Path),
    ))
    .parse(input)
}

fn parse_layer(input: &str) -> IResult<&str, LayerShapes> {
    let (input, _) = keyword(input, "LAYER")?;
    let (input, _) = sp(input)?;
    let (input, number) = unsigned(input)?;
    let (input, _) = sp(input)?;
    let (input, purpose) = unsigned(input)?;
    let (input, shapes) = many0(parse_shape).parse(input)?;
    let (input, _) = keyword(input, "END")?;

    let mut layer = LayerShapes {
        layer: LayerKey { number, purpose },
        rectangles: Vec::new(),
        polygons: Vec::new(),
        paths: Vec::new(),
    };
    for shape in shapes {
        match shape {
            Shape::Rect(rect) => layer.rectangles.push(rect),
            Shape::Polygon(polygon) => layer.polygons.push(polygon),
            Shape::Path(path) => layer.paths.push(path),
        }
    }
    Ok((input, layer))
}

fn parse_instance(input: &str) -> IResult<&str, String> {
    let (input, _) = keyword(input, "INSTANCE")?;
    let (input, name) = identifier(input)?;
    let (input, _) = keyword(input, ";")?;
    Ok((input, name.to_string()))
}

fn parse_cell(input: &str) -> IResult<&str, Cell> {
    let (input, _) = keyword(input, "CELL")?;
    let (input, name) = identifier(input)?;
    let (input, items) = many0(alt((
        map(parse_instance, CellItem::Instance),
        map(parse_layer, CellItem::Layer),
    )))
    .parse(input)?;
    let (input, _) = keyword(input, "END")?;
    let (input, _) = verify(identifier, |end_name: &str| end_name == name).parse(input)?;

    let mut cell = Cell {
        name: name.to_string(),
        instances: Vec::new(),
        shapes: Vec::new(),
    };
    for item in items {
        match item {
            CellItem::Instance(instance) => cell.instances.push(instance),
            CellItem::Layer(layer) => cell.shapes.push(layer),
        }
    }
    Ok((input, cell))
}

/// Parse a whole layout dump. Trailing input that is not a cell is returned
/// as the remainder.
pub fn parse_library(input: &str) -> IResult<&str, Library> {
    let (input, units) = parse_units(input)?;
    let (input, cells) = many0(parse_cell).parse(input)?;
    let (input, _) = sp(input)?;
    Ok((input, Library { units, cells }))
}
