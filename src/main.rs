// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use layout2cpp::export::export_vertices_to_csv;
use layout2cpp::layout::reader::LayoutReader;
use layout2cpp::{generate, ClipBounds, ConvertOptions, Shift, Technology};

/// Convert a layout dump into C++ drawing code
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layout dump to convert
    #[arg(short = 'i', long)]
    layout: PathBuf,

    /// Layer table (CSV: index,sub_index,name,purpose_description,purpose_type)
    #[arg(short, long)]
    tech: Option<PathBuf>,

    /// Drop geometry left of this x (nm)
    #[arg(long, allow_hyphen_values = true)]
    cut_left: Option<i64>,

    /// Drop geometry right of this x (nm)
    #[arg(long, allow_hyphen_values = true)]
    cut_right: Option<i64>,

    /// Added to every x after clipping (nm)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    shift_x: i64,

    /// Added to every y after clipping (nm)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    shift_y: i64,

    /// Write the generated code here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export emitted polygon vertices as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConvertOptions {
        bounds: ClipBounds::new(cli.cut_left, cli.cut_right)?,
        shift: Shift::new(cli.shift_x, cli.shift_y),
    };

    let library = LayoutReader::new().read(&cli.layout)?;
    let tech = match &cli.tech {
        Some(path) => Technology::read(path)?,
        None => Technology::new(),
    };

    let conversion = generate(&library, &tech, &options)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &conversion.code)?;
            info!("[SAVE] Wrote drawing code to {}", path.display());
        }
        None => print!("{}", conversion.code),
    }

    if let Some(path) = &cli.csv {
        export_vertices_to_csv(&conversion.vertices, path)?;
        info!(
            "[SAVE] Exported {} vertices to {}",
            conversion.vertices.len(),
            path.display()
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        error!("[FAIL] {e}");
        std::process::exit(1);
    }
}
