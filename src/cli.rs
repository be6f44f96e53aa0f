use crate::config::{Config, load_config};
use crate::ir::Scene;
use crate::layout::layout_scene;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_scene;
use crate::render::{render_text, write_output_text};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "brlgrid",
    version,
    about = "Lay out on-screen elements on a braille display grid"
)]
pub struct Args {
    /// Scene file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Lane merge tolerance in screen pixels
    #[arg(long = "fuzz")]
    pub fuzz: Option<i32>,

    /// Blank cells between columns
    #[arg(long = "column-spacing")]
    pub column_spacing: Option<i32>,

    /// Display length in cells; longer lines are clipped
    #[arg(short = 'w', long = "width")]
    pub width: Option<usize>,

    /// Write lanes, cells and links as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct LocationOutput<'a> {
    id: &'a str,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let input = read_input(args.input.as_deref())?;
    let mut scene = parse_scene(&input)?;
    let grid = layout_scene(&mut scene, &config.grid);
    tracing::info!(
        elements = scene.elements.len(),
        placed = grid.cells().len(),
        "layout complete"
    );

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &grid, &scene)?;
    }

    match args.format {
        OutputFormat::Text => {
            let lines = render_text(&scene, &config.render);
            write_output_text(&lines, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_output_json(&scene, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(fuzz) = args.fuzz {
        config.grid.fuzz = non_negative(fuzz, "--fuzz")?;
    }
    if let Some(spacing) = args.column_spacing {
        config.grid.column_spacing = non_negative(spacing, "--column-spacing")?;
    }
    if args.width.is_some() {
        config.render.width = args.width;
    }
    Ok(config)
}

fn non_negative(value: i32, flag: &str) -> Result<i32> {
    if value < 0 {
        return Err(anyhow::anyhow!("{} must not be negative (got {})", flag, value));
    }
    Ok(value)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn locations(scene: &Scene) -> Vec<LocationOutput<'_>> {
    scene
        .elements
        .iter()
        .filter_map(|element| {
            element.location.map(|rect| LocationOutput {
                id: &element.id,
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            })
        })
        .collect()
}

fn write_output_json(scene: &Scene, output: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(&locations(scene))?;
    json.push('\n');
    if let Some(path) = output {
        std::fs::write(path, json)?;
    } else {
        io::stdout().write_all(json.as_bytes())?;
    }
    Ok(())
}
