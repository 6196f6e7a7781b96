use crate::config::load_config;
use crate::input::parse_dataset;
use crate::ir::TimeScale;
use crate::layout::{LayoutOptions, compute_timeline_layout};
use crate::layout_dump::{dump_layout_json, write_layout_dump};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "chronolane",
    version,
    about = "Timeline layout engine (calendar bounds, time ruler, swim lanes)"
)]
pub struct Args {
    /// Input dataset (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (layout constants)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Ruler granularity. Auto-selected from the data span if omitted.
    #[arg(short = 's', long = "scale", value_enum)]
    pub scale: Option<ScaleArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ScaleArg {
    Day,
    Week,
    TwoWeek,
    Month,
    Quarter,
    Year,
    FiveYear,
}

impl From<ScaleArg> for TimeScale {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::Day => Self::Day,
            ScaleArg::Week => Self::Week,
            ScaleArg::TwoWeek => Self::TwoWeek,
            ScaleArg::Month => Self::Month,
            ScaleArg::Quarter => Self::Quarter,
            ScaleArg::Year => Self::Year,
            ScaleArg::FiveYear => Self::FiveYear,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let dataset = parse_dataset(&input)?;

    let opts = LayoutOptions {
        requested_scale: args.scale.map(TimeScale::from),
        viewport_px: args.width,
        ..LayoutOptions::default()
    };
    let layout = compute_timeline_layout(&dataset, &opts, &config.layout);

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout)?,
        None => println!("{}", dump_layout_json(&layout)?),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
