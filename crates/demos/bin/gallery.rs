//! Run the widget gallery headless and print the paint commands of the
//! last frame.

use std::{fs, io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use trellis::{Config, Expanse, Theme, testing::Harness};
use trellis_demos::gallery::Gallery;

/// CLI flags for the gallery.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Frames to run before painting.
    #[clap(short, long, default_value_t = 2)]
    frames: u32,

    /// Use the light theme.
    #[clap(short, long)]
    light: bool,

    /// JSON configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Click at `x,y`, each followed by a frame. May be repeated.
    #[clap(long, value_parser = parse_point)]
    click: Vec<(f32, f32)>,

    /// Window width.
    #[clap(long, default_value_t = 800.0)]
    width: f32,

    /// Window height.
    #[clap(long, default_value_t = 600.0)]
    height: f32,

    /// Log debug events to stderr.
    #[clap(short, long)]
    verbose: bool,
}

/// Parse an `x,y` pair.
fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let parse = |v: &str| v.trim().parse::<f32>().map_err(|e| e.to_string());
    Ok((parse(x)?, parse(y)?))
}

/// Run the gallery.
fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
    let config = match &args.config {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let theme = if args.light {
        Theme::light()
    } else {
        Theme::dark()
    };

    let mut harness = Harness::with_config(config)?.with_theme(&theme)?;
    harness.set_size(Expanse::new(args.width, args.height));
    let mut gallery = Gallery::default();
    for _ in 0..args.frames {
        harness.frame(|ui| gallery.build(ui));
    }
    for (x, y) in args.click {
        harness.click(x, y);
        harness.frame(|ui| gallery.build(ui));
    }
    for cmd in harness.draw() {
        println!("{cmd:?}");
    }
    eprintln!("{gallery:?}");
    Ok(())
}
