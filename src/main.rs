//! PunchHole - Front camera cutout geometry
//!
//! Resolves the screen rectangle covered by a punch hole camera for a
//! configured device and display state.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use punchhole::config::{self, Config};
use punchhole::cutout::{CutoutDescriptor, DisplayProvider, PunchHole, StaticDisplay};
use punchhole::feature::{FeatureSource, FOLDABLE_KEY, PUNCH_HOLE_KEY};
use punchhole::geometry::{RealSize, Rotation};

/// PunchHole - Front camera cutout geometry
#[derive(Parser)]
#[command(name = "punchhole")]
#[command(author = "PunchHole Contributors")]
#[command(version)]
#[command(about = "Locate the front camera punch hole on screen", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the punch hole rectangle for the configured display
    Resolve {
        /// Display rotation in degrees (0, 90, 180, 270)
        #[arg(short, long)]
        rotation: Option<u32>,

        /// Real display width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Real display height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Descriptor string overriding the vendor store
        #[arg(short, long)]
        descriptor: Option<String>,

        /// Treat the device as a foldable
        #[arg(long)]
        foldable: bool,

        /// Camera margin below the status bar top (negative = unavailable)
        #[arg(short, long, allow_negative_numbers = true)]
        margin: Option<i32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a descriptor string and print its fields
    Parse {
        /// Descriptor, e.g. "pos:0.5:0.02,size:0.05:0.05,type:circle"
        descriptor: String,

        /// Treat the device as a foldable
        #[arg(long)]
        foldable: bool,
    },

    /// Check whether the configured device has a circular punch hole
    Check,

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show device, feature and display information
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        })
    };

    match cli.command {
        Commands::Resolve {
            rotation,
            width,
            height,
            descriptor,
            foldable,
            margin,
            json,
        } => {
            let mut config = config;
            if let Some(degrees) = rotation {
                config.display.rotation = Rotation::from_degrees(degrees)?;
            }
            if let Some(width) = width {
                config.display.width = width;
            }
            if let Some(height) = height {
                config.display.height = height;
            }
            if let Some(margin) = margin {
                config.display.camera_top_margin = Some(margin);
            }
            if let Some(descriptor) = descriptor {
                config
                    .features
                    .values
                    .insert(PUNCH_HOLE_KEY.to_string(), descriptor);
            }
            if foldable {
                config
                    .features
                    .values
                    .insert(FOLDABLE_KEY.to_string(), "true".to_string());
            }
            run_resolve(&config, json)?;
        }
        Commands::Parse {
            descriptor,
            foldable,
        } => {
            run_parse(&descriptor, foldable)?;
        }
        Commands::Check => {
            let features = config.open_features();
            let circle = PunchHole::is_circle_device(&config.platform(), &features);
            println!("{}", circle);
        }
        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config()?;
                if let Some(path) = output {
                    std::fs::write(&path, &sample)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Configuration written to: {}", path.display());
                } else {
                    println!("{}", sample);
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Commands::Info => {
            print_info(&config);
        }
    }

    Ok(())
}

/// Resolve and print the punch hole rect
fn run_resolve(config: &Config, json: bool) -> anyhow::Result<()> {
    let features = config.open_features();
    let display = config.display();

    let mut punch_hole = PunchHole::new();
    let initialized = punch_hole.initialize(&features);
    let rect = punch_hole.circle_rect_on(&display);

    tracing::info!(
        "Resolved {} on {}x{} at {} (descriptor: {})",
        rect,
        config.display.width,
        config.display.height,
        config.display.rotation,
        initialized
    );

    if json {
        let output = serde_json::json!({
            "rotation": config.display.rotation.degrees(),
            "descriptor": punch_hole.descriptor(),
            "circle": punch_hole.is_circle(),
            "empty": rect.is_empty(),
            "rect": rect,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", rect);
    }

    Ok(())
}

/// Parse and print a descriptor
fn run_parse(descriptor: &str, foldable: bool) -> anyhow::Result<()> {
    let parsed = CutoutDescriptor::parse(Some(descriptor), foldable)
        .with_context(|| format!("rejected descriptor {:?}", descriptor))?;

    if let Some(position) = parsed.position() {
        println!("position: {}, {}", position.x, position.y);
    }
    if let Some(size) = parsed.size() {
        println!("size:     {}, {}", size.x, size.y);
    }
    println!("shape:    {}", parsed.shape().unwrap_or_default());
    println!("circle:   {}", parsed.is_circle());

    Ok(())
}

/// Print device, feature and display information
fn print_info(config: &Config) {
    let platform = config.platform();
    let features = config.open_features();
    let display: StaticDisplay = config.display();
    let snapshot = display.snapshot();

    println!("PunchHole Information");
    println!("=====================\n");

    println!("Manufacturer: {}", platform.manufacturer);
    println!("SDK level: {}", platform.sdk_int);
    println!("Punch hole supported: {}", platform.supports_punch_hole());

    println!("\nFeature source: {}", features.name());
    let raw = features.get_string(PUNCH_HOLE_KEY);
    println!(
        "Descriptor: {}",
        if raw.is_empty() { "(none)" } else { raw.as_str() }
    );
    println!("Foldable: {}", features.get_boolean(FOLDABLE_KEY));

    let RealSize { width, height } = snapshot.real_size;
    println!("\nDisplay: {}x{} at {}", width, height, snapshot.rotation);
    match snapshot.cutout {
        Some(bounds) => {
            println!("  Cutout top: {}", bounds.top);
            println!("  Cutout left: {}", bounds.left);
            println!("  Cutout right: {}", bounds.right);
            println!("  Cutout bottom: {}", bounds.bottom);
        }
        None => println!("  Cutout: not reported"),
    }
    match display.camera_top_margin() {
        Some(margin) => println!("  Camera margin: {}px", margin),
        None => println!("  Camera margin: unavailable"),
    }

    let mut punch_hole = PunchHole::new();
    punch_hole.initialize(&features);
    println!("\nPunch hole: {}", punch_hole.circle_rect_on(&display));
}
