use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stainquant::models::{MaskCategory, ReportRow, Settings, PRESETS, UNDEFINED_RATIO};
use stainquant::services::{
    analyze_file, artifact_dir, load_image, save_artifacts, spawn_batch, BatchOptions,
    DEFAULT_EXTENSION, SETTINGS_FILE,
};

/// Settings file used when `--settings` is not given.
const SETTINGS_ENV: &str = "STAINQUANT_SETTINGS";

#[derive(Parser)]
#[command(name = "stainquant")]
#[command(about = "Quantify picrosirius red stain in histology images by HSV thresholds")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantify a single image
    Analyze {
        /// Image file
        image: PathBuf,

        /// Settings file (JSON, or YAML by extension)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Write mask images to this directory
        #[arg(long)]
        artifacts: Option<PathBuf>,
    },
    /// Quantify every matching image in a folder and write PSR_results.csv
    Batch {
        /// Input folder
        #[arg(short, long)]
        path: PathBuf,

        /// Filename suffix to match
        #[arg(short, long, default_value = DEFAULT_EXTENSION)]
        ext: String,

        /// Output folder (defaults to the input folder)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Settings file (JSON, or YAML by extension)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Also write per-image mask images
        #[arg(long)]
        save_images: bool,

        /// Worker threads (defaults to one per core)
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Create or inspect settings files
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    /// Add a range around a sampled pixel, or remove one
    Pick {
        /// Settings file to update (created from defaults if missing)
        #[arg(short, long)]
        settings: PathBuf,

        /// red (stain) or white (non-tissue)
        #[arg(short, long)]
        category: MaskCategory,

        /// Image to sample
        #[arg(short, long, required_unless_present = "remove")]
        image: Option<PathBuf>,

        /// Pixel column
        #[arg(short, required_unless_present = "remove")]
        x: Option<usize>,

        /// Pixel row
        #[arg(short, required_unless_present = "remove")]
        y: Option<usize>,

        /// Remove the range at this index instead of adding one
        #[arg(long, conflicts_with_all = ["image", "x", "y"])]
        remove: Option<usize>,
    },
    /// List the built-in named color ranges
    Presets,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Write a settings file built from presets
    Init {
        /// Output file
        #[arg(short, long, default_value = SETTINGS_FILE)]
        output: PathBuf,

        /// Preset for the stain mask
        #[arg(long, default_value = "red")]
        signal: String,

        /// Preset for the non-tissue mask
        #[arg(long, default_value = "white")]
        exclusion: String,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Print the ranges in a settings file
    Show {
        /// Settings file (falls back to $STAINQUANT_SETTINGS, then defaults)
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stainquant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Analyze {
            image,
            settings,
            json,
            artifacts,
        }) => run_analyze_command(&image, settings.as_deref(), json, artifacts.as_deref()),
        Some(Commands::Batch {
            path,
            ext,
            out,
            settings,
            save_images,
            threads,
        }) => {
            let mut options = BatchOptions::new(path);
            options.extension = ext;
            if let Some(out) = out {
                options.output_dir = out;
            }
            options.save_artifacts = save_images;
            options.threads = threads;
            run_batch_command(options, settings.as_deref())
        }
        Some(Commands::Settings { command }) => match command {
            SettingsCommand::Init {
                output,
                signal,
                exclusion,
                force,
            } => run_settings_init(&output, &signal, &exclusion, force),
            SettingsCommand::Show { file } => run_settings_show(file.as_deref()),
        },
        Some(Commands::Pick {
            settings,
            category,
            image,
            x,
            y,
            remove,
        }) => match (remove, image, x, y) {
            (Some(index), _, _, _) => run_remove_command(&settings, category, index),
            (None, Some(image), Some(x), Some(y)) => {
                run_pick_command(&settings, category, &image, x, y)
            }
            _ => anyhow::bail!("--image, -x and -y are required unless --remove is given"),
        },
        Some(Commands::Presets) => {
            run_presets_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// `--settings`, then `$STAINQUANT_SETTINGS`, then built-in defaults.
fn resolve_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(SETTINGS_ENV).ok().map(PathBuf::from));

    match path {
        Some(path) => Ok(Settings::load(&path)?),
        None => {
            tracing::info!("No settings file given, using built-in ranges");
            Ok(Settings::default())
        }
    }
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| UNDEFINED_RATIO.to_string(), |r| r.to_string())
}

fn run_analyze_command(
    image: &Path,
    settings: Option<&Path>,
    json: bool,
    artifacts: Option<&Path>,
) -> anyhow::Result<()> {
    let settings = resolve_settings(settings)?;
    let quantifier = settings.quantifier()?;
    let analysis = analyze_file(image, &quantifier)?;

    if let Some(out) = artifacts {
        let dir = artifact_dir(out, &analysis.filename);
        let written = save_artifacts(&dir, &analysis)?;
        tracing::info!(count = written.len(), dir = %dir.display(), "Saved mask images");
    }

    let row = ReportRow::new(analysis.filename.clone(), analysis.counts());
    if json {
        println!("{}", serde_json::to_string_pretty(&row)?);
    } else {
        println!("RED PIXELS: {}", row.red_pixel_count);
        println!("NON-TISSUE PIXELS: {}", row.non_tissue_pixel_count);
        println!("TOTAL PIXELS: {}", row.total_pixel_count);
        println!("PERCENT RED: {}", format_ratio(row.percent_red));
    }
    Ok(())
}

fn run_batch_command(options: BatchOptions, settings: Option<&Path>) -> anyhow::Result<()> {
    let settings = resolve_settings(settings)?;
    let (handle, progress) = spawn_batch(options, settings);

    let mut last_reported = 0;
    while !handle.is_finished() {
        std::thread::sleep(Duration::from_millis(100));
        let done = progress.processed();
        if done != last_reported {
            last_reported = done;
            tracing::info!(
                "Progress: {:.0}% ({done}/{})",
                progress.fraction() * 100.0,
                progress.total()
            );
        }
    }

    let report = handle
        .join()
        .map_err(|_| anyhow::anyhow!("Batch worker panicked"))??;

    for failure in &report.failures {
        eprintln!("  ! {}: {}", failure.filename, failure.error);
    }
    println!(
        "Processed {} images ({} failed), results in {}",
        report.rows.len(),
        report.failures.len(),
        report.report_path.display()
    );
    Ok(())
}

fn run_settings_init(
    output: &Path,
    signal: &str,
    exclusion: &str,
    force: bool,
) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    let settings = Settings::from_presets(signal, exclusion)?;
    settings.save(output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_settings_show(file: Option<&Path>) -> anyhow::Result<()> {
    let settings = resolve_settings(file)?;
    for category in [MaskCategory::Red, MaskCategory::White] {
        let tol = settings.tolerance(category);
        println!(
            "{category} ({}), tolerance h={} s={} v={}:",
            category.label(),
            tol.h,
            tol.s,
            tol.v
        );
        let entries = settings.entries(category);
        if entries.is_empty() {
            println!("  (no ranges)");
        }
        for (index, entry) in entries.iter().enumerate() {
            let swatch = entry
                .swatch()
                .map(|rgb| format!("  swatch {}", rgb.to_hex()))
                .unwrap_or_default();
            println!(
                "  [{index}] {:?}..={:?}{swatch}",
                entry.lower, entry.upper
            );
        }
    }
    Ok(())
}

/// Load `path`, or start from defaults when it does not exist yet.
fn load_or_default(path: &Path) -> anyhow::Result<Settings> {
    if path.exists() {
        Ok(Settings::load(path)?)
    } else {
        Ok(Settings::default())
    }
}

fn run_pick_command(
    settings_path: &Path,
    category: MaskCategory,
    image: &Path,
    x: usize,
    y: usize,
) -> anyhow::Result<()> {
    let mut settings = load_or_default(settings_path)?;
    let image = load_image(image)?;
    let sample = image.sample(x, y)?;

    let range = settings.add_range(category, sample.hsv, sample.rgb);
    settings
        .save(settings_path)
        .with_context(|| format!("updating {}", settings_path.display()))?;

    println!(
        "Pixel ({x}, {y}): RGB {} HSV {} -> {category} range {range}",
        sample.rgb, sample.hsv
    );
    Ok(())
}

fn run_remove_command(
    settings_path: &Path,
    category: MaskCategory,
    index: usize,
) -> anyhow::Result<()> {
    let mut settings = Settings::load(settings_path)?;
    let removed = settings.remove_range(category, index)?;
    settings.save(settings_path)?;
    println!(
        "Removed {category} range [{index}] {:?}..={:?}",
        removed.lower, removed.upper
    );
    Ok(())
}

fn run_presets_command() {
    println!("Built-in ranges (H 0-179, S 0-255, V 0-255):\n");
    for preset in PRESETS {
        for (lower, upper) in preset.bounds {
            println!(
                "  {:<8} {:?}..={:?}  {}",
                preset.name, lower, upper, preset.description
            );
        }
    }
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("stainquant v{VERSION}");
    println!("Picrosirius red stain quantification\n");

    let settings_env = std::env::var(SETTINGS_ENV).ok();
    println!("Environment Variables:");
    println!(
        "  {SETTINGS_ENV} = {}",
        settings_env.as_deref().unwrap_or("(not set, built-in ranges)")
    );

    println!("\nCommands:");
    println!("  stainquant analyze <IMAGE>         Quantify one image");
    println!("  stainquant batch --path <DIR>      Quantify a folder");
    println!("  stainquant settings init           Write a settings file");
    println!("  stainquant pick ...                Add a range from a pixel");
    println!("  stainquant presets                 List built-in ranges");
}
