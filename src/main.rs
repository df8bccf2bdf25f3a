use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use plate3d::config::FileConfig;
use plate3d::domain::{PlateSpec, SteelGrade};
use plate3d::mesh::estimate_stl_size;
use plate3d::preview::write_preview;
use plate3d::session::{GenerateOptions, Session};

/// Compute the weight of a rectangular steel plate and export it as STL and DXF
///
/// Writes chapa.stl (3D mesh) and chapa.dxf (top-down outline) to the
/// output directory, overwriting any previous run.
///
/// Examples:
///   # 100 x 100 x 10 mm plate in the default grade
///   plate3d
///
///   # Stainless plate, ASCII STL, into ./out
///   plate3d -w 50 -l 20 -t 5 -g "AISI 304" --ascii -o out
///
///   # Also write a Plotly preview at 40% opacity
///   plate3d -w 300 -l 150 -t 6.35 --opacity 0.4 --preview preview.json
#[derive(Parser, Debug)]
#[command(name = "plate3d")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches plate3d.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plate width in mm (X axis)
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    width: Option<f64>,

    /// Plate length in mm (Y axis)
    #[arg(short = 'l', long, allow_negative_numbers = true)]
    length: Option<f64>,

    /// Plate thickness in mm (Z axis)
    #[arg(short = 't', long, allow_negative_numbers = true)]
    thickness: Option<f64>,

    /// Steel grade, e.g. "SAE 1020" or "AISI 304" (see --list-grades)
    #[arg(short = 'g', long)]
    grade: Option<SteelGrade>,

    /// Preview opacity between 0.0 and 1.0
    #[arg(long, value_parser = parse_opacity)]
    opacity: Option<f64>,

    /// Directory for chapa.stl and chapa.dxf
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,

    /// Write the 3D preview as Plotly JSON to this path
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Print the available steel grades and exit
    #[arg(long)]
    list_grades: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_opacity(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("opacity must be between 0.0 and 1.0, got {}", value))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_grades {
        print_grades();
        return Ok(());
    }

    let (file_config, rejected) = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            let config: FileConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;
            (Some(config), Vec::new())
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        let lookup = FileConfig::load();
        (lookup.config, lookup.rejected)
    };
    let file_config = file_config.unwrap_or_default();

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);
    for skipped in &rejected {
        warn!(
            path = %skipped.path.display(),
            error = %skipped.error,
            "ignoring config file that failed to parse"
        );
    }

    let spec = PlateSpec::clamped(
        args.width.unwrap_or(file_config.width),
        args.length.unwrap_or(file_config.length),
        args.thickness.unwrap_or(file_config.thickness),
    )?;
    let grade = args.grade.unwrap_or(file_config.grade);
    let opacity = args.opacity.unwrap_or(file_config.opacity);
    let options = GenerateOptions {
        out_dir: args.out_dir.clone().unwrap_or(file_config.out_dir.clone()),
        ascii_stl: args.ascii || file_config.ascii,
    };
    let preview_path = args.preview.clone().or(file_config.preview.clone());

    println!("plate3d - Steel Plate Generator");
    println!("===============================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Width: {}mm", spec.width_mm);
        println!("  Length: {}mm", spec.length_mm);
        println!("  Thickness: {}mm", spec.thickness_mm);
        println!(
            "  Grade: {} ({:.2} g/cm³)",
            grade,
            grade.density_g_per_cm3()
        );
        println!("  Opacity: {:.1}", opacity);
        println!(
            "  STL format: {}",
            if options.ascii_stl { "ASCII" } else { "binary" }
        );
        println!("  Output directory: {}", options.out_dir.display());
        println!();
    }

    let mut session = Session::new();

    let spinner = create_spinner("Generating plate...");
    let start = Instant::now();
    let generation = session
        .generate(spec, grade, &options)
        .context("Failed to generate plate")?;
    spinner.finish_with_message(format!(
        "Generated {} triangles [{:.1}ms]",
        generation.triangles.len(),
        start.elapsed().as_secs_f64() * 1000.0
    ));
    info!(mass_kg = generation.weight.mass_kg, "generation complete");
    if verbose {
        println!("  {}", generation.validation.summary());
        if !options.ascii_stl {
            println!(
                "  STL size: {} bytes",
                estimate_stl_size(generation.triangles.len())
            );
        }
    }

    println!();
    println!(
        "Plate:  {} x {} x {} mm, {}",
        spec.width_mm, spec.length_mm, spec.thickness_mm, grade
    );
    println!("Volume: {:.1} mm³", generation.weight.volume_mm3);
    println!("Weight: {:.3} kg", generation.weight.mass_kg);
    println!();
    println!("Files:");
    for artifact in generation.artifacts() {
        println!("  {} ({})", artifact.path.display(), artifact.mime);
    }

    if let Some(path) = preview_path {
        let spinner = create_spinner("Rendering preview...");
        let surface = session
            .preview(opacity)
            .context("No plate generated to preview")?;
        write_preview(&path, &surface)?;
        spinner.finish_with_message(format!(
            "Preview: {} ({} vertices, opacity {:.1})",
            path.display(),
            surface.vertex_count(),
            surface.opacity
        ));
    }

    Ok(())
}

fn print_grades() {
    println!("{:<10} {:>8}", "Grade", "g/cm³");
    for grade in SteelGrade::ALL {
        println!("{:<10} {:>8.2}", grade.name(), grade.density_g_per_cm3());
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
