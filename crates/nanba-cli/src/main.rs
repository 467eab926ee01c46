//! nanba: CLI driver for license-plate localization.
//!
//! Runs the full flow on an image file: decode -> grayscale -> blur ->
//! Canny -> localization -> mask -> crop, optionally writing every
//! intermediate raster to disk and printing a human-readable or JSON
//! summary. Useful for:
//!
//! - Tuning Canny thresholds, blur sigma, and the approximation
//!   tolerance against real photographs
//! - Inspecting why localization failed on a given frame
//! - Producing the cropped plate raster for an external OCR engine
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin nanba -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use nanba_locate::{BoundingBox, LocateConfig, PlateRegion, Point, Polygon, preprocess};

/// License-plate localization and extraction.
///
/// Detects edges in the input image, locates the quadrilateral most
/// consistent with a plate, and crops it out for text recognition.
#[derive(Parser)]
#[command(name = "nanba", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Gaussian blur sigma applied before edge detection.
    #[arg(long, default_value_t = 1.4)]
    blur_sigma: f32,

    /// Canny low threshold.
    #[arg(long, default_value_t = 30.0)]
    canny_low: f32,

    /// Canny high threshold.
    #[arg(long, default_value_t = 200.0)]
    canny_high: f32,

    /// Polygon approximation tolerance in raster units.
    #[arg(long, default_value_t = LocateConfig::DEFAULT_EPSILON)]
    epsilon: f64,

    /// Number of largest contours considered as candidates.
    #[arg(long, default_value_t = LocateConfig::DEFAULT_TOP_K)]
    top_k: usize,

    /// Directory to write diagnostic rasters into (edges, mask, masked,
    /// plate crop, annotated original). Created if missing.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the summary as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,
}

/// Machine-readable localization summary.
#[derive(Serialize)]
struct Summary {
    /// The four plate corners in traversal order.
    location: Vec<Point>,
    /// Tight bounding box of the masked region.
    bounding_box: BoundingBox,
    /// Width and height of the cropped plate raster.
    crop_size: (u32, u32),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let color = match preprocess::decode_rgb(&image_bytes) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error decoding {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Image: {} ({}x{})",
        cli.image_path.display(),
        color.width(),
        color.height(),
    );

    let gray = preprocess::grayscale(&color);
    let blurred = preprocess::gaussian_blur(&gray, cli.blur_sigma);
    let edges = preprocess::canny(&blurred, cli.canny_low, cli.canny_high);

    let config = LocateConfig {
        epsilon: cli.epsilon,
        top_k: cli.top_k,
        ..LocateConfig::default()
    };

    let polygon = match nanba_locate::locate(&edges, &config) {
        Ok(polygon) => polygon,
        Err(e) => {
            eprintln!("Localization failed: {e}");
            eprintln!("Try adjusting --epsilon, --top-k, or the Canny thresholds.");
            return ExitCode::FAILURE;
        }
    };

    let region = match nanba_locate::extract_region(&gray, &polygon) {
        Ok(region) => region,
        Err(e) => {
            eprintln!("Extraction failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref out_dir) = cli.out_dir
        && let Err(e) = write_outputs(out_dir, &color, &edges, &polygon, &region)
    {
        eprintln!("Error writing outputs to {}: {e}", out_dir.display());
        return ExitCode::FAILURE;
    }

    let summary = Summary {
        location: polygon.points().to_vec(),
        bounding_box: region.bounding_box,
        crop_size: region.crop.dimensions(),
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing summary: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&summary);
    }

    ExitCode::SUCCESS
}

/// Write every diagnostic raster into `out_dir`.
fn write_outputs(
    out_dir: &Path,
    color: &image::RgbImage,
    edges: &image::GrayImage,
    polygon: &Polygon,
    region: &PlateRegion,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;

    edges.save(out_dir.join("edges.png"))?;
    region.mask.save(out_dir.join("mask.png"))?;
    region.crop.save(out_dir.join("plate.png"))?;

    let masked = nanba_locate::extract::mask_apply(color, &region.mask)?;
    masked.save(out_dir.join("masked.png"))?;

    let annotated = annotate(color.clone(), polygon);
    annotated.save(out_dir.join("annotated.png"))?;

    Ok(())
}

/// Draw the located plate onto a copy of the original: a green
/// rectangle spanning the polygon's first and third corners, which are
/// opposite in traversal order.
#[allow(clippy::cast_sign_loss)]
fn annotate(mut color: image::RgbImage, polygon: &Polygon) -> image::RgbImage {
    let points = polygon.points();
    let (Some(a), Some(b)) = (points.first(), points.get(2)) else {
        return color;
    };

    let (top, bottom) = (a.row.min(b.row).max(0), a.row.max(b.row).max(0));
    let (left, right) = (a.col.min(b.col).max(0), a.col.max(b.col).max(0));
    let rect = imageproc::rect::Rect::at(left, top)
        .of_size((right - left) as u32 + 1, (bottom - top) as u32 + 1);
    imageproc::drawing::draw_hollow_rect_mut(&mut color, rect, image::Rgb([0, 255, 0]));
    color
}

/// Print the human-readable localization report.
fn print_report(summary: &Summary) {
    println!("Plate located");
    println!(
        "  corners:  {}",
        summary
            .location
            .iter()
            .map(|p| format!("({}, {})", p.row, p.col))
            .collect::<Vec<_>>()
            .join(" "),
    );
    println!(
        "  box:      rows {}-{}, cols {}-{}",
        summary.bounding_box.row_min,
        summary.bounding_box.row_max,
        summary.bounding_box.col_min,
        summary.bounding_box.col_max,
    );
    println!(
        "  crop:     {}x{} px",
        summary.crop_size.0, summary.crop_size.1,
    );
}
