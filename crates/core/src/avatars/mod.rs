//! Avatar variants: every avatar image named by an address is republished
//! under all three spellings of that address as a square JPEG.
//!
//! This pass is best effort. Per-file problems are logged and the file is
//! skipped; nothing here fails the build.

use std::collections::HashMap;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use rayon::prelude::*;
use serde::Serialize;

use crate::address::Address;
use crate::error::AvatarError;
use crate::model::AvatarVariantSet;

/// Input extensions considered avatars (compared case-insensitively).
pub const AVATAR_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Edge length of every generated avatar.
pub const AVATAR_SIZE: u32 = 200;

/// JPEG quality of every generated avatar.
pub const AVATAR_QUALITY: u8 = 85;

/// Counts reported after an avatar pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AvatarReport {
    /// Inputs rendered successfully.
    pub processed: usize,
    /// Inputs skipped because of an error or a conflicting spelling.
    pub skipped: usize,
    /// Output files written.
    pub written: usize,
}

/// Output file name for one variant spelling.
pub fn output_filename(variant: &str) -> String {
    format!("{variant}_{AVATAR_SIZE}.jpg")
}

/// Parse a file stem as an address in any spelling.
pub fn variants_for_stem(stem: &str) -> Result<AvatarVariantSet, AvatarError> {
    let address = Address::parse(stem)
        .map_err(|source| AvatarError::InvalidStem { stem: stem.to_string(), source })?;
    Ok(AvatarVariantSet::from_address(&address))
}

/// List files in `dir` with a whitelisted extension, sorted by file name.
pub fn list_avatar_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        // Follows symlinks.
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if AVATAR_EXTENSIONS.contains(&ext.as_str()) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

struct AvatarJob {
    path: PathBuf,
    variants: AvatarVariantSet,
}

/// Run the avatar pass from `input_dir` into `output_dir`.
///
/// `workers` bounds the thread pool (`0` = rayon default). A missing input
/// directory is an empty pass.
pub fn generate_avatars(input_dir: &Path, output_dir: &Path, workers: usize) -> AvatarReport {
    let mut report = AvatarReport::default();

    if !input_dir.is_dir() {
        tracing::info!("No avatars directory at {}, skipping", input_dir.display());
        return report;
    }
    let files = match list_avatar_files(input_dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Failed to list avatars in {}: {}", input_dir.display(), e);
            return report;
        }
    };
    if files.is_empty() {
        return report;
    }

    let jobs = plan_jobs(files, &mut report);

    if let Err(e) = fs::create_dir_all(output_dir) {
        tracing::warn!("Failed to create avatar output dir {}: {}", output_dir.display(), e);
        report.skipped += jobs.len();
        return report;
    }

    let results: Vec<Result<usize, AvatarError>> =
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| {
                jobs.par_iter().map(|job| render_guarded(job, output_dir)).collect()
            }),
            Err(e) => {
                tracing::warn!("Failed to build avatar worker pool ({}), running serially", e);
                jobs.iter().map(|job| render_guarded(job, output_dir)).collect()
            }
        };

    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(written) => {
                report.processed += 1;
                report.written += written;
            }
            Err(e) => {
                tracing::warn!("Skipping avatar {}: {}", job.path.display(), e);
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        "Avatars: {} processed, {} skipped, {} files written",
        report.processed,
        report.skipped,
        report.written
    );
    report
}

/// Resolve stems to variant sets. Unparseable stems and inputs whose address
/// was already claimed by an earlier file are skipped; the latter would
/// otherwise overwrite each other's outputs.
fn plan_jobs(files: Vec<PathBuf>, report: &mut AvatarReport) -> Vec<AvatarJob> {
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());

    for path in files {
        let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let variants = match variants_for_stem(&stem) {
            Ok(variants) => variants,
            Err(e) => {
                tracing::warn!("Skipping avatar {}: {}", path.display(), e);
                report.skipped += 1;
                continue;
            }
        };
        if let Some(first) = claimed.get(&variants.raw) {
            tracing::warn!(
                "Skipping avatar {}: address {} already provided by {}",
                path.display(),
                variants.raw,
                first.display()
            );
            report.skipped += 1;
            continue;
        }
        claimed.insert(variants.raw.clone(), path.clone());
        jobs.push(AvatarJob { path, variants });
    }
    jobs
}

fn render_guarded(job: &AvatarJob, output_dir: &Path) -> Result<usize, AvatarError> {
    catch_panic(&job.path, || render_job(job, output_dir))
}

/// Run `work`, turning a panic (e.g. inside an image decoder) into an error
/// for that one file.
fn catch_panic<T>(
    path: &Path,
    work: impl FnOnce() -> Result<T, AvatarError>,
) -> Result<T, AvatarError> {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(AvatarError::Panic { path: path.to_path_buf(), message })
    })
}

fn render_job(job: &AvatarJob, output_dir: &Path) -> Result<usize, AvatarError> {
    let encoded = render_avatar(&job.path)?;
    let mut written = 0;
    for variant in job.variants.spellings() {
        let out = output_dir.join(output_filename(variant));
        fs::write(&out, &encoded).map_err(|source| AvatarError::Io { path: out.clone(), source })?;
        written += 1;
    }
    tracing::debug!("Rendered {} into {} variants", job.path.display(), written);
    Ok(written)
}

/// Decode, cover-fit to a centered square, flatten alpha, encode as JPEG.
pub fn render_avatar(path: &Path) -> Result<Vec<u8>, AvatarError> {
    let image_err = |source| AvatarError::Image { path: path.to_path_buf(), source };

    let img = image::open(path).map_err(image_err)?;
    let square = img.resize_to_fill(AVATAR_SIZE, AVATAR_SIZE, FilterType::Lanczos3);
    let rgb = flatten_on_white(&square);

    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, AVATAR_QUALITY)
        .encode_image(&rgb)
        .map_err(image_err)?;
    Ok(encoded)
}

fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = u16::from(a);
        // c*a + 255*(255-a) never exceeds 255*255.
        let blend = |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
