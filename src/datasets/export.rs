use std::path::{Path, PathBuf};

use image::{imageops::FilterType, ImageFormat, RgbImage};

use super::{augment::AugmentationPolicy, errors::DatasetError};

/// The only extension read from source folders and written to the dataset.
pub const IMAGE_EXTENSION: &str = ".jpg";

pub const DEFAULT_SIZE: (u32, u32) = (256, 256);

/// What to do when one image cannot be decoded or written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// Stop at the first failing file.
    #[default]
    Abort,
    /// Record the failure and move on to the next file.
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
    pub target_size: (u32, u32),
    pub policy: AugmentationPolicy,
    pub on_error: ErrorPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_SIZE,
            policy: AugmentationPolicy::None,
            on_error: ErrorPolicy::Abort,
        }
    }
}

#[derive(Debug)]
pub struct ExportFailure {
    pub name: String,
    pub error: DatasetError,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    /// Source images handed to the export, failed ones included.
    pub images: usize,
    /// Files written to the destination, originals and derived copies.
    pub files_written: usize,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resizes to exactly `width` x `height`, ignoring the aspect ratio.
pub fn resize(img: &RgbImage, (width, height): (u32, u32)) -> RgbImage {
    image::imageops::resize(img, width, height, FilterType::CatmullRom)
}

/// `cat.jpg` + `_flip` -> `cat_flip.jpg`
pub fn derived_name(name: &str, suffix: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{stem}{suffix}{IMAGE_EXTENSION}")
}

/// Resizes every image in `names` from `source` into `dest`, writing the
/// derived copies the augmentation policy asks for. Existing files with the
/// same names are overwritten.
pub fn resize_and_export<S: AsRef<str>>(
    names: &[S],
    source: &Path,
    dest: &Path,
    config: &ExportConfig,
) -> Result<ExportReport, DatasetError> {
    let mut report = ExportReport {
        images: names.len(),
        ..Default::default()
    };

    let pb = indicatif::ProgressBar::new(names.len() as u64);
    for name in names {
        let name = name.as_ref();
        match export_one(name, source, dest, config, &mut report.files_written) {
            Ok(()) => {}
            Err(e) if config.on_error == ErrorPolicy::Continue => {
                log::warn!("skipping {name}: {e}");
                report.failures.push(ExportFailure {
                    name: name.to_owned(),
                    error: e,
                });
            }
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    log::debug!(
        "exported {} images ({} files) to {}",
        report.images - report.failures.len(),
        report.files_written,
        dest.display()
    );
    Ok(report)
}

fn export_one(
    name: &str,
    source: &Path,
    dest: &Path,
    config: &ExportConfig,
    written: &mut usize,
) -> Result<(), DatasetError> {
    let src_path = source.join(name);
    let img = image::open(&src_path)
        .map_err(|e| DatasetError::file(&src_path, e))?
        .to_rgb8();

    let resized = resize(&img, config.target_size);
    save(&resized, dest.join(name))?;
    *written += 1;

    for transform in config.policy.transforms() {
        let derived = transform.apply(&resized);
        save(&derived, dest.join(derived_name(name, transform.suffix())))?;
        *written += 1;
    }
    Ok(())
}

fn save(img: &RgbImage, path: PathBuf) -> Result<(), DatasetError> {
    img.save_with_format(&path, ImageFormat::Jpeg)
        .map_err(|e| DatasetError::file(path, e))
}
