//! Turns two flat folders of images into a `trainA/testA/trainB/testB` dataset.
//!
//! Each domain is listed, shuffled, split by proportion and exported
//! one image at a time. Nothing runs in parallel and nothing is cleaned up
//! on failure: files written before an aborting error stay on disk.

use std::path::{Path, PathBuf};

use rand::{rngs::StdRng, SeedableRng};

use super::{
    augment::AugmentationPolicy,
    errors::DatasetError,
    export::{resize_and_export, ErrorPolicy, ExportConfig, ExportReport, IMAGE_EXTENSION},
    layout::DatasetLayout,
    split::{check_proportion, split_assignment, Domain},
};

pub const DEFAULT_PROPORTION: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuilderConfig {
    /// Fraction of each domain that goes to the train split.
    pub proportion: f64,
    pub target_size: (u32, u32),
    pub policy: AugmentationPolicy,
    pub on_error: ErrorPolicy,
    /// Fixes the shuffle. Without it the RNG is seeded from the OS.
    pub seed: Option<u64>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let export = ExportConfig::default();
        Self {
            proportion: DEFAULT_PROPORTION,
            target_size: export.target_size,
            policy: export.policy,
            on_error: export.on_error,
            seed: None,
        }
    }
}

impl BuilderConfig {
    fn export(&self) -> ExportConfig {
        ExportConfig {
            target_size: self.target_size,
            policy: self.policy,
            on_error: self.on_error,
        }
    }
}

#[derive(Debug)]
pub struct DomainReport {
    /// Split sizes, not files on disk.
    pub train_count: usize,
    pub test_count: usize,
    pub train: ExportReport,
    pub test: ExportReport,
}

impl DomainReport {
    pub fn failures(&self) -> impl Iterator<Item = &super::export::ExportFailure> {
        self.train.failures.iter().chain(self.test.failures.iter())
    }
}

#[derive(Debug)]
pub struct BuildReport {
    pub root: PathBuf,
    pub domain_a: DomainReport,
    pub domain_b: DomainReport,
}

impl BuildReport {
    pub fn domains(&self) -> [&DomainReport; 2] {
        [&self.domain_a, &self.domain_b]
    }

    pub fn failure_count(&self) -> usize {
        self.domains().iter().map(|d| d.failures().count()).sum()
    }
}

/// Names of the `.jpg` files directly inside `folder`, in directory order.
pub fn list_images<P: AsRef<Path>>(folder: P) -> Result<Vec<String>, DatasetError> {
    let folder = folder.as_ref();
    let source_err = |e| DatasetError::SourceFolder {
        path: folder.to_path_buf(),
        source: e,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(source_err)? {
        let entry = entry.map_err(source_err)?;
        if entry.file_type().map_err(source_err)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(IMAGE_EXTENSION) => names.push(name),
            Ok(_) => {}
            Err(name) => log::warn!("skipping non UTF-8 file name {:?}", name),
        }
    }
    Ok(names)
}

pub struct DatasetBuilder {
    layout: DatasetLayout,
    config: BuilderConfig,
    rng: StdRng,
}

impl DatasetBuilder {
    pub fn new(layout: DatasetLayout, config: BuilderConfig) -> Result<Self, DatasetError> {
        check_proportion(config.proportion)?;
        let (w, h) = config.target_size;
        if w == 0 || h == 0 {
            return Err(DatasetError::InvalidSize(w, h));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            layout,
            config,
            rng,
        })
    }

    /// Builds both domains into the layout, A first.
    pub fn build<A: AsRef<Path>, B: AsRef<Path>>(
        &mut self,
        path_a: A,
        path_b: B,
    ) -> Result<BuildReport, DatasetError> {
        let domain_a = self.build_domain(Domain::A, path_a.as_ref())?;
        let domain_b = self.build_domain(Domain::B, path_b.as_ref())?;
        Ok(BuildReport {
            root: self.layout.root().to_path_buf(),
            domain_a,
            domain_b,
        })
    }

    pub fn build_domain(
        &mut self,
        domain: Domain,
        source: &Path,
    ) -> Result<DomainReport, DatasetError> {
        let train_dest = self.layout.train_dir(domain);
        let test_dest = self.layout.test_dir(domain);
        log::info!("building domain {}", domain.name());
        self.build_domain_split(source, &train_dest, &test_dest)
    }

    /// Lists `source`, splits it and exports both halves. The returned counts
    /// are the split sizes.
    pub fn build_domain_split(
        &mut self,
        source: &Path,
        train_dest: &Path,
        test_dest: &Path,
    ) -> Result<DomainReport, DatasetError> {
        for dest in [train_dest, test_dest] {
            std::fs::create_dir_all(dest).map_err(|e| DatasetError::Destination {
                path: dest.to_path_buf(),
                source: e,
            })?;
        }

        let names = list_images(source)?;
        log::info!("found {} images in {}", names.len(), source.display());

        let split = split_assignment(names, self.config.proportion, &mut self.rng)?;
        let export = self.config.export();

        log::info!(
            "writing {} train images ({} files) to {}",
            split.train.len(),
            split.train.len() * export.policy.files_per_image(),
            train_dest.display()
        );
        let train = resize_and_export(&split.train, source, train_dest, &export)?;
        log::info!(
            "writing {} test images ({} files) to {}",
            split.test.len(),
            split.test.len() * export.policy.files_per_image(),
            test_dest.display()
        );
        let test = resize_and_export(&split.test, source, test_dest, &export)?;

        Ok(DomainReport {
            train_count: split.train.len(),
            test_count: split.test.len(),
            train,
            test,
        })
    }
}
