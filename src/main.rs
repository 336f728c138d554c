use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use cyclegan_dataset::datasets::{
    AugmentationPolicy, BuildReport, BuilderConfig, DatasetBuilder, DatasetLayout, DatasetSplit,
    Domain, ErrorPolicy,
};

/// Split folders A and B into training and test sets
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to folder A
    #[arg(long = "path_A", default_value = "./A")]
    path_a: PathBuf,

    /// Path to folder B
    #[arg(long = "path_B", default_value = "./B")]
    path_b: PathBuf,

    /// Dataset path, prepended verbatim to the dataset name
    #[arg(long = "dataset_path", default_value = "./")]
    dataset_path: String,

    /// Dataset name
    #[arg(long = "dataset_name", default_value = "dataset")]
    dataset_name: String,

    /// Type of data augmentation: N (none), F (flip), R (rotate), FR (flip and rotate)
    #[arg(long = "data_augmentation", value_enum, default_value = "N")]
    data_augmentation: AugmentationPolicy,

    /// Fraction of each domain used for training
    #[arg(long, default_value_t = 0.7)]
    proportion: f64,

    /// Seed for the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Width and height of the written images
    #[arg(long = "image_size", default_value_t = 256)]
    image_size: u32,

    /// What to do with an image that cannot be read or written
    #[arg(long = "on_error", value_enum, default_value = "abort")]
    on_error: ErrorPolicy,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("\nSimple CycleGAN dataset creator\n");
    println!("Dataset name: {}", args.dataset_name);
    println!("Domain A folder: {}", args.path_a.display());
    println!("Domain B folder: {}", args.path_b.display());
    println!("Data Augmentation: {}", args.data_augmentation.label());

    let layout = DatasetLayout::from_parts(&args.dataset_path, &args.dataset_name);
    let config = BuilderConfig {
        proportion: args.proportion,
        target_size: (args.image_size, args.image_size),
        policy: args.data_augmentation,
        on_error: args.on_error,
        seed: args.seed,
    };

    let report = match DatasetBuilder::new(layout, config)
        .and_then(|mut builder| builder.build(&args.path_a, &args.path_b))
    {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_summary(&mut io::stdout().lock(), &report)
        .and_then(|()| write_failures(&mut io::stderr().lock(), &report))
    {
        eprintln!("error: {e}");
    }
    ExitCode::from(exit_status(&report))
}

/// 0 for a clean run, 1 when any image was skipped under `--on_error continue`.
fn exit_status(report: &BuildReport) -> u8 {
    if report.failure_count() > 0 {
        1
    } else {
        0
    }
}

fn write_summary<W: Write>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    writeln!(out, "\nDataset created: {}", report.root.display())?;
    for (domain, r) in [(Domain::A, &report.domain_a), (Domain::B, &report.domain_b)] {
        for (split, count, export) in [
            (DatasetSplit::Train, r.train_count, &r.train),
            (DatasetSplit::Test, r.test_count, &r.test),
        ] {
            writeln!(
                out,
                "Number of images in {}: {} ({} files written)",
                split.dir_name(domain),
                count,
                export.files_written
            )?;
        }
    }
    Ok(())
}

fn write_failures<W: Write>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    if report.failure_count() == 0 {
        return Ok(());
    }
    writeln!(out, "\n{} images could not be processed:", report.failure_count())?;
    for domain in report.domains() {
        for failure in domain.failures() {
            writeln!(out, "  {}: {}", failure.name, failure.error)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cyclegan_dataset::datasets::{DatasetError, DomainReport, ExportFailure, ExportReport};

    use super::*;

    #[test]
    fn defaults_match_documented_flags() {
        let args = Args::parse_from(["cyclegan-dataset"]);
        assert_eq!(args.path_a, PathBuf::from("./A"));
        assert_eq!(args.path_b, PathBuf::from("./B"));
        assert_eq!(args.dataset_path, "./");
        assert_eq!(args.dataset_name, "dataset");
        assert_eq!(args.data_augmentation, AugmentationPolicy::None);
        assert_eq!(args.proportion, 0.7);
        assert_eq!(args.seed, None);
        assert_eq!(args.image_size, 256);
        assert_eq!(args.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn parses_underscore_flags() {
        let args = Args::parse_from([
            "cyclegan-dataset",
            "--path_A",
            "horses",
            "--path_B",
            "zebras",
            "--dataset_name",
            "h2z",
            "--data_augmentation",
            "FR",
            "--seed",
            "3",
            "--on_error",
            "continue",
        ]);
        assert_eq!(args.path_a, PathBuf::from("horses"));
        assert_eq!(args.path_b, PathBuf::from("zebras"));
        assert_eq!(args.dataset_name, "h2z");
        assert_eq!(args.data_augmentation, AugmentationPolicy::FlipAndRotate);
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.on_error, ErrorPolicy::Continue);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(Args::try_parse_from(["cyclegan-dataset", "--data_augmentation", "X"]).is_err());
    }

    fn report(failed: &[&str]) -> BuildReport {
        let export = |written: usize| ExportReport {
            images: written,
            files_written: written,
            failures: Vec::new(),
        };
        let mut domain_a = DomainReport {
            train_count: 7,
            test_count: 3,
            train: export(7),
            test: export(3),
        };
        for name in failed {
            domain_a.test.failures.push(ExportFailure {
                name: name.to_string(),
                error: DatasetError::InvalidSize(0, 0),
            });
        }
        BuildReport {
            root: PathBuf::from("./dataset"),
            domain_a,
            domain_b: DomainReport {
                train_count: 2,
                test_count: 2,
                train: export(4),
                test: export(4),
            },
        }
    }

    #[test]
    fn clean_run_exits_zero() {
        let report = report(&[]);
        assert_eq!(exit_status(&report), 0);

        let mut err = Vec::new();
        write_failures(&mut err, &report).unwrap();
        assert!(err.is_empty());
    }

    #[test]
    fn skipped_images_exit_one_and_are_listed() {
        let report = report(&["broken.jpg"]);
        assert_eq!(exit_status(&report), 1);

        let mut err = Vec::new();
        write_failures(&mut err, &report).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("1 images could not be processed"), "{err}");
        assert!(err.contains("  broken.jpg: "), "{err}");
    }

    #[test]
    fn summary_lists_every_folder() {
        let mut out = Vec::new();
        write_summary(&mut out, &report(&[])).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Dataset created: ./dataset"), "{out}");
        assert!(out.contains("Number of images in trainA: 7 (7 files written)"));
        assert!(out.contains("Number of images in testA: 3 (3 files written)"));
        assert!(out.contains("Number of images in trainB: 2 (4 files written)"));
        assert!(out.contains("Number of images in testB: 2 (4 files written)"));
    }
}
