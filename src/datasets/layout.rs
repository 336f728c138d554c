use std::path::{Path, PathBuf};

use super::split::{DatasetSplit, Domain};

/// Destination tree: `<root>/{trainA,testA,trainB,testB}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// `dataset_path` and `dataset_name` are concatenated as strings, so
    /// `./` + `dataset` gives `./dataset` and `out/run_` + `1` gives `out/run_1`.
    pub fn from_parts(dataset_path: &str, dataset_name: &str) -> Self {
        Self::new(format!("{dataset_path}{dataset_name}"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, split: DatasetSplit, domain: Domain) -> PathBuf {
        self.root.join(split.dir_name(domain))
    }

    pub fn train_dir(&self, domain: Domain) -> PathBuf {
        self.dir(DatasetSplit::Train, domain)
    }

    pub fn test_dir(&self, domain: Domain) -> PathBuf {
        self.dir(DatasetSplit::Test, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_folders() {
        let layout = DatasetLayout::from_parts("./", "dataset");
        assert_eq!(layout.root(), Path::new("./dataset"));
        assert_eq!(layout.train_dir(Domain::A), Path::new("./dataset/trainA"));
        assert_eq!(layout.test_dir(Domain::A), Path::new("./dataset/testA"));
        assert_eq!(layout.train_dir(Domain::B), Path::new("./dataset/trainB"));
        assert_eq!(layout.test_dir(Domain::B), Path::new("./dataset/testB"));
    }

    #[test]
    fn prefix_is_not_a_directory_join() {
        let layout = DatasetLayout::from_parts("out/run_", "1");
        assert_eq!(layout.root(), Path::new("out/run_1"));
    }
}
