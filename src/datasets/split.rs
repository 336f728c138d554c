use rand::{seq::SliceRandom, Rng};

use super::errors::DatasetError;

/// One of the two image domains being translated between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    A,
    B,
}

impl Domain {
    pub fn name(&self) -> &'static str {
        match self {
            Domain::A => "A",
            Domain::B => "B",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSplit {
    Train,
    Test,
}

impl DatasetSplit {
    /// Destination folder name, e.g. `trainA` or `testB`.
    pub fn dir_name(&self, domain: Domain) -> String {
        let prefix = match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Test => "test",
        };
        format!("{prefix}{}", domain.name())
    }
}

/// Partition of a domain's file names into train and test subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitAssignment {
    pub train: Vec<String>,
    pub test: Vec<String>,
}

pub(crate) fn check_proportion(proportion: f64) -> Result<(), DatasetError> {
    if (0.0..=1.0).contains(&proportion) {
        Ok(())
    } else {
        Err(DatasetError::InvalidProportion(proportion))
    }
}

/// Number of names that go to the train subset: `floor(proportion * len)`.
pub fn train_len(proportion: f64, len: usize) -> usize {
    ((proportion * len as f64).floor() as usize).min(len)
}

/// Shuffles `names` and splits the shuffled order into a `floor(proportion * n)`
/// train prefix and a test suffix.
pub fn split_assignment<R: Rng + ?Sized>(
    mut names: Vec<String>,
    proportion: f64,
    rng: &mut R,
) -> Result<SplitAssignment, DatasetError> {
    check_proportion(proportion)?;
    names.shuffle(rng);
    let test = names.split_off(train_len(proportion, names.len()));
    Ok(SplitAssignment { train: names, test })
}
