pub mod augment;
pub mod builder;
pub mod errors;
pub mod export;
pub mod layout;
pub mod split;

pub use augment::{AugmentationPolicy, Transform};
pub use builder::{list_images, BuildReport, BuilderConfig, DatasetBuilder, DomainReport};
pub use errors::DatasetError;
pub use export::{resize_and_export, ErrorPolicy, ExportConfig, ExportFailure, ExportReport};
pub use layout::DatasetLayout;
pub use split::{split_assignment, DatasetSplit, Domain, SplitAssignment};
