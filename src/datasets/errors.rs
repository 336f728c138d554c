use std::path::PathBuf;

#[derive(Debug)]
pub enum DatasetError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    /// The source folder for a domain is missing or cannot be listed.
    SourceFolder {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A destination folder cannot be created.
    Destination {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A single image failed to decode or to write.
    File {
        path: PathBuf,
        source: Box<DatasetError>,
    },
    InvalidProportion(f64),
    InvalidSize(u32, u32),
}

impl DatasetError {
    pub(crate) fn file<P: Into<PathBuf>, E: Into<DatasetError>>(path: P, e: E) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(e.into()),
        }
    }
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceFolder { path, source } => {
                write!(f, "cannot read source folder {}: {source}", path.display())
            }
            Self::Destination { path, source } => {
                write!(f, "cannot create destination folder {}: {source}", path.display())
            }
            Self::File { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidProportion(p) => write!(f, "proportion {p} is not in [0, 1]"),
            Self::InvalidSize(w, h) => write!(f, "invalid target size {w}x{h}"),
            _ => f.write_fmt(format_args!("{:?}", self)),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(e) => Some(e),
            Self::ImageError(e) => Some(e),
            Self::SourceFolder { source, .. } => Some(source),
            Self::Destination { source, .. } => Some(source),
            Self::File { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<image::ImageError> for DatasetError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageError(e)
    }
}
