use image::{imageops, RgbImage};

/// Which derived images are written next to each resized original.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AugmentationPolicy {
    #[default]
    #[value(name = "N")]
    None,
    #[value(name = "F")]
    Flip,
    #[value(name = "R")]
    Rotate,
    #[value(name = "FR")]
    FlipAndRotate,
}

/// A geometric transform applied to an already resized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Mirror left to right.
    Flip,
    /// Rotate 90 degrees counter-clockwise.
    Rotate,
}

impl AugmentationPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Flip => "Flip",
            Self::Rotate => "Rotate",
            Self::FlipAndRotate => "Flip and Rotate",
        }
    }

    pub fn transforms(&self) -> &'static [Transform] {
        match self {
            Self::None => &[],
            Self::Flip => &[Transform::Flip],
            Self::Rotate => &[Transform::Rotate],
            Self::FlipAndRotate => &[Transform::Flip, Transform::Rotate],
        }
    }

    /// Files written per source image, the original included.
    pub fn files_per_image(&self) -> usize {
        1 + self.transforms().len()
    }
}

impl std::fmt::Display for AugmentationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Transform {
    /// Appended to the source file stem, e.g. `cat_flip.jpg`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Flip => "_flip",
            Self::Rotate => "_rotated",
        }
    }

    pub fn apply(&self, img: &RgbImage) -> RgbImage {
        match self {
            Self::Flip => imageops::flip_horizontal(img),
            Self::Rotate => imageops::rotate270(img),
        }
    }
}
