// SPDX-License-Identifier: MIT

use core::fmt;

pub use fatio::errors::*;

/// The handle does not reference a FAT volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    Truncated,
    InvalidMedia(u8),
    InvalidFatCount(u8),
    ZeroSectorSize,
    ZeroSectorsPerCluster,
}

impl FormatError {
    pub fn msg(&self) -> &'static str {
        match self {
            FormatError::Truncated => "boot sector too short",
            FormatError::InvalidMedia(_) => {
                "unknown media type (probably not a FAT filesystem)"
            }
            FormatError::InvalidFatCount(_) => {
                "unreasonable number of FATs (probably not a FAT filesystem)"
            }
            FormatError::ZeroSectorSize => "zero sector size (probably not a FAT filesystem)",
            FormatError::ZeroSectorsPerCluster => {
                "zero sectors per cluster (probably not a FAT filesystem)"
            }
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        match self {
            FormatError::InvalidMedia(media) => write!(f, ": {media:#04X}")?,
            FormatError::InvalidFatCount(fats) => write!(f, ": {fats}")?,
            _ => {}
        }
        Ok(())
    }
}

/// Which read was in flight when the device stopped answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    Superblock,
    RootDirectory,
    FatEntry,
}

impl ReadStage {
    pub fn msg(&self) -> &'static str {
        match self {
            ReadStage::Superblock => "error reading fat superblock",
            ReadStage::RootDirectory => "error reading root dirents",
            ReadStage::FatEntry => "error reading next dirent cluster chain offset",
        }
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    IO { stage: ReadStage, error: FatIOError },
    Format(FormatError),
}

impl LabelError {
    /// Builds a mapper tagging a `FatIOError` with the read it interrupted.
    #[inline]
    pub fn at(stage: ReadStage) -> impl Fn(FatIOError) -> LabelError {
        move |error| LabelError::IO { stage, error }
    }

    pub fn msg(&self) -> &'static str {
        match self {
            LabelError::IO { stage, .. } => stage.msg(),
            LabelError::Format(e) => e.msg(),
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, LabelError::IO { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LabelError::Format(_))
    }
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelError::IO { stage, error } => write!(f, "{}: {}", stage.msg(), error),
            LabelError::Format(e) => write!(f, "{e}"),
        }
    }
}

impl From<FormatError> for LabelError {
    fn from(e: FormatError) -> Self {
        LabelError::Format(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

#[cfg(feature = "std")]
impl std::error::Error for LabelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LabelError::IO { error, .. } => Some(error),
            LabelError::Format(e) => Some(e),
        }
    }
}

// === type *Result ===

pub type LabelResult<T = ()> = Result<T, LabelError>;
pub type FormatResult<T = ()> = Result<T, FormatError>;
