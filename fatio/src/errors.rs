// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for FatIO operations.
pub type FatIOResult<T = ()> = core::result::Result<T, FatIOError>;

/// Error type for FatIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatIOError {
    /// The device returned fewer bytes than requested.
    ShortRead { offset: u64, len: usize },
    OutOfBounds,
    #[cfg(feature = "std")]
    Os(std::io::ErrorKind),
}

impl FatIOError {
    pub fn msg(&self) -> &'static str {
        match self {
            FatIOError::ShortRead { .. } => "Short read",
            FatIOError::OutOfBounds => "Out of bounds",
            #[cfg(feature = "std")]
            FatIOError::Os(_) => "OS error",
        }
    }
}

impl fmt::Display for FatIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        match self {
            FatIOError::ShortRead { offset, len } => {
                write!(f, " ({len} bytes at offset {offset:#x})")?;
            }
            #[cfg(feature = "std")]
            FatIOError::Os(kind) => write!(f, ": {kind}")?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FatIOError {}
