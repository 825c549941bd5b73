// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

//! Reads the labels of FAT12/16/32 volumes.
//!
//! A FAT volume may carry two unrelated labels: one in the boot sector and
//! one as a volume-ID entry in the root directory. [`read_labels`] returns
//! both from anything implementing [`fatio::FatIO`]. With `std`,
//! [`find_device_by_label`] walks the system partition listing and returns
//! the first device carrying a given label.

extern crate alloc;

// Core modules
pub mod attr;
pub mod constant;
pub mod errors;
pub mod geometry;
pub mod types;

// Label logic
pub mod chain;
pub mod label;
pub mod reader;

#[cfg(feature = "std")]
pub mod scanner;

#[cfg(test)]
mod test_image;

pub use errors::{FormatError, LabelError, LabelResult, ReadStage};
pub use geometry::{FatVariant, Geometry};
pub use label::{Labels, normalize};
pub use reader::{ReadOptions, read_labels, read_labels_with};
#[cfg(feature = "std")]
pub use reader::{read_labels_from_path, read_labels_from_path_with};
#[cfg(feature = "std")]
pub use scanner::{
    SearchOptions, find_device_by_label, find_device_by_label_with, parse_partition_line,
    search_listing,
};

pub mod prelude {
    pub use crate::errors::*;
    pub use crate::geometry::{FatVariant, Geometry};
    pub use crate::label::{Labels, normalize};
    pub use crate::reader::{ReadOptions, read_labels, read_labels_with};
    #[cfg(feature = "std")]
    pub use crate::reader::{read_labels_from_path, read_labels_from_path_with};
    #[cfg(feature = "std")]
    pub use crate::scanner::{SearchOptions, find_device_by_label, find_device_by_label_with};
    pub use crate::types::{BootSector, read_superblock};
}
