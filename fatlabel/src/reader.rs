// SPDX-License-Identifier: MIT

use alloc::string::String;

use fatio::prelude::*;
use log::debug;

use crate::chain::locate_volume_label;
use crate::constant::*;
use crate::errors::*;
use crate::geometry::{FatVariant, Geometry};
use crate::label::{Labels, normalize};
use crate::types::{dir_entries, find_volume_label, read_superblock};

/// Knobs for a single label read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Root-directory clusters visited before a FAT32 chain is abandoned.
    pub max_chain_hops: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_chain_hops: DEFAULT_MAX_CHAIN_HOPS,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_chain_hops(mut self, hops: usize) -> Self {
        self.max_chain_hops = hops;
        self
    }
}

/// Reads the boot label and the root-directory volume label of `io`.
pub fn read_labels<IO: FatIO + ?Sized>(io: &mut IO) -> LabelResult<Labels> {
    read_labels_with(io, &ReadOptions::default())
}

/// Same as [`read_labels`], with explicit options.
pub fn read_labels_with<IO: FatIO + ?Sized>(
    io: &mut IO,
    opts: &ReadOptions,
) -> LabelResult<Labels> {
    let boot = read_superblock(io)?;
    let variant = boot.variant();
    let geometry = boot.geometry;
    debug!(
        "{variant}: {} data clusters, {} bytes/cluster",
        geometry.data_clusters,
        geometry.bytes_per_cluster()
    );

    let boot_label = normalize(boot.label());

    let volume = match boot.root_cluster() {
        Some(root) => locate_volume_label(io, &geometry, root, opts.max_chain_hops)?,
        None => read_fixed_root_label(io, &geometry)?,
    };

    Ok(Labels {
        variant,
        boot: boot_label,
        volume,
    })
}

/// Scans the flat FAT12/16 root directory region in one read.
fn read_fixed_root_label<IO: FatIO + ?Sized>(
    io: &mut IO,
    geometry: &Geometry,
) -> LabelResult<Option<String>> {
    debug_assert_eq!(geometry.variant(), FatVariant::Fat16);

    let len = geometry.root_dir_len() as usize;
    if len == 0 {
        return Ok(None);
    }

    let buf = io
        .read_vec_at(geometry.root_dir_offset(), len)
        .map_err(LabelError::at(ReadStage::RootDirectory))?;

    Ok(find_volume_label(dir_entries(&buf)).map(|e| normalize(&e.name)))
}

/// Opens `path` read-only and reads its labels.
#[cfg(feature = "std")]
pub fn read_labels_from_path<P: AsRef<std::path::Path>>(path: P) -> LabelResult<Labels> {
    read_labels_from_path_with(path, &ReadOptions::default())
}

/// Same as [`read_labels_from_path`], with explicit options.
#[cfg(feature = "std")]
pub fn read_labels_from_path_with<P: AsRef<std::path::Path>>(
    path: P,
    opts: &ReadOptions,
) -> LabelResult<Labels> {
    let file = std::fs::File::open(path.as_ref()).map_err(|e| LabelError::IO {
        stage: ReadStage::Superblock,
        error: FatIOError::Os(e.kind()),
    })?;
    let mut io = FileFatIO::new(&file);
    read_labels_with(&mut io, opts)
}
