// SPDX-License-Identifier: MIT

use alloc::string::String;

use fatio::prelude::*;
use log::{trace, warn};

use crate::constant::*;
use crate::errors::*;
use crate::geometry::Geometry;
use crate::label::normalize;
use crate::types::{dir_entries, find_volume_label};

/// Reads the 28-bit successor of `cluster` from the first FAT.
#[inline]
pub fn read_fat_entry<IO: FatIO + ?Sized>(
    io: &mut IO,
    geometry: &Geometry,
    cluster: u32,
) -> LabelResult<u32> {
    let raw = io
        .read_u32_at(geometry.fat_entry_offset(cluster))
        .map_err(LabelError::at(ReadStage::FatEntry))?;
    Ok(raw & FAT32_ENTRY_MASK)
}

#[inline]
fn is_data_cluster(cluster: u32) -> bool {
    (FAT_FIRST_CLUSTER..=FAT32_MAX).contains(&cluster)
}

/// Lazy walk over a FAT32 cluster chain.
///
/// The successor of a cluster is only fetched when the next cluster is
/// requested, so a caller that finds what it needs early never touches the
/// rest of the FAT. The walk ends on any free, reserved, bad or end-of-chain
/// value, and after `max_hops` clusters have been yielded.
#[derive(Debug, Clone)]
pub struct ClusterCursor<'g> {
    geometry: &'g Geometry,
    pending: Option<u32>,
    last: Option<u32>,
    hops: usize,
    max_hops: usize,
}

impl<'g> ClusterCursor<'g> {
    pub fn new(geometry: &'g Geometry, start: u32, max_hops: usize) -> Self {
        Self {
            geometry,
            pending: is_data_cluster(start).then_some(start),
            last: None,
            hops: 0,
            max_hops,
        }
    }

    /// Yields the next cluster of the chain, reading the FAT as needed.
    pub fn next_with<IO: FatIO + ?Sized>(&mut self, io: &mut IO) -> LabelResult<Option<u32>> {
        if let Some(prev) = self.last.take() {
            let next = read_fat_entry(io, self.geometry, prev)?;
            self.pending = is_data_cluster(next).then_some(next);
            if self.pending.is_none() {
                trace!("cluster chain ends after {prev} (entry {next:#010x})");
            }
        }

        let Some(cluster) = self.pending.take() else {
            return Ok(None);
        };

        if self.hops >= self.max_hops {
            warn!(
                "cluster chain still running after {} clusters, giving up at {cluster}",
                self.hops
            );
            return Ok(None);
        }

        self.hops += 1;
        self.last = Some(cluster);
        Ok(Some(cluster))
    }
}

/// Searches a FAT32 root directory chain for the volume-label entry.
///
/// Each cluster is read whole and scanned on its own. Running off the chain
/// or hitting `max_hops` means no label; only a failed read is an error.
pub fn locate_volume_label<IO: FatIO + ?Sized>(
    io: &mut IO,
    geometry: &Geometry,
    root_cluster: u32,
    max_hops: usize,
) -> LabelResult<Option<String>> {
    let cluster_len = geometry.bytes_per_cluster() as usize;
    let mut cursor = ClusterCursor::new(geometry, root_cluster, max_hops);

    while let Some(cluster) = cursor.next_with(io)? {
        let offset = geometry.cluster_offset(cluster);
        trace!("scanning root cluster {cluster} at {offset:#x}");

        let buf = io
            .read_vec_at(offset, cluster_len)
            .map_err(LabelError::at(ReadStage::RootDirectory))?;

        if let Some(entry) = find_volume_label(dir_entries(&buf)) {
            return Ok(Some(normalize(&entry.name)));
        }
    }

    Ok(None)
}
