// SPDX-License-Identifier: MIT

use core::mem::{offset_of, size_of};

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

use crate::attr::FatAttributes;
use crate::constant::*;

/// Short (8.3) directory entry.
#[derive(FromBytes, KnownLayout, Immutable, Unaligned, Copy, Clone, Debug)]
#[repr(C)]
pub struct FatDirEntry {
    pub name: [u8; 11],
    pub attr: u8,
    pub nt_reserved: u8,
    pub creation_time_tenth: u8,
    pub creation_time: U16,
    pub creation_date: U16,
    pub access_date: U16,
    pub first_cluster_high: U16,
    pub write_time: U16,
    pub write_date: U16,
    pub first_cluster_low: U16,
    pub file_size: U32,
}

const _: () = {
    assert!(size_of::<FatDirEntry>() == FAT_DIR_ENTRY_SIZE);
    assert!(offset_of!(FatDirEntry, attr) == 11);
    assert!(offset_of!(FatDirEntry, first_cluster_high) == 20);
    assert!(offset_of!(FatDirEntry, first_cluster_low) == 26);
    assert!(offset_of!(FatDirEntry, file_size) == 28);
};

impl FatDirEntry {
    #[inline]
    pub fn is_end_of_dir(&self) -> bool {
        self.name[0] == FAT_ENTRY_END_OF_DIR
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.name[0] == FAT_ENTRY_DELETED
    }

    #[inline]
    pub fn attributes(&self) -> FatAttributes {
        FatAttributes::from_bits_retain(self.attr)
    }

    #[inline]
    pub fn first_cluster(&self) -> u32 {
        ((self.first_cluster_high.get() as u32) << 16) | self.first_cluster_low.get() as u32
    }

    /// Volume-ID set, directory clear, not a long-name slot, no cluster.
    #[inline]
    pub fn is_volume_label(&self) -> bool {
        let attr = self.attributes();
        !attr.is_long_name() && attr.is_volume_id() && self.first_cluster() == 0
    }
}

/// Lazily decodes `buf` as consecutive 32-byte entries.
///
/// A trailing partial entry is ignored.
pub fn dir_entries(buf: &[u8]) -> impl Iterator<Item = FatDirEntry> + '_ {
    buf.chunks_exact(FAT_DIR_ENTRY_SIZE)
        .filter_map(|raw| FatDirEntry::read_from_bytes(raw).ok())
}

/// Returns the first volume-label entry in storage order.
///
/// Stops at the end-of-directory marker; whatever follows it is never looked at.
pub fn find_volume_label<I>(entries: I) -> Option<FatDirEntry>
where
    I: IntoIterator<Item = FatDirEntry>,
{
    entries
        .into_iter()
        .take_while(|e| !e.is_end_of_dir())
        .filter(|e| !e.is_free())
        .find(FatDirEntry::is_volume_label)
}
