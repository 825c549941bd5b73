// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

// Core modules
pub mod errors;
#[macro_use]
mod macros;

// Backend modules
#[cfg(feature = "mem")]
mod mem;

#[cfg(feature = "std")]
mod file;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::FatIO;
    pub use super::FatIOExt;
    pub use super::errors::*;

    #[cfg(feature = "mem")]
    pub use super::mem::MemFatIO;

    #[cfg(feature = "std")]
    pub use super::file::{FileFatIO, StdFatIO};
}

// Internal use
use errors::*;

// Constants

/// Largest single transfer issued by the chunked helpers.
/// 4 KiB = typical page size and common disk sector/cluster size.
pub const BLOCK_BUF_SIZE: usize = 4096;

// Traits

/// Positioned-read abstraction.
///
/// Every read names its absolute offset (relative to the partition offset),
/// so a handle can be reused by successive calls without any seek
/// bookkeeping. Implementations may target RAM, files, block devices, etc.
pub trait FatIO {
    /// Reads exactly `buf.len()` bytes into `buf` from `offset`.
    ///
    /// A read that cannot be completed in full is an error, never a partial
    /// success.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FatIOResult;

    fn set_offset(&mut self, partition_offset: u64) -> u64;
    fn partition_offset(&self) -> u64;
}

/// Extension helpers for FatIO.
///
/// - little-endian primitive reads (read_u16_at/u32/u64)
/// - fixed-size array reads
/// - chunked reads for large regions
pub trait FatIOExt: FatIO {
    /// Reads `buf.len()` bytes from `offset` in chunks of `chunk_size` or less.
    #[inline(always)]
    fn read_in_chunks(&mut self, offset: u64, buf: &mut [u8], chunk_size: usize) -> FatIOResult {
        let mut remaining = buf.len();
        let mut off = offset;
        let mut pos = 0;

        while remaining > 0 {
            let to_read = remaining.min(chunk_size);
            self.read_at(off, &mut buf[pos..pos + to_read])?;
            off += to_read as u64;
            pos += to_read;
            remaining -= to_read;
        }

        Ok(())
    }

    /// Reads a fixed-size record at `offset`.
    #[inline(always)]
    fn read_array_at<const N: usize>(&mut self, offset: u64) -> FatIOResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Reads `len` bytes at `offset` into a freshly allocated buffer.
    ///
    /// The buffer is owned by the caller; nothing is cached by the handle.
    #[cfg(feature = "alloc")]
    fn read_vec_at(&mut self, offset: u64, len: usize) -> FatIOResult<Vec<u8>> {
        let mut buf = alloc::vec![0u8; len];
        self.read_in_chunks(offset, &mut buf, BLOCK_BUF_SIZE)?;
        Ok(buf)
    }

    // Little-endian readers for primitive types (u16, u32, u64)
    fatio_impl_primitive_read!(u16, u32, u64);
}

impl<T: FatIO + ?Sized> FatIOExt for T {}
