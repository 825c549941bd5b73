// SPDX-License-Identifier: MIT

use crate::{FatIO, FatIOError, FatIOResult};

/// In-memory implementation of `FatIO`.
///
/// Useful for tests and for images already loaded into RAM.
#[derive(Debug)]
pub struct MemFatIO<'a> {
    buffer: &'a [u8],
    partition_offset: u64,
}

impl<'a> MemFatIO<'a> {
    #[inline]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            partition_offset: 0,
        }
    }

    #[inline]
    pub fn new_with_offset(buffer: &'a [u8], partition_offset: u64) -> Self {
        Self {
            buffer,
            partition_offset,
        }
    }

    #[inline]
    fn check_bounds(&self, abs_off: u64, len: usize) -> FatIOResult {
        let end = abs_off
            .checked_add(len as u64)
            .ok_or(FatIOError::OutOfBounds)?;
        if end > self.buffer.len() as u64 {
            return Err(FatIOError::ShortRead {
                offset: abs_off,
                len,
            });
        }
        Ok(())
    }
}

impl<'a> FatIO for MemFatIO<'a> {
    #[inline(always)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FatIOResult {
        let abs_offset = self
            .partition_offset
            .checked_add(offset)
            .ok_or(FatIOError::OutOfBounds)?;
        self.check_bounds(abs_offset, buf.len())?;
        let start = abs_offset as usize;
        buf.copy_from_slice(&self.buffer[start..start + buf.len()]);
        Ok(())
    }

    #[inline]
    fn set_offset(&mut self, partition_offset: u64) -> u64 {
        self.partition_offset = partition_offset;
        partition_offset
    }

    #[inline]
    fn partition_offset(&self) -> u64 {
        self.partition_offset
    }
}
