// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use crate::{FatIO, FatIOError, FatIOResult};

/// Maps an OS error from a positioned read into a `FatIOError`.
#[cold]
#[inline(never)]
fn map_read_error(e: io::Error, offset: u64, len: usize) -> FatIOError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => FatIOError::ShortRead { offset, len },
        kind => FatIOError::Os(kind),
    }
}

/// `FatIO` over any `Read + Seek` stream.
///
/// Each read seeks to its absolute offset first, so the stream position left
/// behind by a previous call is never relied upon.
#[derive(Debug)]
pub struct StdFatIO<'a, T: Read + Seek> {
    io: &'a mut T,
    partition_offset: u64,
}

impl<'a, T: Read + Seek> StdFatIO<'a, T> {
    #[inline]
    pub fn new(io: &'a mut T) -> Self {
        Self {
            io,
            partition_offset: 0,
        }
    }

    #[inline]
    pub fn new_with_offset(io: &'a mut T, partition_offset: u64) -> Self {
        Self {
            io,
            partition_offset,
        }
    }
}

impl<'a, T: Read + Seek> FatIO for StdFatIO<'a, T> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FatIOResult {
        let abs_offset = self
            .partition_offset
            .checked_add(offset)
            .ok_or(FatIOError::OutOfBounds)?;
        self.io
            .seek(SeekFrom::Start(abs_offset))
            .map_err(|e| map_read_error(e, abs_offset, buf.len()))?;
        self.io
            .read_exact(buf)
            .map_err(|e| map_read_error(e, abs_offset, buf.len()))?;
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

/// `FatIO` over a shared `File` (disk image or block device).
///
/// Uses the platform's positioned read (`pread` on Unix), so the file's own
/// cursor is never moved and the handle may be shared with other readers.
#[derive(Debug)]
pub struct FileFatIO<'a> {
    file: &'a File,
    partition_offset: u64,
}

impl<'a> FileFatIO<'a> {
    #[inline]
    pub fn new(file: &'a File) -> Self {
        Self {
            file,
            partition_offset: 0,
        }
    }

    #[inline]
    pub fn new_with_offset(file: &'a File, partition_offset: u64) -> Self {
        Self {
            file,
            partition_offset,
        }
    }
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    let mut done = 0;
    while done < buf.len() {
        match file.seek_read(&mut buf[done..], offset + done as u64) {
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => done += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn read_exact_at(mut file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    file.seek(SeekFrom::Start(offset))?;
    file.read_exact(buf)
}

impl<'a> FatIO for FileFatIO<'a> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> FatIOResult {
        let abs_offset = self
            .partition_offset
            .checked_add(offset)
            .ok_or(FatIOError::OutOfBounds)?;
        read_exact_at(self.file, buf, abs_offset)
            .map_err(|e| map_read_error(e, abs_offset, buf.len()))
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;
    use std::io::{Cursor, Write};
    use tempfile::tempfile;

    #[test]
    fn test_std_read() {
        let mut data = vec![0u8; 64];
        data[10..14].copy_from_slice(&[1, 2, 3, 4]);
        let mut cursor = Cursor::new(data);
        let mut io = StdFatIO::new(&mut cursor);

        let mut output = [0u8; 4];
        io.read_at(10, &mut output).unwrap();
        assert_eq!(output, [1, 2, 3, 4]);
    }

    #[test]
    fn test_std_short_read() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        let mut io = StdFatIO::new(&mut cursor);

        let mut output = [0u8; 8];
        assert_eq!(
            io.read_at(12, &mut output),
            Err(FatIOError::ShortRead { offset: 12, len: 8 })
        );
    }

    #[test]
    fn test_file_read_leaves_cursor_alone() {
        let mut file = tempfile().unwrap();
        file.write_all(&[0xAA; 32]).unwrap();
        file.write_all(&[0x55; 32]).unwrap();
        file.seek(SeekFrom::Start(5)).unwrap();

        let mut io = FileFatIO::new(&file);
        let mut output = [0u8; 4];
        io.read_at(32, &mut output).unwrap();
        assert_eq!(output, [0x55; 4]);
        assert_eq!(io.read_u32_at(0).unwrap(), 0xAAAA_AAAA);

        assert_eq!((&file).stream_position().unwrap(), 5);
    }

    #[test]
    fn test_file_short_read() {
        let mut file = tempfile().unwrap();
        file.write_all(&[0u8; 100]).unwrap();

        let mut io = FileFatIO::new(&file);
        let mut output = [0u8; 32];
        assert_eq!(
            io.read_at(90, &mut output),
            Err(FatIOError::ShortRead { offset: 90, len: 32 })
        );
    }

    #[test]
    fn test_std_offset_overflow_is_out_of_bounds() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        let mut io = StdFatIO::new_with_offset(&mut cursor, u64::MAX - 10);
        assert_eq!(io.read_u32_at(100), Err(FatIOError::OutOfBounds));
    }

    #[test]
    fn test_file_offset_overflow_is_out_of_bounds() {
        let mut file = tempfile().unwrap();
        file.write_all(&[0u8; 16]).unwrap();

        let mut io = FileFatIO::new_with_offset(&file, u64::MAX - 10);
        assert_eq!(io.read_u32_at(100), Err(FatIOError::OutOfBounds));
    }

    #[test]
    fn test_file_partition_offset() {
        let mut file = tempfile().unwrap();
        file.write_all(&[0u8; 512]).unwrap();
        file.write_all(&0xF8u8.to_le_bytes()).unwrap();

        let mut io = FileFatIO::new_with_offset(&file, 512);
        let mut output = [0u8; 1];
        io.read_at(0, &mut output).unwrap();
        assert_eq!(output, [0xF8]);
    }
}
