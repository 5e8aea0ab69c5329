//! # File-Descriptor Table
//!
//! The guest sees small integer file descriptors; each maps to an
//! [`IoStrategy`], a tagged variant rather than a trait object. Descriptors
//! 0, 1 and 2 are permanently the console; descriptors from 3 upward are
//! host files created by the open trap.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// Backing store behind one guest file descriptor.
#[derive(Debug)]
pub enum IoStrategy {
    /// The console. Input comes from the host's buffered input bytes;
    /// output is surfaced to the embedder as output records.
    Console,
    /// A host filesystem file opened by the open trap.
    HostFile(File),
    /// A descriptor that has been closed and not reused yet.
    Closed,
}

/// Guest file-descriptor table.
///
/// Descriptors 0-2 are seeded as console strategies and never replaced;
/// `alloc` hands out 3, 4, 5, ... for host files.
#[derive(Debug)]
pub struct FdTable {
    fds: HashMap<u16, IoStrategy>,
    next_fd: u16,
}

impl FdTable {
    /// Creates the table with the three console descriptors.
    pub fn new() -> Self {
        let mut fds = HashMap::new();
        fds.insert(0, IoStrategy::Console);
        fds.insert(1, IoStrategy::Console);
        fds.insert(2, IoStrategy::Console);
        Self { fds, next_fd: 3 }
    }

    /// Registers a host file and returns its new descriptor.
    pub fn alloc(&mut self, file: File) -> u16 {
        let fd = self.next_fd;
        self.next_fd = self.next_fd.wrapping_add(1);
        self.fds.insert(fd, IoStrategy::HostFile(file));
        fd
    }

    /// Looks up a descriptor.
    pub fn get(&self, fd: u16) -> Option<&IoStrategy> {
        self.fds.get(&fd)
    }

    /// Looks up a descriptor for mutation.
    pub fn get_mut(&mut self, fd: u16) -> Option<&mut IoStrategy> {
        self.fds.get_mut(&fd)
    }

    /// Closes a descriptor. Console descriptors are permanent: closing one
    /// succeeds without effect. Returns false for unknown or already
    /// closed descriptors.
    pub fn close(&mut self, fd: u16) -> bool {
        match self.fds.get_mut(&fd) {
            Some(IoStrategy::Console) => true,
            Some(slot @ IoStrategy::HostFile(_)) => {
                // Dropping the File releases the host descriptor.
                *slot = IoStrategy::Closed;
                true
            }
            Some(IoStrategy::Closed) | None => false,
        }
    }

    /// Closes every host file; used on session teardown.
    pub fn close_all_files(&mut self) {
        for strategy in self.fds.values_mut() {
            if matches!(strategy, IoStrategy::HostFile(_)) {
                *strategy = IoStrategy::Closed;
            }
        }
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}

impl IoStrategy {
    /// Reads up to `count` bytes from a host file.
    pub fn read(&mut self, count: usize) -> std::io::Result<Vec<u8>> {
        match self {
            IoStrategy::HostFile(file) => {
                let mut buf = vec![0u8; count];
                let n = file.read(&mut buf)?;
                buf.truncate(n);
                Ok(buf)
            }
            IoStrategy::Console | IoStrategy::Closed => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a host file",
            )),
        }
    }

    /// Writes bytes to a host file, returning the count written.
    pub fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        match self {
            IoStrategy::HostFile(file) => file.write(bytes),
            IoStrategy::Console | IoStrategy::Closed => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a host file",
            )),
        }
    }

    /// Seeks a host file. `whence` follows the sim65 encoding:
    /// 0 = current, 1 = end, 2 = set.
    pub fn lseek(&mut self, offset: i32, whence: u16) -> std::io::Result<u64> {
        let pos = match whence {
            0 => SeekFrom::Current(offset as i64),
            1 => SeekFrom::End(offset as i64),
            2 => SeekFrom::Start(offset.max(0) as u64),
            _ => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "bad whence",
                ))
            }
        };
        match self {
            IoStrategy::HostFile(file) => file.seek(pos),
            IoStrategy::Console | IoStrategy::Closed => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a host file",
            )),
        }
    }
}
