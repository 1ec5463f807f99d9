use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, TranslateError};

const MMAP_THRESHOLD: u64 = 1024 * 1024; // 1 MiB

/// Raw table bytes, mapped for large files and buffered otherwise.
pub enum TableContent {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl TableContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TableContent::Mapped(mmap) => &mmap[..],
            TableContent::Buffered(bytes) => bytes.as_slice(),
        }
    }
}

pub fn read_table<P: AsRef<Path>>(path: P) -> Result<TableContent> {
    let path = path.as_ref();
    let io_err = |source| TranslateError::Io { path: path.to_path_buf(), source };

    let metadata = std::fs::metadata(path).map_err(io_err)?;

    if metadata.len() > MMAP_THRESHOLD {
        let file = File::open(path).map_err(io_err)?;

        // Safety: the mapping is read-only and dropped before the call returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_err)?;

        Ok(TableContent::Mapped(mmap))
    } else {
        let bytes = std::fs::read(path).map_err(io_err)?;

        Ok(TableContent::Buffered(bytes))
    }
}
