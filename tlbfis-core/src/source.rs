//! Where text and bitmap bytes come from
//!
//! Short strings usually sit in RAM, while icons and fixed labels are kept
//! in an [`AssetStore`]. Both are read through [`Source`] so each drawing
//! operation has a single entry point.

use tlbfis_hal::AssetStore;

/// Byte source for text and bitmap data
pub enum Source<'a> {
    /// Bytes in memory; the slice length is the data length
    Memory(&'a [u8]),
    /// `len` bytes of an asset store starting at `address`
    Asset {
        store: &'a mut dyn AssetStore,
        address: u32,
        len: usize,
    },
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Memory(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Source::Memory(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Memory(text.as_bytes())
    }
}

impl<'a> Source<'a> {
    /// Region of an asset store
    pub fn asset(store: &'a mut dyn AssetStore, address: u32, len: usize) -> Self {
        Source::Asset {
            store,
            address,
            len,
        }
    }

    /// Declared data length
    pub fn len(&self) -> usize {
        match *self {
            Source::Memory(bytes) => bytes.len(),
            Source::Asset { len, .. } => len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes that can actually be read
    ///
    /// Smaller than [`Source::len`] when an asset region runs past the end
    /// of its store.
    pub fn available(&self) -> usize {
        match *self {
            Source::Memory(bytes) => bytes.len(),
            Source::Asset {
                ref store,
                address,
                len,
            } => {
                let end = store.len() as usize;
                end.saturating_sub(address as usize).min(len)
            }
        }
    }

    /// Fill `out` with the bytes at `offset`
    ///
    /// Bytes past the end of the data, or that the store fails to deliver,
    /// are written as zero. Returns the number of real bytes copied.
    pub fn read(&mut self, offset: usize, out: &mut [u8]) -> usize {
        let count = out.len().min(self.len().saturating_sub(offset));
        let copied = match self {
            Source::Memory(bytes) => {
                let tail = bytes.get(offset..).unwrap_or_default();
                out[..count].copy_from_slice(&tail[..count]);
                count
            }
            Source::Asset { store, address, .. } => {
                let start = address.saturating_add(offset as u32);
                store.read(start, &mut out[..count]).unwrap_or(0).min(count)
            }
        };
        out[copied..].fill(0);
        copied
    }

    /// Single byte at `offset`, zero past the end
    pub fn byte(&mut self, offset: usize) -> u8 {
        let mut buf = [0u8; 1];
        self.read(offset, &mut buf);
        buf[0]
    }
}
