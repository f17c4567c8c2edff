//! Read-only asset storage
//!
//! Bitmaps and fixed strings often live outside RAM (external SPI flash,
//! memory-mapped program storage). The encoder reads them through this
//! trait, a few bytes at a time, straight into its frame buffers.

/// Errors from asset storage reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Address lies outside the store
    OutOfBounds,
    /// Underlying storage read failed
    Read,
}

/// Read-only asset storage trait
///
/// Addresses are byte offsets into the store. Implementations may return
/// fewer bytes than requested when the read crosses the end of the store.
pub trait AssetStore {
    /// Read bytes starting at `address` into `buffer`
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(&mut self, address: u32, buffer: &mut [u8]) -> Result<usize, AssetError>;

    /// Total size of the store in bytes
    fn len(&self) -> u32;

    /// Returns true if the store holds no data
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a single byte
    fn read_byte(&mut self, address: u32) -> Result<u8, AssetError> {
        let mut buf = [0u8; 1];
        match self.read(address, &mut buf)? {
            0 => Err(AssetError::OutOfBounds),
            _ => Ok(buf[0]),
        }
    }
}

/// Static tables compiled into program memory
impl AssetStore for &[u8] {
    fn read(&mut self, address: u32, buffer: &mut [u8]) -> Result<usize, AssetError> {
        let data: &[u8] = *self;
        let start = address as usize;
        if start > data.len() {
            return Err(AssetError::OutOfBounds);
        }
        let available = &data[start..];
        let count = available.len().min(buffer.len());
        buffer[..count].copy_from_slice(&available[..count]);
        Ok(count)
    }

    fn len(&self) -> u32 {
        <[u8]>::len(self) as u32
    }
}
