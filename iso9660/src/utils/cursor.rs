//! Read cursor over a fetched byte range
//!
//! Every sector fetch hands back a fresh `ReadCursor` that owns its bytes.
//! The decoders below pull fixed-width fields off the front of it; reading
//! past the end is an `UnexpectedEnd` error rather than a short value.

use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{Iso9660Error, Result};
use crate::utils::datetime::{DateTime17, DateTime7};
use crate::utils::string;

/// Owned, position-tracking view over one fetched byte range
#[derive(Debug, Clone)]
pub struct ReadCursor {
    inner: Cursor<Vec<u8>>,
}

impl ReadCursor {
    /// Wrap freshly fetched bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { inner: Cursor::new(data) }
    }

    /// Total bytes in the range
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    /// Is the range empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current read offset
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Move the read offset
    pub fn set_position(&mut self, pos: u64) {
        self.inner.set_position(pos);
    }

    /// Bytes left after the current offset
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.inner.position() as usize)
    }

    /// Give the underlying bytes back
    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn read_with<T>(
        &mut self,
        wanted: usize,
        read: impl FnOnce(&mut Cursor<Vec<u8>>) -> io::Result<T>,
    ) -> Result<T> {
        let offset = self.inner.position();
        if self.remaining() < wanted {
            return Err(Iso9660Error::UnexpectedEnd { offset, wanted });
        }
        read(&mut self.inner).map_err(|_| Iso9660Error::UnexpectedEnd { offset, wanted })
    }

    /// Unsigned byte
    pub fn u8(&mut self) -> Result<u8> {
        self.read_with(1, |c| c.read_u8())
    }

    /// Signed byte
    pub fn i8(&mut self) -> Result<i8> {
        self.read_with(1, |c| c.read_i8())
    }

    /// Little-endian 16-bit
    pub fn le_u16(&mut self) -> Result<u16> {
        self.read_with(2, |c| c.read_u16::<LittleEndian>())
    }

    /// Little-endian 32-bit
    pub fn le_u32(&mut self) -> Result<u32> {
        self.read_with(4, |c| c.read_u32::<LittleEndian>())
    }

    /// Big-endian 16-bit
    pub fn be_u16(&mut self) -> Result<u16> {
        self.read_with(2, |c| c.read_u16::<BigEndian>())
    }

    /// Big-endian 32-bit
    pub fn be_u32(&mut self) -> Result<u32> {
        self.read_with(4, |c| c.read_u32::<BigEndian>())
    }

    /// Both-endian 16-bit field (LE copy then BE copy, must agree)
    pub fn both_u16(&mut self) -> Result<u16> {
        let le = self.le_u16()?;
        let be = self.be_u16()?;
        if le != be {
            return Err(Iso9660Error::BothEndianMismatch { le: le as u32, be: be as u32 });
        }
        Ok(le)
    }

    /// Both-endian 32-bit field (LE copy then BE copy, must agree)
    pub fn both_u32(&mut self) -> Result<u32> {
        let le = self.le_u32()?;
        let be = self.be_u32()?;
        if le != be {
            return Err(Iso9660Error::BothEndianMismatch { le, be });
        }
        Ok(le)
    }

    /// `n` raw bytes
    pub fn raw(&mut self, n: usize) -> Result<Vec<u8>> {
        self.read_with(n, |c| {
            let mut buf = vec![0u8; n];
            c.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    /// Fixed-size array of raw bytes
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.read_with(N, |c| {
            let mut buf = [0u8; N];
            c.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    /// Skip `n` bytes (reserved or uninterpreted fields)
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let offset = self.inner.position();
        if self.remaining() < n {
            return Err(Iso9660Error::UnexpectedEnd { offset, wanted: n });
        }
        self.inner.set_position(offset + n as u64);
        Ok(())
    }

    /// `n`-byte identifier with trailing space padding removed
    pub fn fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.raw(n)?;
        Ok(String::from_utf8_lossy(string::trim_trailing_spaces(&bytes)).into_owned())
    }

    /// 7-byte directory record timestamp
    pub fn dir_timestamp(&mut self) -> Result<DateTime7> {
        Ok(DateTime7::from_bytes(&self.array::<7>()?))
    }

    /// 17-byte volume descriptor timestamp, `None` if not digit-encoded
    pub fn vd_timestamp(&mut self) -> Result<Option<DateTime17>> {
        Ok(DateTime17::from_bytes(&self.array::<17>()?))
    }
}
