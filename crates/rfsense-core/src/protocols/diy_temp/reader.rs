use crc::{CRC_16_XMODEM, Crc};

use super::error::DecodeError;
use super::layout;

/// CRC16/CCITT: polynomial 0x1021, initial value 0x0000.
const CRC16_CCITT: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Positional access to a Manchester-decoded payload.
pub struct PayloadReader<'a> {
    payload: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(DecodeError::ManchesterDecodeFailed {
                needed: (offset + 1) * 8,
                actual: self.payload.len() * 8,
            })
    }

    pub fn read_i16_be(&self, range: std::ops::Range<usize>) -> Result<i16, DecodeError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(DecodeError::ManchesterDecodeFailed {
                needed: 16,
                actual: bytes.len() * 8,
            });
        }
        Ok(i16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Signed big-endian field divided by the payload scale.
    pub fn read_scaled(&self, range: std::ops::Range<usize>) -> Result<f64, DecodeError> {
        Ok(scale(self.read_i16_be(range)?))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or(DecodeError::ManchesterDecodeFailed {
                needed: range.end * 8,
                actual: self.payload.len() * 8,
            })
    }

    pub fn compute_crc(&self) -> Result<u16, DecodeError> {
        let covered = self.read_slice(layout::CRC_COVERED_RANGE.clone())?;
        Ok(crc16_ccitt(covered))
    }
}

pub fn scale(raw: i16) -> f64 {
    f64::from(raw) / layout::SCALE
}

pub fn crc16_ccitt(bytes: &[u8]) -> u16 {
    CRC16_CCITT.checksum(bytes)
}
