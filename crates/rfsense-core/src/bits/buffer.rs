use std::fmt;
use std::str::FromStr;

use super::error::BitBufferError;

/// Demodulated capture: one or more rows of bits, each with its own length.
///
/// Bits are stored MSB-first; bits past the row length are kept at zero.
///
/// # Examples
/// ```
/// use rfsense_core::BitBuffer;
///
/// let bits: BitBuffer = "{12}aaf".parse().unwrap();
/// assert_eq!(bits.num_rows(), 1);
/// assert_eq!(bits.bits_per_row(0), 12);
/// assert_eq!(bits.to_string(), "{12}aaf0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    rows: Vec<BitRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BitRow {
    bytes: Vec<u8>,
    bits: usize,
}

impl BitRow {
    fn push(&mut self, bit: bool) {
        let byte = self.bits / 8;
        if byte == self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte] |= 0x80 >> (self.bits % 8);
        }
        self.bits += 1;
    }

    fn get(&self, pos: usize) -> Option<bool> {
        if pos >= self.bits {
            return None;
        }
        Some(self.bytes[pos / 8] & (0x80 >> (pos % 8)) != 0)
    }

    fn clear_tail(&mut self) {
        let used = self.bits.div_ceil(8);
        self.bytes.truncate(used);
        let rem = self.bits % 8;
        if rem != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xffu8 << (8 - rem);
            }
        }
    }
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-row buffer holding the first `bits` bits of `bytes`.
    pub fn from_row(bytes: &[u8], bits: usize) -> Self {
        let mut buffer = Self::new();
        buffer.push_row(bytes, bits);
        buffer
    }

    /// Append a new row holding the first `bits` bits of `bytes`.
    ///
    /// `bits` is clamped to the number of bits actually provided.
    pub fn push_row(&mut self, bytes: &[u8], bits: usize) {
        let mut row = BitRow {
            bytes: bytes.to_vec(),
            bits: bits.min(bytes.len() * 8),
        };
        row.clear_tail();
        self.rows.push(row);
    }

    /// Start a new, empty row.
    pub fn add_row(&mut self) {
        self.rows.push(BitRow::default());
    }

    /// Append one bit to the last row, creating the first row if needed.
    pub fn add_bit(&mut self, bit: bool) {
        if self.rows.is_empty() {
            self.add_row();
        }
        if let Some(row) = self.rows.last_mut() {
            row.push(bit);
        }
    }

    /// Append the first `bits` bits of `bytes` to the last row.
    pub fn add_bits(&mut self, bytes: &[u8], bits: usize) {
        let bits = bits.min(bytes.len() * 8);
        for pos in 0..bits {
            self.add_bit(bytes[pos / 8] & (0x80 >> (pos % 8)) != 0);
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bit length of `row`, zero when the row does not exist.
    pub fn bits_per_row(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.bits)
    }

    /// Packed bytes of `row`, empty when the row does not exist.
    pub fn row(&self, row: usize) -> &[u8] {
        self.rows.get(row).map_or(&[], |r| r.bytes.as_slice())
    }

    pub fn bit(&self, row: usize, pos: usize) -> Option<bool> {
        self.rows.get(row).and_then(|r| r.get(pos))
    }

    /// Flip every bit of every row.
    pub fn invert(&mut self) {
        for row in &mut self.rows {
            for byte in &mut row.bytes {
                *byte = !*byte;
            }
            row.clear_tail();
        }
    }

    /// Find the first bit-aligned occurrence of `pattern` in `row` at or
    /// after `start`.
    ///
    /// Only the first `pattern_bits` bits of `pattern` are matched.
    ///
    /// # Examples
    /// ```
    /// use rfsense_core::BitBuffer;
    ///
    /// // 0xde shifted right by three bits.
    /// let bits = BitBuffer::from_row(&[0x1b, 0xc0], 16);
    /// assert_eq!(bits.search(0, 0, &[0xde], 8), Some(3));
    /// assert_eq!(bits.search(0, 4, &[0xde], 8), None);
    /// ```
    pub fn search(
        &self,
        row: usize,
        start: usize,
        pattern: &[u8],
        pattern_bits: usize,
    ) -> Option<usize> {
        let pattern_bits = pattern_bits.min(pattern.len() * 8);
        let len = self.bits_per_row(row);
        if pattern_bits == 0 || len < pattern_bits {
            return None;
        }
        (start..=len - pattern_bits).find(|&offset| {
            (0..pattern_bits).all(|i| {
                let want = pattern[i / 8] & (0x80 >> (i % 8)) != 0;
                self.bit(row, offset + i) == Some(want)
            })
        })
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{{{}}}", row.bits)?;
            for byte in &row.bytes {
                write!(f, "{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

impl FromStr for BitBuffer {
    type Err = BitBufferError;

    /// Parse rows separated by `/`, each either `{N}hex` or bare hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buffer = BitBuffer::new();
        for (index, raw) in s.split('/').enumerate() {
            let (bytes, bits) = parse_row(index, raw.trim())?;
            buffer.push_row(&bytes, bits);
        }
        Ok(buffer)
    }
}

fn parse_row(row: usize, text: &str) -> Result<(Vec<u8>, usize), BitBufferError> {
    if text.is_empty() {
        return Err(BitBufferError::EmptyRow { row });
    }

    let (declared, hex) = match text.strip_prefix('{') {
        Some(rest) => {
            let (len, hex) = rest
                .split_once('}')
                .ok_or_else(|| BitBufferError::InvalidLength {
                    row,
                    value: text.to_string(),
                })?;
            let bits = len
                .trim()
                .parse::<usize>()
                .map_err(|_| BitBufferError::InvalidLength {
                    row,
                    value: len.to_string(),
                })?;
            (Some(bits), hex.trim())
        }
        None => (None, text),
    };

    let mut nibbles = Vec::with_capacity(hex.len());
    for digit in hex.chars() {
        let value = digit
            .to_digit(16)
            .ok_or(BitBufferError::InvalidHex { row, digit })?;
        nibbles.push(value as u8);
    }

    let available = nibbles.len() * 4;
    let bits = match declared {
        Some(bits) if bits > available => {
            return Err(BitBufferError::LengthExceedsData {
                row,
                declared: bits,
                available,
            });
        }
        Some(bits) => bits,
        None => available,
    };

    let bytes = nibbles
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect();
    Ok((bytes, bits))
}
