//! Manchester coding with the IEEE 802.3 convention: a data `0` is sent as
//! `10`, a data `1` as `01`.

use super::buffer::BitBuffer;

/// Decode `row` of `input` from bit `start`, producing at most `max_bits`
/// data bits (`0` means no limit).
///
/// Decoding stops at the first Manchester violation (two equal half-bits)
/// or when fewer than two raw bits remain. The result always has one row.
///
/// # Examples
/// ```
/// use rfsense_core::BitBuffer;
/// use rfsense_core::bits::manchester;
///
/// // 01 10 01 00 -> 1 0 1, then a violation.
/// let raw = BitBuffer::from_row(&[0b0110_0100], 8);
/// let decoded = manchester::decode(&raw, 0, 0, 0);
/// assert_eq!(decoded.bits_per_row(0), 3);
/// assert_eq!(decoded.row(0), &[0b1010_0000]);
/// ```
pub fn decode(input: &BitBuffer, row: usize, start: usize, max_bits: usize) -> BitBuffer {
    let mut len = input.bits_per_row(row);
    if max_bits > 0 {
        len = len.min(start.saturating_add(max_bits.saturating_mul(2)));
    }

    let mut output = BitBuffer::new();
    output.add_row();

    let mut pos = start;
    while pos + 1 < len {
        let (Some(first), Some(second)) = (input.bit(row, pos), input.bit(row, pos + 1)) else {
            break;
        };
        if first == second {
            break;
        }
        output.add_bit(second);
        pos += 2;
    }
    output
}

/// Append the Manchester encoding of the first `bits` bits of `bytes` to
/// the last row of `output`.
pub fn encode_into(output: &mut BitBuffer, bytes: &[u8], bits: usize) {
    let bits = bits.min(bytes.len() * 8);
    for pos in 0..bits {
        let bit = bytes[pos / 8] & (0x80 >> (pos % 8)) != 0;
        output.add_bit(!bit);
        output.add_bit(bit);
    }
}
