use crate::bits::{BitBuffer, manchester};

use super::layout;
use super::reader::crc16_ccitt;

/// Raw field values of one payload, before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayloadFields {
    pub id: u8,
    /// Temperatures in hundredths of a degree.
    pub temperatures: [i16; 4],
    /// Battery voltage in hundredths of a volt.
    pub vbatt: i16,
    pub crc: i16,
}

impl PayloadFields {
    /// Replace `crc` with the CRC16/CCITT of the data bytes.
    pub fn with_computed_crc(mut self) -> Self {
        let bytes = self.to_bytes();
        self.crc = crc16_ccitt(&bytes[layout::CRC_COVERED_RANGE]) as i16;
        self
    }

    pub fn to_bytes(&self) -> [u8; layout::PAYLOAD_LEN] {
        let mut bytes = [0u8; layout::PAYLOAD_LEN];
        bytes[layout::DEVICE_ID_OFFSET] = self.id;
        for (range, value) in layout::TEMPERATURE_RANGES.iter().zip(self.temperatures) {
            bytes[range.clone()].copy_from_slice(&value.to_be_bytes());
        }
        bytes[layout::VBATT_RANGE].copy_from_slice(&self.vbatt.to_be_bytes());
        bytes[layout::CRC_RANGE].copy_from_slice(&self.crc.to_be_bytes());
        bytes
    }
}

/// Build a single-row capture as the sensor transmits it: preamble and sync
/// in the clear, then the payload Manchester coded with inverted polarity.
///
/// # Examples
/// ```
/// use rfsense_core::{DecoderConfig, decode_diy_temp};
/// use rfsense_core::protocols::diy_temp::{PayloadFields, encode_frame};
///
/// let fields = PayloadFields { id: 7, vbatt: 330, ..Default::default() };
/// let bits = encode_frame(&fields.to_bytes());
/// let reading = decode_diy_temp(&bits, &DecoderConfig::default()).unwrap();
/// assert_eq!(reading.id, 7);
/// assert_eq!(reading.vbatt, 3.3);
/// ```
pub fn encode_frame(payload: &[u8]) -> BitBuffer {
    let mut bits = BitBuffer::new();
    bits.add_bits(layout::PREAMBLE_SYNC, layout::PREAMBLE_SYNC_BITS);
    let inverted: Vec<u8> = payload.iter().map(|byte| !byte).collect();
    manchester::encode_into(&mut bits, &inverted, inverted.len() * 8);
    bits
}

#[cfg(test)]
mod tests {
    use super::{PayloadFields, encode_frame};
    use crate::protocols::diy_temp::layout;

    #[test]
    fn to_bytes_is_big_endian() {
        let fields = PayloadFields {
            id: 5,
            temperatures: [2500, -50, 0, 100],
            vbatt: 370,
            crc: 0,
        };
        assert_eq!(
            fields.to_bytes(),
            [
                0x05, 0x09, 0xc4, 0xff, 0xce, 0x00, 0x00, 0x00, 0x64, 0x01, 0x72, 0x00, 0x00
            ]
        );
    }

    #[test]
    fn frame_has_sync_then_doubled_payload() {
        let bits = encode_frame(&[0u8; layout::PAYLOAD_LEN]);
        assert_eq!(bits.num_rows(), 1);
        assert_eq!(
            bits.bits_per_row(0),
            layout::PREAMBLE_SYNC_BITS + layout::PAYLOAD_RAW_BITS
        );
        assert_eq!(&bits.row(0)[..4], layout::PREAMBLE_SYNC);
        // data 0 is sent as 01 once inverted.
        assert_eq!(bits.row(0)[4], 0x55);
    }
}
