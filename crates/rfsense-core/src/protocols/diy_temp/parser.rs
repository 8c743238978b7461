use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bits::{BitBuffer, manchester};
use crate::config::DecoderConfig;
use crate::{FieldValue, OutputField};

use super::error::DecodeError;
use super::layout;
use super::reader::PayloadReader;

/// One decoded transmission.
///
/// Serializes with the sensor's output keys; the CRC field is carried for
/// callers but never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub model: String,
    pub id: u8,
    #[serde(rename = "temperature1_C")]
    pub temperature1_c: f64,
    #[serde(rename = "temperature2_C")]
    pub temperature2_c: f64,
    #[serde(rename = "temperature3_C")]
    pub temperature3_c: f64,
    #[serde(rename = "temperature4_C")]
    pub temperature4_c: f64,
    #[serde(rename = "vBatt")]
    pub vbatt: f64,
    #[serde(skip)]
    pub crc: i16,
}

impl SensorReading {
    /// Output fields in emission order, with labels and text formats.
    pub fn fields(&self) -> Vec<OutputField> {
        let celsius = |value| FieldValue::Double { value, unit: "C" };
        vec![
            OutputField::new("model", "", FieldValue::Text(self.model.clone())),
            OutputField::new("id", "Id", FieldValue::Int(i64::from(self.id))),
            OutputField::new("temperature1_C", "Temperature 1", celsius(self.temperature1_c)),
            OutputField::new("temperature2_C", "Temperature 2", celsius(self.temperature2_c)),
            OutputField::new("temperature3_C", "Temperature 3", celsius(self.temperature3_c)),
            OutputField::new("temperature4_C", "Temperature 4", celsius(self.temperature4_c)),
            OutputField::new(
                "vBatt",
                "Battery Voltage",
                FieldValue::Double {
                    value: self.vbatt,
                    unit: "V",
                },
            ),
        ]
    }
}

/// Decode one DIY Temperature Array Sensor capture.
///
/// The capture must hold a single row containing the clear-text preamble and
/// sync word followed by the Manchester coded payload.
///
/// # Errors
/// Returns `DecodeError` when the capture has several rows, lacks the sync
/// word, is too short, or (with `verify_crc`) fails its checksum.
pub fn decode_diy_temp(
    bits: &BitBuffer,
    config: &DecoderConfig,
) -> Result<SensorReading, DecodeError> {
    debug!(rows = bits.num_rows(), "decoding {}", layout::DEVICE_NAME);
    trace!(capture = %bits, "raw capture");

    if bits.num_rows() > 1 {
        debug!(rows = bits.num_rows(), "too many rows");
        return Err(DecodeError::TooManyRows {
            rows: bits.num_rows(),
        });
    }

    let row_bits = bits.bits_per_row(0);
    let sync = bits
        .search(0, 0, layout::PREAMBLE_SYNC, layout::PREAMBLE_SYNC_BITS)
        .ok_or_else(|| {
            debug!(bits_per_row = row_bits, "preamble and sync word not found");
            DecodeError::SyncNotFound
        })?;

    let bit_offset = sync + layout::PREAMBLE_SYNC_BITS;
    debug!(bit_offset, bits_per_row = row_bits, "sync word found");

    let available = row_bits - bit_offset;
    if available < layout::PAYLOAD_RAW_BITS {
        debug!(available, "received payload too short");
        return Err(DecodeError::PayloadTooShort {
            needed: layout::PAYLOAD_RAW_BITS,
            actual: available,
        });
    }

    let mut databits = manchester::decode(bits, 0, bit_offset, config.max_data_bits);
    databits.invert();

    let decoded_bits = databits.bits_per_row(0);
    trace!(decoded = %databits, "manchester decoded payload");
    debug!(
        bits_per_row = decoded_bits,
        "bits per row after manchester decode"
    );
    if decoded_bits < layout::PAYLOAD_BITS {
        debug!("manchester decode fail, result after decoding not correct length");
        return Err(DecodeError::ManchesterDecodeFailed {
            needed: layout::PAYLOAD_BITS,
            actual: decoded_bits,
        });
    }

    // At least PAYLOAD_LEN bytes from here on; reads below cannot run short.
    let reader = PayloadReader::new(databits.row(0));

    let id = reader.read_u8(layout::DEVICE_ID_OFFSET)?;
    let mut temperatures = [0.0f64; 4];
    for (slot, range) in temperatures.iter_mut().zip(layout::TEMPERATURE_RANGES) {
        *slot = reader.read_scaled(range)?;
    }
    let vbatt = reader.read_scaled(layout::VBATT_RANGE)?;
    let crc = reader.read_i16_be(layout::CRC_RANGE)?;
    debug!(crc, "payload CRC");

    if config.verify_crc {
        let computed = reader.compute_crc()?;
        let received = crc as u16;
        if computed != received {
            debug!(received, computed, "CRC mismatch");
            return Err(DecodeError::CrcMismatch { received, computed });
        }
    }

    let [temperature1_c, temperature2_c, temperature3_c, temperature4_c] = temperatures;
    Ok(SensorReading {
        model: layout::MODEL.to_string(),
        id,
        temperature1_c,
        temperature2_c,
        temperature3_c,
        temperature4_c,
        vbatt,
        crc,
    })
}
