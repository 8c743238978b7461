use serde::{Deserialize, Serialize};

use crate::protocols::diy_temp::layout;

/// Decoder options shared by the registry, analysis and CLI.
///
/// Missing keys fall back to the defaults when deserialized.
///
/// # Examples
/// ```
/// use rfsense_core::DecoderConfig;
///
/// let config: DecoderConfig = serde_json::from_str(r#"{"verify_crc": true}"#).unwrap();
/// assert!(config.verify_crc);
/// assert_eq!(config.max_data_bits, DecoderConfig::default().max_data_bits);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Reject payloads whose CRC16/CCITT does not match. Off by default:
    /// deployed sensors are not known to fill the field reliably.
    pub verify_crc: bool,
    /// Maximum number of Manchester data bits decoded after the sync word.
    pub max_data_bits: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verify_crc: false,
            max_data_bits: layout::MAX_DATA_BITS,
        }
    }
}
