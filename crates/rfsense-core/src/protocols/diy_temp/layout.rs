pub const PREAMBLE_SYNC: &[u8; 4] = &[0xaa, 0xaa, 0xde, 0xad];
pub const PREAMBLE_SYNC_BITS: usize = PREAMBLE_SYNC.len() * 8;

/// Payload bytes including the trailing CRC.
pub const PAYLOAD_LEN: usize = 13;
pub const PAYLOAD_BITS: usize = PAYLOAD_LEN * 8;
/// Raw bits needed after the sync word; Manchester doubles every data bit.
pub const PAYLOAD_RAW_BITS: usize = PAYLOAD_BITS * 2;
/// Upper bound on decoded data bits (50 bytes).
pub const MAX_DATA_BITS: usize = 50 * 8;

pub const DEVICE_ID_OFFSET: usize = 0;
pub const TEMPERATURE_RANGES: [std::ops::Range<usize>; 4] = [1..3, 3..5, 5..7, 7..9];
pub const VBATT_RANGE: std::ops::Range<usize> = 9..11;
pub const CRC_RANGE: std::ops::Range<usize> = 11..13;
/// Bytes covered by the CRC.
pub const CRC_COVERED_RANGE: std::ops::Range<usize> = 0..11;

/// Divisor applied to temperature and battery fields.
pub const SCALE: f64 = 100.0;

pub const MODEL: &str = "DYI Temperature Array Sensor";
pub const DEVICE_NAME: &str = "DIY Temperature Array Sensor";

pub const SHORT_WIDTH: u32 = 104;
pub const LONG_WIDTH: u32 = 104;
pub const RESET_LIMIT: u32 = 9600;

pub const OUTPUT_FIELDS: &[&str] = &[
    "model",
    "id",
    "temperature1_C",
    "temperature2_C",
    "temperature3_C",
    "temperature4_C",
    "vBatt",
];
