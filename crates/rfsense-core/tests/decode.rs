use rfsense_core::protocols::diy_temp::{PayloadFields, encode_frame};
use rfsense_core::{BitBuffer, DecodeError, DecoderConfig, DecoderRegistry, decode_diy_temp};

fn decode_text(text: &str) -> Result<rfsense_core::SensorReading, DecodeError> {
    let bits: BitBuffer = text.parse().expect("valid capture text");
    decode_diy_temp(&bits, &DecoderConfig::default())
}

#[test]
fn round_trip_through_text_form() {
    let fields = PayloadFields {
        id: 42,
        temperatures: [-2730, 1234, 0, 9999],
        vbatt: 301,
        crc: 0x1f2e,
    };
    let text = encode_frame(&fields.to_bytes()).to_string();

    let reading = decode_text(&text).unwrap();
    assert_eq!(reading.id, 42);
    let raw: Vec<i16> = [
        reading.temperature1_c,
        reading.temperature2_c,
        reading.temperature3_c,
        reading.temperature4_c,
        reading.vbatt,
    ]
    .iter()
    .map(|value| (value * 100.0).round() as i16)
    .collect();
    assert_eq!(raw, vec![-2730, 1234, 0, 9999, 301]);
    assert_eq!(reading.crc, 0x1f2e);
}

#[test]
fn scaling_of_known_raw_fields() {
    let fields = PayloadFields {
        temperatures: [0x0960, i16::from_be_bytes([0xff, 0x9c]), 0, 0],
        ..Default::default()
    };
    let reading = decode_text(&encode_frame(&fields.to_bytes()).to_string()).unwrap();
    assert_eq!(reading.temperature1_c, 24.0);
    assert_eq!(reading.temperature2_c, -1.0);
}

#[test]
fn any_multi_row_capture_is_rejected() {
    for text in ["{8}00/{8}00", "{32}aaaadead/{0}", "{8}ff/{8}ff/{8}ff"] {
        let err = decode_text(text).unwrap_err();
        assert!(matches!(err, DecodeError::TooManyRows { .. }), "{text}");
    }
}

#[test]
fn sync_pattern_split_by_a_bit_is_not_found() {
    // aaaa de ad with one extra bit after the preamble.
    let mut bits = BitBuffer::new();
    bits.add_bits(&[0xaa, 0xaa], 16);
    bits.add_bit(false);
    bits.add_bits(&[0xde, 0xad], 16);
    bits.add_bits(&[0x55; 26], 208);

    let err = decode_diy_temp(&bits, &DecoderConfig::default()).unwrap_err();
    assert_eq!(err, DecodeError::SyncNotFound);
}

#[test]
fn registry_decodes_scenario_capture() {
    let registry = DecoderRegistry::with_defaults(DecoderConfig::default());
    let fields = PayloadFields {
        id: 5,
        temperatures: [2500, -50, 0, 100],
        vbatt: 370,
        crc: 0,
    };

    let attempts = registry.decode(&encode_frame(&fields.to_bytes()));
    let reading = attempts[0].result.as_ref().unwrap();
    let rendered: Vec<String> = reading
        .fields()
        .iter()
        .map(|field| format!("{}={}", field.key, field.value))
        .collect();
    assert_eq!(
        rendered,
        [
            "model=DYI Temperature Array Sensor",
            "id=5",
            "temperature1_C=25.00C",
            "temperature2_C=-0.50C",
            "temperature3_C=0.00C",
            "temperature4_C=1.00C",
            "vBatt=3.70V",
        ]
    );
}
