//! Explicit decoder registration.
//!
//! A host builds a `DecoderRegistry`, which owns its decoders and exposes
//! their static `DeviceDescriptor`s; nothing is registered globally.

use serde::Serialize;
use tracing::debug;

use crate::DecodeError;
use crate::bits::BitBuffer;
use crate::config::DecoderConfig;
use crate::protocols::diy_temp::{SensorReading, decode_diy_temp, layout};

/// Pulse modulation a decoder expects from the demodulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Modulation {
    OokPulsePcm,
    OokPulsePwm,
    FskPulsePcm,
    FskPulsePwm,
}

/// Static metadata used to select and configure a decoder.
///
/// Widths and limits are in microseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescriptor {
    pub name: &'static str,
    pub modulation: Modulation,
    pub short_width: u32,
    pub long_width: u32,
    pub reset_limit: u32,
    pub fields: &'static [&'static str],
    pub disabled: bool,
}

pub const DIY_TEMPERATURE_ARRAY: DeviceDescriptor = DeviceDescriptor {
    name: layout::DEVICE_NAME,
    modulation: Modulation::FskPulsePcm,
    short_width: layout::SHORT_WIDTH,
    long_width: layout::LONG_WIDTH,
    reset_limit: layout::RESET_LIMIT,
    fields: layout::OUTPUT_FIELDS,
    disabled: false,
};

/// A device decoder the registry can dispatch captures to.
pub trait Decoder: Send + Sync {
    fn descriptor(&self) -> &DeviceDescriptor;
    fn decode(&self, bits: &BitBuffer) -> Result<SensorReading, DecodeError>;
}

#[derive(Debug, Clone, Default)]
pub struct DiyTemperatureArray {
    config: DecoderConfig,
}

impl DiyTemperatureArray {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }
}

impl Decoder for DiyTemperatureArray {
    fn descriptor(&self) -> &DeviceDescriptor {
        &DIY_TEMPERATURE_ARRAY
    }

    fn decode(&self, bits: &BitBuffer) -> Result<SensorReading, DecodeError> {
        decode_diy_temp(bits, &self.config)
    }
}

/// Outcome of running one decoder on one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeAttempt {
    pub device: &'static str,
    pub result: Result<SensorReading, DecodeError>,
}

#[derive(Default)]
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in decoder.
    ///
    /// # Examples
    /// ```
    /// use rfsense_core::{DecoderConfig, DecoderRegistry};
    ///
    /// let registry = DecoderRegistry::with_defaults(DecoderConfig::default());
    /// let names: Vec<_> = registry.descriptors().map(|d| d.name).collect();
    /// assert_eq!(names, ["DIY Temperature Array Sensor"]);
    /// ```
    pub fn with_defaults(config: DecoderConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DiyTemperatureArray::new(config)));
        registry
    }

    pub fn register(&mut self, decoder: Box<dyn Decoder>) {
        debug!(device = decoder.descriptor().name, "registering decoder");
        self.decoders.push(decoder);
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.decoders.iter().map(|decoder| decoder.descriptor())
    }

    /// Run every enabled decoder on `bits`, in registration order.
    pub fn decode(&self, bits: &BitBuffer) -> Vec<DecodeAttempt> {
        self.decoders
            .iter()
            .filter(|decoder| !decoder.descriptor().disabled)
            .map(|decoder| {
                let descriptor = decoder.descriptor();
                DecodeAttempt {
                    device: descriptor.name,
                    result: decoder.decode(bits),
                }
            })
            .collect()
    }
}
