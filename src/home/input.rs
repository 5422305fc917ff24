use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Readings within this distance outside a sensor's range are still accepted.
pub const RANGE_TOLERANCE: f64 = 1e-4;

/// The five sensed quantities, in the order they are collected.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensor {
    OutdoorBrightness,
    LampBrightness,
    IndoorTemperature,
    WaterHeaterTemperature,
    Humidity,
}

impl Sensor {
    pub const ALL: [Sensor; 5] = [
        Sensor::OutdoorBrightness,
        Sensor::LampBrightness,
        Sensor::IndoorTemperature,
        Sensor::WaterHeaterTemperature,
        Sensor::Humidity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Sensor::OutdoorBrightness => "Outdoor brightness",
            Sensor::LampBrightness => "Lamp brightness",
            Sensor::IndoorTemperature => "Indoor temperature",
            Sensor::WaterHeaterTemperature => "Water heater temperature",
            Sensor::Humidity => "Humidity",
        }
    }

    /// Physical range a reading must lie in.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Sensor::IndoorTemperature => 0. ..=40.,
            Sensor::WaterHeaterTemperature => 20. ..=80.,
            _ => 0. ..=100.,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Sensor::IndoorTemperature | Sensor::WaterHeaterTemperature => "°C",
            _ => "%",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One snapshot of all five sensor readings.
///
/// Range checking belongs to whoever collects the readings; see
/// [`HomeAdvisor::validate`](super::HomeAdvisor::validate).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrispInput {
    pub outdoor_brightness: f64,
    pub lamp_brightness: f64,
    pub indoor_temperature: f64,
    pub water_heater_temperature: f64,
    pub humidity: f64,
}

impl CrispInput {
    pub fn get(&self, sensor: Sensor) -> f64 {
        match sensor {
            Sensor::OutdoorBrightness => self.outdoor_brightness,
            Sensor::LampBrightness => self.lamp_brightness,
            Sensor::IndoorTemperature => self.indoor_temperature,
            Sensor::WaterHeaterTemperature => self.water_heater_temperature,
            Sensor::Humidity => self.humidity,
        }
    }

    pub fn set(&mut self, sensor: Sensor, value: f64) {
        let slot = match sensor {
            Sensor::OutdoorBrightness => &mut self.outdoor_brightness,
            Sensor::LampBrightness => &mut self.lamp_brightness,
            Sensor::IndoorTemperature => &mut self.indoor_temperature,
            Sensor::WaterHeaterTemperature => &mut self.water_heater_temperature,
            Sensor::Humidity => &mut self.humidity,
        };

        *slot = value;
    }
}
