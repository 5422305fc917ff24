use std::fmt;

use serde::Serialize;

use super::input::Sensor;

/// Below this lamp target the lamps are advised off instead of dimmed.
pub const LAMP_OFF_BELOW: f64 = 1.0;

/// The four quantities the advisor recommends targets for.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    LampBrightness,
    IndoorTemperature,
    Humidity,
    WaterHeaterTemperature,
}

impl Decision {
    /// Reporting order.
    pub const ALL: [Decision; 4] = [
        Decision::LampBrightness,
        Decision::IndoorTemperature,
        Decision::Humidity,
        Decision::WaterHeaterTemperature,
    ];

    /// The sensor reading a target is compared against.
    pub fn sensor(self) -> Sensor {
        match self {
            Decision::LampBrightness => Sensor::LampBrightness,
            Decision::IndoorTemperature => Sensor::IndoorTemperature,
            Decision::Humidity => Sensor::Humidity,
            Decision::WaterHeaterTemperature => Sensor::WaterHeaterTemperature,
        }
    }

    pub fn label(self) -> &'static str {
        self.sensor().label()
    }

    fn precision(self) -> usize {
        match self {
            Decision::LampBrightness | Decision::Humidity => 0,
            Decision::IndoorTemperature | Decision::WaterHeaterTemperature => 1,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do about one decision variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Advice {
    TurnOff,
    Raise { decision: Decision, target: f64 },
    Lower { decision: Decision, target: f64 },
    Unavailable { decision: Decision, reason: String },
}

impl Advice {
    /// Compares an inferred target with the current reading. Returns `None`
    /// when they are exactly equal.
    pub fn decide(decision: Decision, target: f64, current: f64) -> Option<Self> {
        if decision == Decision::LampBrightness && target < LAMP_OFF_BELOW {
            return Some(Advice::TurnOff);
        }

        if target > current {
            Some(Advice::Raise { decision, target })
        } else if target < current {
            Some(Advice::Lower { decision, target })
        } else {
            None
        }
    }

    pub fn decision(&self) -> Decision {
        match self {
            Advice::TurnOff => Decision::LampBrightness,
            Advice::Raise { decision, .. } | Advice::Lower { decision, .. } | Advice::Unavailable { decision, .. } => {
                *decision
            }
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (decision, target, raise) = match self {
            Advice::TurnOff => return f.write_str("Lamps should be turned off."),
            Advice::Unavailable { reason, .. } => return f.write_str(reason),
            Advice::Raise { decision, target } => (*decision, *target, true),
            Advice::Lower { decision, target } => (*decision, *target, false),
        };
        let unit = decision.sensor().unit();
        let precision = decision.precision();

        match (decision, raise) {
            (Decision::LampBrightness, true) => {
                write!(f, "Lamp brightness should be increased up to {target:.precision$}{unit}.")
            }
            (Decision::LampBrightness, false) => {
                write!(f, "Lamp brightness should be decreased down to {target:.precision$}{unit}.")
            }
            (Decision::IndoorTemperature, true) => write!(
                f,
                "Indoor temperature should be heated up to {target:.precision$}{unit}, using the air heater."
            ),
            (Decision::IndoorTemperature, false) => write!(
                f,
                "Indoor temperature should be cooled down to {target:.precision$}{unit}, using the AC."
            ),
            (Decision::Humidity, true) => write!(
                f,
                "Humidity should be increased up to {target:.precision$}{unit}, using the humidifier."
            ),
            (Decision::Humidity, false) => write!(
                f,
                "Humidity should be decreased down to {target:.precision$}{unit}, using the dehumidifier."
            ),
            (Decision::WaterHeaterTemperature, true) => {
                write!(f, "Water heater temperature should be heated up to {target:.precision$}{unit}.")
            }
            (Decision::WaterHeaterTemperature, false) => {
                write!(f, "Water heater temperature should be cooled down to {target:.precision$}{unit}.")
            }
        }
    }
}
