//! Linguistic terms of the five sensed quantities.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::terms::Key;

macro_rules! term_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl From<$name> for HomeTerm {
            fn from(term: $name) -> Self {
                HomeTerm::$name(term)
            }
        }
    };
}

term_enum! {
    /// Daylight outside, percent.
    OutdoorBrightness {
        Dark => "dark",
        Dim => "dim",
        Average => "average",
        Bright => "bright",
    }
}

term_enum! {
    /// Lamp output, percent.
    LampBrightness {
        Off => "turned off",
        Dark => "dark",
        Dim => "dim",
        Average => "average",
        Bright => "bright",
    }
}

term_enum! {
    /// Indoor air, °C.
    IndoorTemperature {
        VeryCold => "very cold",
        Cold => "cold",
        Comfortable => "comfortable",
        Warm => "warm",
        Hot => "hot",
        VeryHot => "very hot",
    }
}

term_enum! {
    /// Water heater tank, °C.
    WaterHeaterTemperature {
        VeryCold => "very cold",
        Cold => "cold",
        Comfortable => "comfortable",
        Hot => "hot",
        VeryHot => "very hot",
    }
}

term_enum! {
    /// Relative humidity, percent.
    Humidity {
        Dry => "dry",
        Comfortable => "comfortable",
        Wet => "wet",
    }
}

/// Any term of the home knowledge base.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HomeTerm {
    OutdoorBrightness(OutdoorBrightness),
    LampBrightness(LampBrightness),
    IndoorTemperature(IndoorTemperature),
    WaterHeaterTemperature(WaterHeaterTemperature),
    Humidity(Humidity),
}

impl fmt::Display for HomeTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutdoorBrightness(term) => fmt::Display::fmt(term, f),
            Self::LampBrightness(term) => fmt::Display::fmt(term, f),
            Self::IndoorTemperature(term) => fmt::Display::fmt(term, f),
            Self::WaterHeaterTemperature(term) => fmt::Display::fmt(term, f),
            Self::Humidity(term) => fmt::Display::fmt(term, f),
        }
    }
}

impl Serialize for HomeTerm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(LampBrightness::Off.to_string(), "turned off");
        assert_eq!(HomeTerm::from(IndoorTemperature::VeryHot).to_string(), "very hot");
        assert_ne!(HomeTerm::from(Humidity::Comfortable), HomeTerm::from(IndoorTemperature::Comfortable));
    }
}
