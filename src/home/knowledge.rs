//! Membership tables and rules of the home advisor.

use crate::dsl::Expr;
use crate::error::FuzzyResult;
use crate::rules::Rules;
use crate::terms::Terms;
use crate::variable::{Variable, VariableKey, Variables};

use super::input::Sensor;
use super::terms::{HomeTerm, Humidity, IndoorTemperature, LampBrightness, OutdoorBrightness, WaterHeaterTemperature};

type Table = &'static [(f64, f64)];

// Outdoor brightness, 0-100 %
const OUTDOOR_DARK: Table = &[(0., 1.), (12., 0.)];
const OUTDOOR_DIM: Table = &[(10., 0.), (30., 1.), (50., 0.)];
const OUTDOOR_AVERAGE: Table = &[(40., 0.), (60., 1.), (80., 0.)];
const OUTDOOR_BRIGHT: Table = &[(70., 0.), (100., 1.)];

// Lamp brightness, 0-100 %
const LAMP_OFF: Table = &[(0., 1.), (1., 0.)];
const LAMP_DARK: Table = &[(0., 0.), (3., 1.), (9., 1.), (12., 0.)];
const LAMP_DIM: Table = &[(10., 0.), (30., 1.), (50., 0.)];
const LAMP_AVERAGE: Table = &[(40., 0.), (60., 1.), (80., 0.)];
const LAMP_BRIGHT: Table = &[(70., 0.), (100., 1.)];

// Indoor temperature, 0-40 °C
const INDOOR_VERY_COLD: Table = &[(0., 1.), (10., 1.), (12., 0.)];
const INDOOR_COLD: Table = &[(10., 0.), (12., 1.), (15., 1.), (17., 0.)];
const INDOOR_COMFORTABLE: Table = &[(15., 0.), (17., 1.), (23., 1.), (25., 0.)];
const INDOOR_WARM: Table = &[(22., 0.), (25., 1.), (28., 0.)];
const INDOOR_HOT: Table = &[(26., 0.), (29., 1.), (32., 0.)];
const INDOOR_VERY_HOT: Table = &[(30., 0.), (35., 1.), (40., 1.)];

// Water heater temperature, 20-80 °C
const WATER_VERY_COLD: Table = &[(20., 1.), (35., 0.)];
const WATER_COLD: Table = &[(30., 0.), (40., 1.), (50., 0.)];
const WATER_COMFORTABLE: Table = &[(45., 0.), (50., 1.), (60., 1.), (65., 0.)];
const WATER_HOT: Table = &[(60., 0.), (65., 1.), (70., 1.), (75., 0.)];
const WATER_VERY_HOT: Table = &[(70., 0.), (80., 1.)];

// Humidity, 0-100 %
const HUMIDITY_DRY: Table = &[(0., 1.), (20., 1.), (30., 0.)];
const HUMIDITY_COMFORTABLE: Table = &[(20., 0.), (30., 1.), (60., 1.), (70., 0.)];
const HUMIDITY_WET: Table = &[(60., 0.), (70., 1.), (100., 1.)];

/// Handles to the five variables of the home knowledge base.
#[derive(Clone, Copy, Debug)]
pub struct HomeVariables {
    pub outdoor_brightness: Variable<OutdoorBrightness>,
    pub lamp_brightness: Variable<LampBrightness>,
    pub indoor_temperature: Variable<IndoorTemperature>,
    pub water_heater_temperature: Variable<WaterHeaterTemperature>,
    pub humidity: Variable<Humidity>,
}

impl HomeVariables {
    pub fn key(&self, sensor: Sensor) -> VariableKey {
        match sensor {
            Sensor::OutdoorBrightness => self.outdoor_brightness.key(),
            Sensor::LampBrightness => self.lamp_brightness.key(),
            Sensor::IndoorTemperature => self.indoor_temperature.key(),
            Sensor::WaterHeaterTemperature => self.water_heater_temperature.key(),
            Sensor::Humidity => self.humidity.key(),
        }
    }
}

pub(crate) fn variables() -> FuzzyResult<(Variables<HomeTerm>, HomeVariables)> {
    let mut vars = Variables::new();

    let outdoor_brightness = vars.add(
        Sensor::OutdoorBrightness.label(),
        Sensor::OutdoorBrightness.range(),
        Terms::from_iter([
            (OutdoorBrightness::Dark, OUTDOOR_DARK),
            (OutdoorBrightness::Dim, OUTDOOR_DIM),
            (OutdoorBrightness::Average, OUTDOOR_AVERAGE),
            (OutdoorBrightness::Bright, OUTDOOR_BRIGHT),
        ]),
    )?;
    let lamp_brightness = vars.add(
        Sensor::LampBrightness.label(),
        Sensor::LampBrightness.range(),
        Terms::from_iter([
            (LampBrightness::Off, LAMP_OFF),
            (LampBrightness::Dark, LAMP_DARK),
            (LampBrightness::Dim, LAMP_DIM),
            (LampBrightness::Average, LAMP_AVERAGE),
            (LampBrightness::Bright, LAMP_BRIGHT),
        ]),
    )?;
    let indoor_temperature = vars.add(
        Sensor::IndoorTemperature.label(),
        Sensor::IndoorTemperature.range(),
        Terms::from_iter([
            (IndoorTemperature::VeryCold, INDOOR_VERY_COLD),
            (IndoorTemperature::Cold, INDOOR_COLD),
            (IndoorTemperature::Comfortable, INDOOR_COMFORTABLE),
            (IndoorTemperature::Warm, INDOOR_WARM),
            (IndoorTemperature::Hot, INDOOR_HOT),
            (IndoorTemperature::VeryHot, INDOOR_VERY_HOT),
        ]),
    )?;
    let water_heater_temperature = vars.add(
        Sensor::WaterHeaterTemperature.label(),
        Sensor::WaterHeaterTemperature.range(),
        Terms::from_iter([
            (WaterHeaterTemperature::VeryCold, WATER_VERY_COLD),
            (WaterHeaterTemperature::Cold, WATER_COLD),
            (WaterHeaterTemperature::Comfortable, WATER_COMFORTABLE),
            (WaterHeaterTemperature::Hot, WATER_HOT),
            (WaterHeaterTemperature::VeryHot, WATER_VERY_HOT),
        ]),
    )?;
    let humidity = vars.add(
        Sensor::Humidity.label(),
        Sensor::Humidity.range(),
        Terms::from_iter([
            (Humidity::Dry, HUMIDITY_DRY),
            (Humidity::Comfortable, HUMIDITY_COMFORTABLE),
            (Humidity::Wet, HUMIDITY_WET),
        ]),
    )?;

    Ok((
        vars,
        HomeVariables {
            outdoor_brightness,
            lamp_brightness,
            indoor_temperature,
            water_heater_temperature,
            humidity,
        },
    ))
}

pub(crate) fn rules(vars: &HomeVariables) -> Rules<HomeTerm> {
    let HomeVariables {
        outdoor_brightness: outdoor,
        lamp_brightness: lamp,
        indoor_temperature: indoor,
        water_heater_temperature: water,
        humidity,
    } = *vars;

    let lamp_low = || -> Expr<HomeTerm> {
        lamp.is(LampBrightness::Off)
            .or2(lamp.is(LampBrightness::Dark), lamp.is(LampBrightness::Dim))
    };
    let indoor_cold = || -> Expr<HomeTerm> {
        indoor
            .is(IndoorTemperature::VeryCold)
            .or(indoor.is(IndoorTemperature::Cold))
    };
    let indoor_hot = || -> Expr<HomeTerm> {
        indoor
            .is(IndoorTemperature::VeryHot)
            .or(indoor.is(IndoorTemperature::Hot))
    };

    let mut rules = Rules::with_capacity(15);

    // Lamps
    rules.add(outdoor.is(OutdoorBrightness::Dark).and(lamp_low()), lamp.is(LampBrightness::Bright));
    rules.add(outdoor.is(OutdoorBrightness::Dim).and(lamp_low()), lamp.is(LampBrightness::Average));
    rules.add(
        outdoor.is(OutdoorBrightness::Bright).and(!lamp.is(LampBrightness::Off)),
        lamp.is(LampBrightness::Off),
    );
    rules.add(
        outdoor.is(OutdoorBrightness::Average).and(!lamp.is(LampBrightness::Dim)),
        lamp.is(LampBrightness::Dim),
    );

    // Air heater and AC
    rules.add(
        indoor_cold().and(!humidity.is(Humidity::Wet)),
        indoor.is(IndoorTemperature::Comfortable),
    );
    rules.add(indoor_cold().and(humidity.is(Humidity::Wet)), indoor.is(IndoorTemperature::Warm));
    rules.add(indoor_hot().and(humidity.is(Humidity::Dry)), indoor.is(IndoorTemperature::Comfortable));
    rules.add(indoor_hot().and(!humidity.is(Humidity::Dry)), indoor.is(IndoorTemperature::Warm));

    // Humidifier and dehumidifier
    rules.add(humidity.is(Humidity::Dry), humidity.is(Humidity::Comfortable));
    rules.add(humidity.is(Humidity::Wet), humidity.is(Humidity::Comfortable));

    // Water heater
    rules.add(
        (!water.is(WaterHeaterTemperature::Hot)).and2(indoor_cold(), !humidity.is(Humidity::Wet)),
        water.is(WaterHeaterTemperature::Hot),
    );
    rules.add(
        (!water.is(WaterHeaterTemperature::Hot)).and2(indoor_cold(), humidity.is(Humidity::Wet)),
        water.is(WaterHeaterTemperature::Comfortable),
    );
    rules.add(
        (!water.is(WaterHeaterTemperature::Comfortable)).and(
            indoor
                .is(IndoorTemperature::Comfortable)
                .or(indoor.is(IndoorTemperature::Warm)),
        ),
        water.is(WaterHeaterTemperature::Comfortable),
    );
    rules.add(
        (!water.is(WaterHeaterTemperature::Cold)).and2(indoor_hot(), !humidity.is(Humidity::Dry)),
        water.is(WaterHeaterTemperature::Cold),
    );
    rules.add(
        (!water.is(WaterHeaterTemperature::Cold)).and2(indoor_hot(), humidity.is(Humidity::Dry)),
        water.is(WaterHeaterTemperature::Comfortable),
    );

    rules
}
