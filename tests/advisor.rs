use approx::assert_abs_diff_eq;

use fuzzy_home_advisor::home::{
    Advice, CrispInput, Decision, HomeAdvisor, HomeTerm, Humidity, IndoorTemperature, LampBrightness, Sensor,
};
use fuzzy_home_advisor::{FuzzyError, MamdaniInference, VariableKey};

fn snapshot(
    outdoor_brightness: f64,
    lamp_brightness: f64,
    indoor_temperature: f64,
    water_heater_temperature: f64,
    humidity: f64,
) -> CrispInput {
    CrispInput {
        outdoor_brightness,
        lamp_brightness,
        indoor_temperature,
        water_heater_temperature,
        humidity,
    }
}

#[test]
fn knowledge_base_is_valid() {
    let advisor = HomeAdvisor::new().unwrap();
    let handles = advisor.handles();
    let count = |key: VariableKey| {
        advisor
            .rules()
            .iter()
            .filter_map(|rule| rule.consequent())
            .filter(|(var_key, _)| *var_key == key)
            .count()
    };

    assert_eq!(advisor.variables().len(), 5);
    assert_eq!(advisor.rules().len(), 15);
    assert_eq!(count(handles.lamp_brightness.key()), 4);
    assert_eq!(count(handles.indoor_temperature.key()), 4);
    assert_eq!(count(handles.humidity.key()), 2);
    assert_eq!(count(handles.water_heater_temperature.key()), 5);
    assert_eq!(count(handles.outdoor_brightness.key()), 0);
    assert_eq!(advisor.rules().validate(advisor.variables()), Ok(()));
}

#[test]
fn dark_evening_turns_the_lamps_up() {
    let advisor = HomeAdvisor::new().unwrap();
    let input = snapshot(5., 0., 20., 50., 50.);
    let recommendations = advisor.infer(&input).unwrap();

    // Only rule 1 holds: dark (7/12) and turned off (1)
    assert_eq!(recommendations.firings().len(), 1);
    assert_eq!(recommendations.firings()[0].rule, 1);
    assert_eq!(recommendations.firings()[0].term, HomeTerm::from(LampBrightness::Bright));
    assert_abs_diff_eq!(recommendations.firings()[0].strength, 7. / 12., epsilon = 1e-12);

    let lamp = recommendations.get(Decision::LampBrightness).unwrap().unwrap();

    assert!(lamp > 89.9 && lamp < 90.1, "lamp target {lamp}");
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations.get(Decision::IndoorTemperature), Ok(None));
    assert_eq!(recommendations.get(Decision::Humidity), Ok(None));
    assert_eq!(recommendations.get(Decision::WaterHeaterTemperature), Ok(None));

    let advice = recommendations.advise(&input);

    assert_eq!(advice.len(), 1);
    assert_eq!(
        advice[0],
        Advice::Raise {
            decision: Decision::LampBrightness,
            target: lamp
        }
    );
    assert_eq!(advice[0].to_string(), "Lamp brightness should be increased up to 90%.");
}

#[test]
fn cold_dry_house_heats_to_comfortable() {
    let advisor = HomeAdvisor::new().unwrap();
    let input = snapshot(50., 50., 5., 50., 10.);
    let recommendations = advisor.infer(&input).unwrap();
    let fired: Vec<usize> = recommendations.firings().iter().map(|f| f.rule).collect();

    assert_eq!(fired, vec![4, 5, 9, 11]);
    assert_eq!(recommendations.firings()[1].term, HomeTerm::from(IndoorTemperature::Comfortable));
    assert_eq!(recommendations.firings()[2].term, HomeTerm::from(Humidity::Comfortable));

    let target = |decision| recommendations.get(decision).unwrap().unwrap();

    assert_abs_diff_eq!(target(Decision::LampBrightness), 30., epsilon = 1e-6);
    assert_abs_diff_eq!(target(Decision::IndoorTemperature), 20., epsilon = 1e-6);
    assert_abs_diff_eq!(target(Decision::Humidity), 45., epsilon = 1e-6);
    assert_abs_diff_eq!(target(Decision::WaterHeaterTemperature), 67.5, epsilon = 1e-6);

    let messages: Vec<String> = recommendations
        .advise(&input)
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        messages,
        vec![
            "Lamp brightness should be decreased down to 30%.",
            "Indoor temperature should be heated up to 20.0°C, using the air heater.",
            "Humidity should be increased up to 45%, using the humidifier.",
            "Water heater temperature should be heated up to 67.5°C.",
        ]
    );
}

#[test]
fn no_rule_fires_in_bright_daylight_with_lamps_off() {
    let advisor = HomeAdvisor::new().unwrap();
    let input = snapshot(100., 0., 20., 50., 50.);
    let recommendations = advisor.infer(&input).unwrap();

    assert!(recommendations.is_empty());
    assert!(recommendations.firings().is_empty());
    assert!(recommendations.advise(&input).is_empty());
    assert!(advisor.fire(&input).unwrap().is_empty());
}

#[test]
fn humidity_rules_leave_lamp_consequents_alone() {
    let advisor = HomeAdvisor::new().unwrap();
    let handles = advisor.handles();
    let dry = advisor.fire(&snapshot(5., 0., 20., 50., 10.)).unwrap();
    let comfortable = advisor.fire(&snapshot(5., 0., 20., 50., 50.)).unwrap();

    assert!(!dry.get(handles.humidity).is_empty());
    assert!(comfortable.get(handles.humidity).is_empty());
    assert_eq!(dry.get(handles.lamp_brightness), comfortable.get(handles.lamp_brightness));
}

#[test]
fn finer_sampling_keeps_symmetric_targets() {
    let advisor = HomeAdvisor::with_inference(MamdaniInference::new(0.05).unwrap()).unwrap();
    let recommendations = advisor.infer(&snapshot(50., 50., 5., 50., 10.)).unwrap();

    assert_eq!(advisor.model().sample_step(), 0.05);
    assert_abs_diff_eq!(
        recommendations.get(Decision::LampBrightness).unwrap().unwrap(),
        30.,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        recommendations.get(Decision::WaterHeaterTemperature).unwrap().unwrap(),
        67.5,
        epsilon = 1e-6
    );
}

#[test]
fn hot_humid_house_cools_and_dries() {
    let advisor = HomeAdvisor::new().unwrap();
    // Very hot and wet: rule 8 (warm) and rule 10 (comfortable humidity), rule 14 for the tank
    let input = snapshot(50., 60., 36., 70., 80.);
    let recommendations = advisor.infer(&input).unwrap();
    let fired: Vec<usize> = recommendations.firings().iter().map(|f| f.rule).collect();

    assert_eq!(fired, vec![4, 8, 10, 14]);

    let advice = recommendations.advise(&input);
    let decisions: Vec<Decision> = advice.iter().map(Advice::decision).collect();

    assert_eq!(decisions, Decision::ALL.to_vec());
    assert!(matches!(
        advice[1],
        Advice::Lower {
            decision: Decision::IndoorTemperature,
            ..
        }
    ));
    assert!(advice[1].to_string().ends_with("using the AC."));
    assert!(advice[2].to_string().ends_with("using the dehumidifier."));
    assert!(matches!(
        advice[3],
        Advice::Lower {
            decision: Decision::WaterHeaterTemperature,
            ..
        }
    ));
}

#[test]
fn input_layer_range_checks() {
    let advisor = HomeAdvisor::new().unwrap();

    assert_eq!(advisor.validate(&snapshot(0., 100., 40., 20., 0.)), Ok(()));
    assert_eq!(
        advisor.validate(&snapshot(0., 0., 20., 10., 50.)),
        Err(FuzzyError::OutOfRange {
            quantity: Sensor::WaterHeaterTemperature.label().to_string(),
            value: 10.,
            min: 20.,
            max: 80.,
        })
    );
    assert_eq!(
        advisor.validate(&snapshot(0., 0., 20., 10., 50.)).unwrap_err().to_string(),
        "Water heater temperature = 10 is out of range [20, 80]"
    );
}
