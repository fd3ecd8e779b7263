use approx::assert_relative_eq;
use hpwh_sizer::input::{ingest_input, Input};
use hpwh_sizer::{run_sizing, EcosizerError, Schematic, SimulationOverrides, SizingEngine};
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{json, Value};
use tracing_subscriber::FmtSubscriber;

const SCHEDULE: [u8; 24] = [
    1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1,
];

#[fixture]
fn base() -> Value {
    json!({
        "incomingT_F": 50,
        "supplyT_F": 120,
        "storageT_F": 150,
        "percentUseable": 0.8,
        "aquaFract": 0.4,
        "defrostFactor": 1,
        "compRuntime_hr": 16,
        "magnitude_stat": 100,
        "building_type": "multi_family",
        "gpdpp": 25,
        "nApt": 100,
        "Wapt": 100
    })
}

#[fixture]
fn load_shifted_parallel(mut base: Value) -> Value {
    merge(
        &mut base,
        json!({
            "schematic": "paralleltank",
            "setpointTM_F": 130,
            "TMonTemp_F": 120,
            "offTime_hr": 1. / 3.,
            "safetyTM": 1.75,
            "doLoadShift": true,
            "schedule": SCHEDULE,
            "loadShiftPercent": 0.8
        }),
    );
    base
}

#[fixture]
fn load_shifted_swing(mut load_shifted_parallel: Value) -> Value {
    merge(&mut load_shifted_parallel, json!({"schematic": "swingtank"}));
    load_shifted_parallel
}

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    // another test may already have set it
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn merge(target: &mut Value, fields: Value) {
    if let (Some(target), Value::Object(fields)) = (target.as_object_mut(), fields) {
        target.extend(fields);
    }
}

fn input(value: &Value) -> Input {
    ingest_input(value.to_string().as_bytes()).unwrap()
}

fn engine(value: &Value) -> SizingEngine {
    SizingEngine::from_input(&input(value)).unwrap()
}

fn assert_all_relative_eq(actual: &[f64], expected: &[f64], max_relative: f64) {
    assert_eq!(actual.len(), expected.len());
    for (actual, expected) in actual.iter().zip(expected) {
        assert_relative_eq!(actual, expected, max_relative = max_relative);
    }
}

#[rstest]
fn should_size_primary_system(base: Value) {
    let results = engine(&base).sizing_results().to_vec();
    assert_all_relative_eq(&results, &[182.81666666666666, 91.3667890625], 1e-9);
}

#[rstest]
fn should_size_load_shifted_parallel_loop_tank(load_shifted_parallel: Value) {
    let engine = engine(&load_shifted_parallel);
    assert_eq!(engine.system().schematic(), Schematic::ParallelTank);
    assert_all_relative_eq(
        &engine.sizing_results().to_vec(),
        &[
            1192.223457804805,
            112.45143269230772,
            136.15561156644063,
            59.712485,
        ],
        1e-6,
    );
}

#[rstest]
fn should_size_load_shifted_swing_tank(load_shifted_swing: Value) {
    let engine = engine(&load_shifted_swing);
    assert_eq!(engine.system().schematic(), Schematic::SwingTank);
    assert_all_relative_eq(
        &engine.sizing_results().to_vec(),
        &[1611.2388447912992, 152.59310156614637, 300., 59.712485],
        1e-4,
    );
    assert_relative_eq!(
        engine.system().eff_mix_fract(),
        0.9498782588975339,
        max_relative = 1e-4
    );
}

#[rstest]
fn should_double_sizing_with_double_magnitude(mut base: Value) {
    let single = engine(&base).sizing_results();
    merge(&mut base, json!({"magnitude_stat": 200}));
    let doubled = engine(&base).sizing_results();

    assert_relative_eq!(
        doubled.p_vol_g_at_storage_t,
        2. * single.p_vol_g_at_storage_t,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        doubled.p_cap_kbtuhr,
        2. * single.p_cap_kbtuhr,
        max_relative = 1e-9
    );
}

#[rstest]
fn should_trace_load_shifted_curve(load_shifted_parallel: Value) {
    let curve = engine(&load_shifted_parallel).primary_curve().unwrap();

    assert_eq!(curve.recommended_index, 44);
    assert_eq!(curve.heat_hours[curve.recommended_index], 13.);
    assert_relative_eq!(curve.volumes_g[0], 2516.4534955751897, max_relative = 1e-6);
    assert_relative_eq!(
        curve.volumes_g[44],
        1192.223457804805,
        max_relative = 1e-6
    );
    // continues on the quarter hour grid down to the design peak hour, past the shifted runtime
    assert_eq!(curve.heat_hours.len(), 51);
    assert_eq!(curve.heat_hours.last(), Some(&11.5));
    assert_relative_eq!(
        curve.volumes_g[50],
        1146.884434999413,
        max_relative = 1e-6
    );
    assert_relative_eq!(
        curve.capacities_kbtuhr[50],
        127.11901086956523,
        max_relative = 1e-6
    );
    assert!(curve
        .heat_hours
        .iter()
        .all(|heat_hrs| (heat_hrs * 4.).fract() == 0.));
}

#[rstest]
fn should_simulate_load_shifted_primary(load_shifted_parallel: Value) {
    let results = engine(&load_shifted_parallel)
        .simulate(&SimulationOverrides::default())
        .unwrap();

    assert_eq!(results.len(), 4320);
    assert!(results.swing.is_none());
    assert_eq!(results.pv[0], 954.);
    assert!(results.pv.iter().all(|volume| (0. ..=954.).contains(volume)));
    assert_relative_eq!(
        results.pv.iter().cloned().fold(f64::MAX, f64::min),
        208.3,
        epsilon = 1e-2
    );
    // no generation in the shifted hours
    let hourly_generation: Vec<f64> = results
        .g_hw
        .chunks(60)
        .map(|hour| hour.iter().sum())
        .collect();
    for (hour, generated) in hourly_generation.iter().enumerate() {
        assert_eq!(*generated == 0., SCHEDULE[hour % 24] == 0, "hour {hour}");
    }
}

#[rstest]
fn should_simulate_coupled_swing_tank(load_shifted_swing: Value) {
    init_logging();
    let results = engine(&load_shifted_swing)
        .simulate(&SimulationOverrides::default())
        .unwrap();

    assert_eq!(results.pv[0], 1289.);
    assert!(results.pv.iter().all(|volume| *volume >= 0.));
    let swing = results.swing.as_ref().unwrap();
    assert_eq!(swing.swing_t_f[0], 120.);
    assert!(swing.swing_t_f.iter().all(|t| (120. ..=128.).contains(t)));
    assert_eq!(swing.hw_out_swing.len(), 4320);
    assert_eq!(results.into_series().len(), 7);
}

#[rstest]
fn should_start_swing_simulation_from_given_temperature(load_shifted_swing: Value) {
    let overrides = SimulationOverrides {
        init_swing_t_f: Some(125.),
        init_pv: Some(1000.),
        ..Default::default()
    };
    let results = engine(&load_shifted_swing).simulate(&overrides).unwrap();

    assert_eq!(results.pv[0], 1000.);
    assert_eq!(results.swing.unwrap().swing_t_f[0], 125.);
}

#[rstest]
fn should_reject_swing_tank_safety_factor_of_one(mut load_shifted_swing: Value) {
    merge(&mut load_shifted_swing, json!({"safetyTM": 1.0}));
    let error = SizingEngine::from_input(&input(&load_shifted_swing)).unwrap_err();

    assert!(matches!(error, EcosizerError::InvalidSystem(_)));
    assert!(error
        .to_string()
        .contains("safety factor for the temperature maintenance system must be greater than 1"));
}

#[rstest]
fn should_reject_short_loadshape(mut base: Value) {
    merge(&mut base, json!({"loadshape": vec![1. / 23.; 23]}));
    let error = SizingEngine::from_input(&input(&base)).unwrap_err();
    assert!(error.to_string().contains("Loadshape must be of length 24"));
}

#[rstest]
fn should_reject_loadshape_not_summing_to_one(mut base: Value) {
    merge(&mut base, json!({"loadshape": (1..=24).collect::<Vec<u32>>()}));
    let error = SizingEngine::from_input(&input(&base)).unwrap_err();
    assert!(error
        .to_string()
        .contains("Sum of the loadshape does not equal 1"));
}

#[rstest]
fn should_report_code_for_low_aquastat_fraction(mut base: Value) {
    merge(&mut base, json!({"aquaFract": 0.21}));
    let error = SizingEngine::from_input(&input(&base)).unwrap_err();
    assert_eq!(error.code(), Some("01"));
}

#[rstest]
fn should_size_with_california_lookup(mut base: Value) {
    merge(&mut base, json!({"gpdpp": "ca", "nBR": [0, 10, 20, 10, 0, 0]}));
    let engine = engine(&base);

    assert_relative_eq!(
        engine.system().building().magnitude(),
        100. * 32.41912,
        max_relative = 1e-9
    );
}

#[rstest]
fn should_run_sizing_from_json(load_shifted_parallel: Value) {
    init_logging();
    let report = run_sizing(load_shifted_parallel.to_string().as_bytes()).unwrap();
    let report = serde_json::to_value(&report).unwrap();

    assert_eq!(report["schematic"], json!("paralleltank"));
    assert_eq!(report["curve"]["recommended_index"], json!(44));
    assert!(report["sizing"]["tm_vol_g"].is_number());
}

#[rstest]
fn should_fail_run_sizing_on_bad_json() {
    assert!(run_sizing("{\"building_type\": ".as_bytes()).is_err());
}
