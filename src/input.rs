use crate::core::systems::schematic::Schematic;
use serde::Deserialize;
use std::io::{BufReader, Read};

pub fn ingest_input(json: impl Read) -> Result<Input, anyhow::Error> {
    let reader = BufReader::new(json);

    let input: Input = serde_json::from_reader(reader)?;

    Ok(input)
}

/// Construction parameters for a sizing engine.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Input {
    #[serde(alias = "incomingT_F")]
    pub incoming_t_f: f64,
    #[serde(alias = "supplyT_F")]
    pub supply_t_f: f64,
    #[serde(alias = "storageT_F")]
    pub storage_t_f: f64,
    pub magnitude_stat: OneOrMany<f64>,
    pub building_type: OneOrMany<String>,
    pub loadshape: Option<Vec<f64>>,
    #[serde(alias = "avgLoadshape")]
    pub avg_loadshape: Option<Vec<f64>>,
    #[serde(default = "default_percent_useable", alias = "percentUseable")]
    pub percent_useable: f64,
    #[serde(default = "default_aqua_fract", alias = "aquaFract")]
    pub aqua_fract: f64,
    #[serde(default = "default_defrost_factor", alias = "defrostFactor")]
    pub defrost_factor: f64,
    #[serde(default = "default_comp_runtime_hr", alias = "compRuntime_hr")]
    pub comp_runtime_hr: f64,
    #[serde(default)]
    pub schematic: Schematic,
    #[serde(alias = "returnT_F")]
    pub return_t_f: Option<f64>,
    pub flow_rate: Option<f64>,
    #[serde(alias = "nApt")]
    pub n_apt: Option<f64>,
    #[serde(alias = "Wapt")]
    pub watts_per_apt: Option<f64>,
    pub gpdpp: Option<Gpdpp>,
    #[serde(alias = "nBR")]
    pub n_br: Option<Vec<f64>>,
    #[serde(default = "default_safety_tm", alias = "safetyTM")]
    pub safety_tm: f64,
    #[serde(alias = "setpointTM_F")]
    pub setpoint_tm_f: Option<f64>,
    #[serde(alias = "TMonTemp_F")]
    pub tm_on_temp_f: Option<f64>,
    #[serde(default = "default_off_time_hr", alias = "offTime_hr")]
    pub off_time_hr: f64,
    #[serde(default, alias = "doLoadShift")]
    pub do_load_shift: bool,
    #[serde(alias = "loadShiftSchedule")]
    pub schedule: Option<Vec<f64>>,
    #[serde(
        default = "default_load_shift_percent",
        alias = "cdf_shift",
        alias = "loadShiftPercent"
    )]
    pub load_shift_percent: f64,
}

fn default_percent_useable() -> f64 {
    0.8
}

fn default_aqua_fract() -> f64 {
    0.4
}

fn default_defrost_factor() -> f64 {
    1.
}

fn default_comp_runtime_hr() -> f64 {
    16.
}

fn default_safety_tm() -> f64 {
    1.75
}

fn default_off_time_hr() -> f64 {
    1. / 3.
}

fn default_load_shift_percent() -> f64 {
    1.
}

/// A value given either on its own or as a list.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

/// Gallons per day per person, or the name of a lookup that derives it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Gpdpp {
    GallonsPerDay(f64),
    Lookup(String),
}

pub const CALIFORNIA_GPDPP_LOOKUP: &str = "ca";
