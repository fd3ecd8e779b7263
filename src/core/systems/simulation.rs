use crate::core::units::{round_each_by_precision, MINUTES_PER_HOUR};
use crate::errors::SimulationError;
use serde::{Deserialize, Serialize};

pub const SIMULATION_DAYS: usize = 3;
const RESULT_PRECISION: i32 = 3;

/// State of the primary tank at the end of one minute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryStep {
    pub heating: bool,
    /// gallons of hot water above the aquastat, at storage temperature
    pub volume: f64,
    /// gallons generated in the minute, at storage temperature
    pub did_run: f64,
}

/// Advance the primary tank by one minute.
///
/// Arguments:
/// * `heating` - whether the primary heat pump was running at the start of the minute
/// * `v0` - full useable volume, in gallons
/// * `v_trig` - volume at which the aquastat turns the heat pump on, in gallons
/// * `v_curr` - volume at the start of the minute, in gallons
/// * `hw_out` - hot water drawn in the minute, in gallons at storage temperature
/// * `hw_in` - hot water the heat pump generates in a full minute, in gallons at storage
///             temperature
pub fn run_one_primary_step(
    heating: bool,
    v0: f64,
    v_trig: f64,
    v_curr: f64,
    hw_out: f64,
    hw_in: f64,
) -> Result<PrimaryStep, SimulationError> {
    if !(0. ..=v0).contains(&v_curr) {
        return Err(SimulationError::VolumeOutOfRange { volume: v_curr, v0 });
    }
    let mut heating = heating;
    let mut did_run = 0.;

    let mut v_new = if heating {
        did_run = hw_in;
        v_curr + hw_in - hw_out
    } else {
        let mut v_new = v_curr - hw_out;
        if v_new < v_trig {
            // part of the minute spent below the trigger before the heat pump starts
            let t_missed = if hw_out > 0. {
                ((v_trig - v_new) / hw_out).clamp(0., 1.)
            } else {
                1.
            };
            v_new += hw_in * t_missed;
            did_run = hw_in * t_missed;
            heating = true;
        }
        v_new
    };

    if v_new > v0 {
        let t_over = (v_new - v0) / (hw_in - hw_out);
        v_new = v0 - hw_out * t_over;
        did_run = hw_in * (1. - t_over);
        heating = false;
    }

    if v_new < 0. {
        return Err(SimulationError::PrimaryOutOfVolume(v_new));
    }

    Ok(PrimaryStep {
        heating,
        volume: v_new,
        did_run,
    })
}

/// Values that replace the sized ones for a single simulation run.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SimulationOverrides {
    /// starting primary volume, in gallons
    pub init_pv: Option<f64>,
    /// starting swing tank temperature, in degrees F
    pub init_swing_t_f: Option<f64>,
    pub p_cap_kbtuhr: Option<f64>,
    pub p_vol_g: Option<f64>,
}

/// Temperature maintenance series from a coupled swing tank simulation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwingSeries {
    pub swing_t_f: Vec<f64>,
    pub swing_run: Vec<f64>,
    /// draw on the primary tank through the swing tank, in gallons at storage temperature
    pub hw_out_swing: Vec<f64>,
}

/// Minute by minute results of a three day simulation, rounded to three decimal places.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResults {
    pub pv: Vec<f64>,
    pub g_hw: Vec<f64>,
    pub d_hw: Vec<f64>,
    pub primary_run: Vec<f64>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub swing: Option<SwingSeries>,
}

impl SimulationResults {
    pub(crate) fn new(
        pv: &[f64],
        g_hw: &[f64],
        d_hw: &[f64],
        primary_run: &[f64],
        swing: Option<SwingSeries>,
    ) -> Self {
        Self {
            pv: round_each_by_precision(pv, RESULT_PRECISION),
            g_hw: round_each_by_precision(g_hw, RESULT_PRECISION),
            d_hw: round_each_by_precision(d_hw, RESULT_PRECISION),
            primary_run: round_each_by_precision(primary_run, RESULT_PRECISION),
            swing: swing.map(|swing| SwingSeries {
                swing_t_f: round_each_by_precision(&swing.swing_t_f, RESULT_PRECISION),
                swing_run: round_each_by_precision(&swing.swing_run, RESULT_PRECISION),
                hw_out_swing: round_each_by_precision(&swing.hw_out_swing, RESULT_PRECISION),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.pv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pv.is_empty()
    }

    /// The series in positional order: pV, G_hw, D_hw and primary run, followed by swing
    /// temperature, swing run and swing draw when there is a swing tank.
    pub fn into_series(self) -> Vec<Vec<f64>> {
        let mut series = vec![self.pv, self.g_hw, self.d_hw, self.primary_run];
        if let Some(swing) = self.swing {
            series.extend([swing.swing_t_f, swing.swing_run, swing.hw_out_swing]);
        }
        series
    }

    /// Sum a minute series into hourly totals. A trailing part hour is summed on its own.
    pub fn hourly(series: &[f64]) -> Vec<f64> {
        series
            .chunks(MINUTES_PER_HOUR)
            .map(|hour| hour.iter().sum())
            .collect()
    }
}
