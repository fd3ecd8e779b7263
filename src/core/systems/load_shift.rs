use crate::core::units::{HOURS_PER_DAY, LOAD_SHIFT_NORM_MEAN, LOAD_SHIFT_NORM_STD};
use crate::errors::SystemError;
use crate::statistics::standard_normal_inverse_cdf;
use tracing::warn;

const MIN_LOAD_SHIFT_PERCENT: f64 = 0.25;

/// An operator defined schedule of hours when the primary heat pump may run, and the share of
/// days the shifted storage should coast through.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadShift {
    schedule: Vec<f64>,
    load_shift_percent: f64,
    fract_total_vol: f64,
}

impl LoadShift {
    /// Arguments:
    /// * `schedule` - 24 hourly flags, 1 where the heat pump may run and 0 where it must be off
    /// * `load_shift_percent` - the share of days, between 0.25 and 1, on which the load shift
    ///                          should succeed
    pub fn new(schedule: Vec<f64>, load_shift_percent: f64) -> Result<Self, SystemError> {
        if schedule.len() != HOURS_PER_DAY {
            return Err(SystemError::ScheduleLength(schedule.len()));
        }
        if schedule.iter().any(|flag| *flag != 0. && *flag != 1.) {
            return Err(SystemError::ScheduleValues);
        }
        if schedule.iter().sum::<f64>() < 1. {
            return Err(SystemError::ScheduleAllOff);
        }
        if !(MIN_LOAD_SHIFT_PERCENT..=1.).contains(&load_shift_percent) {
            return Err(SystemError::LoadShiftPercent(load_shift_percent));
        }

        Ok(Self {
            fract_total_vol: fract_total_vol(load_shift_percent),
            schedule,
            load_shift_percent,
        })
    }

    pub fn schedule(&self) -> &[f64] {
        &self.schedule
    }

    pub fn load_shift_percent(&self) -> f64 {
        self.load_shift_percent
    }

    /// Scale applied to the daily magnitude when the load shift only needs to cover a
    /// percentile of days.
    pub fn fract_total_vol(&self) -> f64 {
        self.fract_total_vol
    }

    pub fn hours_on(&self) -> f64 {
        self.schedule.iter().sum()
    }

    /// The most hours the heat pump can run in a day under this schedule.
    pub fn max_day_run_hr(&self, comp_runtime_hr: f64) -> f64 {
        comp_runtime_hr.min(self.hours_on())
    }
}

fn fract_total_vol(load_shift_percent: f64) -> f64 {
    if load_shift_percent >= 1. {
        return 1.;
    }

    let fract = LOAD_SHIFT_NORM_MEAN
        + LOAD_SHIFT_NORM_STD * standard_normal_inverse_cdf(load_shift_percent);
    if fract > 1. {
        warn!("Load shift volume fraction {fract:.4} is above 1 and has been limited to 1");
        1.
    } else {
        fract
    }
}
