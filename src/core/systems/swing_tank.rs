use crate::core::building::Building;
use crate::core::systems::sizing::{first_day_peaks, net_supply_fraction, worst_cumulative_deficit};
use crate::core::units::{
    hr_to_min_list, mix_volume, tile, BTUHR_PER_KBTUHR, HOURS_PER_DAY, MINUTES_PER_HOUR, RHO_CP,
};
use crate::errors::{SimulationError, SizingError, SystemError};
use tracing::trace;

pub const SWING_TANK_VOLUME_G: f64 = 300.;
pub const ELEMENT_DEADBAND_F: f64 = 8.;
// sizing simulations start the swing tank just above supply so the element is off
const SIZING_START_ABOVE_SUPPLY_F: f64 = 0.1;

/// State of the swing tank at the end of one minute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwingStep {
    pub heating: bool,
    pub temperature_f: f64,
    /// fraction of the minute the resistance element ran
    pub did_run: f64,
}

/// A fixed volume tank in series after the primary storage, holding the recirculation loop at
/// supply temperature with a resistance element.
#[derive(Clone, Debug, PartialEq)]
pub struct SwingTank {
    safety_tm: f64,
    tm_vol_g: f64,
    tm_cap_kbtuhr: f64,
}

impl SwingTank {
    /// Arguments:
    /// * `building` - the building whose recirculation losses the tank makes up
    /// * `safety_tm` - factor, greater than 1, applied to the recirculation losses to size
    ///                 the resistance element
    pub fn new(building: &Building, safety_tm: f64) -> Result<Self, SystemError> {
        if !(safety_tm > 1.) {
            return Err(SystemError::SafetyFactor(safety_tm));
        }

        Ok(Self {
            safety_tm,
            tm_vol_g: SWING_TANK_VOLUME_G,
            tm_cap_kbtuhr: safety_tm * building.recirc_loss() / BTUHR_PER_KBTUHR,
        })
    }

    pub fn safety_tm(&self) -> f64 {
        self.safety_tm
    }

    pub fn tm_vol_g(&self) -> f64 {
        self.tm_vol_g
    }

    pub fn tm_cap_kbtuhr(&self) -> f64 {
        self.tm_cap_kbtuhr
    }

    /// Temperature drop in one minute from recirculation losses.
    fn loss_per_minute_f(&self, building: &Building) -> f64 {
        building.recirc_loss() / MINUTES_PER_HOUR as f64 / RHO_CP / self.tm_vol_g
    }

    /// Temperature rise in one minute with the element on.
    fn element_per_minute_f(&self) -> f64 {
        self.tm_cap_kbtuhr * BTUHR_PER_KBTUHR / MINUTES_PER_HOUR as f64 / RHO_CP / self.tm_vol_g
    }

    /// Advance the swing tank by one minute.
    ///
    /// Arguments:
    /// * `building` - supplies the loop losses and the supply temperature the tank holds
    /// * `storage_t_f` - temperature of water entering from the primary tank
    /// * `heating` - whether the element was on at the start of the minute
    /// * `t_curr_f` - tank temperature at the start of the minute
    /// * `hw_out` - gallons entering from the primary tank in the minute
    pub fn run_one_swing_step(
        &self,
        building: &Building,
        storage_t_f: f64,
        heating: bool,
        t_curr_f: f64,
        hw_out: f64,
    ) -> Result<SwingStep, SimulationError> {
        let supply_t_f = building.supply_t_f();
        let element_f = self.element_per_minute_f();

        let mut heating = heating;
        let mut did_run = 0.;
        let mut t_new_f = t_curr_f - self.loss_per_minute_f(building);
        if hw_out > 0. {
            t_new_f += hw_out * (storage_t_f - t_curr_f) / self.tm_vol_g;
        }

        if heating {
            t_new_f += element_f;
            let cut_out_f = supply_t_f + ELEMENT_DEADBAND_F;
            if t_new_f > cut_out_f {
                let t_over = (t_new_f - cut_out_f) / element_f;
                t_new_f -= element_f * t_over;
                heating = false;
                did_run = 1. - t_over;
            } else {
                did_run = 1.;
            }
        } else if t_new_f <= supply_t_f {
            let t_missed = (supply_t_f - t_new_f) / element_f;
            if t_missed <= 1. {
                t_new_f = supply_t_f;
                did_run = t_missed;
            } else {
                t_new_f += element_f;
                did_run = 1.;
            }
            heating = true;
        }

        if t_new_f < supply_t_f {
            return Err(SimulationError::SwingBelowSupply(t_new_f));
        }

        Ok(SwingStep {
            heating,
            temperature_f: t_new_f,
            did_run,
        })
    }

    /// Draw on the primary tank each minute to serve a supply temperature demand through the
    /// swing tank. No draw is taken in the first minute.
    fn draws_through_swing(
        &self,
        building: &Building,
        storage_t_f: f64,
        d_hw: &[f64],
    ) -> Result<Vec<f64>, SimulationError> {
        let mut hw_out = vec![0.; d_hw.len()];
        let mut heating = false;
        let mut swing_t_f = building.supply_t_f() + SIZING_START_ABOVE_SUPPLY_F;

        for minute in 1..d_hw.len() {
            hw_out[minute] = mix_volume(
                d_hw[minute],
                swing_t_f,
                building.incoming_t_f(),
                building.supply_t_f(),
            );
            let step =
                self.run_one_swing_step(building, storage_t_f, heating, swing_t_f, hw_out[minute])?;
            heating = step.heating;
            swing_t_f = step.temperature_f;
        }

        Ok(hw_out)
    }

    /// Running volume of the primary tank, with demand drawn through the swing tank, and the
    /// fraction of the daily magnitude the swing tank takes from the primary.
    ///
    /// Each peak is simulated for a day at minute resolution; the peak with the deepest
    /// cumulative deficit sets both values.
    pub fn calc_running_vol(
        &self,
        building: &Building,
        storage_t_f: f64,
        heat_hrs: f64,
        on_off: &[f64],
        loadshape: &[f64],
    ) -> Result<(f64, f64), SizingError> {
        let magnitude = building.magnitude();
        let peaks = first_day_peaks(&net_supply_fraction(heat_hrs, on_off, loadshape))?;
        let loadshape = tile(loadshape, 2);
        let on_off = tile(on_off, 2);

        let mut sized: Option<(f64, f64)> = None;
        for peak in peaks {
            let day = peak..peak + HOURS_PER_DAY;
            let d_hw: Vec<f64> = hr_to_min_list(&loadshape[day.clone()])
                .iter()
                .map(|fraction| fraction * magnitude / MINUTES_PER_HOUR as f64)
                .collect();

            let hw_out = self.draws_through_swing(building, storage_t_f, &d_hw)?;
            let eff_mix_fract = hw_out.iter().sum::<f64>() / magnitude;

            let generation = hr_to_min_list(&on_off[day]).into_iter().map(|on| {
                on / heat_hrs * magnitude * eff_mix_fract / MINUTES_PER_HOUR as f64
            });
            let deficit = worst_cumulative_deficit(
                generation
                    .zip(&hw_out)
                    .map(|(generated, drawn)| generated - drawn),
            );
            trace!("Swing tank peak at hour {peak} needs {deficit:.2} gallons running volume");

            if sized.map_or(true, |(running_vol, _)| deficit > running_vol) {
                sized = Some((deficit, eff_mix_fract));
            }
        }

        sized.ok_or(SizingError::Oversized)
    }
}
