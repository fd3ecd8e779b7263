use crate::core::building::Building;
use crate::core::systems::parallel_loop_tank::ParallelLoopTank;
use crate::core::systems::simulation::{
    run_one_primary_step, SimulationOverrides, SimulationResults, SwingSeries, SIMULATION_DAYS,
};
use crate::core::systems::sizing::{calc_running_vol, check_cycling_volume};
use crate::core::systems::swing_tank::SwingTank;
use crate::core::systems::system_config::SystemConfig;
use crate::core::units::{
    hr_to_min_list, mix_volume, BTUHR_PER_KBTUHR, HOURS_PER_DAY, MINUTES_PER_HOUR, RHO_CP,
};
use crate::compare_floats::max_of_slice;
use crate::errors::{EcosizerError, SimulationError, SizingError};
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};
use tracing::{debug, info, warn};

static ALWAYS_ON: [f64; HOURS_PER_DAY] = [1.; HOURS_PER_DAY];
const CURVE_STEP_HR: f64 = 0.25;
// keeps the shortest runtime on the curve just above the point where the system is oversized
const CURVE_LOWEST_MARGIN: f64 = 1.001;

/// The plant arrangements that can be sized.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumString,
    Eq,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Schematic {
    #[default]
    Primary,
    ParallelTank,
    SwingTank,
}

/// Equipment keeping the recirculation loop hot, if any.
#[derive(Clone, Debug, PartialEq)]
pub enum TemperatureMaintenance {
    None,
    ParallelLoop(ParallelLoopTank),
    Swing(SwingTank),
}

impl TemperatureMaintenance {
    pub fn schematic(&self) -> Schematic {
        match self {
            TemperatureMaintenance::None => Schematic::Primary,
            TemperatureMaintenance::ParallelLoop(_) => Schematic::ParallelTank,
            TemperatureMaintenance::Swing(_) => Schematic::SwingTank,
        }
    }

    fn volume_and_capacity(&self) -> Option<(f64, f64)> {
        match self {
            TemperatureMaintenance::None => None,
            TemperatureMaintenance::ParallelLoop(tank) => {
                Some((tank.tm_vol_g(), tank.tm_cap_kbtuhr()))
            }
            TemperatureMaintenance::Swing(tank) => Some((tank.tm_vol_g(), tank.tm_cap_kbtuhr())),
        }
    }
}

/// Primary storage and heating capacity for one daily runtime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SizedPoint {
    pub heat_hrs: f64,
    /// total primary volume, in gallons at storage temperature
    pub volume_g: f64,
    pub cap_kbtuhr: f64,
    /// fraction of the daily magnitude drawn from primary storage
    pub eff_mix_fract: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizingResults {
    pub p_vol_g_at_storage_t: f64,
    pub p_cap_kbtuhr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tm_vol_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tm_cap_kbtuhr: Option<f64>,
}

impl SizingResults {
    /// Primary volume and capacity, followed by the temperature maintenance volume and
    /// capacity for schematics that have them.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut results = vec![self.p_vol_g_at_storage_t, self.p_cap_kbtuhr];
        results.extend(self.tm_vol_g.iter().chain(&self.tm_cap_kbtuhr));
        results
    }
}

/// Feasible primary sizes from a 24 hour runtime down towards the shortest runtime that
/// still has a peak.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrimaryCurve {
    pub volumes_g: Vec<f64>,
    pub capacities_kbtuhr: Vec<f64>,
    pub heat_hours: Vec<f64>,
    /// position of the sized runtime in the curve
    pub recommended_index: usize,
}

/// A central heat pump water heating system sized for a building.
///
/// Sizing happens on construction; the sized values are never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct System {
    building: Building,
    config: SystemConfig,
    temperature_maintenance: TemperatureMaintenance,
    p_vol_g_at_storage_t: f64,
    p_cap_kbtuhr: f64,
    eff_mix_fract: f64,
}

impl System {
    /// Primary storage with no temperature maintenance equipment.
    pub fn primary(building: Building, config: SystemConfig) -> Result<Self, EcosizerError> {
        Self::sized(building, config, TemperatureMaintenance::None)
    }

    /// Primary storage with a parallel loop tank.
    ///
    /// Arguments:
    /// * `safety_tm` - factor, greater than 1, applied to the recirculation losses
    /// * `setpoint_tm_f` - temperature the loop tank is heated to
    /// * `tm_on_temp_f` - temperature at which the loop tank heat pump turns on
    /// * `off_time_hr` - hours the loop tank must carry the loop with its heat pump off
    pub fn parallel_loop_tank(
        building: Building,
        config: SystemConfig,
        safety_tm: f64,
        setpoint_tm_f: f64,
        tm_on_temp_f: f64,
        off_time_hr: f64,
    ) -> Result<Self, EcosizerError> {
        let tank = ParallelLoopTank::new(
            &building,
            safety_tm,
            setpoint_tm_f,
            tm_on_temp_f,
            off_time_hr,
        )?;
        Self::sized(
            building,
            config,
            TemperatureMaintenance::ParallelLoop(tank),
        )
    }

    /// Primary storage followed by a swing tank.
    pub fn swing_tank(
        building: Building,
        config: SystemConfig,
        safety_tm: f64,
    ) -> Result<Self, EcosizerError> {
        let tank = SwingTank::new(&building, safety_tm)?;
        Self::sized(building, config, TemperatureMaintenance::Swing(tank))
    }

    fn sized(
        building: Building,
        config: SystemConfig,
        temperature_maintenance: TemperatureMaintenance,
    ) -> Result<Self, EcosizerError> {
        let unsized_system = Self {
            building,
            config,
            temperature_maintenance,
            p_vol_g_at_storage_t: 0.,
            p_cap_kbtuhr: 0.,
            eff_mix_fract: 1.,
        };
        let point = unsized_system.size_at(unsized_system.config.max_day_run_hr())?;

        info!(
            "Sized {} system for {:.1} gallons a day: {:.2} gallons at {} F and {:.2} kBTU/hr running {} hours",
            unsized_system.schematic(),
            unsized_system.building.magnitude(),
            point.volume_g,
            unsized_system.config.storage_t_f(),
            point.cap_kbtuhr,
            point.heat_hrs
        );

        Ok(Self {
            p_vol_g_at_storage_t: point.volume_g,
            p_cap_kbtuhr: point.cap_kbtuhr,
            eff_mix_fract: point.eff_mix_fract,
            ..unsized_system
        })
    }

    pub fn schematic(&self) -> Schematic {
        self.temperature_maintenance.schematic()
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn temperature_maintenance(&self) -> &TemperatureMaintenance {
        &self.temperature_maintenance
    }

    pub fn p_vol_g_at_storage_t(&self) -> f64 {
        self.p_vol_g_at_storage_t
    }

    pub fn p_cap_kbtuhr(&self) -> f64 {
        self.p_cap_kbtuhr
    }

    pub fn eff_mix_fract(&self) -> f64 {
        self.eff_mix_fract
    }

    pub fn sizing_results(&self) -> SizingResults {
        let tm = self.temperature_maintenance.volume_and_capacity();
        SizingResults {
            p_vol_g_at_storage_t: self.p_vol_g_at_storage_t,
            p_cap_kbtuhr: self.p_cap_kbtuhr,
            tm_vol_g: tm.map(|(volume, _)| volume),
            tm_cap_kbtuhr: tm.map(|(_, capacity)| capacity),
        }
    }

    fn calc_running_vol(
        &self,
        heat_hrs: f64,
        on_off: &[f64],
        loadshape: &[f64],
    ) -> Result<(f64, f64), SizingError> {
        match &self.temperature_maintenance {
            TemperatureMaintenance::Swing(swing_tank) => swing_tank.calc_running_vol(
                &self.building,
                self.config.storage_t_f(),
                heat_hrs,
                on_off,
                loadshape,
            ),
            _ => calc_running_vol(self.building.magnitude(), heat_hrs, on_off, loadshape),
        }
    }

    /// Total primary volume, at storage temperature, for a running volume.
    fn total_vol_max(&self, running_vol: f64) -> f64 {
        let storage_vol = match self.temperature_maintenance {
            // the swing tank draws are already at storage temperature
            TemperatureMaintenance::Swing(_) => running_vol,
            _ => mix_volume(
                running_vol,
                self.config.storage_t_f(),
                self.building.incoming_t_f(),
                self.building.supply_t_f(),
            ),
        };
        storage_vol / (1. - self.config.aqua_fract())
    }

    /// Total primary volume at storage temperature, and the fraction of demand drawn from the
    /// primary, for the primary running `heat_hrs` hours a day.
    pub fn size_primary_tank_volume(&self, heat_hrs: f64) -> Result<(f64, f64), SizingError> {
        if !(heat_hrs > 0. && heat_hrs <= HOURS_PER_DAY as f64) {
            return Err(SizingError::HeatHours(heat_hrs));
        }

        let (mut running_vol, mut eff_mix_fract) =
            self.calc_running_vol(heat_hrs, &ALWAYS_ON, self.building.loadshape())?;

        if let Some(load_shift) = self.config.load_shift() {
            let (shift_vol, shift_eff) = self.calc_running_vol(
                heat_hrs,
                load_shift.schedule(),
                self.building.avg_loadshape(),
            )?;
            let shift_vol = shift_vol * load_shift.fract_total_vol();
            if shift_vol > running_vol {
                (running_vol, eff_mix_fract) = (shift_vol, shift_eff);
            }
        }

        let total_vol = self.total_vol_max(running_vol);
        check_cycling_volume(
            total_vol,
            self.building.magnitude() * eff_mix_fract / heat_hrs,
            self.config.aqua_fract(),
            self.config.percent_useable(),
        )?;

        Ok((total_vol, eff_mix_fract))
    }

    /// Primary heating capacity, in kBTU/hr, to generate a day's demand in `heat_hrs` hours.
    /// Only a swing tank draws less than the full magnitude from primary storage.
    pub fn primary_heat_hrs_to_kbtuhr(&self, heat_hrs: f64, eff_mix_fract: f64) -> f64 {
        let magnitude = self.building.magnitude();
        let heat_rate_btuhr = match self.temperature_maintenance {
            TemperatureMaintenance::Swing(_) => {
                magnitude * eff_mix_fract / heat_hrs
                    * RHO_CP
                    * (self.config.storage_t_f() - self.building.incoming_t_f())
            }
            _ => {
                magnitude / heat_hrs
                    * RHO_CP
                    * (self.building.supply_t_f() - self.building.incoming_t_f())
            }
        };
        heat_rate_btuhr / self.config.defrost_factor() / BTUHR_PER_KBTUHR
    }

    /// Primary volume and capacity for the primary running `heat_hrs` hours a day.
    pub fn size_at(&self, heat_hrs: f64) -> Result<SizedPoint, SizingError> {
        let (volume_g, eff_mix_fract) = self.size_primary_tank_volume(heat_hrs)?;
        Ok(SizedPoint {
            heat_hrs,
            volume_g,
            cap_kbtuhr: self.primary_heat_hrs_to_kbtuhr(heat_hrs, eff_mix_fract),
            eff_mix_fract,
        })
    }

    fn sizing_loadshape(&self) -> &[f64] {
        match self.config.load_shift() {
            Some(_) => self.building.avg_loadshape(),
            None => self.building.loadshape(),
        }
    }

    /// Runtimes down from 24 hours in quarter hours, continuing past the sized runtime until
    /// the heating rate would fall short of the design peak hour of demand.
    fn curve_heat_hours(&self) -> Vec<f64> {
        let max_day_run_hr = self.config.max_day_run_hr();
        let lowest_hr =
            CURVE_LOWEST_MARGIN / max_of_slice(self.building.loadshape()).unwrap_or(1.);

        let mut heat_hours = vec![];
        let mut heat_hrs = HOURS_PER_DAY as f64;
        while heat_hrs >= max_day_run_hr {
            heat_hours.push(heat_hrs);
            heat_hrs -= CURVE_STEP_HR;
        }
        while heat_hrs > lowest_hr {
            heat_hours.push(heat_hrs);
            heat_hrs -= CURVE_STEP_HR;
        }
        heat_hours
    }

    /// Sizes along the runtimes of the curve, stopping at the first runtime that cannot be
    /// sized.
    pub fn primary_curve(&self) -> Result<PrimaryCurve, SizingError> {
        let max_day_run_hr = self.config.max_day_run_hr();
        let recommended_index =
            ((HOURS_PER_DAY as f64 - max_day_run_hr) / CURVE_STEP_HR).round() as usize;

        let mut curve = PrimaryCurve {
            volumes_g: vec![],
            capacities_kbtuhr: vec![],
            heat_hours: vec![],
            recommended_index,
        };

        for heat_hrs in self.curve_heat_hours() {
            match self.size_at(heat_hrs) {
                Ok(point) => {
                    curve.volumes_g.push(point.volume_g);
                    curve.capacities_kbtuhr.push(point.cap_kbtuhr);
                    curve.heat_hours.push(heat_hrs);
                }
                Err(err) => {
                    debug!("Sizing curve stops at {heat_hrs} hours: {err}");
                    break;
                }
            }
        }

        if curve.heat_hours.len() <= recommended_index {
            return Err(SizingError::CurveMissesRecommendation(max_day_run_hr));
        }

        Ok(curve)
    }

    /// Simulate three days of the sized system at minute resolution.
    pub fn simulate(
        &self,
        overrides: &SimulationOverrides,
    ) -> Result<SimulationResults, SimulationError> {
        let building = &self.building;
        let incoming_t_f = building.incoming_t_f();
        let supply_t_f = building.supply_t_f();
        let storage_t_f = self.config.storage_t_f();

        let p_cap_kbtuhr = overrides.p_cap_kbtuhr.unwrap_or(self.p_cap_kbtuhr);
        let p_vol_g = overrides.p_vol_g.unwrap_or(self.p_vol_g_at_storage_t);
        if !(p_vol_g > 0.) {
            return Err(SimulationError::PrimaryVolume(p_vol_g));
        }

        let schedule = self
            .config
            .load_shift()
            .map_or(&ALWAYS_ON[..], |load_shift| load_shift.schedule());
        let loadshape = self.sizing_loadshape();

        // gallons per hour at supply temperature
        let generation_rate = BTUHR_PER_KBTUHR * p_cap_kbtuhr / RHO_CP
            / (supply_t_f - incoming_t_f)
            * self.config.defrost_factor();
        let demand = building.magnitude() * self.config.fract_total_vol();

        let hours = 0..HOURS_PER_DAY * SIMULATION_DAYS;
        let per_minute = |hourly: Vec<f64>| -> Vec<f64> {
            hr_to_min_list(&hourly)
                .into_iter()
                .map(|rate| rate / MINUTES_PER_HOUR as f64)
                .collect()
        };
        let g_hw = per_minute(
            hours
                .clone()
                .map(|hour| generation_rate * schedule[hour % HOURS_PER_DAY])
                .collect(),
        );
        let d_hw = per_minute(
            hours
                .map(|hour| demand * loadshape[hour % HOURS_PER_DAY])
                .collect(),
        );

        let v0 = (p_vol_g * self.config.percent_useable()).ceil();
        // one gallon above the aquastat so rounding cannot leave a negative trigger volume
        let v_trig = (p_vol_g * (1. - self.config.aqua_fract())).ceil() + 1.;

        let init_pv = overrides.init_pv.unwrap_or(v0);
        if !(0. ..=v0).contains(&init_pv) {
            return Err(SimulationError::VolumeOutOfRange {
                volume: init_pv,
                v0,
            });
        }

        let minutes = g_hw.len();
        let mut pv = vec![0.; minutes];
        let mut primary_run = vec![0.; minutes];
        let mut heating = false;
        pv[0] = init_pv;

        let swing_tank = match &self.temperature_maintenance {
            TemperatureMaintenance::Swing(swing_tank) => Some(swing_tank),
            _ => None,
        };
        let mut swing_t_f = vec![0.; minutes];
        let mut swing_run = vec![0.; minutes];
        let mut hw_out_swing = vec![0.; minutes];
        let mut swing_heating = false;
        swing_t_f[0] = overrides.init_swing_t_f.unwrap_or(supply_t_f);

        for minute in 1..minutes {
            let hw_in = mix_volume(g_hw[minute], storage_t_f, incoming_t_f, supply_t_f);

            let hw_out = match swing_tank {
                Some(swing_tank) => {
                    hw_out_swing[minute] = mix_volume(
                        d_hw[minute],
                        swing_t_f[minute - 1],
                        incoming_t_f,
                        supply_t_f,
                    );
                    let step = swing_tank
                        .run_one_swing_step(
                            building,
                            storage_t_f,
                            swing_heating,
                            swing_t_f[minute - 1],
                            hw_out_swing[minute],
                        )
                        .inspect_err(|err| warn!("Simulation failed at minute {minute}: {err}"))?;
                    swing_heating = step.heating;
                    swing_t_f[minute] = step.temperature_f;
                    swing_run[minute] = step.did_run;
                    hw_out_swing[minute]
                }
                None => mix_volume(d_hw[minute], storage_t_f, incoming_t_f, supply_t_f),
            };

            let step = run_one_primary_step(heating, v0, v_trig, pv[minute - 1], hw_out, hw_in)
                .inspect_err(|err| warn!("Simulation failed at minute {minute}: {err}"))?;
            heating = step.heating;
            pv[minute] = step.volume;
            primary_run[minute] = step.did_run;
        }

        if let MinMaxResult::MinMax(lowest, highest) = pv.iter().copied().minmax() {
            debug!(
                "Simulated {minutes} minutes of a {} system; primary volume ranged from {lowest:.1} to {highest:.1} gallons",
                self.schematic()
            );
        }

        let swing = swing_tank.map(|_| SwingSeries {
            swing_t_f,
            swing_run,
            hw_out_swing,
        });

        Ok(SimulationResults::new(
            &pv,
            &g_hw,
            &d_hw,
            &primary_run,
            swing,
        ))
    }
}
