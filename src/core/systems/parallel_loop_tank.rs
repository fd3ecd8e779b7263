use crate::core::building::Building;
use crate::core::units::{BTUHR_PER_KBTUHR, MINUTES_PER_HOUR, RHO_CP, TM_COMP_MINIMUM_RUNTIME_HR};
use crate::errors::SystemError;

/// A temperature maintenance tank and heat pump on the recirculation loop, in parallel with
/// and sized independently of the primary system.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelLoopTank {
    safety_tm: f64,
    setpoint_tm_f: f64,
    tm_on_temp_f: f64,
    off_time_hr: f64,
    tm_vol_g: f64,
    tm_cap_kbtuhr: f64,
}

impl ParallelLoopTank {
    /// Arguments:
    /// * `building` - the building whose recirculation losses the tank makes up
    /// * `safety_tm` - factor, greater than 1, applied to the recirculation losses
    /// * `setpoint_tm_f` - temperature the tank is heated to
    /// * `tm_on_temp_f` - temperature at which the tank heat pump turns on
    /// * `off_time_hr` - hours the tank must carry the loop with its heat pump off
    pub fn new(
        building: &Building,
        safety_tm: f64,
        setpoint_tm_f: f64,
        tm_on_temp_f: f64,
        off_time_hr: f64,
    ) -> Result<Self, SystemError> {
        if !(safety_tm > 1.) {
            return Err(SystemError::SafetyFactor(safety_tm));
        }
        if !(setpoint_tm_f > tm_on_temp_f) {
            return Err(SystemError::SetpointBelowTurnOn {
                setpoint_tm_f,
                tm_on_temp_f,
            });
        }
        if !(tm_on_temp_f > building.incoming_t_f()) {
            return Err(SystemError::TurnOnBelowIncoming {
                tm_on_temp_f,
                incoming_t_f: building.incoming_t_f(),
            });
        }
        if !(off_time_hr > 0. && off_time_hr <= 1.) {
            return Err(SystemError::OffTime(off_time_hr));
        }
        // the tank heat pump must be able to run at least its minimum cycle each time it starts
        if !(TM_COMP_MINIMUM_RUNTIME_HR < off_time_hr / (safety_tm - 1.)) {
            return Err(SystemError::TemperatureMaintenanceRuntime {
                minimum_runtime_min: TM_COMP_MINIMUM_RUNTIME_HR * MINUTES_PER_HOUR as f64,
            });
        }

        let recirc_loss = building.recirc_loss();

        Ok(Self {
            safety_tm,
            setpoint_tm_f,
            tm_on_temp_f,
            off_time_hr,
            tm_vol_g: (recirc_loss / RHO_CP) * off_time_hr / (setpoint_tm_f - tm_on_temp_f),
            tm_cap_kbtuhr: safety_tm * recirc_loss / BTUHR_PER_KBTUHR,
        })
    }

    pub fn safety_tm(&self) -> f64 {
        self.safety_tm
    }

    pub fn setpoint_tm_f(&self) -> f64 {
        self.setpoint_tm_f
    }

    pub fn tm_on_temp_f(&self) -> f64 {
        self.tm_on_temp_f
    }

    pub fn off_time_hr(&self) -> f64 {
        self.off_time_hr
    }

    pub fn tm_vol_g(&self) -> f64 {
        self.tm_vol_g
    }

    pub fn tm_cap_kbtuhr(&self) -> f64 {
        self.tm_cap_kbtuhr
    }
}
