use crate::core::building::Building;
use crate::core::systems::load_shift::LoadShift;
use crate::core::units::{HOURS_PER_DAY, MAX_WATER_TEMP_F};
use crate::errors::SystemError;

/// Operating parameters shared by every schematic.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemConfig {
    storage_t_f: f64,
    percent_useable: f64,
    aqua_fract: f64,
    defrost_factor: f64,
    comp_runtime_hr: f64,
    load_shift: Option<LoadShift>,
}

impl SystemConfig {
    /// Arguments:
    /// * `building` - the building served, used to check the storage temperature
    /// * `storage_t_f` - primary storage temperature, at least the supply temperature
    /// * `percent_useable` - fraction of the primary volume that is useable
    /// * `aqua_fract` - height of the aquastat as a fraction of tank height
    /// * `defrost_factor` - fraction of rated capacity left after defrost cycles
    /// * `comp_runtime_hr` - whole hours in a day the primary compressor may run
    /// * `load_shift` - hours the primary may run when shifting load, if load shifting
    pub fn new(
        building: &Building,
        storage_t_f: f64,
        percent_useable: f64,
        aqua_fract: f64,
        defrost_factor: f64,
        comp_runtime_hr: f64,
        load_shift: Option<LoadShift>,
    ) -> Result<Self, SystemError> {
        if !(storage_t_f >= building.supply_t_f() && storage_t_f <= MAX_WATER_TEMP_F) {
            return Err(SystemError::StorageTemperature {
                storage_t_f,
                supply_t_f: building.supply_t_f(),
            });
        }
        check_fraction("percentUseable", percent_useable)?;
        // a tank triggering at its very top could never be sized
        if !(aqua_fract > 0. && aqua_fract < 1.) {
            return Err(SystemError::FractionOutOfRange {
                field: "aquaFract",
                value: aqua_fract,
            });
        }
        check_fraction("defrostFactor", defrost_factor)?;
        if !(comp_runtime_hr.fract() == 0.
            && (1. ..=HOURS_PER_DAY as f64).contains(&comp_runtime_hr))
        {
            return Err(SystemError::CompressorRuntime(comp_runtime_hr));
        }

        Ok(Self {
            storage_t_f,
            percent_useable,
            aqua_fract,
            defrost_factor,
            comp_runtime_hr,
            load_shift,
        })
    }

    pub fn storage_t_f(&self) -> f64 {
        self.storage_t_f
    }

    pub fn percent_useable(&self) -> f64 {
        self.percent_useable
    }

    pub fn aqua_fract(&self) -> f64 {
        self.aqua_fract
    }

    pub fn defrost_factor(&self) -> f64 {
        self.defrost_factor
    }

    pub fn comp_runtime_hr(&self) -> f64 {
        self.comp_runtime_hr
    }

    pub fn load_shift(&self) -> Option<&LoadShift> {
        self.load_shift.as_ref()
    }

    pub fn fract_total_vol(&self) -> f64 {
        self.load_shift
            .as_ref()
            .map_or(1., LoadShift::fract_total_vol)
    }

    /// Hours the primary is sized to run in a day.
    pub fn max_day_run_hr(&self) -> f64 {
        match &self.load_shift {
            Some(load_shift) => load_shift.max_day_run_hr(self.comp_runtime_hr),
            None => self.comp_runtime_hr,
        }
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), SystemError> {
    if !(value > 0. && value <= 1.) {
        return Err(SystemError::FractionOutOfRange { field, value });
    }
    Ok(())
}
