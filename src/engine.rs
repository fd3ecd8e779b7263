use crate::core::building::{
    Building, BuildingType, PerPersonDemand, Recirculation, WaterTemperatures,
};
use crate::core::load_shapes::LoadShapeRegistry;
use crate::core::systems::load_shift::LoadShift;
use crate::core::systems::schematic::{
    PrimaryCurve, Schematic, SizingResults, System,
};
use crate::core::systems::simulation::{SimulationOverrides, SimulationResults};
use crate::core::systems::system_config::SystemConfig;
use crate::errors::{BuildingError, EcosizerError, SystemError};
use crate::input::{Gpdpp, Input, CALIFORNIA_GPDPP_LOOKUP};
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

/// Builds a sized system from construction parameters and answers sizing, curve and
/// simulation requests against it.
#[derive(Clone, Debug)]
pub struct SizingEngine {
    system: System,
}

impl SizingEngine {
    /// Build with the load shapes shipped with the crate.
    pub fn from_input(input: &Input) -> Result<Self, EcosizerError> {
        Self::from_input_with_registry(input, LoadShapeRegistry::embedded()?)
    }

    pub fn from_input_with_registry(
        input: &Input,
        registry: &LoadShapeRegistry,
    ) -> Result<Self, EcosizerError> {
        let building = building_from_input(input, registry)?;
        let config = system_config_from_input(input, &building)?;

        debug!(
            "Building {} system for {:?}",
            input.schematic,
            building.building_types()
        );

        let system = match input.schematic {
            Schematic::Primary => System::primary(building, config)?,
            Schematic::ParallelTank => System::parallel_loop_tank(
                building,
                config,
                input.safety_tm,
                required(input.setpoint_tm_f, "setpointTM_F", Schematic::ParallelTank)?,
                required(input.tm_on_temp_f, "TMonTemp_F", Schematic::ParallelTank)?,
                input.off_time_hr,
            )?,
            Schematic::SwingTank => System::swing_tank(building, config, input.safety_tm)?,
        };

        Ok(Self { system })
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn sizing_results(&self) -> SizingResults {
        self.system.sizing_results()
    }

    pub fn primary_curve(&self) -> Result<PrimaryCurve, EcosizerError> {
        Ok(self.system.primary_curve()?)
    }

    pub fn simulate(
        &self,
        overrides: &SimulationOverrides,
    ) -> Result<SimulationResults, EcosizerError> {
        let results = self.system.simulate(overrides)?;
        info!(
            "Simulated {} minutes of the {} system",
            results.len(),
            self.system.schematic()
        );
        Ok(results)
    }

    /// Sizing results and sizing curve together.
    pub fn report(&self) -> Result<SizingReport, EcosizerError> {
        Ok(SizingReport {
            schematic: self.system.schematic(),
            magnitude: self.system.building().magnitude(),
            recirc_loss: self.system.building().recirc_loss(),
            sizing: self.sizing_results(),
            curve: self.primary_curve()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizingReport {
    pub schematic: Schematic,
    /// gallons per day at supply temperature
    pub magnitude: f64,
    /// BTU/hr
    pub recirc_loss: f64,
    pub sizing: SizingResults,
    pub curve: PrimaryCurve,
}

fn required(
    value: Option<f64>,
    field: &'static str,
    schematic: Schematic,
) -> Result<f64, SystemError> {
    value.ok_or(SystemError::MissingParameter {
        field,
        schematic: schematic.into(),
    })
}

fn recirculation_from_input(input: &Input) -> Result<Recirculation, BuildingError> {
    match (input.n_apt, input.watts_per_apt, input.return_t_f, input.flow_rate) {
        (Some(n_apt), Some(watts_per_apt), _, _) => Ok(Recirculation::PerApartment {
            n_apt,
            watts_per_apt,
        }),
        (_, _, Some(return_t_f), Some(flow_rate_gpm)) => Ok(Recirculation::Flow {
            return_t_f,
            flow_rate_gpm,
        }),
        _ => Err(BuildingError::MissingRecircInputs),
    }
}

fn per_person_demand_from_input(input: &Input) -> Result<Option<PerPersonDemand>, BuildingError> {
    match &input.gpdpp {
        None => Ok(None),
        Some(Gpdpp::GallonsPerDay(gpdpp)) => Ok(Some(PerPersonDemand::GallonsPerDay(*gpdpp))),
        Some(Gpdpp::Lookup(lookup)) if lookup.eq_ignore_ascii_case(CALIFORNIA_GPDPP_LOOKUP) => {
            let bedroom_counts = input.n_br.clone().ok_or(BuildingError::BadBedroomCounts)?;
            Ok(Some(PerPersonDemand::California { bedroom_counts }))
        }
        Some(Gpdpp::Lookup(lookup)) => Err(BuildingError::UnknownGpdpp(lookup.clone())),
    }
}

/// The building described by the input, combining several uses into one building when
/// lists of building types and magnitudes are given.
pub fn building_from_input(
    input: &Input,
    registry: &LoadShapeRegistry,
) -> Result<Building, BuildingError> {
    let building_types = input
        .building_type
        .to_vec()
        .iter()
        .map(|building_type| BuildingType::from_name(building_type))
        .collect::<Result<Vec<_>, _>>()?;
    let magnitude_stats = input.magnitude_stat.to_vec();
    if building_types.is_empty() {
        return Err(BuildingError::EmptyMultiUse);
    }
    if building_types.len() != magnitude_stats.len() {
        return Err(BuildingError::MismatchedMultiUse {
            types: building_types.len(),
            magnitudes: magnitude_stats.len(),
        });
    }

    let temperatures = WaterTemperatures {
        incoming_t_f: input.incoming_t_f,
        supply_t_f: input.supply_t_f,
    };
    let recirculation = recirculation_from_input(input)?;
    let per_person_demand = per_person_demand_from_input(input)?;

    if building_types.len() == 1 {
        return Building::from_type(
            registry,
            building_types[0],
            magnitude_stats[0],
            per_person_demand.as_ref(),
            input.loadshape.clone(),
            input.avg_loadshape.clone(),
            temperatures,
            recirculation,
        );
    }

    let buildings = building_types
        .into_iter()
        .zip_eq(magnitude_stats)
        .map(|(building_type, magnitude_stat)| {
            Building::from_type(
                registry,
                building_type,
                magnitude_stat,
                per_person_demand.as_ref(),
                None,
                None,
                temperatures,
                recirculation,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let combined = Building::multi_use(&buildings)?;

    if input.loadshape.is_none() && input.avg_loadshape.is_none() {
        return Ok(combined);
    }

    // custom shapes replace the combined ones for the whole building
    Building::new(
        combined.building_types().to_vec(),
        combined.magnitude(),
        input
            .loadshape
            .clone()
            .unwrap_or_else(|| combined.loadshape().to_vec()),
        input
            .avg_loadshape
            .clone()
            .unwrap_or_else(|| combined.avg_loadshape().to_vec()),
        temperatures,
        recirculation,
    )
}

pub fn system_config_from_input(
    input: &Input,
    building: &Building,
) -> Result<SystemConfig, SystemError> {
    let load_shift = if input.do_load_shift {
        let schedule = input.schedule.clone().ok_or(SystemError::MissingParameter {
            field: "schedule",
            schematic: "load shifting",
        })?;
        Some(LoadShift::new(schedule, input.load_shift_percent)?)
    } else {
        None
    };

    SystemConfig::new(
        building,
        input.storage_t_f,
        input.percent_useable,
        input.aqua_fract,
        input.defrost_factor,
        input.comp_runtime_hr,
        load_shift,
    )
}
