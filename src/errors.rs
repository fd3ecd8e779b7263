use thiserror::Error;

/// Top level error for anything that goes wrong while building or running a sizing engine.
#[derive(Debug, Error)]
pub enum EcosizerError {
    #[error("Building input was considered invalid: {0}")]
    InvalidBuilding(#[from] BuildingError),
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),
    #[error("System input was considered invalid: {0}")]
    InvalidSystem(#[from] SystemError),
    #[error("{0}")]
    Sizing(#[from] SizingError),
    #[error("Error identified during simulation: {0}")]
    Simulation(#[from] SimulationError),
}

impl EcosizerError {
    /// The short code carried by feasibility errors, if this is one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            EcosizerError::Sizing(err) => err.code(),
            _ => None,
        }
    }
}

/// Validation failures raised while constructing a building.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildingError {
    #[error("Loadshape must be of length 24 but has length {0}")]
    LoadShapeLength(usize),
    #[error("Sum of the loadshape does not equal 1 (sum was {0})")]
    LoadShapeSum(f64),
    #[error("Can not have negative values in the loadshape")]
    LoadShapeNegative,
    #[error("Magnitude must be greater than zero but was {0}")]
    NonPositiveMagnitude(f64),
    #[error("{field} must be a number between 32 and 212 degrees F but was {value}")]
    TemperatureOutOfRange { field: &'static str, value: f64 },
    #[error("Supply temperature ({supply_t_f} F) must be greater than return temperature ({return_t_f} F)")]
    SupplyNotAboveReturn { supply_t_f: f64, return_t_f: f64 },
    #[error("Supply temperature ({supply_t_f} F) must be greater than incoming temperature ({incoming_t_f} F)")]
    SupplyNotAboveIncoming { supply_t_f: f64, incoming_t_f: f64 },
    #[error("{field} must be a positive number but was {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("Recirculation losses of {0} BTU/hr are too high; the limit is {1} BTU/hr")]
    RecircLossTooHigh(f64, f64),
    #[error("Recirculation losses require both a return temperature and a flow rate, or both a number of apartments and watts per apartment")]
    MissingRecircInputs,
    #[error("A multi-use building needs at least one building")]
    EmptyMultiUse,
    #[error("Building types and magnitudes must be lists of the same length ({types} types, {magnitudes} magnitudes)")]
    MismatchedMultiUse { types: usize, magnitudes: usize },
    #[error("Number of bedrooms must be a list of 6 non-negative counts for the 0 to 5 bedroom apartments")]
    BadBedroomCounts,
    #[error("Per person demand lookup \"{0}\" is not recognised; use a number or \"ca\"")]
    UnknownGpdpp(String),
    #[error("Gallons per day per person must be given for a multi-family building")]
    MissingGpdpp,
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Failures looking things up in the load shape registry.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("Building type \"{0}\" is not recognised")]
    UnknownBuildingType(String),
    #[error("No load shape \"{shape}\" is available for building type \"{building_type}\"")]
    MissingLoadShape {
        building_type: String,
        shape: &'static str,
    },
    #[error("No daily bedroom table \"{0}\" is available for multi-family buildings")]
    MissingBedroomTable(String),
    #[error("Load shape registry could not be read: {0}")]
    Registry(String),
}

/// Validation failures raised while constructing a schematic around a building.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SystemError {
    #[error("{field} must be a number between 0 and 1 but was {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },
    #[error("Compressor runtime must be a whole number of hours between 1 and 24 but was {0}")]
    CompressorRuntime(f64),
    #[error("Storage temperature ({storage_t_f} F) must be at least the supply temperature ({supply_t_f} F) and no more than 212 F")]
    StorageTemperature { storage_t_f: f64, supply_t_f: f64 },
    #[error("Load shift schedule must be of length 24 but has length {0}")]
    ScheduleLength(usize),
    #[error("Load shift schedule may only contain 0s and 1s")]
    ScheduleValues,
    #[error("Load shift schedule must have at least one hour on")]
    ScheduleAllOff,
    #[error("Load shift percent must be between 0.25 and 1 but was {0}")]
    LoadShiftPercent(f64),
    #[error("The safety factor for the temperature maintenance system must be greater than 1 but was {0}")]
    SafetyFactor(f64),
    #[error("{field} must be given for a {schematic} system")]
    MissingParameter {
        field: &'static str,
        schematic: &'static str,
    },
    #[error("The temperature maintenance setpoint ({setpoint_tm_f} F) must be greater than the turn on temperature ({tm_on_temp_f} F)")]
    SetpointBelowTurnOn {
        setpoint_tm_f: f64,
        tm_on_temp_f: f64,
    },
    #[error("The temperature maintenance turn on temperature ({tm_on_temp_f} F) must be greater than the incoming temperature ({incoming_t_f} F)")]
    TurnOnBelowIncoming {
        tm_on_temp_f: f64,
        incoming_t_f: f64,
    },
    #[error("The temperature maintenance off time must be between 0 and 1 hours but was {0}")]
    OffTime(f64),
    #[error("The expected run time of the parallel tank is less than the minimum runtime for a HPWH of {minimum_runtime_min} minutes")]
    TemperatureMaintenanceRuntime { minimum_runtime_min: f64 },
}

/// Feasibility failures raised while sizing.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SizingError {
    #[error("01: The aquastat fraction is too low in the storage system; recommend increasing the maximum run hours in the day or increasing to a minimum of {recommended_minimum:.3}")]
    AquastatFractionTooLow { recommended_minimum: f64 },
    #[error("02: The minimum aquastat fraction is greater than 1. This is due to the storage efficiency and/or the maximum run hours in the day may be too low. Try increasing these values, we recommend 0.8 and 16 hours for these variables respectively")]
    InfeasibleAquastatFraction,
    #[error("03: The heating rate is greater than the peak volume; the system is oversized. Try increasing the hours the heat pump runs in a day")]
    Oversized,
    #[error("Heat hours must be more than 0 and no more than 24 but were {0}")]
    HeatHours(f64),
    #[error("The sizing curve never reached the recommended runtime of {0} hours")]
    CurveMissesRecommendation(f64),
    #[error("Swing tank could not be sized: {0}")]
    SwingTank(#[from] SimulationError),
}

impl SizingError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            SizingError::AquastatFractionTooLow { .. } => Some("01"),
            SizingError::InfeasibleAquastatFraction => Some("02"),
            SizingError::Oversized => Some("03"),
            SizingError::HeatHours(_)
            | SizingError::CurveMissesRecommendation(_)
            | SizingError::SwingTank(_) => None,
        }
    }
}

/// Runtime failures raised mid-simulation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Primary storage ran out of volume ({0:.2} gallons); the primary system is undersized")]
    PrimaryOutOfVolume(f64),
    #[error("The swing tank dropped below the supply temperature (to {0:.2} F); the system is undersized")]
    SwingBelowSupply(f64),
    #[error("Primary volume of {volume:.2} gallons is outside the useable volume of 0 to {v0:.2} gallons")]
    VolumeOutOfRange { volume: f64, v0: f64 },
    #[error("Primary storage volume must be positive, got {0} gallons")]
    PrimaryVolume(f64),
}
