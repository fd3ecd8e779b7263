use crate::core::building::BuildingType;
use crate::core::units::{DAYS_PER_YEAR, HOURS_PER_DAY};
use crate::errors::LookupError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::{BufReader, Cursor, Read};
use std::sync::LazyLock;

/// This module serves the normalised daily load shapes for each building type, and the
/// per-bedroom daily hot water totals for multi-family buildings.

pub(crate) const DESIGN_SHAPE_KEY: &str = "Stream";
pub(crate) const AVERAGE_SHAPE_KEY: &str = "Stream_Avg";
pub(crate) const BEDROOM_TABLE_KEYS: [&str; 6] = ["0br", "1br", "2br", "3br", "4br", "5br"];

static EMBEDDED_REGISTRY: LazyLock<Result<LoadShapeRegistry, LookupError>> = LazyLock::new(|| {
    LoadShapeRegistry::from_reader(BufReader::new(Cursor::new(include_str!(
        "./load_shapes.json"
    ))))
});

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadShapeRecord {
    #[serde(rename = "Stream")]
    stream: Option<Vec<f64>>,
    #[serde(rename = "Stream_Avg")]
    stream_avg: Option<Vec<f64>>,
    // gallons per day for an apartment of each bedroom count, for every day of a year
    #[serde(rename = "Daily")]
    daily: Option<IndexMap<String, Vec<f64>>>,
}

impl LoadShapeRecord {
    fn named_shape(&self, shape: &str) -> Option<&[f64]> {
        match shape {
            DESIGN_SHAPE_KEY => self.stream.as_deref(),
            AVERAGE_SHAPE_KEY => self.stream_avg.as_deref(),
            _ => None,
        }
    }
}

/// Keyed store of load shape records, read once and then only ever read from.
#[derive(Clone, Debug)]
pub struct LoadShapeRegistry {
    records: IndexMap<String, LoadShapeRecord>,
}

impl LoadShapeRegistry {
    /// The registry shipped with the crate, parsed on first use.
    ///
    /// The shipped shapes and bedroom tables are representative values, not the published
    /// survey datasets, so volumes sized against them will differ from published reference
    /// sizings. Load the published data with [`LoadShapeRegistry::from_reader`] when
    /// matching those matters.
    pub fn embedded() -> Result<&'static Self, LookupError> {
        EMBEDDED_REGISTRY.as_ref().map_err(|err| err.clone())
    }

    /// Read a registry from JSON keyed by building type, with each record holding a
    /// "Stream" and "Stream_Avg" shape of 24 values (and, for multi-family, a "Daily"
    /// table keyed "0br" to "5br").
    pub fn from_reader(reader: impl Read) -> Result<Self, LookupError> {
        let records: IndexMap<String, LoadShapeRecord> = serde_json::from_reader(reader)
            .map_err(|err| LookupError::Registry(err.to_string()))?;

        for (building_type, record) in &records {
            for shape in [&record.stream, &record.stream_avg].into_iter().flatten() {
                if shape.len() != HOURS_PER_DAY {
                    return Err(LookupError::Registry(format!(
                        "load shape for \"{building_type}\" has {} values rather than {HOURS_PER_DAY}",
                        shape.len()
                    )));
                }
            }
        }

        Ok(Self { records })
    }

    pub fn building_types(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    fn record(&self, building_type: BuildingType) -> Result<&LoadShapeRecord, LookupError> {
        self.records
            .get(building_type.as_ref())
            .ok_or_else(|| LookupError::UnknownBuildingType(building_type.to_string()))
    }

    fn shape(&self, building_type: BuildingType, shape: &'static str) -> Result<&[f64], LookupError> {
        self.record(building_type)?
            .named_shape(shape)
            .ok_or_else(|| LookupError::MissingLoadShape {
                building_type: building_type.to_string(),
                shape,
            })
    }

    /// The design day load shape for the building type.
    pub fn design_shape(&self, building_type: BuildingType) -> Result<&[f64], LookupError> {
        self.shape(building_type, DESIGN_SHAPE_KEY)
    }

    /// The average day load shape for the building type, used when load shifting.
    pub fn average_shape(&self, building_type: BuildingType) -> Result<&[f64], LookupError> {
        self.shape(building_type, AVERAGE_SHAPE_KEY)
    }

    /// Daily hot water totals through the year for one apartment with `bedrooms` bedrooms.
    pub fn bedroom_table(&self, bedrooms: usize) -> Result<&[f64], LookupError> {
        let key = BEDROOM_TABLE_KEYS
            .get(bedrooms)
            .ok_or_else(|| LookupError::MissingBedroomTable(format!("{bedrooms}br")))?;

        let table = self
            .record(BuildingType::MultiFamily)?
            .daily
            .as_ref()
            .and_then(|daily| daily.get(*key))
            .ok_or_else(|| LookupError::MissingBedroomTable(key.to_string()))?;

        if table.len() != DAYS_PER_YEAR {
            return Err(LookupError::Registry(format!(
                "bedroom table \"{key}\" has {} days rather than {DAYS_PER_YEAR}",
                table.len()
            )));
        }

        Ok(table)
    }
}
