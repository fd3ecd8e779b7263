use crate::core::load_shapes::{LoadShapeRegistry, BEDROOM_TABLE_KEYS};
use crate::core::units::{
    watts_to_btuhr, HOURS_PER_DAY, MAX_WATER_TEMP_F, MIN_WATER_TEMP_F, MINUTES_PER_HOUR,
    RECIRC_LOSS_MAX_BTUHR, RHO_CP,
};
use crate::errors::{BuildingError, LookupError};
use crate::statistics::percentile;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

const LOAD_SHAPE_SUM_TOLERANCE: f64 = 1e-3;
const CALIFORNIA_DEMAND_PERCENTILE: usize = 98;

/// The occupancy categories with a known hot water demand per unit of occupancy.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Apartment,
    ElementarySchool,
    FoodServiceA,
    FoodServiceB,
    JuniorHigh,
    MensDorm,
    Motel,
    NursingHome,
    OfficeBuilding,
    SeniorHigh,
    WomensDorm,
    MultiFamily,
}

impl BuildingType {
    /// Gallons per day at supply temperature for each unit of occupancy (apartment, student,
    /// meal, person, room or bed depending on the type).
    ///
    /// Multi-family demand is set per person instead, so has no fixed coefficient.
    pub fn per_capita_gpd(&self) -> Option<f64> {
        match self {
            BuildingType::Apartment => Some(42.8),
            BuildingType::ElementarySchool => Some(1.081),
            BuildingType::FoodServiceA => Some(11.032),
            BuildingType::FoodServiceB => Some(6.288),
            BuildingType::JuniorHigh => Some(3.27),
            BuildingType::MensDorm => Some(18.9),
            BuildingType::Motel => Some(28.8),
            BuildingType::NursingHome => Some(20.1),
            BuildingType::OfficeBuilding => Some(1.11),
            BuildingType::SeniorHigh => Some(3.02),
            BuildingType::WomensDorm => Some(16.4),
            BuildingType::MultiFamily => None,
        }
    }

    /// Parse a snake_case building type name.
    pub fn from_name(name: &str) -> Result<Self, LookupError> {
        name.parse()
            .map_err(|_: strum::ParseError| LookupError::UnknownBuildingType(name.to_string()))
    }
}


/// How much hot water each person in a multi-family building uses in a day.
#[derive(Clone, Debug, PartialEq)]
pub enum PerPersonDemand {
    GallonsPerDay(f64),
    /// Look up the 98th percentile day for an apartment mix, given as the number of
    /// apartments with 0 to 5 bedrooms.
    California { bedroom_counts: Vec<f64> },
}

/// The heat lost from the recirculation loop, described either by the loop's temperature
/// drop and flow, or by a fixed loss per apartment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Recirculation {
    Flow {
        return_t_f: f64,
        flow_rate_gpm: f64,
    },
    PerApartment {
        n_apt: f64,
        watts_per_apt: f64,
    },
}

/// Water temperatures at the building, in degrees F.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterTemperatures {
    pub incoming_t_f: f64,
    pub supply_t_f: f64,
}

/// Daily hot water demand of a building, and the temperatures and losses it is served at.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Building {
    building_types: Vec<BuildingType>,
    magnitude: f64, // gallons per day at supply temperature
    loadshape: Vec<f64>,
    avg_loadshape: Vec<f64>,
    incoming_t_f: f64,
    supply_t_f: f64,
    return_t_f: Option<f64>,
    recirc_loss: f64, // BTU/hr
}

impl Building {
    /// Arguments:
    /// * `building_types` - the occupancy categories making up the building, for reporting
    /// * `magnitude` - daily hot water use at supply temperature, in gallons
    /// * `loadshape` - design day demand in each hour as a fraction of the daily total
    /// * `avg_loadshape` - average day demand in each hour as a fraction of the daily total
    /// * `temperatures` - incoming and supply water temperatures
    /// * `recirculation` - the recirculation loop losses
    pub fn new(
        building_types: Vec<BuildingType>,
        magnitude: f64,
        loadshape: Vec<f64>,
        avg_loadshape: Vec<f64>,
        temperatures: WaterTemperatures,
        recirculation: Recirculation,
    ) -> Result<Self, BuildingError> {
        if !(magnitude > 0.) {
            return Err(BuildingError::NonPositiveMagnitude(magnitude));
        }
        check_load_shape(&loadshape)?;
        check_load_shape(&avg_loadshape)?;

        let WaterTemperatures {
            incoming_t_f,
            supply_t_f,
        } = temperatures;
        check_temperature("incomingT_F", incoming_t_f)?;
        check_temperature("supplyT_F", supply_t_f)?;
        if supply_t_f <= incoming_t_f {
            return Err(BuildingError::SupplyNotAboveIncoming {
                supply_t_f,
                incoming_t_f,
            });
        }

        let (return_t_f, recirc_loss) = match recirculation {
            Recirculation::Flow {
                return_t_f,
                flow_rate_gpm,
            } => {
                check_temperature("returnT_F", return_t_f)?;
                if supply_t_f <= return_t_f {
                    return Err(BuildingError::SupplyNotAboveReturn {
                        supply_t_f,
                        return_t_f,
                    });
                }
                check_positive("flow_rate", flow_rate_gpm)?;
                (
                    Some(return_t_f),
                    (supply_t_f - return_t_f) * flow_rate_gpm * RHO_CP * MINUTES_PER_HOUR as f64,
                )
            }
            Recirculation::PerApartment {
                n_apt,
                watts_per_apt,
            } => {
                check_positive("nApt", n_apt)?;
                check_positive("Wapt", watts_per_apt)?;
                (None, watts_to_btuhr(n_apt * watts_per_apt))
            }
        };

        if recirc_loss > RECIRC_LOSS_MAX_BTUHR {
            return Err(BuildingError::RecircLossTooHigh(
                recirc_loss,
                RECIRC_LOSS_MAX_BTUHR,
            ));
        }

        Ok(Self {
            building_types,
            magnitude,
            loadshape,
            avg_loadshape,
            incoming_t_f,
            supply_t_f,
            return_t_f,
            recirc_loss,
        })
    }

    /// Build a single-use building from the registry's coefficients and default shapes.
    ///
    /// Arguments:
    /// * `registry` - where default load shapes and bedroom tables are looked up
    /// * `building_type` - occupancy category
    /// * `magnitude_stat` - the occupancy count for the category (people for multi-family)
    /// * `per_person_demand` - required for multi-family, ignored otherwise
    /// * `loadshape` - optional custom design day load shape
    /// * `avg_loadshape` - optional custom average day load shape
    pub fn from_type(
        registry: &LoadShapeRegistry,
        building_type: BuildingType,
        magnitude_stat: f64,
        per_person_demand: Option<&PerPersonDemand>,
        loadshape: Option<Vec<f64>>,
        avg_loadshape: Option<Vec<f64>>,
        temperatures: WaterTemperatures,
        recirculation: Recirculation,
    ) -> Result<Self, BuildingError> {
        check_positive("magnitudeStat", magnitude_stat)?;

        let magnitude = match (building_type.per_capita_gpd(), per_person_demand) {
            (Some(coefficient), _) => magnitude_stat * coefficient,
            (None, Some(PerPersonDemand::GallonsPerDay(gpdpp))) => {
                check_positive("gpdpp", *gpdpp)?;
                magnitude_stat * gpdpp
            }
            (None, Some(PerPersonDemand::California { bedroom_counts })) => {
                magnitude_stat * california_gpdpp(registry, bedroom_counts, magnitude_stat)?
            }
            (None, None) => return Err(BuildingError::MissingGpdpp),
        };

        let loadshape = match loadshape {
            Some(loadshape) => loadshape,
            None => registry.design_shape(building_type)?.to_vec(),
        };
        let avg_loadshape = match avg_loadshape {
            Some(avg_loadshape) => avg_loadshape,
            None => registry.average_shape(building_type)?.to_vec(),
        };

        debug!("{building_type} building with {magnitude_stat} occupancy uses {magnitude:.2} gallons per day");

        Self::new(
            vec![building_type],
            magnitude,
            loadshape,
            avg_loadshape,
            temperatures,
            recirculation,
        )
    }

    /// Combine buildings of different uses into one, weighting each hour of the load shapes
    /// by each building's daily magnitude.
    ///
    /// The temperatures and recirculation losses of the first building are kept; the
    /// buildings are expected to share a plant and distribution loop.
    pub fn multi_use(buildings: &[Building]) -> Result<Self, BuildingError> {
        let first = buildings.first().ok_or(BuildingError::EmptyMultiUse)?;
        if buildings.len() == 1 {
            return Ok(first.clone());
        }

        let magnitude: f64 = buildings.iter().map(|building| building.magnitude).sum();
        let loadshape = magnitude_weighted(
            &buildings
                .iter()
                .map(|building| (building.loadshape.as_slice(), building.magnitude))
                .collect::<Vec<_>>(),
            magnitude,
        );
        let avg_loadshape = magnitude_weighted(
            &buildings
                .iter()
                .map(|building| (building.avg_loadshape.as_slice(), building.magnitude))
                .collect::<Vec<_>>(),
            magnitude,
        );

        Ok(Self {
            building_types: buildings
                .iter()
                .flat_map(|building| building.building_types.iter().copied())
                .collect(),
            magnitude,
            loadshape,
            avg_loadshape,
            incoming_t_f: first.incoming_t_f,
            supply_t_f: first.supply_t_f,
            return_t_f: first.return_t_f,
            recirc_loss: first.recirc_loss,
        })
    }

    pub fn building_types(&self) -> &[BuildingType] {
        &self.building_types
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn loadshape(&self) -> &[f64] {
        &self.loadshape
    }

    pub fn avg_loadshape(&self) -> &[f64] {
        &self.avg_loadshape
    }

    pub fn incoming_t_f(&self) -> f64 {
        self.incoming_t_f
    }

    pub fn supply_t_f(&self) -> f64 {
        self.supply_t_f
    }

    pub fn return_t_f(&self) -> Option<f64> {
        self.return_t_f
    }

    pub fn recirc_loss(&self) -> f64 {
        self.recirc_loss
    }

    #[cfg(test)]
    pub(crate) fn with_magnitude(&self, magnitude: f64) -> Self {
        Self {
            magnitude,
            ..self.clone()
        }
    }
}

/// Gallons per day per person for a multi-family building, taken as the 98th percentile day
/// of the year for the building's apartment mix divided by the number of occupants.
pub fn california_gpdpp(
    registry: &LoadShapeRegistry,
    bedroom_counts: &[f64],
    n_people: f64,
) -> Result<f64, BuildingError> {
    if bedroom_counts.len() != BEDROOM_TABLE_KEYS.len()
        || bedroom_counts.iter().any(|count| !(*count >= 0.))
        || bedroom_counts.iter().sum::<f64>() <= 0.
    {
        return Err(BuildingError::BadBedroomCounts);
    }
    check_positive("magnitudeStat", n_people)?;

    let tables = (0..BEDROOM_TABLE_KEYS.len())
        .map(|bedrooms| registry.bedroom_table(bedrooms))
        .collect::<Result<Vec<_>, LookupError>>()?;

    let days = tables.iter().map(|table| table.len()).min().unwrap_or(0);
    let daily_totals: Vec<f64> = (0..days)
        .map(|day| {
            tables
                .iter()
                .zip(bedroom_counts)
                .map(|(table, count)| table[day] * count)
                .sum()
        })
        .collect();

    Ok(percentile(&daily_totals, CALIFORNIA_DEMAND_PERCENTILE) / n_people)
}

fn magnitude_weighted(shapes: &[(&[f64], f64)], total_magnitude: f64) -> Vec<f64> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            shapes
                .iter()
                .map(|(shape, magnitude)| shape[hour] * magnitude)
                .sum::<f64>()
                / total_magnitude
        })
        .collect()
}

/// A load shape must have a value for each hour, none of them negative, summing to 1.
pub fn check_load_shape(loadshape: &[f64]) -> Result<(), BuildingError> {
    if loadshape.len() != HOURS_PER_DAY {
        return Err(BuildingError::LoadShapeLength(loadshape.len()));
    }
    if loadshape.iter().any(|value| *value < 0.) {
        return Err(BuildingError::LoadShapeNegative);
    }
    let sum = loadshape.iter().sum::<f64>();
    if !is_close!(sum, 1., abs_tol = LOAD_SHAPE_SUM_TOLERANCE) {
        return Err(BuildingError::LoadShapeSum(sum));
    }

    Ok(())
}

fn check_temperature(field: &'static str, value: f64) -> Result<(), BuildingError> {
    if !(MIN_WATER_TEMP_F..=MAX_WATER_TEMP_F).contains(&value) {
        return Err(BuildingError::TemperatureOutOfRange { field, value });
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), BuildingError> {
    if !(value > 0.) {
        return Err(BuildingError::NonPositive { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::str::FromStr;

    #[fixture]
    fn registry() -> &'static LoadShapeRegistry {
        LoadShapeRegistry::embedded().unwrap()
    }

    #[fixture]
    fn temperatures() -> WaterTemperatures {
        WaterTemperatures {
            incoming_t_f: 50.,
            supply_t_f: 120.,
        }
    }

    #[fixture]
    fn per_apartment() -> Recirculation {
        Recirculation::PerApartment {
            n_apt: 100.,
            watts_per_apt: 100.,
        }
    }

    fn flat_shape() -> Vec<f64> {
        vec![1. / 24.; 24]
    }

    #[fixture]
    fn multi_family(
        registry: &LoadShapeRegistry,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) -> Building {
        Building::from_type(
            registry,
            BuildingType::MultiFamily,
            100.,
            Some(&PerPersonDemand::GallonsPerDay(25.)),
            None,
            None,
            temperatures,
            per_apartment,
        )
        .unwrap()
    }

    #[rstest]
    #[case(BuildingType::Apartment, 42.8)]
    #[case(BuildingType::ElementarySchool, 1.081)]
    #[case(BuildingType::FoodServiceA, 11.032)]
    #[case(BuildingType::FoodServiceB, 6.288)]
    #[case(BuildingType::JuniorHigh, 3.27)]
    #[case(BuildingType::MensDorm, 18.9)]
    #[case(BuildingType::Motel, 28.8)]
    #[case(BuildingType::NursingHome, 20.1)]
    #[case(BuildingType::OfficeBuilding, 1.11)]
    #[case(BuildingType::SeniorHigh, 3.02)]
    #[case(BuildingType::WomensDorm, 16.4)]
    fn should_scale_magnitude_by_type_coefficient(
        registry: &LoadShapeRegistry,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
        #[case] building_type: BuildingType,
        #[case] coefficient: f64,
    ) {
        let building = Building::from_type(
            registry,
            building_type,
            50.,
            None,
            None,
            None,
            temperatures,
            per_apartment,
        )
        .unwrap();

        assert_relative_eq!(building.magnitude(), 50. * coefficient);
        assert_eq!(building.loadshape(), registry.design_shape(building_type).unwrap());
        assert_eq!(
            building.avg_loadshape(),
            registry.average_shape(building_type).unwrap()
        );
    }

    #[rstest]
    fn should_use_gallons_per_person_for_multi_family(multi_family: Building) {
        assert_eq!(multi_family.magnitude(), 2500.);
        assert_eq!(multi_family.building_types(), &[BuildingType::MultiFamily]);
    }

    #[rstest]
    fn should_require_gallons_per_person_for_multi_family(
        registry: &LoadShapeRegistry,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) {
        let result = Building::from_type(
            registry,
            BuildingType::MultiFamily,
            100.,
            None,
            None,
            None,
            temperatures,
            per_apartment,
        );
        assert_eq!(result, Err(BuildingError::MissingGpdpp));
    }

    #[rstest]
    fn should_compute_recirculation_loss_per_apartment(multi_family: Building) {
        assert_relative_eq!(multi_family.recirc_loss(), 100. * 100. * 3.412142);
        assert_eq!(multi_family.return_t_f(), None);
    }

    #[rstest]
    fn should_compute_recirculation_loss_from_flow(temperatures: WaterTemperatures) {
        let building = Building::new(
            vec![],
            1000.,
            flat_shape(),
            flat_shape(),
            temperatures,
            Recirculation::Flow {
                return_t_f: 110.,
                flow_rate_gpm: 5.,
            },
        )
        .unwrap();

        assert_relative_eq!(
            building.recirc_loss(),
            (120. - 110.) * 5. * 8.353535 * 60.,
            max_relative = 1e-6
        );
        assert_eq!(building.return_t_f(), Some(110.));
    }

    #[rstest]
    fn should_reject_loadshape_of_wrong_length(
        registry: &LoadShapeRegistry,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) {
        let result = Building::from_type(
            registry,
            BuildingType::MultiFamily,
            100.,
            Some(&PerPersonDemand::GallonsPerDay(25.)),
            Some(vec![1. / 23.; 23]),
            None,
            temperatures,
            per_apartment,
        );

        let error = result.unwrap_err();
        assert_eq!(error, BuildingError::LoadShapeLength(23));
        assert!(error.to_string().contains("Loadshape must be of length 24"));
    }

    #[rstest]
    fn should_reject_loadshape_that_does_not_sum_to_one(
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) {
        let loadshape: Vec<f64> = (1..=24).map(f64::from).collect();
        let error = Building::new(
            vec![],
            1000.,
            loadshape,
            flat_shape(),
            temperatures,
            per_apartment,
        )
        .unwrap_err();

        assert_eq!(error, BuildingError::LoadShapeSum(300.));
        assert!(error
            .to_string()
            .contains("Sum of the loadshape does not equal 1"));
    }

    #[rstest]
    fn should_reject_negative_loadshape_values() {
        let mut loadshape = vec![1. / 24.; 24];
        loadshape[0] = -0.01;
        loadshape[1] += 0.01;
        assert_eq!(
            check_load_shape(&loadshape),
            Err(BuildingError::LoadShapeNegative)
        );
    }

    #[rstest]
    fn should_accept_loadshape_summing_within_tolerance() {
        let mut loadshape = vec![1. / 24.; 24];
        loadshape[5] += 0.0009;
        assert_eq!(check_load_shape(&loadshape), Ok(()));
        loadshape[5] += 0.0002;
        assert!(matches!(
            check_load_shape(&loadshape),
            Err(BuildingError::LoadShapeSum(_))
        ));
    }

    #[rstest]
    #[case(WaterTemperatures { incoming_t_f: 31., supply_t_f: 120. }, "incomingT_F")]
    #[case(WaterTemperatures { incoming_t_f: 50., supply_t_f: 213. }, "supplyT_F")]
    fn should_reject_temperatures_out_of_range(
        per_apartment: Recirculation,
        #[case] temperatures: WaterTemperatures,
        #[case] expected_field: &str,
    ) {
        let error = Building::new(
            vec![],
            1000.,
            flat_shape(),
            flat_shape(),
            temperatures,
            per_apartment,
        )
        .unwrap_err();

        assert!(matches!(
            error,
            BuildingError::TemperatureOutOfRange { field, .. } if field == expected_field
        ));
    }

    #[rstest]
    fn should_reject_return_temperature_above_supply(temperatures: WaterTemperatures) {
        let error = Building::new(
            vec![],
            1000.,
            flat_shape(),
            flat_shape(),
            temperatures,
            Recirculation::Flow {
                return_t_f: 125.,
                flow_rate_gpm: 5.,
            },
        )
        .unwrap_err();

        assert_eq!(
            error,
            BuildingError::SupplyNotAboveReturn {
                supply_t_f: 120.,
                return_t_f: 125.
            }
        );
    }

    #[rstest]
    fn should_reject_recirculation_loss_above_limit(temperatures: WaterTemperatures) {
        let error = Building::new(
            vec![],
            1000.,
            flat_shape(),
            flat_shape(),
            temperatures,
            Recirculation::PerApartment {
                n_apt: 1100.,
                watts_per_apt: 100.,
            },
        )
        .unwrap_err();

        assert!(matches!(error, BuildingError::RecircLossTooHigh(_, _)));
    }

    #[rstest]
    fn should_reject_zero_magnitude(temperatures: WaterTemperatures, per_apartment: Recirculation) {
        let result = Building::new(
            vec![],
            0.,
            flat_shape(),
            flat_shape(),
            temperatures,
            per_apartment,
        );
        assert_eq!(result, Err(BuildingError::NonPositiveMagnitude(0.)));
    }

    #[rstest]
    fn should_combine_multi_use_buildings_by_magnitude(
        registry: &LoadShapeRegistry,
        multi_family: Building,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) {
        let motel = Building::from_type(
            registry,
            BuildingType::Motel,
            10.,
            None,
            None,
            None,
            temperatures,
            per_apartment,
        )
        .unwrap();

        let combined = Building::multi_use(&[multi_family.clone(), motel.clone()]).unwrap();

        assert_relative_eq!(combined.magnitude(), 2500. + 288.);
        assert_eq!(
            combined.building_types(),
            &[BuildingType::MultiFamily, BuildingType::Motel]
        );
        for hour in 0..24 {
            assert_relative_eq!(
                combined.loadshape()[hour],
                (multi_family.loadshape()[hour] * 2500. + motel.loadshape()[hour] * 288.) / 2788.,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                combined.avg_loadshape()[hour],
                (multi_family.avg_loadshape()[hour] * 2500.
                    + motel.avg_loadshape()[hour] * 288.)
                    / 2788.,
                max_relative = 1e-12
            );
        }
        assert_abs_diff_eq!(combined.loadshape().iter().sum::<f64>(), 1., epsilon = 1e-3);
        assert_eq!(check_load_shape(combined.avg_loadshape()), Ok(()));
        assert_eq!(combined.recirc_loss(), multi_family.recirc_loss());
    }

    #[rstest]
    fn should_reject_empty_multi_use() {
        assert_eq!(Building::multi_use(&[]), Err(BuildingError::EmptyMultiUse));
    }

    #[rstest]
    fn should_look_up_california_gallons_per_person(registry: &LoadShapeRegistry) {
        let gpdpp = california_gpdpp(registry, &[0., 10., 20., 10., 0., 0.], 100.).unwrap();

        // the 98th percentile day sits well above the average day of about 26.9 gallons
        assert_relative_eq!(gpdpp, 32.41912, max_relative = 1e-9);
    }

    #[rstest]
    fn should_size_multi_family_with_california_lookup(
        registry: &LoadShapeRegistry,
        temperatures: WaterTemperatures,
        per_apartment: Recirculation,
    ) {
        let bedroom_counts = vec![0., 10., 20., 10., 0., 0.];
        let building = Building::from_type(
            registry,
            BuildingType::MultiFamily,
            100.,
            Some(&PerPersonDemand::California {
                bedroom_counts: bedroom_counts.clone(),
            }),
            None,
            None,
            temperatures,
            per_apartment,
        )
        .unwrap();

        assert_relative_eq!(
            building.magnitude(),
            100. * california_gpdpp(registry, &bedroom_counts, 100.).unwrap()
        );
    }

    #[rstest]
    #[case(vec![1., 2., 3.])]
    #[case(vec![1., 2., 3., 4., 5., -6.])]
    #[case(vec![0.; 6])]
    fn should_reject_bad_bedroom_counts(
        registry: &LoadShapeRegistry,
        #[case] bedroom_counts: Vec<f64>,
    ) {
        assert_eq!(
            california_gpdpp(registry, &bedroom_counts, 100.),
            Err(BuildingError::BadBedroomCounts)
        );
    }

    #[rstest]
    fn should_parse_building_types() {
        assert_eq!(
            BuildingType::from_str("food_service_a").unwrap(),
            BuildingType::FoodServiceA
        );
        assert_eq!(BuildingType::MensDorm.to_string(), "mens_dorm");
        assert_eq!(
            BuildingType::from_name("castle"),
            Err(LookupError::UnknownBuildingType("castle".into()))
        );
    }
}
