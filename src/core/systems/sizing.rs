use crate::compare_floats::{max_of_2, min_of_2};
use crate::core::units::{tile, HOURS_PER_DAY, PRIMARY_COMP_MINIMUM_RUNTIME_HR};
use crate::errors::SizingError;

/// Hours at which a series turns from non-negative to negative. The value before the first
/// hour is taken as positive, so a series opening negative peaks at hour 0.
pub fn get_peak_indices(diff: &[f64]) -> Vec<usize> {
    let mut previous = 1.;
    let mut peaks = vec![];

    for (index, value) in diff.iter().enumerate() {
        if previous >= 0. && *value < 0. {
            peaks.push(index);
        }
        previous = *value;
    }

    peaks
}

/// Generation less demand in each hour of two consecutive days, per unit of daily magnitude.
pub(crate) fn net_supply_fraction(heat_hrs: f64, on_off: &[f64], loadshape: &[f64]) -> Vec<f64> {
    tile(on_off, 2)
        .iter()
        .zip(tile(loadshape, 2))
        .map(|(on, demand)| on / heat_hrs - demand)
        .collect()
}

/// Peak hours on the first day of a net supply series, or an oversized error when generation
/// never falls behind demand.
pub(crate) fn first_day_peaks(net_supply: &[f64]) -> Result<Vec<usize>, SizingError> {
    let peaks = get_peak_indices(&net_supply[..HOURS_PER_DAY.min(net_supply.len())]);
    if peaks.is_empty() {
        return Err(SizingError::Oversized);
    }
    Ok(peaks)
}

/// Depth of the lowest point reached by the running total of a series, as a non-negative
/// volume.
pub(crate) fn worst_cumulative_deficit(net_supply: impl IntoIterator<Item = f64>) -> f64 {
    let mut cumulative = 0.;
    let mut lowest: f64 = 0.;
    for value in net_supply {
        cumulative += value;
        lowest = min_of_2(lowest, cumulative);
    }
    -lowest
}

/// Storage the primary system must draw down to carry the building through its worst run of
/// demand above generation, in gallons at supply temperature. The mixing fraction returned
/// is always 1 for a system without a swing tank.
///
/// Arguments:
/// * `magnitude` - daily hot water use at supply temperature, in gallons
/// * `heat_hrs` - hours in a day the heat pump runs
/// * `on_off` - 24 hourly flags, 1 where the heat pump may run
/// * `loadshape` - demand in each hour as a fraction of the daily total
pub fn calc_running_vol(
    magnitude: f64,
    heat_hrs: f64,
    on_off: &[f64],
    loadshape: &[f64],
) -> Result<(f64, f64), SizingError> {
    let net_supply = net_supply_fraction(heat_hrs, on_off, loadshape);
    let peaks = first_day_peaks(&net_supply)?;

    let running_vol = peaks.iter().fold(0., |running_vol, &peak| {
        max_of_2(
            running_vol,
            worst_cumulative_deficit(net_supply[peak..].iter().map(|diff| diff * magnitude)),
        )
    });

    Ok((running_vol, 1.))
}

/// Checks the storage between the aquastat and the bottom of the useful volume can hold at
/// least one minimum-length run of the heat pump.
///
/// Arguments:
/// * `total_vol` - total primary volume at storage temperature, in gallons
/// * `heat_rate` - primary generation while running, in gallons per hour
/// * `aqua_fract` - height of the aquastat as a fraction of tank height
/// * `percent_useable` - fraction of the tank volume that is useable
pub fn check_cycling_volume(
    total_vol: f64,
    heat_rate: f64,
    aqua_fract: f64,
    percent_useable: f64,
) -> Result<(), SizingError> {
    let cycling_vol = total_vol * (aqua_fract - (1. - percent_useable));
    let min_run_vol = PRIMARY_COMP_MINIMUM_RUNTIME_HR * heat_rate;

    if min_run_vol > cycling_vol {
        let recommended_minimum = min_run_vol / total_vol + (1. - percent_useable);
        return if recommended_minimum > 0. && recommended_minimum < 1. {
            Err(SizingError::AquastatFractionTooLow {
                recommended_minimum,
            })
        } else {
            Err(SizingError::InfeasibleAquastatFraction)
        };
    }

    Ok(())
}
