/// Physical constants and unit helpers shared by the sizing and simulation code.
///
/// Temperatures are in degrees F, volumes in US gallons and heat rates in BTU/hr unless a
/// name says otherwise.

/// Density times specific heat of water, in BTU/(gal.F)
pub const RHO_CP: f64 = 8.353535;
/// BTU/hr per watt
pub const W_TO_BTUHR: f64 = 3.412142;
pub const BTUHR_PER_KBTUHR: f64 = 1_000.;
pub const MINUTES_PER_HOUR: usize = 60;
pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_YEAR: usize = 365;

/// Minimum runtime of the primary heat pump compressor, in hours
pub const PRIMARY_COMP_MINIMUM_RUNTIME_HR: f64 = 10. / 60.;
/// Minimum runtime of a temperature maintenance heat pump compressor, in hours
pub const TM_COMP_MINIMUM_RUNTIME_HR: f64 = 20. / 60.;

// Fitted to the distribution of daily multi-family demand, as a fraction of the design day
pub const LOAD_SHIFT_NORM_MEAN: f64 = 0.7053;
pub const LOAD_SHIFT_NORM_STD: f64 = 0.0824;

pub const MIN_WATER_TEMP_F: f64 = 32.;
pub const MAX_WATER_TEMP_F: f64 = 212.;

// Recirculation losses are capped at the equivalent of 1080 apartments losing 100W each
const RECIRC_LOSS_MAX_APARTMENTS: f64 = 1080.;
const RECIRC_LOSS_MAX_WATTS_PER_APARTMENT: f64 = 100.;
pub const RECIRC_LOSS_MAX_BTUHR: f64 =
    RECIRC_LOSS_MAX_APARTMENTS * RECIRC_LOSS_MAX_WATTS_PER_APARTMENT * W_TO_BTUHR;

/// Volume of hot water needed to make `volume` of water at `out_t_f` by mixing water at
/// `hot_t_f` with cold water at `cold_t_f`.
pub fn mix_volume(volume: f64, hot_t_f: f64, cold_t_f: f64, out_t_f: f64) -> f64 {
    volume * (out_t_f - cold_t_f) / (hot_t_f - cold_t_f)
}

/// Spread an hourly series over minutes by repeating each value for every minute of its hour.
///
/// Rates are not rescaled here.
pub fn hr_to_min_list(hourly: &[f64]) -> Vec<f64> {
    hourly
        .iter()
        .flat_map(|value| std::iter::repeat(*value).take(MINUTES_PER_HOUR))
        .collect()
}

/// Repeat a series end to end `times` times.
pub fn tile(series: &[f64], times: usize) -> Vec<f64> {
    series
        .iter()
        .cycle()
        .take(series.len() * times)
        .copied()
        .collect()
}

pub fn round_by_precision(src: f64, decimals: i32) -> f64 {
    let precision = 10f64.powi(decimals);
    (src * precision).round() / precision
}

pub fn round_each_by_precision(src: &[f64], decimals: i32) -> Vec<f64> {
    src.iter()
        .map(|value| round_by_precision(*value, decimals))
        .collect()
}

/// Convert a heat rate in watts to BTU/hr
pub fn watts_to_btuhr(watts: f64) -> f64 {
    watts * W_TO_BTUHR
}
