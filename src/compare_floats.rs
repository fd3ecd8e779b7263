pub fn min_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first < second {
        first
    } else {
        second
    }
}

pub fn max_of_2<T: PartialOrd + Copy>(first: T, second: T) -> T {
    if first > second {
        first
    } else {
        second
    }
}

/// Largest value in a series of floats, or None for an empty series.
pub fn max_of_slice(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(max_of_2)
}
