use super::{check_frequency, Direction, ThresholdResult};
use crate::error::ConfigError;
use crate::period::PeriodSeries;
use log::{debug, info};

/// Smallest distance between consecutive positions, `None` for fewer than
/// two positions.
fn min_gap(positions: &[usize]) -> Option<usize> {
    positions.windows(2).map(|w| w[1] - w[0]).min()
}

/// Positions whose value qualifies as a 1 in `frequency` bound.
///
/// A value qualifies when every pair of consecutive periods reaching it
/// (at or above it for `High`, at or below for `Low`) is at least
/// `frequency` positions apart. Missing values never qualify and never
/// reach a bound, but still occupy their position in the sequence.
pub fn qualifying_positions(
    values: &[Option<f64>],
    frequency: usize,
    direction: Direction,
) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            let bound = (*candidate)?;
            let reaching: Vec<usize> = values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_some_and(|v| direction.reaches(bound, v)))
                .map(|(j, _)| j)
                .collect();
            match min_gap(&reaching) {
                Some(gap) if gap < frequency => None,
                _ => Some(i),
            }
        })
        .collect()
}

/// Spacing threshold of a period series.
///
/// For `High`, the smallest value such that periods at or above it occur
/// no closer together than `frequency` positions; for `Low`, the largest
/// value such that periods at or below it are spaced likewise. The result
/// depends on series order, which should be chronological.
///
/// Returns `Ok(None)` when no value satisfies the spacing condition.
/// Quadratic in the length of the series.
pub fn estimate_spacing(
    series: &PeriodSeries,
    frequency: u32,
    direction: Direction,
) -> Result<Option<ThresholdResult>, ConfigError> {
    let frequency = check_frequency(frequency)?;
    let values = series.values();
    let positions = qualifying_positions(&values, frequency, direction);
    debug!(
        "{} of {} periods qualify for 1 in {frequency} {direction}",
        positions.len(),
        values.len()
    );

    let threshold = positions
        .iter()
        .filter_map(|&i| values[i])
        .reduce(|a, b| direction.loosest(a, b));
    let Some(value) = threshold else {
        info!("No value in the series satisfies 1 in {frequency} {direction} spacing");
        return Ok(None);
    };
    let periods = series.keys_with_value(value);
    info!("Spacing threshold {value} from {} period(s)", periods.len());
    Ok(Some(ThresholdResult { value, periods }))
}
