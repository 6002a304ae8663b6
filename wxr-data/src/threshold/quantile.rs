use super::{check_frequency, Direction, ThresholdResult};
use crate::error::{AnalysisError, Result};
use crate::period::PeriodSeries;
use log::info;

/// Quantile threshold of a period series.
///
/// Invalid periods are dropped and the rest sorted. With `n` values, the
/// `High` threshold is the smallest value with fewer than `n / frequency`
/// values above it, so `frequency >= n` selects the maximum. The `Low`
/// threshold is the value at rank `q = floor(n / frequency)` counted from
/// the bottom, or the minimum when `q` is zero.
///
/// Fails with [`AnalysisError::NoUsableData`] when every period is invalid.
pub fn estimate_quantile(
    series: &PeriodSeries,
    frequency: u32,
    direction: Direction,
) -> Result<ThresholdResult> {
    let frequency = check_frequency(frequency)?;
    let mut values = series.valid_values();
    if values.is_empty() {
        return Err(AnalysisError::NoUsableData);
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    let rank = match direction {
        // size of the rare tail, never less than one value
        Direction::High => n - n.div_ceil(frequency) + 1,
        Direction::Low => (n / frequency).max(1),
    };
    let value = values[rank - 1];
    let periods = series.keys_with_value(value);
    info!("Quantile threshold {value} (rank {rank} of {n} sorted values, {direction})");
    Ok(ThresholdResult { value, periods })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{PeriodKey, PeriodValue};

    fn yearly(values: &[(i32, Option<f64>)]) -> PeriodSeries {
        values
            .iter()
            .map(|(year, v)| {
                let value = v.map_or(PeriodValue::Invalid, PeriodValue::Value);
                (PeriodKey::Yearly { year: *year }, value)
            })
            .collect()
    }

    fn sample() -> PeriodSeries {
        yearly(&[
            (2015, Some(10.0)),
            (2016, Some(40.0)),
            (2017, Some(5.0)),
            (2018, Some(40.0)),
            (2019, Some(8.0)),
        ])
    }

    #[test]
    fn test_high_one_in_two() {
        let result = estimate_quantile(&sample(), 2, Direction::High).unwrap();
        assert_eq!(result.value, 10.0);
        assert_eq!(result.periods, vec![PeriodKey::Yearly { year: 2015 }]);
    }

    #[test]
    fn test_low_rank_rounds_down() {
        // n = 5, q = 2: second smallest of [5, 8, 10, 40, 40]
        let result = estimate_quantile(&sample(), 2, Direction::Low).unwrap();
        assert_eq!(result.value, 8.0);
        assert_eq!(result.periods, vec![PeriodKey::Yearly { year: 2019 }]);

        let result = estimate_quantile(&sample(), 3, Direction::Low).unwrap();
        assert_eq!(result.value, 5.0);
        assert_eq!(result.periods, vec![PeriodKey::Yearly { year: 2017 }]);
    }

    #[test]
    fn test_high_rank_with_uneven_count() {
        let series = yearly(&[
            (2010, Some(3.0)),
            (2011, Some(6.0)),
            (2012, Some(1.0)),
            (2013, Some(5.0)),
            (2014, Some(2.0)),
            (2015, Some(4.0)),
        ]);
        // n = 6, 1 in 4: rank 5 of 6, the second largest
        let result = estimate_quantile(&series, 4, Direction::High).unwrap();
        assert_eq!(result.value, 5.0);
        assert_eq!(result.periods, vec![PeriodKey::Yearly { year: 2013 }]);
        assert_eq!(estimate_quantile(&series, 4, Direction::Low).unwrap().value, 1.0);
        assert_eq!(estimate_quantile(&series, 6, Direction::High).unwrap().value, 6.0);
    }

    #[test]
    fn test_frequency_equal_to_count_selects_extremes() {
        let high = estimate_quantile(&sample(), 5, Direction::High).unwrap();
        assert_eq!(high.value, 40.0);
        assert_eq!(
            high.periods,
            vec![PeriodKey::Yearly { year: 2016 }, PeriodKey::Yearly { year: 2018 }]
        );
        let low = estimate_quantile(&sample(), 5, Direction::Low).unwrap();
        assert_eq!(low.value, 5.0);
        assert_eq!(low.periods, vec![PeriodKey::Yearly { year: 2017 }]);
    }

    #[test]
    fn test_frequency_beyond_count_selects_extremes() {
        assert_eq!(estimate_quantile(&sample(), 50, Direction::High).unwrap().value, 40.0);
        assert_eq!(estimate_quantile(&sample(), 50, Direction::Low).unwrap().value, 5.0);
    }

    #[test]
    fn test_frequency_one_selects_opposite_extreme() {
        assert_eq!(estimate_quantile(&sample(), 1, Direction::High).unwrap().value, 5.0);
        assert_eq!(estimate_quantile(&sample(), 1, Direction::Low).unwrap().value, 40.0);
    }

    #[test]
    fn test_invalid_periods_dropped() {
        let series = yearly(&[
            (2000, None),
            (2001, Some(1.0)),
            (2002, Some(2.0)),
            (2003, None),
            (2004, Some(3.0)),
            (2005, Some(4.0)),
        ]);
        // four values, 1 in 4 high is the maximum
        let result = estimate_quantile(&series, 4, Direction::High).unwrap();
        assert_eq!(result.value, 4.0);
        assert_eq!(result.periods, vec![PeriodKey::Yearly { year: 2005 }]);
        let result = estimate_quantile(&series, 2, Direction::Low).unwrap();
        assert_eq!(result.value, 2.0);
    }

    #[test]
    fn test_no_usable_data() {
        let series = yearly(&[(2000, None), (2001, None)]);
        assert_eq!(
            estimate_quantile(&series, 2, Direction::High),
            Err(AnalysisError::NoUsableData)
        );
        assert_eq!(
            estimate_quantile(&PeriodSeries::new(), 2, Direction::Low),
            Err(AnalysisError::NoUsableData)
        );
    }

    #[test]
    fn test_zero_frequency_is_config_error() {
        assert!(matches!(
            estimate_quantile(&sample(), 0, Direction::High),
            Err(AnalysisError::Config(_))
        ));
    }
}
