#[cfg(test)]
mod compare_tests {
    use crate::compare::{align_series, ComparativeFacts, MetricComparison};
    use crate::data_models::{DailySeries, MetricAverages};
    use crate::tests::test_helpers::date;

    fn series(dates: &[(i32, u32, u32)], temps: &[Option<f64>]) -> DailySeries {
        let dates: Vec<_> = dates.iter().map(|&(y, m, d)| date(y, m, d)).collect();
        let labels = dates.iter().map(|d| d.format("%d %b %Y").to_string()).collect();
        let filler = vec![None; dates.len()];
        DailySeries {
            dates,
            labels,
            temperature: temps.to_vec(),
            humidity: filler.clone(),
            pm25: filler.clone(),
            aqi: filler,
        }
    }

    #[test]
    fn union_axis_covers_both_sides_with_gaps() {
        let first = series(
            &[(2023, 1, 1), (2023, 1, 2)],
            &[Some(20.0), Some(21.0)],
        );
        let second = series(
            &[(2023, 1, 2), (2023, 1, 3)],
            &[Some(28.0), Some(29.0)],
        );
        let joined = align_series(&first, &second);

        assert_eq!(
            joined.dates,
            vec![date(2023, 1, 1), date(2023, 1, 2), date(2023, 1, 3)]
        );
        assert_eq!(joined.labels[2], "03 Jan 2023");
        assert_eq!(
            joined.first.temperature,
            vec![Some(20.0), Some(21.0), None]
        );
        assert_eq!(
            joined.second.temperature,
            vec![None, Some(28.0), Some(29.0)]
        );
    }

    #[test]
    fn identical_axes_join_without_gaps() {
        let first = series(&[(2023, 1, 1)], &[Some(20.0)]);
        let second = series(&[(2023, 1, 1)], &[Some(25.0)]);
        let joined = align_series(&first, &second);

        assert_eq!(joined.dates.len(), 1);
        assert_eq!(joined.first.temperature, vec![Some(20.0)]);
        assert_eq!(joined.second.temperature, vec![Some(25.0)]);
    }

    #[test]
    fn facts_use_strict_comparisons() {
        let warm = MetricAverages {
            temperature: Some(30.0),
            humidity: Some(50.0),
            pm25: Some(40.0),
            aqi: Some(120.0),
        };
        let cool = MetricAverages {
            temperature: Some(22.0),
            humidity: Some(50.0),
            pm25: Some(15.0),
            aqi: Some(60.0),
        };
        let facts = ComparativeFacts::from_averages(&warm, &cool);

        assert_eq!(facts.higher_temperature, MetricComparison::First);
        assert_eq!(facts.cleaner_air, MetricComparison::Second);
        assert_eq!(facts.lower_pm25, MetricComparison::Second);
    }

    #[test]
    fn ties_are_similar_and_gaps_are_not_applicable() {
        let left = MetricAverages {
            temperature: Some(25.0),
            humidity: None,
            pm25: None,
            aqi: Some(80.0),
        };
        let right = MetricAverages {
            temperature: Some(25.0),
            humidity: None,
            pm25: Some(12.0),
            aqi: Some(80.0),
        };
        let facts = ComparativeFacts::from_averages(&left, &right);

        assert_eq!(facts.higher_temperature, MetricComparison::Similar);
        assert_eq!(facts.cleaner_air, MetricComparison::Similar);
        assert_eq!(facts.lower_pm25, MetricComparison::NotApplicable);
    }

    #[test]
    fn verdicts_resolve_to_display_text() {
        assert_eq!(
            MetricComparison::First.verdict("Delhi", "Mumbai"),
            "Delhi"
        );
        assert_eq!(
            MetricComparison::Second.verdict("Delhi", "Mumbai"),
            "Mumbai"
        );
        assert_eq!(
            MetricComparison::Similar.verdict("Delhi", "Mumbai"),
            "Both similar"
        );
        assert_eq!(
            MetricComparison::NotApplicable.verdict("Delhi", "Mumbai"),
            "N/A"
        );
    }
}
