#[cfg(test)]
mod aggregate_tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use crate::aggregate::build_daily_series;
    use crate::data_models::{FieldMap, MetricAverages};
    use crate::tests::test_helpers::{refs, row, weather_fields, weather_row};

    #[test]
    fn buckets_by_utc_day_and_averages() {
        let rows = vec![
            weather_row("Delhi", "2023-01-01T00:00", 20.0, 40.0, 10.0, 50.0),
            weather_row("Delhi", "2023-01-01T23:59", 24.0, 60.0, 20.0, 70.0),
            weather_row("Delhi", "2023-01-02T12:00", 30.0, 50.0, 30.0, 90.0),
        ];
        let series = build_daily_series(&refs(&rows), &weather_fields());

        assert_eq!(series.len(), 2);
        assert_eq!(series.dates[0].to_string(), "2023-01-01");
        assert_eq!(series.dates[1].to_string(), "2023-01-02");
        assert_eq!(series.labels[0], "01 Jan 2023");
        assert_relative_eq!(series.temperature[0].unwrap(), 22.0);
        assert_relative_eq!(series.temperature[1].unwrap(), 30.0);
        assert_relative_eq!(series.humidity[0].unwrap(), 50.0);
        assert_relative_eq!(series.pm25[0].unwrap(), 15.0);
        assert_relative_eq!(series.aqi[1].unwrap(), 90.0);
    }

    #[test]
    fn rows_without_a_usable_time_are_skipped() {
        let rows = vec![
            weather_row("Delhi", "garbage", 99.0, 99.0, 99.0, 99.0),
            weather_row("Delhi", "2023-01-01T06:00", 20.0, 40.0, 10.0, 50.0),
        ];
        let series = build_daily_series(&refs(&rows), &weather_fields());

        assert_eq!(series.len(), 1);
        assert_relative_eq!(series.temperature[0].unwrap(), 20.0);
    }

    #[test]
    fn junk_metric_values_stay_absent_not_zero() {
        let rows = vec![row(json!({
            "Timestamp": "2023-01-01",
            "City": "Delhi",
            "Temperature (°C)": "N/A",
            "Humidity (%)": null,
            "PM2.5": "",
            "AQI": "161 AQI",
        }))];
        let series = build_daily_series(&refs(&rows), &weather_fields());

        assert_eq!(series.len(), 1);
        assert!(series.temperature[0].is_none());
        assert!(series.humidity[0].is_none());
        assert!(series.pm25[0].is_none());
        assert_relative_eq!(series.aqi[0].unwrap(), 161.0);
    }

    #[test]
    fn string_measurements_with_units_average_cleanly() {
        let rows = vec![
            row(json!({
                "Timestamp": "2023-01-01T01:00",
                "City": "Delhi",
                "Temperature (°C)": "21.5 °C",
            })),
            row(json!({
                "Timestamp": "2023-01-01T02:00",
                "City": "Delhi",
                "Temperature (°C)": "22.5 °C",
            })),
        ];
        let series = build_daily_series(&refs(&rows), &weather_fields());

        assert_relative_eq!(series.temperature[0].unwrap(), 22.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let rows = vec![
            weather_row("Delhi", "2023-01-01T00:00", 20.0, 40.0, 10.0, 50.0),
            weather_row("Delhi", "2023-01-03T12:00", 26.0, 55.0, 18.0, 80.0),
        ];
        let fields = weather_fields();
        let first = build_daily_series(&refs(&rows), &fields);
        let second = build_daily_series(&refs(&rows), &fields);

        assert_eq!(first, second);
    }

    #[test]
    fn no_time_key_yields_an_empty_series() {
        let rows = vec![weather_row("Delhi", "2023-01-01", 20.0, 40.0, 10.0, 50.0)];
        let series = build_daily_series(&refs(&rows), &FieldMap::default());

        assert!(series.is_empty());
    }

    #[test]
    fn averages_skip_absent_days() {
        let rows = vec![
            row(json!({
                "Timestamp": "2023-01-01",
                "City": "Delhi",
                "Temperature (°C)": 20.0,
                "PM2.5": "n/a",
            })),
            row(json!({
                "Timestamp": "2023-01-02",
                "City": "Delhi",
                "Temperature (°C)": 30.0,
                "PM2.5": 12.0,
            })),
        ];
        let series = build_daily_series(&refs(&rows), &weather_fields());
        let averages = MetricAverages::from_series(&series);

        assert_relative_eq!(averages.temperature.unwrap(), 25.0);
        assert_relative_eq!(averages.pm25.unwrap(), 12.0);
        assert!(averages.humidity.is_none());
        assert!(averages.aqi.is_none());
    }
}
