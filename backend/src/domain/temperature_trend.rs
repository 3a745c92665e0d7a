//! Temperature trend calculation.
//!
//! Turns an unordered set of temperature readings into a current/peak/low
//! summary with a qualitative trend. Stateless and purely functional: the
//! same reading set always produces the same output for a given evaluation
//! instant, and the function is safe to call concurrently.
//!
//! All readings are assumed to belong to one child and to share a unit; the
//! calculator performs no unit conversion, so mixing Celsius and Fahrenheit
//! readings in one input set produces meaningless numbers. Enforcing both is
//! the caller's responsibility.

use chrono::{DateTime, Duration, Utc};
use shared::{Trend, TrendDirection};

use crate::domain::models::temperature::{TemperatureReading, TemperatureTrend, TrendEntry};

/// Hysteresis band, in the readings' own unit. The last reading must move
/// beyond the first by more than this before the direction leaves "flat".
const TREND_BAND: f64 = 0.3;

/// Compute the trend summary for a set of readings against the current
/// wall-clock time.
pub fn calculate_trend(readings: &[TemperatureReading]) -> TemperatureTrend {
    calculate_trend_at(readings, Utc::now())
}

/// Compute the trend summary against an explicit evaluation instant.
///
/// The instant only affects `avg_temp_last_24h`; direction and extremes are
/// functions of the reading set alone. An empty input yields the degenerate
/// all-zero summary with a stable/flat trend rather than an error.
pub fn calculate_trend_at(readings: &[TemperatureReading], now: DateTime<Utc>) -> TemperatureTrend {
    if readings.is_empty() {
        return TemperatureTrend {
            current_temp: 0.0,
            peak_temp: 0.0,
            lowest_temp: 0.0,
            trend: Trend::Stable,
            trend_direction: TrendDirection::Flat,
            avg_temp_last_24h: 0.0,
            readings: Vec::new(),
        };
    }

    // Stable sort: readings with identical timestamps keep their input order.
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.timestamp);

    let first_temp = sorted[0].temperature;
    let current_temp = sorted[sorted.len() - 1].temperature;
    let peak_temp = sorted
        .iter()
        .map(|r| r.temperature)
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest_temp = sorted
        .iter()
        .map(|r| r.temperature)
        .fold(f64::INFINITY, f64::min);

    // Direction compares the chronologically last reading against the
    // chronologically first one only. A single outlier at either end can
    // dominate the reported direction; this matches the observed behavior
    // the household relies on and is kept as-is.
    let trend_direction = if current_temp > first_temp + TREND_BAND {
        TrendDirection::Up
    } else if current_temp < first_temp - TREND_BAND {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    let trend = match trend_direction {
        TrendDirection::Down => Trend::Improving,
        TrendDirection::Up => Trend::Worsening,
        TrendDirection::Flat => Trend::Stable,
    };

    // Mean over readings taken within 24 hours of the evaluation instant,
    // not of the latest reading's time.
    let recent: Vec<f64> = sorted
        .iter()
        .filter(|r| now.signed_duration_since(r.timestamp) <= Duration::hours(24))
        .map(|r| r.temperature)
        .collect();
    let avg_temp_last_24h = if recent.is_empty() {
        0.0
    } else {
        recent.iter().sum::<f64>() / recent.len() as f64
    };

    TemperatureTrend {
        current_temp,
        peak_temp,
        lowest_temp,
        trend,
        trend_direction,
        avg_temp_last_24h,
        readings: sorted
            .into_iter()
            .map(|r| TrendEntry {
                timestamp: r.timestamp,
                temperature: r.temperature,
                unit: r.unit,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TemperatureUnit;

    fn reading(temperature: f64, timestamp: DateTime<Utc>) -> TemperatureReading {
        TemperatureReading {
            id: format!("reading::{}", timestamp.timestamp_millis()),
            child_id: "child::1".to_string(),
            temperature,
            unit: TemperatureUnit::C,
            timestamp,
            notes: None,
            created_at: timestamp,
        }
    }

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_empty_input_yields_degenerate_summary() {
        let trend = calculate_trend_at(&[], at("2024-02-10T12:00:00Z"));
        assert_eq!(trend.current_temp, 0.0);
        assert_eq!(trend.peak_temp, 0.0);
        assert_eq!(trend.lowest_temp, 0.0);
        assert_eq!(trend.trend, Trend::Stable);
        assert_eq!(trend.trend_direction, TrendDirection::Flat);
        assert_eq!(trend.avg_temp_last_24h, 0.0);
        assert!(trend.readings.is_empty());
    }

    #[test]
    fn test_single_reading_is_flat_and_stable() {
        let now = at("2024-02-10T12:00:00Z");
        let trend = calculate_trend_at(&[reading(38.5, at("2024-02-10T08:00:00Z"))], now);
        assert_eq!(trend.current_temp, 38.5);
        assert_eq!(trend.peak_temp, 38.5);
        assert_eq!(trend.lowest_temp, 38.5);
        assert_eq!(trend.trend, Trend::Stable);
        assert_eq!(trend.trend_direction, TrendDirection::Flat);
        assert_eq!(trend.avg_temp_last_24h, 38.5);
    }

    #[test]
    fn test_rising_temperature_is_worsening() {
        // 36.5 at t0, 37.8 twenty hours later, both within 24h of "now"
        let now = at("2024-02-10T21:00:00Z");
        let readings = vec![
            reading(36.5, at("2024-02-10T00:00:00Z")),
            reading(37.8, at("2024-02-10T20:00:00Z")),
        ];
        let trend = calculate_trend_at(&readings, now);
        assert_eq!(trend.trend_direction, TrendDirection::Up);
        assert_eq!(trend.trend, Trend::Worsening);
        assert!((trend.avg_temp_last_24h - 37.15).abs() < 1e-9);
        assert_eq!(trend.current_temp, 37.8);
        assert_eq!(trend.peak_temp, 37.8);
        assert_eq!(trend.lowest_temp, 36.5);
    }

    #[test]
    fn test_falling_temperature_is_improving() {
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![
            reading(37.2, at("2024-02-10T06:00:00Z")),
            reading(39.1, at("2024-02-10T02:00:00Z")),
        ];
        let trend = calculate_trend_at(&readings, now);
        assert_eq!(trend.trend_direction, TrendDirection::Down);
        assert_eq!(trend.trend, Trend::Improving);
        assert_eq!(trend.current_temp, 37.2);
        assert_eq!(trend.peak_temp, 39.1);
    }

    #[test]
    fn test_movement_within_band_stays_flat() {
        // Exactly +0.3 is still flat: the comparison is strict.
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![
            reading(37.0, at("2024-02-10T01:00:00Z")),
            reading(37.3, at("2024-02-10T02:00:00Z")),
        ];
        let trend = calculate_trend_at(&readings, now);
        assert_eq!(trend.trend_direction, TrendDirection::Flat);
        assert_eq!(trend.trend, Trend::Stable);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let now = at("2024-02-10T12:00:00Z");
        let a = reading(36.5, at("2024-02-09T20:00:00Z"));
        let b = reading(38.2, at("2024-02-10T08:00:00Z"));
        let forward = calculate_trend_at(&[a.clone(), b.clone()], now);
        let reversed = calculate_trend_at(&[b, a], now);
        assert_eq!(forward, reversed);
        assert_eq!(forward.trend_direction, TrendDirection::Up);
    }

    #[test]
    fn test_idempotent_over_same_input() {
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![
            reading(37.0, at("2024-02-09T22:00:00Z")),
            reading(38.0, at("2024-02-10T06:00:00Z")),
            reading(37.5, at("2024-02-10T10:00:00Z")),
        ];
        assert_eq!(
            calculate_trend_at(&readings, now),
            calculate_trend_at(&readings, now)
        );
    }

    #[test]
    fn test_readings_older_than_24h_excluded_from_average() {
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![
            reading(40.0, at("2024-02-08T12:00:00Z")), // two days old
            reading(37.0, at("2024-02-10T06:00:00Z")),
            reading(38.0, at("2024-02-10T10:00:00Z")),
        ];
        let trend = calculate_trend_at(&readings, now);
        assert!((trend.avg_temp_last_24h - 37.5).abs() < 1e-9);
        // ...but the old reading still participates in extremes and direction
        assert_eq!(trend.peak_temp, 40.0);
        assert_eq!(trend.trend_direction, TrendDirection::Down);
    }

    #[test]
    fn test_no_reading_in_window_averages_to_zero() {
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![reading(38.0, at("2024-02-01T12:00:00Z"))];
        let trend = calculate_trend_at(&readings, now);
        assert_eq!(trend.avg_temp_last_24h, 0.0);
        assert_eq!(trend.current_temp, 38.0);
    }

    #[test]
    fn test_extremes_bound_every_reading() {
        let now = at("2024-02-10T12:00:00Z");
        let readings = vec![
            reading(37.4, at("2024-02-10T01:00:00Z")),
            reading(39.2, at("2024-02-10T03:00:00Z")),
            reading(36.8, at("2024-02-10T05:00:00Z")),
            reading(38.1, at("2024-02-10T07:00:00Z")),
        ];
        let trend = calculate_trend_at(&readings, now);
        assert!(trend.peak_temp >= trend.lowest_temp);
        for entry in &trend.readings {
            assert!(entry.temperature <= trend.peak_temp);
            assert!(entry.temperature >= trend.lowest_temp);
        }
    }

    #[test]
    fn test_sorted_readings_keep_original_units() {
        let now = at("2024-02-10T12:00:00Z");
        let mut fahrenheit = reading(100.4, at("2024-02-10T08:00:00Z"));
        fahrenheit.unit = TemperatureUnit::F;
        let trend = calculate_trend_at(&[fahrenheit], now);
        assert_eq!(trend.readings[0].unit, TemperatureUnit::F);
        assert_eq!(trend.readings[0].temperature, 100.4);
    }
}
