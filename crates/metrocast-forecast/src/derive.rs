//! Derived-forecast computation.
//!
//! The service returns a bare temperature curve; everything the views need
//! beyond that (absolute hour timestamps, per-day summaries) is computed
//! here from the curve plus the last input timestamp.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// One forecast hour with its absolute timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastHour {
    pub time: DateTime<Utc>,
    pub temperature: f32,
}

/// Per-calendar-day summary of a forecast curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high: f32,
    pub low: f32,
}

/// Align a prediction curve to absolute hours.
///
/// Prediction index `i` covers `last_observed + (i + 1)` hours: the first
/// predicted value is the hour immediately after the newest input record.
pub fn forecast_hours(last_observed: DateTime<Utc>, predictions: &[f32]) -> Vec<ForecastHour> {
    predictions
        .iter()
        .enumerate()
        .map(|(i, &temperature)| ForecastHour {
            time: last_observed + Duration::hours(i as i64 + 1),
            temperature,
        })
        .collect()
}

/// Group forecast hours into per-calendar-day high/low summaries.
///
/// Days come out in chronological order; a day covered by a single hour
/// reports that hour as both high and low.
pub fn daily_summary(hours: &[ForecastHour]) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::new();

    for hour in hours {
        let date = hour.time.date_naive();
        match days.last_mut() {
            Some(day) if day.date == date => {
                if hour.temperature > day.high {
                    day.high = hour.temperature;
                }
                if hour.temperature < day.low {
                    day.low = hour.temperature;
                }
            }
            _ => days.push(ForecastDay {
                date,
                high: hour.temperature,
                low: hour.temperature,
            }),
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hours_start_after_last_observation() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        let hours = forecast_hours(last, &[10.0, 11.0, 12.0]);

        assert_eq!(hours.len(), 3);
        assert_eq!(
            hours[0].time,
            Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            hours[2].time,
            Utc.with_ymd_and_hms(2024, 3, 2, 2, 0, 0).unwrap()
        );
        assert!((hours[1].temperature - 11.0).abs() < 1e-6);
    }

    #[test]
    fn empty_curve_yields_no_hours() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap();
        assert!(forecast_hours(last, &[]).is_empty());
    }

    #[test]
    fn daily_summary_groups_by_calendar_day() {
        // Last observation at 21:00 -> the first two predictions land on the
        // same day (22:00, 23:00), the rest roll over to the next.
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap();
        let curve = [14.0, 15.5, 13.0, 9.0, 8.5, 11.0];
        let days = daily_summary(&forecast_hours(last, &curve));

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!((days[0].high - 15.5).abs() < 1e-6);
        assert!((days[0].low - 14.0).abs() < 1e-6);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!((days[1].high - 13.0).abs() < 1e-6);
        assert!((days[1].low - 8.5).abs() < 1e-6);
    }

    #[test]
    fn week_curve_covers_eight_calendar_days() {
        // 168 hours starting mid-day straddle 8 distinct dates.
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 11, 0, 0).unwrap();
        let curve: Vec<f32> = (0..168).map(|i| (i % 24) as f32).collect();
        let days = daily_summary(&forecast_hours(last, &curve));

        assert_eq!(days.len(), 8);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[7].date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    }

    #[test]
    fn single_hour_day_reports_same_high_and_low() {
        let last = Utc.with_ymd_and_hms(2024, 3, 1, 22, 0, 0).unwrap();
        let days = daily_summary(&forecast_hours(last, &[7.5]));

        assert_eq!(days.len(), 1);
        assert!((days[0].high - 7.5).abs() < 1e-6);
        assert!((days[0].low - 7.5).abs() < 1e-6);
    }
}
