use chrono::{Days, Local, Months, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Synthetic starting value for generated history.
pub const BASELINE: f64 = 100_000.0;

/// Base growth rate per period, scaled by the selected growth multiplier.
pub const BASE_GROWTH_RATE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub date: NaiveDate,
    /// Display label for the date, formatted per time frame.
    pub label: String,
    pub value: f64,
}

impl ChartDataPoint {
    pub fn new(date: NaiveDate, time_frame: TimeFrame, value: f64) -> Self {
        ChartDataPoint {
            date,
            label: time_frame.label_for(date),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl TimeFrame {
    pub fn all() -> &'static [TimeFrame] {
        &[
            TimeFrame::Daily,
            TimeFrame::Weekly,
            TimeFrame::Monthly,
            TimeFrame::Yearly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Daily => "daily",
            TimeFrame::Weekly => "weekly",
            TimeFrame::Monthly => "monthly",
            TimeFrame::Yearly => "yearly",
        }
    }

    /// Number of historical samples in the lookback window.
    pub fn lookback(&self) -> usize {
        match self {
            TimeFrame::Daily => 7,
            TimeFrame::Weekly => 12,
            TimeFrame::Monthly => 12,
            TimeFrame::Yearly => 5,
        }
    }

    /// Number of points appended by the growth projection.
    pub fn horizon(&self) -> usize {
        match self {
            TimeFrame::Daily | TimeFrame::Weekly | TimeFrame::Monthly => 6,
            TimeFrame::Yearly => 3,
        }
    }

    /// Upper bound of the random offset added to the baseline.
    fn jitter_span(&self) -> f64 {
        match self {
            TimeFrame::Daily => 10_000.0,
            TimeFrame::Weekly => 15_000.0,
            TimeFrame::Monthly => 20_000.0,
            TimeFrame::Yearly => 25_000.0,
        }
    }

    /// Shift a date by a whole number of periods (negative shifts go back).
    pub fn shift(&self, date: NaiveDate, periods: i32) -> NaiveDate {
        match self {
            TimeFrame::Daily => shift_days(date, periods as i64),
            TimeFrame::Weekly => shift_days(date, periods as i64 * 7),
            TimeFrame::Monthly => shift_months(date, periods),
            TimeFrame::Yearly => shift_months(date, periods * 12),
        }
    }

    /// Display label for a date at this granularity: "Sep 3" for daily and
    /// weekly, "Sep 2026" for monthly, "2026" for yearly.
    pub fn label_for(&self, date: NaiveDate) -> String {
        match self {
            TimeFrame::Daily | TimeFrame::Weekly => date.format("%b %-d").to_string(),
            TimeFrame::Monthly => date.format("%b %Y").to_string(),
            TimeFrame::Yearly => date.format("%Y").to_string(),
        }
    }
}

impl FromStr for TimeFrame {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(TimeFrame::Daily),
            "weekly" | "week" | "w" => Ok(TimeFrame::Weekly),
            "monthly" | "month" | "m" => Ok(TimeFrame::Monthly),
            "yearly" | "year" | "y" => Ok(TimeFrame::Yearly),
            _ => Err(ParseError::UnknownTimeFrame(s.to_string())),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthRate {
    Current,
    Optimistic,
    Conservative,
}

impl GrowthRate {
    pub fn all() -> &'static [GrowthRate] {
        &[
            GrowthRate::Current,
            GrowthRate::Optimistic,
            GrowthRate::Conservative,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthRate::Current => "current",
            GrowthRate::Optimistic => "optimistic",
            GrowthRate::Conservative => "conservative",
        }
    }

    /// Scenario multiplier applied to the base growth rate.
    pub fn multiplier(&self) -> f64 {
        match self {
            GrowthRate::Current => 1.0,
            GrowthRate::Optimistic => 1.5,
            GrowthRate::Conservative => 0.5,
        }
    }
}

impl FromStr for GrowthRate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(GrowthRate::Current),
            "optimistic" => Ok(GrowthRate::Optimistic),
            "conservative" => Ok(GrowthRate::Conservative),
            _ => Err(ParseError::UnknownGrowthRate(s.to_string())),
        }
    }
}

impl fmt::Display for GrowthRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Synthesize a historical value series ending today.
///
/// The window length is fixed per time frame and the values scatter around
/// the baseline with a granularity-dependent spread.
pub fn generate_historical_data(time_frame: TimeFrame) -> Vec<ChartDataPoint> {
    historical_series(time_frame, Local::now().date_naive(), &mut rand::thread_rng())
}

pub(crate) fn historical_series<R: Rng>(
    time_frame: TimeFrame,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<ChartDataPoint> {
    let lookback = time_frame.lookback();
    let mut data = Vec::with_capacity(lookback);

    for i in (0..lookback).rev() {
        let date = time_frame.shift(today, -(i as i32));
        let value = BASELINE + rng.gen_range(0.0..time_frame.jitter_span());
        data.push(ChartDataPoint::new(date, time_frame, value));
    }

    data
}

/// Extend a historical series with compound-growth projections.
///
/// Starting from the last historical value, each projected point applies
/// `value += value * (base rate * multiplier)` and advances the date by one
/// period. Stored values are rounded to whole units; the running value
/// compounds unrounded. An empty input yields the input unchanged.
pub fn project_growth(
    historical: &[ChartDataPoint],
    growth_rate: GrowthRate,
    time_frame: TimeFrame,
) -> Vec<ChartDataPoint> {
    let mut projected = historical.to_vec();

    let Some(last) = historical.last() else {
        return projected;
    };

    let mut value = last.value;
    let mut date = last.date;

    for _ in 0..time_frame.horizon() {
        value += value * (BASE_GROWTH_RATE * growth_rate.multiplier());
        date = time_frame.shift(date, 1);
        projected.push(ChartDataPoint::new(date, time_frame, value.round()));
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    fn flat_series(time_frame: TimeFrame, value: f64) -> Vec<ChartDataPoint> {
        let today = fixed_today();
        (0..time_frame.lookback())
            .rev()
            .map(|i| {
                ChartDataPoint::new(time_frame.shift(today, -(i as i32)), time_frame, value)
            })
            .collect()
    }

    #[test]
    fn test_historical_window_lengths() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            historical_series(TimeFrame::Daily, fixed_today(), &mut rng).len(),
            7
        );
        assert_eq!(
            historical_series(TimeFrame::Weekly, fixed_today(), &mut rng).len(),
            12
        );
        assert_eq!(
            historical_series(TimeFrame::Monthly, fixed_today(), &mut rng).len(),
            12
        );
        assert_eq!(
            historical_series(TimeFrame::Yearly, fixed_today(), &mut rng).len(),
            5
        );
    }

    #[test]
    fn test_historical_values_scatter_around_baseline() {
        let mut rng = StdRng::seed_from_u64(7);
        for &tf in TimeFrame::all() {
            let series = historical_series(tf, fixed_today(), &mut rng);
            for point in &series {
                assert!(point.value >= BASELINE);
                assert!(point.value < BASELINE + 25_000.0);
            }
        }
    }

    #[test]
    fn test_historical_series_ends_today() {
        let mut rng = StdRng::seed_from_u64(1);
        for &tf in TimeFrame::all() {
            let series = historical_series(tf, fixed_today(), &mut rng);
            assert_eq!(series.last().unwrap().date, fixed_today());
        }
    }

    #[test]
    fn test_historical_dates_are_chronological() {
        let mut rng = StdRng::seed_from_u64(3);
        for &tf in TimeFrame::all() {
            let series = historical_series(tf, fixed_today(), &mut rng);
            for pair in series.windows(2) {
                assert!(pair[0].date < pair[1].date, "{tf}: {pair:?}");
            }
        }
    }

    #[test]
    fn test_projection_length() {
        for &tf in TimeFrame::all() {
            let historical = flat_series(tf, 100_000.0);
            let projected = project_growth(&historical, GrowthRate::Current, tf);
            let expected_tail = if tf == TimeFrame::Yearly { 3 } else { 6 };
            assert_eq!(projected.len(), historical.len() + expected_tail);
        }
    }

    #[test]
    fn test_first_projected_value_per_growth_rate() {
        let historical = flat_series(TimeFrame::Monthly, 100_000.0);

        let current = project_growth(&historical, GrowthRate::Current, TimeFrame::Monthly);
        assert_eq!(current[historical.len()].value, 105_000.0);

        let optimistic = project_growth(&historical, GrowthRate::Optimistic, TimeFrame::Monthly);
        assert_eq!(optimistic[historical.len()].value, 107_500.0);

        let conservative =
            project_growth(&historical, GrowthRate::Conservative, TimeFrame::Monthly);
        assert_eq!(conservative[historical.len()].value, 102_500.0);
    }

    #[test]
    fn test_projected_values_round_to_whole_units() {
        let historical = flat_series(TimeFrame::Daily, 33_333.0);
        let projected = project_growth(&historical, GrowthRate::Optimistic, TimeFrame::Daily);
        for point in &projected[historical.len()..] {
            assert_eq!(point.value, point.value.round());
        }
    }

    #[test]
    fn test_projection_compounds_unrounded() {
        // Two daily steps at 5%: 100000 -> 105000 -> 110250.
        let historical = flat_series(TimeFrame::Daily, 100_000.0);
        let projected = project_growth(&historical, GrowthRate::Current, TimeFrame::Daily);
        assert_eq!(projected[historical.len() + 1].value, 110_250.0);
    }

    #[test]
    fn test_projection_is_monotonically_increasing() {
        for &tf in TimeFrame::all() {
            for &rate in GrowthRate::all() {
                let historical = flat_series(tf, 50_000.0);
                let projected = project_growth(&historical, rate, tf);
                for pair in projected[historical.len() - 1..].windows(2) {
                    assert!(pair[1].value > pair[0].value);
                }
            }
        }
    }

    #[test]
    fn test_projected_dates_advance_one_period_per_step() {
        for &tf in TimeFrame::all() {
            let historical = flat_series(tf, 100_000.0);
            let projected = project_growth(&historical, GrowthRate::Current, tf);
            let mut expected = historical.last().unwrap().date;
            for point in &projected[historical.len()..] {
                expected = tf.shift(expected, 1);
                assert_eq!(point.date, expected);
                assert!(point.date > historical.last().unwrap().date);
            }
        }
    }

    #[test]
    fn test_label_formats_per_time_frame() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
        assert_eq!(TimeFrame::Daily.label_for(date), "Sep 5");
        assert_eq!(TimeFrame::Weekly.label_for(date), "Sep 5");
        assert_eq!(TimeFrame::Monthly.label_for(date), "Sep 2026");
        assert_eq!(TimeFrame::Yearly.label_for(date), "2026");
    }

    #[test]
    fn test_monthly_shift_clamps_short_months() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(
            TimeFrame::Monthly.shift(date, 1),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_project_growth_on_empty_series_is_a_no_op() {
        let projected = project_growth(&[], GrowthRate::Current, TimeFrame::Daily);
        assert!(projected.is_empty());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("daily".parse::<TimeFrame>().unwrap(), TimeFrame::Daily);
        assert_eq!("W".parse::<TimeFrame>().unwrap(), TimeFrame::Weekly);
        assert_eq!(
            "Optimistic".parse::<GrowthRate>().unwrap(),
            GrowthRate::Optimistic
        );
        assert!("hourly".parse::<TimeFrame>().is_err());
        assert!("wild".parse::<GrowthRate>().is_err());
    }
}
