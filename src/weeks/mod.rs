//! Important-week tagging per store.
//!
//! Augments a sales dataset with per-row flags for statistically high sales
//! (thresholded within each store), holiday weeks, and year-end weeks, plus
//! a combined flag and a human-readable reason string.

use crate::calendar::YEAR_END_WEEK;
use crate::core::{Column, Frame};
use crate::error::{AnnotateError, Result};
use crate::stats;
use std::str::FromStr;

/// Fixed name of the holiday indicator column.
pub const HOLIDAY_FLAG: &str = "Holiday_Flag";
/// Fixed name of the week-number column.
pub const WEEK: &str = "Week";

/// Derived column: holiday indicator as a 0/1 flag.
pub const HOLIDAY_EVENT_FLAG: &str = "Holiday_Event_Flag";
/// Derived column: within-store sales spike flag.
pub const HIGH_SALES_EVENT_FLAG: &str = "High_Sales_Event_Flag";
/// Derived column: final-week-of-year flag.
pub const YEAR_END_FLAG: &str = "Year_End_Flag";
/// Derived column: OR of the three event flags.
pub const IMPORTANT_WEEK_FLAG: &str = "Important_Week_Flag";
/// Derived column: comma-joined labels of the set flags, or `"Normal"`.
pub const IMPORTANT_WEEK_REASON: &str = "Important_Week_Reason";

/// Reason string for rows with no flag set.
pub const NORMAL_REASON: &str = "Normal";

const Z_THRESHOLD: f64 = 2.0;

/// Method for the within-group high-sales threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMethod {
    /// Tukey fence: `Q3 + multiplier * IQR` within the group.
    #[default]
    Iqr,
    /// Standardized score: flag values more than 2 sample standard
    /// deviations above the group mean.
    ZScore,
}

impl FromStr for ThresholdMethod {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IQR" => Ok(ThresholdMethod::Iqr),
            "Z-score" => Ok(ThresholdMethod::ZScore),
            other => Err(AnnotateError::InvalidParameter(format!(
                "unknown method: {other}, expected 'IQR' or 'Z-score'"
            ))),
        }
    }
}

/// Configuration for important-week tagging.
#[derive(Debug, Clone)]
pub struct WeekTagConfig {
    /// Column holding the values to threshold.
    pub target_col: String,
    /// Grouping key for per-partition thresholds.
    pub group_col: String,
    /// Threshold method.
    pub method: ThresholdMethod,
    /// IQR fence multiplier (ignored under Z-score).
    pub multiplier: f64,
}

impl Default for WeekTagConfig {
    fn default() -> Self {
        Self {
            target_col: "Weekly_Sales".to_string(),
            group_col: "Store".to_string(),
            method: ThresholdMethod::Iqr,
            multiplier: 1.5,
        }
    }
}

impl WeekTagConfig {
    /// IQR method with the given fence multiplier.
    pub fn iqr(multiplier: f64) -> Self {
        Self {
            method: ThresholdMethod::Iqr,
            multiplier,
            ..Self::default()
        }
    }

    /// Z-score method (fixed threshold of 2 standard deviations).
    pub fn z_score() -> Self {
        Self {
            method: ThresholdMethod::ZScore,
            ..Self::default()
        }
    }

    pub fn target_col(mut self, name: impl Into<String>) -> Self {
        self.target_col = name.into();
        self
    }

    pub fn group_col(mut self, name: impl Into<String>) -> Self {
        self.group_col = name.into();
        self
    }
}

/// Tag important weeks per store.
///
/// Returns a new frame: all original rows and columns unchanged and in the
/// original order, plus [`HOLIDAY_EVENT_FLAG`], [`HIGH_SALES_EVENT_FLAG`],
/// [`YEAR_END_FLAG`], [`IMPORTANT_WEEK_FLAG`] and [`IMPORTANT_WEEK_REASON`].
///
/// High-sales thresholds are computed within each group of
/// `config.group_col` and scattered back by original row index, so
/// partitioning never reorders or drops rows. Zero-variance groups under the
/// Z-score method produce no flags.
pub fn tag_important_weeks(frame: &Frame, config: &WeekTagConfig) -> Result<Frame> {
    let holidays = frame.numeric(HOLIDAY_FLAG)?;
    let weeks = frame.numeric(WEEK)?;
    let target = frame.numeric(&config.target_col)?;
    let groups = frame.group_indices(&config.group_col)?;

    let mut high_sales = vec![0_i64; frame.n_rows()];
    for (_, indices) in &groups {
        let values: Vec<f64> = indices.iter().map(|&i| target[i]).collect();
        match config.method {
            ThresholdMethod::Iqr => {
                let q1 = stats::quantile(&values, 0.25);
                let q3 = stats::quantile(&values, 0.75);
                let upper = q3 + config.multiplier * (q3 - q1);
                for (&i, &v) in indices.iter().zip(&values) {
                    if v > upper {
                        high_sales[i] = 1;
                    }
                }
            }
            ThresholdMethod::ZScore => {
                let m = stats::mean(&values);
                let s = stats::std_dev(&values);
                // A zero-variance (or single-row) group has no spikes.
                if s.is_finite() && s > 0.0 {
                    for (&i, &v) in indices.iter().zip(&values) {
                        if (v - m) / s > Z_THRESHOLD {
                            high_sales[i] = 1;
                        }
                    }
                }
            }
        }
    }

    let holiday_flags: Vec<i64> = holidays.iter().map(|&h| i64::from(h != 0.0)).collect();
    let year_end: Vec<i64> = weeks
        .iter()
        .map(|&w| i64::from(w == YEAR_END_WEEK as f64))
        .collect();
    let important: Vec<i64> = (0..frame.n_rows())
        .map(|i| i64::from(high_sales[i] != 0 || holiday_flags[i] != 0 || year_end[i] != 0))
        .collect();
    let reasons: Vec<String> = (0..frame.n_rows())
        .map(|i| reason(high_sales[i] != 0, holiday_flags[i] != 0, year_end[i] != 0))
        .collect();

    frame
        .clone()
        .with_column(HOLIDAY_EVENT_FLAG, Column::Int(holiday_flags))?
        .with_column(HIGH_SALES_EVENT_FLAG, Column::Int(high_sales))?
        .with_column(YEAR_END_FLAG, Column::Int(year_end))?
        .with_column(IMPORTANT_WEEK_FLAG, Column::Int(important))?
        .with_column(IMPORTANT_WEEK_REASON, Column::Str(reasons))
}

/// Comma-joined labels in fixed order: HighSales, Holiday, YearEnd.
fn reason(high_sales: bool, holiday: bool, year_end: bool) -> String {
    let mut labels = Vec::with_capacity(3);
    if high_sales {
        labels.push("HighSales");
    }
    if holiday {
        labels.push("Holiday");
    }
    if year_end {
        labels.push("YearEnd");
    }
    if labels.is_empty() {
        NORMAL_REASON.to_string()
    } else {
        labels.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two stores, ten weeks each; store 1 spikes in week 5.
    fn two_store_frame() -> Frame {
        let stores: Vec<i64> = (0..20).map(|i| if i < 10 { 1 } else { 2 }).collect();
        let weeks: Vec<i64> = (0..20).map(|i| (i % 10) + 1).collect();
        let sales: Vec<f64> = (0..20)
            .map(|i| {
                if i == 4 {
                    500.0
                } else {
                    100.0 + (i % 10) as f64
                }
            })
            .collect();
        Frame::builder()
            .int("Store", stores)
            .int(WEEK, weeks)
            .float("Weekly_Sales", sales)
            .int(HOLIDAY_FLAG, vec![0; 20])
            .build()
            .unwrap()
    }

    fn int_col<'a>(frame: &'a Frame, name: &str) -> &'a [i64] {
        frame.column(name).unwrap().as_int().unwrap()
    }

    #[test]
    fn spike_is_flagged_only_in_its_store() {
        let frame = two_store_frame();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::default()).unwrap();

        let high = int_col(&tagged, HIGH_SALES_EVENT_FLAG);
        assert_eq!(high.iter().sum::<i64>(), 1);
        assert_eq!(high[4], 1);

        let important = int_col(&tagged, IMPORTANT_WEEK_FLAG);
        assert_eq!(important[4], 1);
        let reasons = tagged.column(IMPORTANT_WEEK_REASON).unwrap().as_str().unwrap();
        assert_eq!(reasons[4], "HighSales");
        assert_eq!(reasons[0], NORMAL_REASON);
    }

    #[test]
    fn z_score_method_flags_spike() {
        let frame = two_store_frame();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::z_score()).unwrap();
        let high = int_col(&tagged, HIGH_SALES_EVENT_FLAG);
        assert_eq!(high[4], 1);
        assert_eq!(high.iter().sum::<i64>(), 1);
    }

    #[test]
    fn zero_variance_group_produces_no_z_score_flags() {
        let frame = Frame::builder()
            .int("Store", vec![1; 5])
            .int(WEEK, vec![1, 2, 3, 4, 5])
            .float("Weekly_Sales", vec![100.0; 5])
            .int(HOLIDAY_FLAG, vec![0; 5])
            .build()
            .unwrap();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::z_score()).unwrap();
        assert_eq!(int_col(&tagged, HIGH_SALES_EVENT_FLAG), &[0; 5]);
    }

    #[test]
    fn holiday_rows_are_flagged() {
        let frame = Frame::builder()
            .int("Store", vec![1, 1, 1])
            .int(WEEK, vec![1, 2, 3])
            .float("Weekly_Sales", vec![100.0, 101.0, 102.0])
            .int(HOLIDAY_FLAG, vec![0, 1, 0])
            .build()
            .unwrap();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::default()).unwrap();

        assert_eq!(int_col(&tagged, HOLIDAY_EVENT_FLAG), &[0, 1, 0]);
        assert_eq!(int_col(&tagged, IMPORTANT_WEEK_FLAG), &[0, 1, 0]);
        let reasons = tagged.column(IMPORTANT_WEEK_REASON).unwrap().as_str().unwrap();
        assert_eq!(reasons[1], "Holiday");
    }

    #[test]
    fn week_52_is_year_end_in_every_store() {
        let frame = Frame::builder()
            .int("Store", vec![1, 1, 2, 2])
            .int(WEEK, vec![51, 52, 51, 52])
            .float("Weekly_Sales", vec![100.0, 101.0, 200.0, 201.0])
            .int(HOLIDAY_FLAG, vec![0; 4])
            .build()
            .unwrap();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::default()).unwrap();

        assert_eq!(int_col(&tagged, YEAR_END_FLAG), &[0, 1, 0, 1]);
        assert_eq!(int_col(&tagged, IMPORTANT_WEEK_FLAG), &[0, 1, 0, 1]);
        let reasons = tagged.column(IMPORTANT_WEEK_REASON).unwrap().as_str().unwrap();
        assert_eq!(reasons[1], "YearEnd");
        assert_eq!(reasons[3], "YearEnd");
    }

    #[test]
    fn reason_labels_combine_in_fixed_order() {
        assert_eq!(reason(true, true, true), "HighSales,Holiday,YearEnd");
        assert_eq!(reason(true, false, true), "HighSales,YearEnd");
        assert_eq!(reason(false, true, true), "Holiday,YearEnd");
        assert_eq!(reason(false, false, false), NORMAL_REASON);
    }

    #[test]
    fn original_rows_and_columns_are_preserved() {
        let frame = two_store_frame();
        let tagged = tag_important_weeks(&frame, &WeekTagConfig::default()).unwrap();

        assert_eq!(tagged.n_rows(), frame.n_rows());
        for name in frame.names() {
            assert_eq!(tagged.column(name), frame.column(name), "column {name}");
        }
    }

    #[test]
    fn method_parses_external_spellings() {
        assert_eq!("IQR".parse::<ThresholdMethod>().unwrap(), ThresholdMethod::Iqr);
        assert_eq!(
            "Z-score".parse::<ThresholdMethod>().unwrap(),
            ThresholdMethod::ZScore
        );
        let err = "median".parse::<ThresholdMethod>().unwrap_err();
        assert!(matches!(err, AnnotateError::InvalidParameter(_)));
    }

    #[test]
    fn missing_columns_are_schema_errors() {
        let frame = Frame::builder()
            .int("Store", vec![1])
            .float("Weekly_Sales", vec![100.0])
            .int(HOLIDAY_FLAG, vec![0])
            .build()
            .unwrap();
        let err = tag_important_weeks(&frame, &WeekTagConfig::default()).unwrap_err();
        assert_eq!(err, AnnotateError::MissingColumn(WEEK.to_string()));
    }

    #[test]
    fn custom_target_and_group_columns() {
        let frame = Frame::builder()
            .text(
                "Region",
                vec!["N".to_string(), "N".to_string(), "N".to_string(), "N".to_string(), "N".to_string(), "S".to_string()],
            )
            .int(WEEK, vec![1, 2, 3, 4, 5, 1])
            .float("Revenue", vec![10.0, 11.0, 10.0, 9.0, 50.0, 10.0])
            .int(HOLIDAY_FLAG, vec![0; 6])
            .build()
            .unwrap();

        let config = WeekTagConfig::default()
            .target_col("Revenue")
            .group_col("Region");
        let tagged = tag_important_weeks(&frame, &config).unwrap();
        let high = int_col(&tagged, HIGH_SALES_EVENT_FLAG);
        assert_eq!(high, &[0, 0, 0, 0, 1, 0]);
    }
}
