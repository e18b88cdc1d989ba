//! IQR outlier detection with heuristic cause attribution.
//!
//! Scans a set of numeric columns, flags rows outside the Tukey fences
//! `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` computed over the whole dataset, and labels
//! each flagged row with a likely cause from a fixed per-column rule table.

use crate::core::{Column, Frame};
use crate::error::Result;
use crate::stats;

/// Name of the derived column recording which field triggered flagging.
pub const OUTLIER_COLUMN: &str = "Outlier_Column";
/// Name of the derived lower-bound column.
pub const LOWER_BOUND: &str = "Lower_Bound";
/// Name of the derived upper-bound column.
pub const UPPER_BOUND: &str = "Upper_Bound";
/// Name of the derived cause-label column.
pub const POSSIBLE_CAUSE: &str = "Possible_Cause";

const IQR_MULTIPLIER: f64 = 1.5;

/// Configuration for outlier analysis.
#[derive(Debug, Clone)]
pub struct OutlierConfig {
    /// Numeric columns to scan for out-of-bound values.
    pub numeric_columns: Vec<String>,
    /// Holiday indicator column consulted by the `Weekly_Sales` cause rule.
    pub holiday_col: String,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            numeric_columns: Vec::new(),
            holiday_col: "Holiday_Flag".to_string(),
        }
    }
}

impl OutlierConfig {
    /// Scan the given columns with the default holiday column.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numeric_columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Override the holiday indicator column.
    pub fn holiday_col(mut self, name: impl Into<String>) -> Self {
        self.holiday_col = name.into();
        self
    }
}

/// Detect out-of-bound rows across the configured columns.
///
/// Returns one combined frame: the original schema plus [`OUTLIER_COLUMN`],
/// [`LOWER_BOUND`], [`UPPER_BOUND`] and [`POSSIBLE_CAUSE`]. A source row
/// appears once per column it violates; per-column blocks are concatenated
/// in the order the columns were configured. An empty column list yields a
/// zero-row frame carrying the full derived schema.
///
/// Fails with a schema error if a scanned column (or, when `Weekly_Sales` is
/// scanned, the holiday column) is absent or non-numeric.
pub fn analyze_outliers(frame: &Frame, config: &OutlierConfig) -> Result<Frame> {
    // The holiday column only feeds the Weekly_Sales rule; resolve it up
    // front so a bad schema fails before any rows are emitted.
    let holidays = if config.numeric_columns.iter().any(|c| c == "Weekly_Sales") {
        Some(frame.numeric(&config.holiday_col)?)
    } else {
        None
    };

    let mut blocks = Vec::with_capacity(config.numeric_columns.len().max(1));
    for name in &config.numeric_columns {
        let values = frame.numeric(name)?;

        let q1 = stats::quantile(&values, 0.25);
        let q3 = stats::quantile(&values, 0.75);
        let iqr = q3 - q1;
        let lower = q1 - IQR_MULTIPLIER * iqr;
        let upper = q3 + IQR_MULTIPLIER * iqr;

        let indices: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v < lower || v > upper)
            .map(|(i, _)| i)
            .collect();

        let causes: Vec<String> = indices
            .iter()
            .map(|&i| {
                let holiday = holidays.as_ref().is_some_and(|h| h[i] != 0.0);
                possible_cause(name, values[i], holiday, lower, upper).to_string()
            })
            .collect();

        let n = indices.len();
        let block = frame
            .take_rows(&indices)
            .with_column(OUTLIER_COLUMN, Column::Str(vec![name.clone(); n]))?
            .with_column(LOWER_BOUND, Column::Float(vec![lower; n]))?
            .with_column(UPPER_BOUND, Column::Float(vec![upper; n]))?
            .with_column(POSSIBLE_CAUSE, Column::Str(causes))?;
        blocks.push(block);
    }

    if blocks.is_empty() {
        // Zero rows, full derived schema.
        blocks.push(
            frame
                .take_rows(&[])
                .with_column(OUTLIER_COLUMN, Column::Str(Vec::new()))?
                .with_column(LOWER_BOUND, Column::Float(Vec::new()))?
                .with_column(UPPER_BOUND, Column::Float(Vec::new()))?
                .with_column(POSSIBLE_CAUSE, Column::Str(Vec::new()))?,
        );
    }

    Frame::concat(&blocks)
}

/// Fixed per-column cause rule table, first match wins.
///
/// The `Unknown` branches are unreachable after out-of-bound filtering but
/// are part of the rule table's contract.
fn possible_cause(column: &str, value: f64, holiday: bool, lower: f64, upper: f64) -> &'static str {
    match column {
        "Weekly_Sales" => {
            if holiday {
                "Holiday Week"
            } else if value > upper {
                "High Sales Event"
            } else if value < lower {
                "Low Sales Event"
            } else {
                "Unknown"
            }
        }
        "Temperature" => {
            if value > upper {
                "Unusually Hot"
            } else if value < lower {
                "Unusually Cold"
            } else {
                "Unknown"
            }
        }
        "Unemployment" => {
            if value > upper {
                "High Unemployment"
            } else if value < lower {
                "Low Unemployment"
            } else {
                "Unknown"
            }
        }
        _ => "Outlier",
    }
}
