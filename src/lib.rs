//! # retail-signals
//!
//! Exploratory statistical annotation for retail sales time series.
//!
//! Two independent, stateless routines operate over an in-memory
//! [`Frame`](core::Frame) of (Store, Week) observations:
//!
//! - [`outlier::analyze_outliers`] flags rows outside per-column IQR bounds
//!   and attributes a heuristic cause to each.
//! - [`weeks::tag_important_weeks`] augments the dataset with per-store
//!   sales-spike, holiday, and year-end flags plus a combined reason.
//!
//! Both read their input without mutating it and return new frames; there is
//! no shared state between calls.
//!
//! # Example
//!
//! ```
//! use retail_signals::prelude::*;
//!
//! let frame = Frame::builder()
//!     .int("Store", vec![1, 1, 1, 1, 1])
//!     .int("Week", vec![48, 49, 50, 51, 52])
//!     .float("Weekly_Sales", vec![100.0, 102.0, 101.0, 99.0, 180.0])
//!     .int("Holiday_Flag", vec![0, 0, 0, 0, 1])
//!     .build()?;
//!
//! let tagged = tag_important_weeks(&frame, &WeekTagConfig::default())?;
//! assert_eq!(tagged.n_rows(), frame.n_rows());
//!
//! let outliers = analyze_outliers(&frame, &OutlierConfig::columns(["Weekly_Sales"]))?;
//! # let _ = outliers;
//! # Ok::<(), AnnotateError>(())
//! ```

pub mod calendar;
pub mod core;
pub mod error;
pub mod outlier;
pub mod stats;
pub mod weeks;

pub use error::{AnnotateError, Result};

pub mod prelude {
    pub use crate::core::{Column, Frame, FrameBuilder};
    pub use crate::error::{AnnotateError, Result};
    pub use crate::outlier::{analyze_outliers, OutlierConfig};
    pub use crate::weeks::{tag_important_weeks, ThresholdMethod, WeekTagConfig};
}
