//! Frame data structure for representing tabular observations.
//!
//! A [`Frame`] holds named, equal-length, typed columns in column-major
//! layout. Rows are immutable once built; annotation routines return new
//! frames with derived columns appended.

use crate::error::{AnnotateError, Result};
use std::collections::HashMap;

/// Typed column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating-point values (e.g. `Weekly_Sales`, `Temperature`).
    Float(Vec<f64>),
    /// Integer values (e.g. `Holiday_Flag`, `Week`, integer store ids).
    Int(Vec<i64>),
    /// Categorical string values (e.g. store identifiers).
    Str(Vec<String>),
}

impl Column {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Int(_) => "int",
            Column::Str(_) => "str",
        }
    }

    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Column::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Column::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&[String]> {
        match self {
            Column::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Widen to `f64` values. Float columns are copied, integer columns are
    /// cast. String columns are not numeric.
    pub fn to_numeric(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float(v) => Some(v.clone()),
            Column::Int(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Column::Str(_) => None,
        }
    }

    /// Subset of rows at the given indices, preserving index order.
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Float(v) => Column::Float(indices.iter().map(|&i| v[i]).collect()),
            Column::Int(v) => Column::Int(indices.iter().map(|&i| v[i]).collect()),
            Column::Str(v) => Column::Str(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    fn extend_from(&mut self, other: &Column) -> bool {
        match (self, other) {
            (Column::Float(a), Column::Float(b)) => {
                a.extend_from_slice(b);
                true
            }
            (Column::Int(a), Column::Int(b)) => {
                a.extend_from_slice(b);
                true
            }
            (Column::Str(a), Column::Str(b)) => {
                a.extend_from_slice(b);
                true
            }
            _ => false,
        }
    }
}

/// A table of named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

/// Builder for constructing frames with validated schemas.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column of any type.
    pub fn column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.names.push(name.into());
        self.columns.push(column);
        self
    }

    pub fn float(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.column(name, Column::Float(values))
    }

    pub fn int(self, name: impl Into<String>, values: Vec<i64>) -> Self {
        self.column(name, Column::Int(values))
    }

    pub fn text(self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.column(name, Column::Str(values))
    }

    /// Validate lengths and name uniqueness, producing the frame.
    pub fn build(self) -> Result<Frame> {
        let mut seen: HashMap<&str, ()> = HashMap::with_capacity(self.names.len());
        for name in &self.names {
            if seen.insert(name.as_str(), ()).is_some() {
                return Err(AnnotateError::DuplicateColumn(name.clone()));
            }
        }
        if let Some(first) = self.columns.first() {
            let expected = first.len();
            for (name, column) in self.names.iter().zip(&self.columns) {
                if column.len() != expected {
                    return Err(AnnotateError::LengthMismatch {
                        name: name.clone(),
                        expected,
                        got: column.len(),
                    });
                }
            }
        }
        Ok(Frame {
            names: self.names,
            columns: self.columns,
        })
    }
}

impl Frame {
    pub fn builder() -> FrameBuilder {
        FrameBuilder::new()
    }

    /// Number of rows (zero for a frame with no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Look up a column by name, failing with a schema error if absent.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| AnnotateError::MissingColumn(name.to_string()))
    }

    /// Extract a column as `f64` values, failing if absent or non-numeric.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.require(name)?;
        column.to_numeric().ok_or(AnnotateError::ColumnType {
            name: name.to_string(),
            expected: "numeric",
        })
    }

    /// Append a derived column, consuming and returning the frame.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Frame> {
        let name = name.into();
        if self.contains(&name) {
            return Err(AnnotateError::DuplicateColumn(name));
        }
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(AnnotateError::LengthMismatch {
                name,
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(self)
    }

    /// New frame containing the rows at `indices`, in index order. Indices
    /// may repeat; out-of-range indices panic as with slice indexing.
    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        Frame {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
        }
    }

    /// Project a subset of columns, in the requested order.
    pub fn select(&self, names: &[&str]) -> Result<Frame> {
        let mut builder = Frame::builder();
        for &name in names {
            builder = builder.column(name, self.require(name)?.clone());
        }
        builder.build()
    }

    /// Vertically concatenate frames sharing an identical schema.
    pub fn concat(frames: &[Frame]) -> Result<Frame> {
        let Some((first, rest)) = frames.split_first() else {
            return Err(AnnotateError::SchemaMismatch(
                "cannot concatenate zero frames".to_string(),
            ));
        };
        let mut result = first.clone();
        for frame in rest {
            if frame.names != result.names {
                return Err(AnnotateError::SchemaMismatch(format!(
                    "expected columns {:?}, got {:?}",
                    result.names, frame.names
                )));
            }
            for (target, source) in result.columns.iter_mut().zip(&frame.columns) {
                if !target.extend_from(source) {
                    return Err(AnnotateError::SchemaMismatch(format!(
                        "column type {} does not match {}",
                        source.type_name(),
                        target.type_name()
                    )));
                }
            }
        }
        Ok(result)
    }

    /// Partition row indices by the values of a categorical key column.
    ///
    /// Groups are returned in first-appearance order; indices within each
    /// group keep their original order. The key column must be `Int` or
    /// `Str` — grouping on floats is rejected.
    pub fn group_indices(&self, name: &str) -> Result<Vec<(String, Vec<usize>)>> {
        let column = self.require(name)?;
        let keys: Vec<String> = match column {
            Column::Int(v) => v.iter().map(|k| k.to_string()).collect(),
            Column::Str(v) => v.clone(),
            Column::Float(_) => {
                return Err(AnnotateError::ColumnType {
                    name: name.to_string(),
                    expected: "categorical (int or str)",
                })
            }
        };

        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (i, key) in keys.iter().enumerate() {
            match positions.get(key.as_str()) {
                Some(&p) => groups[p].1.push(i),
                None => {
                    positions.insert(key.as_str(), groups.len());
                    groups.push((key.clone(), vec![i]));
                }
            }
        }
        Ok(groups)
    }
}
