use anyhow::{Context, Result};
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::ExplorerConfig;

/// A single cell after load-time coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    /// The row was shorter than the header
    Missing,
}

impl Value {
    /// Display form; `None` when the value carries nothing to show
    pub fn display(&self) -> Option<String> {
        match self {
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(format_number(*n)),
            Value::Text(s) if s.trim().is_empty() => None,
            Value::Text(s) => Some(s.clone()),
            Value::Missing => None,
        }
    }
}

/// One row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<Vec<String>>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    pub fn get(&self, attr: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == attr)?;
        self.values.get(idx)
    }

    /// Numeric view of an attribute. Anything that is not a number is NaN.
    pub fn number(&self, attr: &str) -> f64 {
        match self.get(attr) {
            Some(Value::Number(n)) => *n,
            _ => f64::NAN,
        }
    }

    /// Text view of an attribute; missing fields read as empty
    pub fn text(&self, attr: &str) -> Cow<'_, str> {
        match self.get(attr) {
            Some(Value::Text(s)) => Cow::Borrowed(s.as_str()),
            Some(value) => Cow::Owned(value.display().unwrap_or_default()),
            None => Cow::Borrowed(""),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// The loaded table plus the category values in first-seen order
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Arc<Vec<String>>,
    pub records: Vec<Record>,
    pub categories: Vec<String>,
}

impl Dataset {
    /// Load a delimited file from disk
    pub fn load(path: &Path, config: &ExplorerConfig) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open data file '{}'", path.display()))?;
        let dataset = Self::from_reader(file, config)
            .with_context(|| format!("Failed to parse data file '{}'", path.display()))?;

        info!(columns = ?dataset.columns, "csv columns");
        match dataset.records.first() {
            Some(first) => info!(row = ?describe(first), "first row"),
            None => info!("data file has no rows"),
        }
        Ok(dataset)
    }

    /// Parse CSV text from any reader, coercing the configured numeric attributes
    pub fn from_reader<R: Read>(reader: R, config: &ExplorerConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .context("Failed to read CSV headers")?
            .iter()
            .map(|h| h.to_string())
            .collect();
        let columns = Arc::new(headers);

        let numeric = config.numeric_attrs();
        let is_numeric: Vec<bool> = columns.iter().map(|c| numeric.contains(c)).collect();

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = result.with_context(|| format!("Malformed CSV row {}", row_idx + 1))?;
            let values = (0..columns.len())
                .map(|i| match row.get(i) {
                    Some(cell) if is_numeric[i] => Value::Number(coerce_number(cell)),
                    Some(cell) => Value::Text(cell.to_string()),
                    None if is_numeric[i] => Value::Number(f64::NAN),
                    None => Value::Missing,
                })
                .collect();
            records.push(Record::new(Arc::clone(&columns), values));
        }

        let mut categories: Vec<String> = Vec::new();
        for record in &records {
            let key = record.text(&config.color_attr);
            if !categories.iter().any(|c| c == key.as_ref()) {
                categories.push(key.into_owned());
            }
        }

        Ok(Self {
            columns,
            records,
            categories,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Numeric column view across all records
    pub fn numbers<'a>(&'a self, attr: &'a str) -> impl Iterator<Item = f64> + 'a {
        self.records.iter().map(move |r| r.number(attr))
    }
}

/// Empty, unparsable or non-finite cells (`inf`, `NaN`) become NaN
pub fn coerce_number(cell: &str) -> f64 {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Integers print without a fractional part
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn describe(record: &Record) -> Vec<(String, String)> {
    record
        .columns()
        .iter()
        .zip(record.values())
        .map(|(c, v)| (c.clone(), v.display().unwrap_or_else(|| "N/A".to_string())))
        .collect()
}
