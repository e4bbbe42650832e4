use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::RenderOptions;

/// Column bindings and surface layout for one explorer session.
///
/// Every attribute is an exact header name from the data file. A name that
/// matches no column is not an error: the attribute simply reads as missing
/// (NaN for numeric roles) on every record.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Numeric attribute mapped to horizontal position
    pub x_attr: String,
    /// Numeric attribute mapped to vertical position
    pub y_attr: String,
    /// Categorical attribute mapped to fill color
    pub color_attr: String,
    /// Numeric attribute mapped to marker area
    pub size_attr: String,
    /// Attribute shown as the tooltip heading
    pub name_attr: String,
    /// Numeric coercions beyond the positional, size and starplot roles
    pub extra_numeric: Vec<String>,
    /// Detail panel fields, in display order
    pub detail_attrs: Vec<String>,
    /// Starplot axes, in clockwise order from the top
    pub star_attrs: Vec<String>,
    pub title: String,
    pub chart: RenderOptions,
    pub starplot: RenderOptions,
    /// Slot ids present in the host panel. `None` means every detail
    /// attribute has a slot.
    pub panel_slots: Option<Vec<String>>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            x_attr: "Retail Price".to_string(),
            y_attr: "Horsepower(HP)".to_string(),
            color_attr: "Type".to_string(),
            size_attr: "City Miles Per Gallon".to_string(),
            name_attr: "Name".to_string(),
            extra_numeric: strings(&["Engine Size (l)"]),
            detail_attrs: strings(&[
                "Name",
                "Type",
                "Retail Price",
                "Horsepower(HP)",
                "Engine Size (l)",
                "City Miles Per Gallon",
                "Highway Miles Per Gallon",
            ]),
            star_attrs: strings(&[
                "Retail Price",
                "Dealer Cost",
                "Horsepower(HP)",
                "Engine Size (l)",
                "City MPG",
                "Highway MPG",
            ]),
            title: "Car models: Horsepower vs. Price".to_string(),
            chart: RenderOptions::new(800, 500),
            starplot: RenderOptions::new(320, 300),
            panel_slots: None,
        }
    }
}

impl ExplorerConfig {
    /// Load a JSON config file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse config JSON")
    }

    /// Every attribute coerced to a number at load time, without duplicates
    pub fn numeric_attrs(&self) -> Vec<String> {
        let mut attrs: Vec<String> = Vec::new();
        let candidates = [&self.x_attr, &self.y_attr, &self.size_attr]
            .into_iter()
            .chain(self.extra_numeric.iter())
            .chain(self.star_attrs.iter());
        for attr in candidates {
            if !attrs.contains(attr) {
                attrs.push(attr.clone());
            }
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;

    #[test]
    fn test_defaults_bind_car_columns() {
        let config = ExplorerConfig::default();
        assert_eq!(config.x_attr, "Retail Price");
        assert_eq!(config.y_attr, "Horsepower(HP)");
        assert_eq!(config.star_attrs.len(), 6);
        assert_eq!(config.chart.width, 800);
        assert_eq!(config.chart.height, 500);
    }

    #[test]
    fn test_numeric_attrs_deduplicated() {
        let config = ExplorerConfig::default();
        let attrs = config.numeric_attrs();
        let price = attrs.iter().filter(|a| *a == "Retail Price").count();
        assert_eq!(price, 1);
        assert!(attrs.contains(&"Engine Size (l)".to_string()));
        assert!(attrs.contains(&"Dealer Cost".to_string()));
        assert!(!attrs.contains(&"Type".to_string()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json(
            r#"{ "x_attr": "Weight", "starplot": { "width": 200, "type": "png" } }"#,
        )
        .unwrap();
        assert_eq!(config.x_attr, "Weight");
        assert_eq!(config.y_attr, "Horsepower(HP)");
        assert_eq!(config.starplot.width, 200);
        assert_eq!(config.starplot.height, 500);
        assert_eq!(config.starplot.format, OutputFormat::Png);
    }

    #[test]
    fn test_invalid_json() {
        let result = ExplorerConfig::from_json("{ x_attr: ");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = ExplorerConfig::from_file(Path::new("does/not/exist.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
