use plotters::style::RGBColor;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::data::Record;
use crate::palette::to_hex;

pub const PLACEHOLDER: &str = "N/A";

/// Collapse runs of non-alphanumeric characters to `_` and trim the ends
pub fn sanitize_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Slot identifier for a display attribute
pub fn slot_id(attr: &str) -> String {
    format!("d-{}", sanitize_id(attr))
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

/// Text slots of the host detail panel plus the category legend
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    slots: BTreeMap<String, String>,
    legend: Vec<LegendEntry>,
}

impl DetailPanel {
    /// A panel exposing exactly the given slot ids
    pub fn with_slots<I: IntoIterator<Item = String>>(ids: I) -> Self {
        Self {
            slots: ids.into_iter().map(|id| (id, String::new())).collect(),
            legend: Vec::new(),
        }
    }

    /// A panel with one slot per display attribute
    pub fn for_attributes(attrs: &[String]) -> Self {
        Self::with_slots(attrs.iter().map(|a| slot_id(a)))
    }

    /// Write each attribute's value into its slot, or the placeholder when the
    /// value is missing or there is no record. Attributes without a slot are skipped.
    pub fn update(&mut self, record: Option<&Record>, attrs: &[String]) {
        for attr in attrs {
            let Some(slot) = self.slots.get_mut(&slot_id(attr)) else {
                continue;
            };
            *slot = record
                .and_then(|r| r.get(attr))
                .and_then(|v| v.display())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
        }
    }

    pub fn slot(&self, id: &str) -> Option<&str> {
        self.slots.get(id).map(|s| s.as_str())
    }

    pub fn set_legend(&mut self, legend: Vec<LegendEntry>) {
        self.legend = legend;
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Plain-text rendering: legend first, then `attr: value` per slot that exists
    pub fn render_text(&self, attrs: &[String]) -> String {
        let mut out = String::new();
        for entry in &self.legend {
            let label = if entry.label.is_empty() { PLACEHOLDER } else { &entry.label };
            let _ = writeln!(out, "[{}] {}", to_hex(entry.color), label);
        }
        if !self.legend.is_empty() {
            out.push('\n');
        }
        for attr in attrs {
            if let Some(value) = self.slot(&slot_id(attr)) {
                let _ = writeln!(out, "{}: {}", attr, value);
            }
        }
        out
    }
}
