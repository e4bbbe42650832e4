//! Marker state and the interaction dispatch table.
//!
//! Every input the chart reacts to is an [`Interaction`]. Dispatching one
//! mutates the chart state (tweens, draw order, selection) and returns the
//! [`Effect`]s the owner has to carry out; nothing here touches the detail
//! panel or the starplot directly.

use plotters::style::RGBColor;
use tracing::{debug, warn};

use crate::animation::{Tween, ENTRANCE_MS, HOVER_MS, TOOLTIP_IN_MS, TOOLTIP_OUT_MS};
use crate::config::ExplorerConfig;
use crate::data::{format_number, Dataset};
use crate::scale::Scales;

pub const HOVER_SCALE: f64 = 1.6;
pub const TOOLTIP_OPACITY: f64 = 0.95;
pub const TOOLTIP_OFFSET: (f64, f64) = (12.0, -28.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    HoverEnter(usize),
    HoverExit(usize),
    Click(usize),
    /// Click that hits no marker
    ClickBackground,
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::HoverEnter(_) => "hover-enter",
            Interaction::HoverExit(_) => "hover-exit",
            Interaction::Click(_) => "click",
            Interaction::ClickBackground => "click-background",
        }
    }

    fn target(&self) -> Option<usize> {
        match self {
            Interaction::HoverEnter(i) | Interaction::HoverExit(i) | Interaction::Click(i) => Some(*i),
            Interaction::ClickBackground => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// The chart surface changed
    Redraw,
    /// Detail panel and starplot must follow the new selection
    SelectionChanged(Option<usize>),
}

/// One record's mark, positioned in plot-area pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub record: usize,
    pub center: (f64, f64),
    pub fill: RGBColor,
    pub rest_radius: f64,
    pub radius: Tween,
    /// Outline darkening, 0 at rest and 1 under the pointer
    pub emphasis: Tween,
    pub selected: bool,
    pub tooltip: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub anchor: (f64, f64),
    pub lines: Vec<String>,
    pub opacity: Tween,
}

#[derive(Debug, Clone)]
pub struct ChartState {
    markers: Vec<Marker>,
    order: Vec<usize>,
    selection: Option<usize>,
    tooltip: Tooltip,
    now: f64,
}

impl ChartState {
    /// Lay out one marker per record; radii start the entrance animation at t = 0
    pub fn new(data: &Dataset, scales: &Scales, config: &ExplorerConfig) -> Self {
        let markers: Vec<Marker> = data
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let x = record.number(&config.x_attr);
                let y = record.number(&config.y_attr);
                let rest = scales.size.map(record.number(&config.size_attr));
                let name = record.text(&config.name_attr);
                Marker {
                    record: idx,
                    center: (scales.x.map(x), scales.y.map(y)),
                    fill: scales.color.color(&record.text(&config.color_attr)),
                    rest_radius: rest,
                    radius: Tween::new(0.0, rest, 0.0, ENTRANCE_MS),
                    emphasis: Tween::still(0.0),
                    selected: false,
                    tooltip: vec![
                        if name.is_empty() { "N/A".to_string() } else { name.into_owned() },
                        format!("{}: {}", config.x_attr, display_number(x)),
                        format!("{}: {}", config.y_attr, display_number(y)),
                    ],
                }
            })
            .collect();

        Self {
            order: (0..markers.len()).collect(),
            markers,
            selection: None,
            tooltip: Tooltip {
                anchor: (0.0, 0.0),
                lines: Vec::new(),
                opacity: Tween::still(0.0),
            },
            now: 0.0,
        }
    }

    pub fn dispatch(&mut self, event: Interaction) -> Vec<Effect> {
        if let Some(idx) = event.target() {
            if idx >= self.markers.len() {
                warn!(event = event.name(), index = idx, markers = self.markers.len(), "no such marker, ignoring");
                return Vec::new();
            }
        }
        debug!(event = event.name(), target = ?event.target(), at = self.now, "dispatch");

        match event {
            Interaction::HoverEnter(idx) => self.hover_enter(idx),
            Interaction::HoverExit(idx) => self.hover_exit(idx),
            Interaction::Click(idx) => self.select(Some(idx)),
            Interaction::ClickBackground => self.select(None),
        }
    }

    fn hover_enter(&mut self, idx: usize) -> Vec<Effect> {
        let now = self.now;
        self.raise(idx);

        let marker = &mut self.markers[idx];
        marker.radius.retarget(now, marker.rest_radius * HOVER_SCALE, HOVER_MS);
        marker.emphasis.retarget(now, 1.0, HOVER_MS);

        self.tooltip.anchor = (
            marker.center.0 + TOOLTIP_OFFSET.0,
            marker.center.1 + TOOLTIP_OFFSET.1,
        );
        self.tooltip.lines = marker.tooltip.clone();
        self.tooltip.opacity.retarget(now, TOOLTIP_OPACITY, TOOLTIP_IN_MS);

        vec![Effect::Redraw]
    }

    fn hover_exit(&mut self, idx: usize) -> Vec<Effect> {
        let now = self.now;
        let marker = &mut self.markers[idx];
        marker.radius.retarget(now, marker.rest_radius, HOVER_MS);
        marker.emphasis.retarget(now, 0.0, HOVER_MS);
        self.tooltip.opacity.retarget(now, 0.0, TOOLTIP_OUT_MS);

        vec![Effect::Redraw]
    }

    fn select(&mut self, idx: Option<usize>) -> Vec<Effect> {
        if let Some(prev) = self.selection.take() {
            self.markers[prev].selected = false;
        }
        if let Some(idx) = idx {
            self.markers[idx].selected = true;
        }
        self.selection = idx;

        vec![Effect::Redraw, Effect::SelectionChanged(idx)]
    }

    /// Move a marker to the end of the draw order so it paints on top
    fn raise(&mut self, idx: usize) {
        self.order.retain(|&i| i != idx);
        self.order.push(idx);
    }

    pub fn advance(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.now += ms;
        }
    }

    /// Jump the clock past every running animation
    pub fn settle(&mut self) {
        let end = self
            .markers
            .iter()
            .flat_map(|m| [m.radius.end(), m.emphasis.end()])
            .chain(std::iter::once(self.tooltip.opacity.end()))
            .fold(self.now, f64::max);
        self.now = end;
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marker indices back to front
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }
}

fn display_number(v: f64) -> String {
    if v.is_nan() { "N/A".to_string() } else { format_number(v) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> ChartState {
        let csv = "\
Name,Type,Retail Price,Horsepower(HP),City Miles Per Gallon
Civic,Sedan,20000,140,30
F-150,Truck,50000,300,15
Beetle,Sedan,18000,110,
";
        let config = ExplorerConfig::default();
        let data = Dataset::from_reader(csv.as_bytes(), &config).unwrap();
        let scales = Scales::build(&data, &config, 570.0, 400.0);
        ChartState::new(&data, &scales, &config)
    }

    #[test]
    fn test_entrance_animation() {
        let mut state = make_state();
        let civic = &state.markers()[0];
        assert_eq!(civic.radius.value_at(0.0), 0.0);
        assert_eq!(civic.rest_radius, 12.0);
        state.advance(ENTRANCE_MS);
        assert_eq!(state.markers()[0].radius.value_at(state.now()), 12.0);
    }

    #[test]
    fn test_missing_size_rests_at_minimum_radius() {
        let mut state = make_state();
        state.settle();
        let beetle = &state.markers()[2];
        assert_eq!(beetle.radius.value_at(state.now()), 3.0);
    }

    #[test]
    fn test_tooltip_lines() {
        let state = make_state();
        assert_eq!(
            state.markers()[1].tooltip,
            vec!["F-150", "Retail Price: 50000", "Horsepower(HP): 300"]
        );
    }

    #[test]
    fn test_hover_enter_raises_and_grows() {
        let mut state = make_state();
        state.settle();
        let effects = state.dispatch(Interaction::HoverEnter(0));
        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(state.order().last(), Some(&0));

        state.advance(HOVER_MS);
        let now = state.now();
        let civic = &state.markers()[0];
        assert!((civic.radius.value_at(now) - 12.0 * HOVER_SCALE).abs() < 1e-9);
        assert_eq!(civic.emphasis.value_at(now), 1.0);
        assert_eq!(state.tooltip().opacity.value_at(now), TOOLTIP_OPACITY);
        assert_eq!(state.tooltip().lines[0], "Civic");
        assert_eq!(
            state.tooltip().anchor,
            (civic.center.0 + 12.0, civic.center.1 - 28.0)
        );
    }

    #[test]
    fn test_hover_exit_restores() {
        let mut state = make_state();
        state.settle();
        state.dispatch(Interaction::HoverEnter(1));
        state.advance(50.0);
        state.dispatch(Interaction::HoverExit(1));
        state.advance(TOOLTIP_OUT_MS);
        let now = state.now();
        let truck = &state.markers()[1];
        assert_eq!(truck.radius.value_at(now), truck.rest_radius);
        assert_eq!(truck.emphasis.value_at(now), 0.0);
        assert_eq!(state.tooltip().opacity.value_at(now), 0.0);
        // Raised markers stay raised
        assert_eq!(state.order().last(), Some(&1));
    }

    #[test]
    fn test_click_moves_selection() {
        let mut state = make_state();
        let effects = state.dispatch(Interaction::Click(0));
        assert_eq!(effects, vec![Effect::Redraw, Effect::SelectionChanged(Some(0))]);
        assert!(state.markers()[0].selected);

        state.dispatch(Interaction::Click(1));
        assert_eq!(state.selection(), Some(1));
        assert!(!state.markers()[0].selected);
        assert!(state.markers()[1].selected);
        assert_eq!(state.markers().iter().filter(|m| m.selected).count(), 1);
    }

    #[test]
    fn test_background_click_clears_selection() {
        let mut state = make_state();
        state.dispatch(Interaction::Click(2));
        let effects = state.dispatch(Interaction::ClickBackground);
        assert_eq!(effects, vec![Effect::Redraw, Effect::SelectionChanged(None)]);
        assert_eq!(state.selection(), None);
        assert!(state.markers().iter().all(|m| !m.selected));
    }

    #[test]
    fn test_unknown_marker_ignored() {
        let mut state = make_state();
        assert!(state.dispatch(Interaction::Click(42)).is_empty());
        assert!(state.dispatch(Interaction::HoverEnter(3)).is_empty());
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_settle_covers_running_tweens() {
        let mut state = make_state();
        state.advance(10.0);
        state.dispatch(Interaction::HoverExit(0));
        state.settle();
        assert_eq!(state.now(), ENTRANCE_MS);
        assert!(state.now() >= 10.0 + TOOLTIP_OUT_MS);
    }

    #[test]
    fn test_advance_ignores_negative() {
        let mut state = make_state();
        state.advance(-5.0);
        state.advance(f64::NAN);
        assert_eq!(state.now(), 0.0);
    }
}
