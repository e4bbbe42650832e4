//! Radar ("starplot") projection of one record.
//!
//! Each configured attribute gets an axis; axes split the circle evenly,
//! clockwise from the top. A record's values are normalized against the
//! dataset-wide [`DomainMap`] and joined into a closed polygon.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::data::{format_number, Record};
use crate::ir::{Anchor, DrawCommand, SceneGraph, Stroke, TextStyle};
use crate::palette;
use crate::scale::DomainMap;
use crate::RenderOptions;

pub const RINGS: usize = 3;
pub const LABEL_GAP: f64 = 18.0;
pub const VERTEX_RADIUS: f64 = 3.0;
pub const PLACEHOLDER: &str = "Select a point";

/// Center and outer radius of the radar on its surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarLayout {
    pub center: (f64, f64),
    pub radius: f64,
}

impl StarLayout {
    pub fn for_surface(width: f64, height: f64) -> Self {
        Self {
            center: (width / 2.0, height / 2.0 + 10.0),
            radius: width.min(height) * 0.29,
        }
    }

    fn polar(&self, angle: f64, distance: f64) -> (f64, f64) {
        (
            self.center.0 + angle.cos() * distance,
            self.center.1 + angle.sin() * distance,
        )
    }
}

/// One attribute axis and the record's vertex on it
#[derive(Debug, Clone, PartialEq)]
pub struct Spoke {
    pub attribute: String,
    pub label: String,
    pub raw: f64,
    pub norm: f64,
    /// Radians, screen orientation (y down); -π/2 points up
    pub angle: f64,
    pub axis_end: (f64, f64),
    pub label_pos: (f64, f64),
    pub anchor: Anchor,
    pub vertex: (f64, f64),
}

/// Drop a parenthesized unit suffix and the whitespace before it
pub fn strip_unit(name: &str) -> String {
    let Some(open) = name.find('(') else {
        return name.to_string();
    };
    let Some(close) = name.rfind(')').filter(|&c| c > open) else {
        return name.to_string();
    };
    let head = name[..open].trim_end();
    format!("{}{}", head, &name[close + 1..])
}

/// Angle of axis `i` of `n`, starting at the top
pub fn axis_angle(i: usize, n: usize) -> f64 {
    -FRAC_PI_2 + i as f64 * TAU / n as f64
}

/// Normalize and project every attribute of `record` onto the radar
pub fn project(record: &Record, attrs: &[String], domains: &DomainMap, layout: &StarLayout) -> Vec<Spoke> {
    let n = attrs.len();
    attrs
        .iter()
        .enumerate()
        .map(|(i, attr)| {
            let raw = record.number(attr);
            let norm = domains.get(attr).normalize(raw);
            let angle = axis_angle(i, n);
            let cos = angle.cos();
            let anchor = if cos.abs() < 0.1 {
                Anchor::Middle
            } else if cos > 0.0 {
                Anchor::Start
            } else {
                Anchor::End
            };
            Spoke {
                attribute: attr.clone(),
                label: strip_unit(attr),
                raw,
                norm,
                angle,
                axis_end: layout.polar(angle, layout.radius),
                label_pos: layout.polar(angle, layout.radius + LABEL_GAP),
                anchor,
                vertex: layout.polar(angle, norm.max(0.0) * layout.radius),
            }
        })
        .collect()
}

/// Draw the starplot surface from scratch for the current selection
pub fn compile_starplot(
    selection: Option<&Record>,
    attrs: &[String],
    domains: &DomainMap,
    options: &RenderOptions,
) -> SceneGraph {
    let (w, h) = (options.width as f64, options.height as f64);
    let layout = StarLayout::for_surface(w, h);
    let mut scene = SceneGraph::new(options.width, options.height, palette::WHITE);

    let Some(record) = selection else {
        scene.push(DrawCommand::Text {
            text: PLACEHOLDER.to_string(),
            pos: layout.center,
            style: TextStyle::new(12.0, palette::MUTED, Anchor::Middle),
        });
        return scene;
    };

    let spokes = project(record, attrs, domains, &layout);

    for spoke in &spokes {
        scene.push(DrawCommand::Line {
            from: layout.center,
            to: spoke.axis_end,
            stroke: Stroke::new(palette::STAR_AXIS, 1.0),
        });
        scene.push(DrawCommand::Text {
            text: spoke.label.clone(),
            pos: spoke.label_pos,
            style: TextStyle::new(8.0, palette::TEXT, spoke.anchor),
        });
    }

    for ring in 1..=RINGS {
        scene.push(DrawCommand::Circle {
            center: layout.center,
            radius: layout.radius * ring as f64 / RINGS as f64,
            fill: None,
            stroke: Some(Stroke::new(palette::STAR_RING, 1.0)),
        });
    }

    scene.push(DrawCommand::Polygon {
        points: spokes.iter().map(|s| s.vertex).collect(),
        fill: palette::STAR_FILL,
        stroke: Some(Stroke::new(palette::STAR_OUTLINE, 1.5)),
    });

    for spoke in &spokes {
        scene.push(DrawCommand::Circle {
            center: spoke.vertex,
            radius: VERTEX_RADIUS,
            fill: Some(palette::STAR_POINT),
            stroke: Some(Stroke::new(palette::STAR_POINT_OUTLINE, 0.8)),
        });
    }

    scene
}

/// `attr: raw (norm)` lines, for logging the projected values
pub fn describe(spokes: &[Spoke]) -> Vec<String> {
    spokes
        .iter()
        .map(|s| {
            let raw = if s.raw.is_nan() { "N/A".to_string() } else { format_number(s.raw) };
            format!("{}: {} ({:.2})", s.label, raw, s.norm)
        })
        .collect()
}
