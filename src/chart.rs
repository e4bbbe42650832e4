use crate::config::ExplorerConfig;
use crate::details::LegendEntry;
use crate::interaction::ChartState;
use crate::ir::{Anchor, DrawCommand, SceneGraph, Stroke, TextStyle};
use crate::palette;
use crate::scale::{Scales, TICK_COUNT};
use crate::RenderOptions;

/// Space around the plot area for axes, labels and the title
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin { top: 40.0, right: 150.0, bottom: 60.0, left: 80.0 };
pub const TICK_SIZE: f64 = 6.0;

const TICK_FONT: f64 = 10.0;
const LABEL_FONT: f64 = 12.0;
const TITLE_FONT: f64 = 16.0;
const TOOLTIP_FONT: f64 = 12.0;
const TOOLTIP_LINE: f64 = 15.0;

/// Inner (width, height) of the plot area for a surface
pub fn plot_area(options: &RenderOptions) -> (f64, f64) {
    (
        (options.width as f64 - MARGIN.left - MARGIN.right).max(0.0),
        (options.height as f64 - MARGIN.top - MARGIN.bottom).max(0.0),
    )
}

/// One swatch per category, in color-scale order
pub fn build_legend(scales: &Scales) -> Vec<LegendEntry> {
    scales
        .color
        .domain
        .iter()
        .map(|category| LegendEntry {
            label: category.clone(),
            color: scales.color.color(category),
        })
        .collect()
}

/// A sized, background-only chart surface, used when there is no data to draw
pub fn empty_chart(options: &RenderOptions) -> SceneGraph {
    SceneGraph::new(options.width, options.height, palette::WHITE)
}

/// Compile the main chart at the state's current clock time
pub fn compile_chart(state: &ChartState, scales: &Scales, config: &ExplorerConfig) -> SceneGraph {
    let options = &config.chart;
    let (width, height) = plot_area(options);
    let at = |x: f64, y: f64| (x + MARGIN.left, y + MARGIN.top);
    let mut scene = SceneGraph::new(options.width, options.height, palette::WHITE);

    // Gridlines at the x ticks, behind everything else
    for tick in scales.x.ticks(TICK_COUNT) {
        let px = scales.x.map(tick);
        scene.push(DrawCommand::Line {
            from: at(px, 0.0),
            to: at(px, height),
            stroke: Stroke::new(palette::GRID, 1.0),
        });
    }

    // X axis
    let axis = Stroke::new(palette::AXIS, 1.0);
    scene.push(DrawCommand::Line { from: at(0.0, height), to: at(width, height), stroke: axis });
    for (tick, label) in scales.x.tick_labels(TICK_COUNT) {
        let px = scales.x.map(tick);
        scene.push(DrawCommand::Line {
            from: at(px, height),
            to: at(px, height + TICK_SIZE),
            stroke: axis,
        });
        scene.push(DrawCommand::Text {
            text: label,
            pos: at(px, height + TICK_SIZE + 10.0),
            style: TextStyle::new(TICK_FONT, palette::AXIS, Anchor::Middle),
        });
    }

    // Y axis
    scene.push(DrawCommand::Line { from: at(0.0, 0.0), to: at(0.0, height), stroke: axis });
    for (tick, label) in scales.y.tick_labels(TICK_COUNT) {
        let py = scales.y.map(tick);
        scene.push(DrawCommand::Line {
            from: at(-TICK_SIZE, py),
            to: at(0.0, py),
            stroke: axis,
        });
        scene.push(DrawCommand::Text {
            text: label,
            pos: at(-TICK_SIZE - 3.0, py),
            style: TextStyle::new(TICK_FONT, palette::AXIS, Anchor::End),
        });
    }

    // Axis titles and chart title
    scene.push(DrawCommand::Text {
        text: config.x_attr.clone(),
        pos: at(width / 2.0, height + 40.0),
        style: TextStyle::new(LABEL_FONT, palette::AXIS, Anchor::Middle),
    });
    scene.push(DrawCommand::Text {
        text: config.y_attr.clone(),
        pos: at(-60.0, height / 2.0),
        style: TextStyle::new(LABEL_FONT, palette::AXIS, Anchor::Middle).vertical(),
    });
    scene.push(DrawCommand::Text {
        text: config.title.clone(),
        pos: at(width / 2.0, -10.0),
        style: TextStyle::new(TITLE_FONT, palette::AXIS, Anchor::Middle),
    });

    // Markers, back to front
    let now = state.now();
    for &idx in state.order() {
        let marker = &state.markers()[idx];
        let outline = if marker.selected {
            Stroke::new(palette::MARKER_OUTLINE_SELECTED, 2.0)
        } else {
            let t = marker.emphasis.value_at(now);
            Stroke::new(palette::lerp(palette::MARKER_OUTLINE, palette::MARKER_OUTLINE_HOVER, t), 1.0)
        };
        scene.push(DrawCommand::Circle {
            center: at(marker.center.0, marker.center.1),
            radius: marker.radius.value_at(now).max(0.0),
            fill: Some(palette::opaque(marker.fill)),
            stroke: Some(outline),
        });
    }

    // Tooltip overlay
    let tooltip = state.tooltip();
    let opacity = tooltip.opacity.value_at(now);
    if opacity > 0.0 && !tooltip.lines.is_empty() {
        let chars = tooltip.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let (x, y) = at(tooltip.anchor.0, tooltip.anchor.1);
        let box_w = chars as f64 * TOOLTIP_FONT * 0.55 + 12.0;
        let box_h = tooltip.lines.len() as f64 * TOOLTIP_LINE + 8.0;
        scene.push(DrawCommand::Rect {
            tl: (x, y),
            br: (x + box_w, y + box_h),
            fill: palette::fade(palette::TOOLTIP_FILL, opacity),
            stroke: Some(Stroke::new(palette::fade(palette::TOOLTIP_BORDER, opacity), 1.0)),
        });
        for (i, line) in tooltip.lines.iter().enumerate() {
            scene.push(DrawCommand::Text {
                text: line.clone(),
                pos: (x + 6.0, y + 4.0 + TOOLTIP_LINE * (i as f64 + 0.5)),
                style: TextStyle::new(TOOLTIP_FONT, palette::fade(palette::TEXT, opacity), Anchor::Start),
            });
        }
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::interaction::Interaction;

    fn setup() -> (ChartState, Scales, ExplorerConfig) {
        let csv = "\
Name,Type,Retail Price,Horsepower(HP),City Miles Per Gallon
Civic,Sedan,20000,140,30
F-150,Truck,50000,300,15
";
        let config = ExplorerConfig::default();
        let data = Dataset::from_reader(csv.as_bytes(), &config).unwrap();
        let (w, h) = plot_area(&config.chart);
        let scales = Scales::build(&data, &config, w, h);
        let state = ChartState::new(&data, &scales, &config);
        (state, scales, config)
    }

    fn marker_circles(scene: &SceneGraph) -> Vec<((f64, f64), f64, Stroke)> {
        scene
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, stroke: Some(s), fill: Some(_) } => Some((*center, *radius, *s)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plot_area() {
        assert_eq!(plot_area(&RenderOptions::new(800, 500)), (570.0, 400.0));
        assert_eq!(plot_area(&RenderOptions::new(100, 50)), (0.0, 0.0));
    }

    #[test]
    fn test_empty_chart_is_sized_and_blank() {
        let scene = empty_chart(&RenderOptions::new(640, 400));
        assert_eq!((scene.width, scene.height), (640, 400));
        assert!(scene.commands.is_empty());
    }

    #[test]
    fn test_legend_first_seen_order() {
        let (_, scales, _) = setup();
        let legend = build_legend(&scales);
        let labels: Vec<_> = legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Sedan", "Truck"]);
        assert_eq!(legend[0].color, palette::CATEGORY10[0]);
    }

    #[test]
    fn test_markers_positioned_by_scales() {
        let (mut state, scales, config) = setup();
        state.settle();
        let scene = compile_chart(&state, &scales, &config);
        let circles = marker_circles(&scene);
        assert_eq!(circles.len(), 2);
        // Cheapest car at the left edge, priciest at the right
        assert_eq!(circles[0].0 .0, MARGIN.left);
        assert_eq!(circles[1].0 .0, MARGIN.left + 570.0);
        assert_eq!(circles[0].1, 12.0);
        assert_eq!(circles[1].1, 3.0);
    }

    #[test]
    fn test_entrance_starts_at_zero_radius() {
        let (state, scales, config) = setup();
        let scene = compile_chart(&state, &scales, &config);
        assert!(marker_circles(&scene).iter().all(|(_, r, _)| *r == 0.0));
    }

    #[test]
    fn test_axes_title_and_grid() {
        let (state, scales, config) = setup();
        let scene = compile_chart(&state, &scales, &config);
        let texts: Vec<_> = scene.texts().collect();
        assert!(texts.contains(&"Car models: Horsepower vs. Price"));
        assert!(texts.contains(&"Retail Price"));
        assert!(texts.contains(&"Horsepower(HP)"));
        assert!(texts.contains(&"20,000"));
        assert!(texts.contains(&"50,000"));

        let grid = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { stroke, .. } if stroke.color == palette::GRID))
            .count();
        assert_eq!(grid, scales.x.ticks(TICK_COUNT).len());
    }

    #[test]
    fn test_hovered_marker_drawn_last_with_tooltip() {
        let (mut state, scales, config) = setup();
        state.settle();
        state.dispatch(Interaction::HoverEnter(0));
        state.settle();
        let scene = compile_chart(&state, &scales, &config);

        let circles = marker_circles(&scene);
        let last = circles.last().unwrap();
        assert_eq!(last.0 .0, MARGIN.left);
        assert!((last.1 - 12.0 * 1.6).abs() < 1e-9);
        assert_eq!(last.2.color, palette::MARKER_OUTLINE_HOVER);

        assert!(scene.commands.iter().any(|c| matches!(c, DrawCommand::Rect { .. })));
        assert!(scene.texts().any(|t| t == "Retail Price: 20000"));
    }

    #[test]
    fn test_selected_marker_outline() {
        let (mut state, scales, config) = setup();
        state.dispatch(Interaction::Click(1));
        state.settle();
        let scene = compile_chart(&state, &scales, &config);
        let circles = marker_circles(&scene);
        assert_eq!(circles[1].2.color, palette::MARKER_OUTLINE_SELECTED);
        assert_eq!(circles[0].2.color, palette::MARKER_OUTLINE);
    }
}
