use plotters::style::RGBAColor;

// =============================================================================
// Scene Graph
// =============================================================================

/// A surface described as primitive drawing commands in pixel space.
/// The backend executes these in order; later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    pub width: u32,
    pub height: u32,
    pub background: RGBAColor,
    pub commands: Vec<DrawCommand>,
}

impl SceneGraph {
    pub fn new(width: u32, height: u32, background: RGBAColor) -> Self {
        Self {
            width,
            height,
            background,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RGBAColor,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: RGBAColor, width: f64) -> Self {
        Self { color, width }
    }
}

/// Horizontal text anchoring relative to the text position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: RGBAColor,
    pub anchor: Anchor,
    /// Rotated a quarter turn counter-clockwise (vertical axis titles)
    pub vertical: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: RGBAColor, anchor: Anchor) -> Self {
        Self {
            size,
            color,
            anchor,
            vertical: false,
        }
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: Stroke,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: Option<RGBAColor>,
        stroke: Option<Stroke>,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: RGBAColor,
        stroke: Option<Stroke>,
    },
    Rect {
        // Top-Left, Bottom-Right
        tl: (f64, f64),
        br: (f64, f64),
        fill: RGBAColor,
        stroke: Option<Stroke>,
    },
    Text {
        text: String,
        pos: (f64, f64),
        style: TextStyle,
    },
}
