//! Fixed colors used by the chart, starplot and legend.

use plotters::style::{RGBAColor, RGBColor};

/// The ten-color categorical scheme ("category10")
pub const CATEGORY10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

pub const WHITE: RGBAColor = RGBAColor(255, 255, 255, 1.0);
pub const AXIS: RGBAColor = RGBAColor(0, 0, 0, 1.0);
pub const GRID: RGBAColor = RGBAColor(0xe6, 0xe6, 0xe6, 1.0);
pub const TEXT: RGBAColor = RGBAColor(0x22, 0x33, 0x44, 1.0);
pub const MUTED: RGBAColor = RGBAColor(0x88, 0x88, 0x88, 1.0);

pub const MARKER_OUTLINE: RGBAColor = RGBAColor(0, 0, 0, 0.18);
pub const MARKER_OUTLINE_HOVER: RGBAColor = RGBAColor(0x11, 0x11, 0x11, 1.0);
pub const MARKER_OUTLINE_SELECTED: RGBAColor = RGBAColor(0, 0, 0, 1.0);

pub const TOOLTIP_FILL: RGBAColor = RGBAColor(255, 255, 255, 1.0);
pub const TOOLTIP_BORDER: RGBAColor = RGBAColor(0x99, 0x99, 0x99, 1.0);

pub const STAR_AXIS: RGBAColor = RGBAColor(0xe0, 0xe6, 0xea, 1.0);
pub const STAR_RING: RGBAColor = RGBAColor(0xf0, 0xf4, 0xf7, 1.0);
pub const STAR_FILL: RGBAColor = RGBAColor(255, 153, 51, 0.55);
pub const STAR_OUTLINE: RGBAColor = RGBAColor(200, 100, 20, 0.9);
pub const STAR_POINT: RGBAColor = RGBAColor(0xf5, 0x9c, 0x2a, 1.0);
pub const STAR_POINT_OUTLINE: RGBAColor = RGBAColor(0x82, 0x4e, 0x05, 1.0);

pub fn opaque(color: RGBColor) -> RGBAColor {
    RGBAColor(color.0, color.1, color.2, 1.0)
}

/// Scale the alpha channel, e.g. for fading overlays
pub fn fade(color: RGBAColor, opacity: f64) -> RGBAColor {
    RGBAColor(color.0, color.1, color.2, color.3 * opacity.clamp(0.0, 1.0))
}

/// Linear blend between two colors, `t` in [0, 1]
pub fn lerp(from: RGBAColor, to: RGBAColor, t: f64) -> RGBAColor {
    if !(t > 0.0) {
        return from;
    }
    if t >= 1.0 {
        return to;
    }
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBAColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
        from.3 + (to.3 - from.3) * t,
    )
}

/// `#rrggbb` form used in the legend
pub fn to_hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}
