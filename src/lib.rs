// Library exports for starscatter

pub mod config;
pub mod data;
pub mod palette;
pub mod parser;

// Pipeline Modules
pub mod animation;
pub mod chart;
pub mod details;
pub mod explorer;
pub mod graph;
pub mod interaction;
pub mod ir;
pub mod scale;
pub mod starplot;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
pub enum OutputFormat {
    #[serde(rename = "png")]
    Png,
    #[serde(rename = "svg")]
    #[default]
    Svg,
}

/// Size and encoding of one drawing surface
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default, rename = "type")]
    pub format: OutputFormat,
}

fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 500 }

impl RenderOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: OutputFormat::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(default_width(), default_height())
    }
}
