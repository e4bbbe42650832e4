use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use starscatter::chart::empty_chart;
use starscatter::config::ExplorerConfig;
use starscatter::explorer::Explorer;
use starscatter::{graph, parser, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "starscatter")]
#[command(about = "Explore car records as a scatter plot with a starplot of the selected record", long_about = None)]
struct Args {
    /// Delimited data file with a header row
    data: PathBuf,

    /// JSON file overriding attribute bindings and surface sizes
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interaction script, e.g. 'hover(3) | wait(120) | click(3)'
    #[arg(long)]
    events: Option<String>,

    /// Write the chart here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the starplot surface to this file
    #[arg(long)]
    starplot: Option<PathBuf>,

    /// Write the legend and detail panel as text to this file
    #[arg(long)]
    panel: Option<PathBuf>,

    /// Encoding for every image surface, overriding the config
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Render at this many ms past the last script step instead of settling
    #[arg(long)]
    elapsed: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout may carry image bytes
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ExplorerConfig::from_file(path)?,
        None => ExplorerConfig::default(),
    };
    if let Some(format) = args.format {
        config.chart.format = format.into();
        config.starplot.format = format.into();
    }

    // Parse before loading so a bad script fails fast
    let steps = match &args.events {
        Some(script) => parser::parse_steps(script)?,
        None => Vec::new(),
    };

    let chart_options = config.chart.clone();
    let Some(mut explorer) = Explorer::mount(&args.data, config) else {
        // Leave the sized, empty chart surface behind
        let blank = graph::render(&empty_chart(&chart_options), chart_options.format)
            .context("Failed to render empty chart")?;
        write_chart(args.output.as_deref(), &blank)?;
        std::process::exit(1);
    };

    explorer.run_script(&steps);
    match args.elapsed {
        Some(ms) => explorer.advance(ms),
        None => explorer.settle(),
    }
    info!(at = explorer.now(), selection = ?explorer.selection(), "rendering");

    let chart = graph::render(&explorer.chart_scene(), explorer.config().chart.format)
        .context("Failed to render chart")?;
    write_chart(args.output.as_deref(), &chart)?;

    if let Some(path) = &args.starplot {
        let bytes = graph::render(explorer.starplot_scene(), explorer.config().starplot.format)
            .context("Failed to render starplot")?;
        write_file(path, &bytes)?;
    }

    if let Some(path) = &args.panel {
        write_file(path, explorer.panel_text().as_bytes())?;
    }

    Ok(())
}

/// Chart bytes go to `--output` when given, stdout otherwise
fn write_chart(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => write_file(path, bytes),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(bytes).context("Failed to write chart to stdout")?;
            handle.flush().context("Failed to flush stdout")
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write '{}'", path.display()))
}
