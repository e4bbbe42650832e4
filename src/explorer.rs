// Explorer: owns the loaded dataset and every surface derived from it

use anyhow::Result;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::chart::{build_legend, compile_chart, plot_area};
use crate::config::ExplorerConfig;
use crate::data::Dataset;
use crate::details::DetailPanel;
use crate::interaction::{ChartState, Effect, Interaction};
use crate::ir::SceneGraph;
use crate::parser::Step;
use crate::scale::{DomainMap, Scales};
use crate::starplot::{self, compile_starplot, StarLayout};

/// A mounted explorer session.
///
/// Scales and the starplot `DomainMap` are computed once here and never
/// rebuilt; interactions only move the chart state and redraw the panel
/// and starplot from it.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    dataset: Dataset,
    scales: Scales,
    domains: DomainMap,
    chart: ChartState,
    panel: DetailPanel,
    starplot: SceneGraph,
}

impl Explorer {
    pub fn new(dataset: Dataset, config: ExplorerConfig) -> Self {
        let (width, height) = plot_area(&config.chart);
        let scales = Scales::build(&dataset, &config, width, height);
        let domains = DomainMap::compute(&dataset, &config.star_attrs);
        if domains.is_empty() {
            warn!("no starplot attributes configured, starplot stays empty");
        }
        let chart = ChartState::new(&dataset, &scales, &config);

        let mut panel = match &config.panel_slots {
            Some(ids) => DetailPanel::with_slots(ids.iter().cloned()),
            None => DetailPanel::for_attributes(&config.detail_attrs),
        };
        panel.set_legend(build_legend(&scales));
        panel.update(None, &config.detail_attrs);

        let starplot = compile_starplot(None, &config.star_attrs, &domains, &config.starplot);

        info!(
            records = dataset.len(),
            categories = dataset.categories.len(),
            star_axes = domains.len(),
            "explorer ready"
        );

        Self {
            config,
            dataset,
            scales,
            domains,
            chart,
            panel,
            starplot,
        }
    }

    /// Load the data file and build everything from it
    pub fn open(path: &Path, config: ExplorerConfig) -> Result<Self> {
        let dataset = Dataset::load(path, &config)?;
        Ok(Self::new(dataset, config))
    }

    /// Like [`Explorer::open`], but a load failure is reported once and
    /// leaves nothing mounted
    pub fn mount(path: &Path, config: ExplorerConfig) -> Option<Self> {
        match Self::open(path, config) {
            Ok(explorer) => Some(explorer),
            Err(e) => {
                error!(path = %path.display(), "failed to load data: {:#}", e);
                None
            }
        }
    }

    pub fn handle(&mut self, event: Interaction) {
        for effect in self.chart.dispatch(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            // Chart scenes are compiled on demand from the chart state
            Effect::Redraw => {}
            Effect::SelectionChanged(selection) => {
                let record = selection.and_then(|idx| self.dataset.record(idx));
                self.panel.update(record, &self.config.detail_attrs);
                self.starplot =
                    compile_starplot(record, &self.config.star_attrs, &self.domains, &self.config.starplot);

                if let Some(record) = record {
                    let options = &self.config.starplot;
                    let layout = StarLayout::for_surface(options.width as f64, options.height as f64);
                    let spokes = starplot::project(record, &self.config.star_attrs, &self.domains, &layout);
                    for line in starplot::describe(&spokes) {
                        debug!(selection = ?selection, "{}", line);
                    }
                } else {
                    debug!("selection cleared");
                }
            }
        }
    }

    /// Run every step of a parsed interaction script in order
    pub fn run_script(&mut self, steps: &[Step]) {
        for step in steps {
            match *step {
                Step::Event(event) => self.handle(event),
                Step::Wait(ms) => self.advance(ms),
            }
        }
    }

    pub fn advance(&mut self, ms: f64) {
        self.chart.advance(ms);
    }

    pub fn settle(&mut self) {
        self.chart.settle();
    }

    pub fn now(&self) -> f64 {
        self.chart.now()
    }

    pub fn selection(&self) -> Option<usize> {
        self.chart.selection()
    }

    /// The chart as it looks at the current clock time
    pub fn chart_scene(&self) -> SceneGraph {
        compile_chart(&self.chart, &self.scales, &self.config)
    }

    pub fn starplot_scene(&self) -> &SceneGraph {
        &self.starplot
    }

    pub fn panel(&self) -> &DetailPanel {
        &self.panel
    }

    pub fn panel_text(&self) -> String {
        self.panel.render_text(&self.config.detail_attrs)
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn domains(&self) -> &DomainMap {
        &self.domains
    }
}
