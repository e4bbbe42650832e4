use plotters::style::RGBColor;
use std::collections::BTreeMap;

use crate::config::ExplorerConfig;
use crate::data::Dataset;
use crate::palette::CATEGORY10;

/// Observed (min, max) of one numeric attribute
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extent of the finite values; (0, 0) when there are none
    pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            if v < min { min = v; }
            if v > max { max = v; }
        }
        if min > max {
            Self::default()
        } else {
            Self { min, max }
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position of `raw` within the domain. Degenerate domains and non-finite values give 0.
    pub fn normalize(&self, raw: f64) -> f64 {
        if !raw.is_finite() || self.is_degenerate() {
            return 0.0;
        }
        (raw - self.min) / (self.max - self.min)
    }
}

/// Per-attribute domains, computed once at load and read-only afterwards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainMap {
    domains: BTreeMap<String, Domain>,
}

impl DomainMap {
    pub fn compute(data: &Dataset, attrs: &[String]) -> Self {
        let domains = attrs
            .iter()
            .map(|attr| (attr.clone(), Domain::extent(data.numbers(attr))))
            .collect();
        Self { domains }
    }

    /// Unknown attributes read as the degenerate domain
    pub fn get(&self, attr: &str) -> Domain {
        self.domains.get(attr).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Linear map from a data domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extend the domain outward to round tick boundaries
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = (self.domain.min, self.domain.max);
        if !(start < stop) || count == 0 {
            return self;
        }
        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = Some(step);
        }
        self.domain = Domain::new(start, stop);
        self
    }

    /// NaN reads as the domain minimum. A degenerate domain maps to the range start.
    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let t = self.domain.normalize(value);
        r0 + (r1 - r0) * t
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count)
    }

    /// Tick labels with thousands separators and precision matched to the step
    pub fn tick_labels(&self, count: usize) -> Vec<(f64, String)> {
        let step = tick_step(self.domain.min, self.domain.max, count);
        let precision = if step > 0.0 && step.is_finite() {
            (-step.log10().floor()).max(0.0) as usize
        } else {
            0
        };
        self.ticks(count)
            .into_iter()
            .map(|t| (t, format_grouped(t, precision)))
            .collect()
    }
}

/// Sign-preserving square-root map, for area-proportional marker sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain: Domain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if !value.is_finite() {
            return r0;
        }
        let (d0, d1) = (signed_sqrt(self.domain.min), signed_sqrt(self.domain.max));
        if d0 == d1 {
            return r0;
        }
        r0 + (r1 - r0) * (signed_sqrt(value) - d0) / (d1 - d0)
    }
}

fn signed_sqrt(v: f64) -> f64 {
    if v < 0.0 { -(-v).sqrt() } else { v.sqrt() }
}

/// Category to color, assigned in first-seen order and cycling the palette
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    pub domain: Vec<String>,
    palette: Vec<RGBColor>,
}

impl OrdinalScale {
    pub fn new(domain: Vec<String>, palette: &[RGBColor]) -> Self {
        Self {
            domain,
            palette: palette.to_vec(),
        }
    }

    /// Unknown categories take the slot the next new category would get
    pub fn color(&self, category: &str) -> RGBColor {
        let idx = self
            .domain
            .iter()
            .position(|c| c == category)
            .unwrap_or(self.domain.len());
        self.palette[idx % self.palette.len()]
    }
}

pub const TICK_COUNT: usize = 6;
pub const SIZE_RANGE: (f64, f64) = (3.0, 12.0);

/// The four mapping functions derived from one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub size: SqrtScale,
    pub color: OrdinalScale,
}

impl Scales {
    /// `width`/`height` are the inner plot dimensions in pixels
    pub fn build(data: &Dataset, config: &ExplorerConfig, width: f64, height: f64) -> Self {
        let x = LinearScale::new(Domain::extent(data.numbers(&config.x_attr)), (0.0, width)).nice(10);
        let y = LinearScale::new(Domain::extent(data.numbers(&config.y_attr)), (height, 0.0)).nice(10);
        let size = SqrtScale::new(Domain::extent(data.numbers(&config.size_attr)), SIZE_RANGE);
        let color = OrdinalScale::new(data.categories.clone(), &CATEGORY10);
        Self { x, y, size, color }
    }
}

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Round step between ticks. Negative results encode the inverse of a
/// fractional step so integer arithmetic stays exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    if !(step > 0.0) || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let inc = tick_increment(start, stop, count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let inc = tick_increment(lo, hi, count);
    let mut out = Vec::new();
    if inc > 0.0 {
        let (i0, i1) = ((lo / inc).ceil() as i64, (hi / inc).floor() as i64);
        for i in i0..=i1 {
            out.push(i as f64 * inc);
        }
    } else if inc < 0.0 {
        let inv = -inc;
        let (i0, i1) = ((lo * inv).ceil() as i64, (hi * inv).floor() as i64);
        for i in i0..=i1 {
            out.push(i as f64 / inv);
        }
    }
    if start > stop {
        out.reverse();
    }
    out
}

fn format_grouped(value: f64, precision: usize) -> String {
    let text = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && text.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
