//! Domains and linear scales
//!
//! A scale maps a numeric domain onto a pixel range. Scales are built per
//! axis per render call and never cached.

use serde::{Deserialize, Serialize};

/// The numeric extent of one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Min/max over the given values, ignoring NaN. `None` when nothing remains.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<Domain>, v| match acc {
                None => Some(Domain::new(v, v)),
                Some(d) => Some(Domain::new(d.min.min(v), d.max.max(v))),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when min equals max (e.g. a single data point)
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }
}

/// Linear mapping from a domain to a pixel range
///
/// Values outside the domain extrapolate; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn from_domain(domain: Domain, range_min: f64, range_max: f64) -> Self {
        Self::new(domain.min, domain.max, range_min, range_max)
    }

    /// Domain span, with a zero span treated as 1
    fn span(&self) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 || span.is_nan() {
            1.0
        } else {
            span
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        self.range_min + (value - self.domain_min) / self.span() * (self.range_max - self.range_min)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let range = self.range_max - self.range_min;
        if range == 0.0 {
            return self.domain_min;
        }
        self.domain_min + (pixel - self.range_min) / range * self.span()
    }

    /// `intervals + 1` evenly spaced domain values from min to max
    pub fn ticks(&self, intervals: usize) -> Vec<f64> {
        let n = intervals.max(1);
        let span = self.domain_max - self.domain_min;
        (0..=n)
            .map(|i| self.domain_min + span * (i as f64 / n as f64))
            .collect()
    }

    pub fn domain(&self) -> Domain {
        Domain::new(self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Build a `value -> pixel` closure over a linear scale
pub fn make_linear_scale(
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
) -> impl Fn(f64) -> f64 {
    let scale = LinearScale::new(domain_min, domain_max, range_min, range_max);
    move |value| scale.map(value)
}
