use crate::color::{Rgb, js_round, lerp};
use crate::error::{Error, Result};

/// Number of legend buckets the domain quantizes into.
pub const BUCKET_COUNT: usize = 5;

/// Two-stop linear color scale, d3 `scaleLinear().range([low, high])`
/// semantics: no clamping, and a degenerate domain interpolates at the
/// midpoint.
#[derive(Debug, Clone, Copy)]
pub struct LinearRgbScale {
    domain: (f64, f64),
    range: (Rgb, Rgb),
}

impl LinearRgbScale {
    pub fn new(domain: (f64, f64), range: (Rgb, Rgb)) -> Self {
        Self { domain, range }
    }

    pub fn color(&self, value: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let t = if d0 == d1 {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };
        lerp(self.range.0, self.range.1, t)
    }
}

/// The stepped county scale: evenly spaced bucket thresholds over the
/// observed extent, colored through a continuous linear ramp. A value first
/// steps down to its bucket threshold, then the ramp colors the threshold,
/// so fills take at most [`BUCKET_COUNT`] distinct colors.
#[derive(Debug, Clone)]
pub struct ChoroplethScale {
    buckets: [f64; BUCKET_COUNT],
    linear: LinearRgbScale,
}

impl ChoroplethScale {
    /// Builds the scale from every observed value. Non-finite values are
    /// ignored; an empty set is an error.
    pub fn from_values<I>(values: I, low: Rgb, high: Rgb) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            seen = true;
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        if !seen {
            return Err(Error::EmptyDataset);
        }
        let step = (max - min) / (BUCKET_COUNT - 1) as f64;
        let mut buckets = [0.0; BUCKET_COUNT];
        for (i, bucket) in buckets.iter_mut().enumerate() {
            *bucket = js_round(min + step * i as f64);
        }
        Ok(Self {
            buckets,
            linear: LinearRgbScale::new((min, max), (low, high)),
        })
    }

    pub fn buckets(&self) -> &[f64; BUCKET_COUNT] {
        &self.buckets
    }

    /// The continuous ramp underneath the steps. Legend swatches sample it
    /// at the bucket thresholds.
    pub fn linear(&self) -> &LinearRgbScale {
        &self.linear
    }

    /// The bucket threshold a value steps to: the largest threshold
    /// strictly below the value, or the lowest threshold for anything at or
    /// under it.
    pub fn bucket_value(&self, value: f64) -> f64 {
        let mut stepped = self.buckets[0];
        for &bucket in &self.buckets {
            if bucket < value {
                stepped = bucket;
            }
        }
        stepped
    }

    /// The fill for a county value.
    pub fn color_for(&self, value: f64) -> Rgb {
        self.linear.color(self.bucket_value(value))
    }
}
