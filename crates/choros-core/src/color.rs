use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// JS `Math.round`: ties round up, including for negatives.
pub(crate) fn js_round(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// An sRGB color with float channels in 0..=255, the way d3-color carries
/// them. Interpolation stays in floats; rounding and clamping happen at
/// display time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` and the keywords `white`
    /// and `black`.
    pub fn parse(value: &str) -> Result<Self> {
        let v = value.trim();
        if let Some(hex) = v.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::Color {
                value: value.to_string(),
            });
        }
        if let Some(body) = v.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            return parse_rgb_body(body).ok_or_else(|| Error::Color {
                value: value.to_string(),
            });
        }
        match v.to_ascii_lowercase().as_str() {
            "white" => Ok(Rgb::WHITE),
            "black" => Ok(Rgb::BLACK),
            _ => Err(Error::Color {
                value: value.to_string(),
            }),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
            Some(Rgb::new(
                (digit(0)? * 17) as f64,
                (digit(1)? * 17) as f64,
                (digit(2)? * 17) as f64,
            ))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(
                pair(0)? as f64,
                pair(2)? as f64,
                pair(4)? as f64,
            ))
        }
        _ => None,
    }
}

fn parse_rgb_body(body: &str) -> Option<Rgb> {
    let mut channels = body.split(',').map(|part| part.trim().parse::<f64>().ok());
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

impl fmt::Display for Rgb {
    /// d3-color serialization: `rgb(r, g, b)` with rounded, clamped
    /// channels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

fn channel(v: f64) -> i64 {
    js_round(v).clamp(0.0, 255.0) as i64
}

/// Linear per-channel interpolation, the d3-interpolate rgb default.
pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb {
        r: a.r + (b.r - a.r) * t,
        g: a.g + (b.g - a.g) * t,
        b: a.b + (b.b - a.b) * t,
    }
}
