//! SVG serialization for [`ChoroplethScene`].

use std::fmt::Write as _;

use crate::scene::{
    ChoroplethScene, LEGEND_LABEL_X, LEGEND_SWATCH_HEIGHT, LEGEND_SWATCH_WIDTH, LEGEND_TICK_LENGTH,
    TOOLTIP_FIRST_LINE_Y, TOOLTIP_HEIGHT, TOOLTIP_LINE_SPACING, TOOLTIP_LINE_X, TOOLTIP_RADIUS,
    VIEWBOX_HEIGHT_FACTOR,
};

/// Formats a coordinate the way JS stringifies numbers in attribute
/// positions: integral values print without a fraction, `-0` prints as `0`,
/// and near-integer noise within `1e-6` snaps to the integer.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let v = if v.abs() < 1e-9 { 0.0 } else { v };
    let snapped = v.round();
    let v = if (v - snapped).abs() < 1e-6 { snapped } else { v };
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

/// Path-data coordinate formatting: round half-up to three fractional
/// digits, then print like [`fmt`].
pub(crate) fn fmt_path(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    fmt((v * 1000.0 + 0.5).floor() / 1000.0)
}

/// `Number#toString` parity for data attributes, via `ryu-js`. Unlike
/// [`fmt`], fractional values keep the exact shortest JS representation
/// (`45.2` stays `45.2`, `2.5999999999999996` stays that way).
pub(crate) fn fmt_js(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    // JS stringifies -0 as "0".
    let v = if v == 0.0 { 0.0 } else { v };
    let mut buffer = ryu_js::Buffer::new();
    buffer.format_finite(v).to_string()
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

impl ChoroplethScene {
    /// Serializes the scene, current hover and tooltip state included. The
    /// output is a standalone document: counties inside `g#graph`, then the
    /// two mesh borders, then the legend and the tooltip overlay.
    pub fn to_svg(&self) -> String {
        let options = self.options();
        let mut out = String::new();
        let _ = writeln!(
            &mut out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            fmt(options.width),
            fmt(options.height),
            fmt(options.width),
            fmt(options.height * VIEWBOX_HEIGHT_FACTOR),
        );
        let _ = writeln!(
            &mut out,
            r#"<g id="graph" transform="translate({}, {})">"#,
            fmt(options.padding_x),
            fmt(options.padding_top),
        );

        out.push_str("<g>\n");
        for county in self.counties() {
            let _ = writeln!(
                &mut out,
                r#"<path class="county" data-fips="{}" data-education="{}" data-state="{}" data-county="{}" fill="{}" d="{}"/>"#,
                county.fips,
                fmt_js(county.education),
                escape_xml(&county.state),
                escape_xml(&county.name),
                escape_xml(&county.fill),
                county.path,
            );
        }
        out.push_str("</g>\n");

        for border in [self.state_borders(), self.nation_border()] {
            let _ = writeln!(
                &mut out,
                r#"<path fill="none" stroke="{}" d="{}"/>"#,
                escape_xml(&options.border_stroke),
                border,
            );
        }
        out.push_str("</g>\n");

        let legend = self.legend();
        let _ = writeln!(
            &mut out,
            r#"<g id="legend" transform="translate({}, {})">"#,
            fmt(legend.x),
            fmt(legend.y),
        );
        for swatch in &legend.swatches {
            let _ = writeln!(
                &mut out,
                r#"<rect width="{}" height="{}" y="{}" fill="{}"/>"#,
                fmt(LEGEND_SWATCH_WIDTH),
                fmt(LEGEND_SWATCH_HEIGHT),
                fmt(swatch.y),
                escape_xml(&swatch.fill),
            );
        }
        for label in &legend.labels {
            let _ = writeln!(
                &mut out,
                r#"<text x="{}" y="{}" fill="black">{}</text>"#,
                fmt(LEGEND_LABEL_X),
                fmt(label.y),
                escape_xml(&label.text),
            );
        }
        for &y in &legend.tick_ys {
            let _ = writeln!(
                &mut out,
                r#"<line x1="0" x2="{}" y1="{}" y2="{}" stroke="black"/>"#,
                fmt(LEGEND_TICK_LENGTH),
                fmt(y),
                fmt(y),
            );
        }
        out.push_str("</g>\n");

        let tooltip = self.tooltip();
        let display = if tooltip.visible { "block" } else { "none" };
        let _ = write!(
            &mut out,
            r#"<g id="tooltip" style="display: {}" transform="translate({}, {})""#,
            display,
            fmt(tooltip.x),
            fmt(tooltip.y),
        );
        if let Some(education) = tooltip.education {
            let _ = write!(&mut out, r#" data-education="{}""#, fmt_js(education));
        }
        out.push_str(">\n");
        let _ = writeln!(
            &mut out,
            r#"<rect width="{}" height="{}" rx="{}" ry="{}" fill="rgba(255, 255, 255, 0.9)" stroke="#dde6f5"/>"#,
            fmt(tooltip.width),
            fmt(TOOLTIP_HEIGHT),
            fmt(TOOLTIP_RADIUS),
            fmt(TOOLTIP_RADIUS),
        );
        for (i, line) in tooltip.lines.iter().enumerate() {
            let _ = writeln!(
                &mut out,
                r#"<text id="tooltip-{}" x="{}" y="{}">{}</text>"#,
                i,
                fmt(TOOLTIP_LINE_X),
                fmt(TOOLTIP_FIRST_LINE_Y + i as f64 * TOOLTIP_LINE_SPACING),
                escape_xml(line),
            );
        }
        out.push_str("</g>\n</svg>\n");
        out
    }
}
