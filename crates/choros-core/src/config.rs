use crate::color::Rgb;
use crate::join::JoinPolicy;

/// Chart styling and join behavior. The defaults reproduce the production
/// chart: a 1300x565 canvas with the map group offset by (150, 25), a dark
/// blue to white ramp, white borders and a white hover highlight.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: f64,
    pub height: f64,
    pub padding_x: f64,
    pub padding_top: f64,
    pub low_color: Rgb,
    pub high_color: Rgb,
    pub border_stroke: String,
    pub highlight_fill: String,
    pub join_policy: JoinPolicy,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1300.0,
            height: 565.0,
            padding_x: 150.0,
            padding_top: 25.0,
            low_color: Rgb::new(35.0, 53.0, 85.0),
            high_color: Rgb::WHITE,
            border_stroke: "white".to_string(),
            highlight_fill: "white".to_string(),
            join_policy: JoinPolicy::Strict,
        }
    }
}
