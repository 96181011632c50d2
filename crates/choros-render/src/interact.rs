//! Pointer interaction. The chart reacts to three DOM events: `mouseover`
//! on a county, `mousemove` anywhere over the svg, and `mouseout`. This
//! module replays those against the retained scene.

use choros_core::FipsCode;

use crate::scene::{ChoroplethScene, TOOLTIP_OFFSET_X, TOOLTIP_OFFSET_Y, TOOLTIP_WIDTH_PAD};
use crate::svg::fmt_js;
use crate::text::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered a county.
    Enter(FipsCode),
    /// Pointer moved, in svg coordinates.
    Move { x: f64, y: f64 },
    /// Pointer left the hovered county.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum HoverPhase {
    #[default]
    Idle,
    Hover(FipsCode),
}

impl ChoroplethScene {
    /// Feeds one pointer event through the hover machine.
    ///
    /// `Enter` highlights the county and fills the tooltip; entering another
    /// county while one is highlighted first restores it. `Move` only
    /// repositions the tooltip, hovering or not. `Leave` restores the fill,
    /// hides the tooltip and empties its lines. An `Enter` for a fips the
    /// scene does not know is ignored.
    pub fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(fips) => self.enter(fips),
            PointerEvent::Move { x, y } => {
                self.tooltip.x = x + TOOLTIP_OFFSET_X;
                self.tooltip.y = y + TOOLTIP_OFFSET_Y;
            }
            PointerEvent::Leave => self.leave(),
        }
    }

    fn enter(&mut self, fips: FipsCode) {
        let Some(&index) = self.by_fips.get(&fips) else {
            return;
        };
        if let HoverPhase::Hover(previous) = self.hover {
            self.restore_fill(previous);
        }

        let county = &self.counties[index];
        let education = county.education;
        let lines = vec![
            format!("State: {}", county.state),
            format!("County: {}", county.name),
            format!("Bachelors: {}%", fmt_js(education)),
        ];
        let style = TextStyle::default();
        let mut width = 0.0_f64;
        for line in &lines {
            width = width.max(self.measurer.measure(line, &style).width.ceil());
        }

        self.counties[index].fill = self.options.highlight_fill.clone();
        self.tooltip.visible = true;
        self.tooltip.width = width + TOOLTIP_WIDTH_PAD;
        self.tooltip.lines = lines;
        self.tooltip.education = Some(education);
        self.hover = HoverPhase::Hover(fips);
    }

    fn leave(&mut self) {
        if let HoverPhase::Hover(fips) = self.hover {
            self.restore_fill(fips);
        }
        self.hover = HoverPhase::Idle;
        self.tooltip.visible = false;
        self.tooltip.lines.clear();
        self.tooltip.education = None;
    }

    fn restore_fill(&mut self, fips: FipsCode) {
        if let Some(&index) = self.by_fips.get(&fips) {
            let education = self.counties[index].education;
            self.counties[index].fill = self.scale.color_for(education).to_string();
        }
    }
}
