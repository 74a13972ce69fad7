use crate::core::{DataPoint, LayoutBox};
use crate::interaction::ScalarSnapshot;
use crate::render::{
    CirclePrimitive, LayerKind, LinePrimitive, RectPrimitive, RenderGroup, TextHAlign,
    TextMeasurer, TextPrimitive, measure_or_estimate,
};

use super::{BalanceFormatter, ChartConfig};

/// Left edge of a tooltip of `tooltip_width`, shifted left when it would
/// cross the plot's right edge.
#[must_use]
pub fn clamp_tooltip_x(cursor_x: f64, offset_x: f64, tooltip_width: f64, layout: LayoutBox) -> f64 {
    (cursor_x + offset_x).min(layout.plot_right() - tooltip_width)
}

/// Builds the cursor and tooltip overlays from the gesture scalars.
///
/// Both groups take their opacity straight from the active fraction, so a
/// resting chart carries them at opacity 0.
#[derive(Clone, Copy)]
pub struct CursorFrameBuilder<'a> {
    config: &'a ChartConfig,
    formatter: &'a dyn BalanceFormatter,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> CursorFrameBuilder<'a> {
    #[must_use]
    pub fn new(
        config: &'a ChartConfig,
        formatter: &'a dyn BalanceFormatter,
        measurer: &'a dyn TextMeasurer,
    ) -> Self {
        Self {
            config,
            formatter,
            measurer,
        }
    }

    /// Vertical guide plus the filled dot and its outline ring.
    #[must_use]
    pub fn build_cursor(&self, scalars: ScalarSnapshot, layout: LayoutBox) -> RenderGroup {
        let cursor = self.config.cursor;
        let color = self.config.colors.cursor;
        let (x, y) = (scalars.cursor_x, scalars.cursor_y);

        let mut group = RenderGroup::new(LayerKind::Cursor, overlay_opacity(scalars));
        group.lines.push(LinePrimitive::new(
            x,
            layout.plot_top(),
            x,
            layout.plot_bottom(),
            cursor.guide_line_width,
            color,
        ));
        group
            .circles
            .push(CirclePrimitive::filled(x, y, cursor.radius, color));
        group.circles.push(CirclePrimitive::stroked(
            x,
            y,
            cursor.radius + cursor.ring_gap,
            cursor.stroke_width,
            color,
        ));
        group
    }

    /// Rounded label box with the bold value and the date label.
    ///
    /// Without a selected point the group is empty.
    #[must_use]
    pub fn build_tooltip(
        &self,
        scalars: ScalarSnapshot,
        point: Option<DataPoint>,
        layout: LayoutBox,
    ) -> RenderGroup {
        let mut group = RenderGroup::new(LayerKind::Tooltip, overlay_opacity(scalars));
        let Some(point) = point else {
            return group;
        };

        let style = self.config.tooltip;
        let typography = self.config.typography;
        let colors = self.config.colors;

        let value = self.formatter.currency(point.balance);
        let label = self.formatter.date_short(point.date);
        let value_width = measure_or_estimate(self.measurer, &value, typography.tooltip_value);
        let label_width = measure_or_estimate(self.measurer, &label, typography.tooltip_label);
        let width = value_width.max(label_width) + style.padding * 2.0;

        let x = clamp_tooltip_x(scalars.cursor_x, style.offset_x, width, layout);
        let y = scalars.cursor_y + style.offset_y;
        let text_x = x + style.padding;

        group.rects.push(
            RectPrimitive::new(x, y, width, style.height, colors.tooltip_background)
                .with_corner_radius(style.border_radius),
        );
        group.texts.push(TextPrimitive::new(
            value,
            text_x,
            y + style.value_line_y,
            typography.tooltip_value,
            colors.tooltip_text,
            TextHAlign::Left,
        ));
        group.texts.push(TextPrimitive::new(
            label,
            text_x,
            y + style.label_line_y,
            typography.tooltip_label,
            colors.tooltip_text,
            TextHAlign::Left,
        ));
        group
    }
}

fn overlay_opacity(scalars: ScalarSnapshot) -> f64 {
    if scalars.active_fraction.is_finite() {
        scalars.active_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
