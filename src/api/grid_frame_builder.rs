use smallvec::SmallVec;

use crate::core::{BalanceScale, ChartScales, LayoutBox};
use crate::render::{
    LayerKind, LinePrimitive, RenderGroup, TextHAlign, TextMeasurer, TextPrimitive,
    measure_or_estimate,
};

use super::{BalanceFormatter, ChartConfig};

/// Horizontal reference values: bottom, middle and top of the nice domain.
///
/// A flat domain yields three equal values.
#[must_use]
pub fn gridline_values(scale: BalanceScale) -> SmallVec<[f64; 3]> {
    let (low, high) = scale.domain();
    let mid = low + (high - low) / 2.0;
    SmallVec::from_buf([low, mid, high])
}

/// Builds the dashed value and time gridlines with their labels.
///
/// Pure over its inputs; all text widths go through the measurer so labels of
/// different lengths stay flush with the plot's right edge.
#[derive(Clone, Copy)]
pub struct GridFrameBuilder<'a> {
    config: &'a ChartConfig,
    formatter: &'a dyn BalanceFormatter,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> GridFrameBuilder<'a> {
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

    #[must_use]
    pub fn build(&self, scales: ChartScales, layout: LayoutBox) -> RenderGroup {
        let mut group = RenderGroup::new(LayerKind::Grid, self.config.grid.opacity);
        self.push_value_lines(&mut group, scales.y, layout);
        self.push_time_lines(&mut group, scales, layout);
        group
    }

    fn push_value_lines(&self, group: &mut RenderGroup, scale: BalanceScale, layout: LayoutBox) {
        let grid = self.config.grid;
        let font = self.config.typography.grid_label;
        let colors = self.config.colors;
        let plot_left = layout.plot_left();

        for value in gridline_values(scale) {
            let y = scale.balance_to_pixel(value);
            let label = self.formatter.currency_compact(value);
            let label_width = measure_or_estimate(self.measurer, &label, font);
            let label_x = layout.plot_right() - label_width;
            let line_end = (label_x - grid.label_gap).max(plot_left);

            group.lines.push(
                LinePrimitive::new(plot_left, y, line_end, y, grid.line_width, colors.grid)
                    .with_stroke_style(grid.stroke_style),
            );
            group.texts.push(TextPrimitive::new(
                label,
                label_x,
                y - font.size_px / 2.0,
                font,
                colors.text,
                TextHAlign::Left,
            ));
        }
    }

    fn push_time_lines(&self, group: &mut RenderGroup, scales: ChartScales, layout: LayoutBox) {
        let grid = self.config.grid;
        let font = self.config.typography.grid_label;
        let colors = self.config.colors;
        let label_y = layout.plot_bottom() + grid.time_label_offset_y;

        for tick in scales
            .x
            .month_ticks(grid.time_tick_step_months, grid.time_tick_inset_months)
        {
            let x = scales.x.time_to_pixel(tick);
            group.lines.push(
                LinePrimitive::new(
                    x,
                    layout.plot_top(),
                    x,
                    layout.plot_bottom(),
                    grid.line_width,
                    colors.grid,
                )
                .with_stroke_style(grid.stroke_style),
            );
            group.texts.push(TextPrimitive::new(
                self.formatter.month_abbrev(tick),
                x,
                label_y,
                font,
                colors.text,
                TextHAlign::Center,
            ));
        }
    }
}
