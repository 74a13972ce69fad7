use serde::{Deserialize, Serialize};

use crate::core::{BalanceScaleTuning, LayoutBox};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HapticConfig;
use crate::render::{Color, FontSpec, LineStrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartColors {
    pub line: Color,
    pub cursor: Color,
    pub grid: Color,
    pub text: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            line: Color::rgb(1.0, 122.0 / 255.0, 100.0 / 255.0),
            cursor: Color::WHITE,
            grid: Color::rgb(74.0 / 255.0, 74.0 / 255.0, 83.0 / 255.0),
            text: Color::rgb(55.0 / 255.0, 65.0 / 255.0, 81.0 / 255.0),
            tooltip_background: Color::rgb(31.0 / 255.0, 41.0 / 255.0, 55.0 / 255.0),
            tooltip_text: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorStyle {
    pub radius: f64,
    pub stroke_width: f64,
    /// Extra radius of the outline ring around the filled dot.
    pub ring_gap: f64,
    pub guide_line_width: f64,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            stroke_width: 2.0,
            ring_gap: 2.0,
            guide_line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineStyle {
    pub stroke_width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self { stroke_width: 2.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipStyle {
    pub padding: f64,
    pub border_radius: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub height: f64,
    /// Offsets from the box top to the top of each text line.
    pub value_line_y: f64,
    pub label_line_y: f64,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            padding: 8.0,
            border_radius: 6.0,
            offset_x: 10.0,
            offset_y: -30.0,
            height: 50.0,
            value_line_y: 6.0,
            label_line_y: 27.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridStyle {
    pub opacity: f64,
    pub line_width: f64,
    pub stroke_style: LineStrokeStyle,
    /// Gap between a horizontal gridline's end and its value label.
    pub label_gap: f64,
    /// Months between vertical gridlines.
    pub time_tick_step_months: u32,
    /// Months kept clear at both ends of the time axis.
    pub time_tick_inset_months: u32,
    /// Distance from the plot bottom to the top of month labels.
    pub time_label_offset_y: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            opacity: 0.3,
            line_width: 1.0,
            stroke_style: LineStrokeStyle::Dashed {
                on_px: 2.0,
                off_px: 10.0,
            },
            label_gap: 4.0,
            time_tick_step_months: 3,
            time_tick_inset_months: 1,
            time_label_offset_y: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub grid_label: FontSpec,
    pub tooltip_value: FontSpec,
    pub tooltip_label: FontSpec,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            grid_label: FontSpec::regular(11.0),
            tooltip_value: FontSpec::bold(14.0),
            tooltip_label: FontSpec::regular(11.0),
        }
    }
}

/// Immutable style and geometry bundle for one chart.
///
/// Every section defaults independently, so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub dimensions: LayoutBox,
    pub colors: ChartColors,
    pub cursor: CursorStyle,
    pub line: LineStyle,
    pub tooltip: TooltipStyle,
    pub grid: GridStyle,
    pub typography: Typography,
    pub haptics: HapticConfig,
    pub balance_scale: BalanceScaleTuning,
    /// Header caption shown while nothing is selected.
    pub default_caption: String,
    /// Horizontal space subtracted from the host surface width.
    pub horizontal_inset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            dimensions: LayoutBox::default(),
            colors: ChartColors::default(),
            cursor: CursorStyle::default(),
            line: LineStyle::default(),
            tooltip: TooltipStyle::default(),
            grid: GridStyle::default(),
            typography: Typography::default(),
            haptics: HapticConfig::default(),
            balance_scale: BalanceScaleTuning::default(),
            default_caption: "Total".to_owned(),
            horizontal_inset: 20.0,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize chart config: {e}"))
        })
    }

    /// Layout for a host surface of `surface_width`, keeping configured
    /// height and margins.
    #[must_use]
    pub fn responsive_layout(&self, surface_width: f64) -> LayoutBox {
        self.dimensions
            .with_width((surface_width - self.horizontal_inset).max(0.0))
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.dimensions.validate()?;
        self.balance_scale.validate()?;
        for color in [
            self.colors.line,
            self.colors.cursor,
            self.colors.grid,
            self.colors.text,
            self.colors.tooltip_background,
            self.colors.tooltip_text,
        ] {
            color.validate()?;
        }

        let positive = [
            ("line.strokeWidth", self.line.stroke_width),
            ("cursor.strokeWidth", self.cursor.stroke_width),
            ("cursor.guideLineWidth", self.cursor.guide_line_width),
            ("grid.lineWidth", self.grid.line_width),
            ("typography.gridLabel", self.typography.grid_label.size_px),
            ("typography.tooltipValue", self.typography.tooltip_value.size_px),
            ("typography.tooltipLabel", self.typography.tooltip_label.size_px),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        let non_negative = [
            ("cursor.radius", self.cursor.radius),
            ("cursor.ringGap", self.cursor.ring_gap),
            ("tooltip.padding", self.tooltip.padding),
            ("tooltip.borderRadius", self.tooltip.border_radius),
            ("tooltip.height", self.tooltip.height),
            ("grid.labelGap", self.grid.label_gap),
            ("horizontalInset", self.horizontal_inset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        if let LineStrokeStyle::Dashed { on_px, off_px } = self.grid.stroke_style {
            if !on_px.is_finite() || !off_px.is_finite() || on_px <= 0.0 || off_px < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "`grid.strokeStyle` dash needs on > 0 and off >= 0".to_owned(),
                ));
            }
        }
        if !self.grid.opacity.is_finite() || !(0.0..=1.0).contains(&self.grid.opacity) {
            return Err(ChartError::InvalidConfig(
                "`grid.opacity` must be in [0, 1]".to_owned(),
            ));
        }
        for (name, value) in [
            ("tooltip.offsetX", self.tooltip.offset_x),
            ("tooltip.offsetY", self.tooltip.offset_y),
            ("grid.timeLabelOffsetY", self.grid.time_label_offset_y),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidConfig(format!("`{name}` must be finite")));
            }
        }
        Ok(self)
    }
}
