use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core::PathCommand;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePaint, Color, FontSpec, FontWeight, LineStrokeStyle, RectPrimitive, RenderFrame,
    RenderGroup, Renderer, TextHAlign, TextMeasurer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub groups_drawn: usize,
    pub groups_skipped: usize,
    pub lines_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a host widget's draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// Renders offscreen into an image surface through `Renderer::render`, or in
/// place on an external context through `CairoContextRenderer`. Groups at
/// opacity 0 are skipped; other groups are composited with their opacity.
/// A zero-area frame draws nothing.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::Backend(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(0.0, 0.0, 0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        if !frame.has_area() {
            self.last_stats = CairoRenderStats {
                groups_skipped: frame.groups.len(),
                ..CairoRenderStats::default()
            };
            return Ok(());
        }

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for group in &frame.groups {
            if !group.is_visible() {
                stats.groups_skipped += 1;
                continue;
            }
            context.push_group();
            draw_group(context, group, &mut stats)?;
            context
                .pop_group_to_source()
                .map_err(|err| map_backend_error("failed to pop group", err))?;
            context
                .paint_with_alpha(group.opacity)
                .map_err(|err| map_backend_error("failed to composite group", err))?;
            stats.groups_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_group(
    context: &Context,
    group: &RenderGroup,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    context.set_line_cap(LineCap::Round);
    context.set_line_join(LineJoin::Round);

    for line in &group.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed { on_px, off_px } => context.set_dash(&[on_px, off_px], 0.0),
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }
    context.set_dash(&[], 0.0);

    for path in &group.paths {
        apply_color(context, path.color);
        context.set_line_width(path.stroke_width);
        context.new_path();
        for command in &path.path.commands {
            match *command {
                PathCommand::MoveTo { x, y } => context.move_to(x, y),
                PathCommand::LineTo { x, y } => context.line_to(x, y),
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => context.curve_to(x1, y1, x2, y2, x, y),
            }
        }
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
        stats.paths_drawn += 1;
    }

    for circle in &group.circles {
        apply_color(context, circle.color);
        context.new_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        match circle.paint {
            CirclePaint::Fill => context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?,
            CirclePaint::Stroke { width } => {
                context.set_line_width(width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke circle", err))?;
            }
        }
        stats.circles_drawn += 1;
    }

    for rect in &group.rects {
        append_rect_path(context, *rect);
        apply_color(context, rect.fill_color);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        stats.rects_drawn += 1;
    }

    for text in &group.texts {
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&font_description(text.font)));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color);
        context.move_to(x, text.y);
        pangocairo::functions::show_layout(context, &layout);
        stats.texts_drawn += 1;
    }
    Ok(())
}

/// Measures text with Pango font metrics on a scratch surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct PangoTextMeasurer;

impl TextMeasurer for PangoTextMeasurer {
    fn measure_width(&self, text: &str, font: FontSpec) -> ChartResult<f64> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        let layout = pangocairo::functions::create_layout(&context);
        layout.set_font_description(Some(&font_description(font)));
        layout.set_text(text);
        let (width, _height) = layout.pixel_size();
        Ok(f64::from(width))
    }
}

fn font_description(font: FontSpec) -> FontDescription {
    let weight = match font.weight {
        FontWeight::Regular => "",
        FontWeight::Bold => " Bold",
    };
    FontDescription::from_string(&format!("Sans{weight} {}px", font.size_px))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    context.new_path();
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
