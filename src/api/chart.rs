use std::sync::Arc;

use tracing::debug;

use crate::core::{
    BalanceScaleTuning, ChartScales, DataPoint, LayoutBox, LinePath, build_line_path,
    project_points,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    GestureController, GesturePhase, GestureScalars, HapticDispatcher, HapticDriver, NoopHaptics,
    ProjectionTable, SelectionCallback,
};
use crate::render::{
    EstimatedTextMeasurer, LayerKind, PathPrimitive, RenderFrame, RenderGroup, Renderer,
    TextMeasurer,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

use super::{
    AudFormatter, BalanceFormatter, ChartConfig, CursorFrameBuilder, GridFrameBuilder,
    HeaderDisplay,
};

/// Host-supplied collaborators for one chart mount.
#[derive(Clone)]
pub struct ChartHooks {
    on_point_selected: Option<SelectionCallback>,
    haptics: Arc<dyn HapticDriver>,
    measurer: Arc<dyn TextMeasurer>,
    formatter: Arc<dyn BalanceFormatter>,
}

impl Default for ChartHooks {
    fn default() -> Self {
        Self {
            on_point_selected: None,
            haptics: Arc::new(NoopHaptics),
            measurer: Arc::new(EstimatedTextMeasurer),
            formatter: Arc::new(AudFormatter),
        }
    }
}

impl std::fmt::Debug for ChartHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartHooks")
            .field("on_point_selected", &self.on_point_selected.is_some())
            .finish_non_exhaustive()
    }
}

impl ChartHooks {
    /// Called with `Some(point)` on every resolved drag event and once with
    /// `None` when a gesture ends. Runs on the resolver worker thread.
    #[must_use]
    pub fn with_on_point_selected(
        mut self,
        callback: impl Fn(Option<DataPoint>) + Send + Sync + 'static,
    ) -> Self {
        self.on_point_selected = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_haptics(mut self, driver: Arc<dyn HapticDriver>) -> Self {
        self.haptics = driver;
        self
    }

    #[must_use]
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn BalanceFormatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

/// Geometry derived from one dataset + layout pair.
struct SeriesGeometry {
    scales: ChartScales,
    path: LinePath,
    table: ProjectionTable,
}

impl SeriesGeometry {
    fn build(
        points: &[DataPoint],
        layout: LayoutBox,
        tuning: BalanceScaleTuning,
    ) -> ChartResult<Self> {
        let scales = ChartScales::build_with_tuning(points, layout, tuning)?;
        let projections = project_points(points, scales);
        let path = build_line_path(&projections);
        Ok(Self {
            scales,
            path,
            table: ProjectionTable::from_projections(projections, layout),
        })
    }
}

/// Interactive balance line chart composed of scales, the monotone series
/// path, grid, cursor and tooltip overlays, and the scrubbing gesture
/// pipeline.
///
/// The resolver worker lives as long as the chart; dropping the chart joins
/// it.
pub struct BalanceChart<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    points: Vec<DataPoint>,
    latest: DataPoint,
    layout: LayoutBox,
    scales: ChartScales,
    path: LinePath,
    gesture: GestureController,
    measurer: Arc<dyn TextMeasurer>,
    formatter: Arc<dyn BalanceFormatter>,
}

impl<R: Renderer> BalanceChart<R> {
    /// Builds scales and path for `points` and spawns the resolver worker.
    ///
    /// Fails with [`ChartError::EmptySeries`] for an empty series.
    pub fn new(
        renderer: R,
        points: Vec<DataPoint>,
        config: ChartConfig,
        hooks: ChartHooks,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let latest = points.last().copied().ok_or(ChartError::EmptySeries)?;
        let layout = config.dimensions;
        let geometry = SeriesGeometry::build(&points, layout, config.balance_scale)?;

        let haptics = HapticDispatcher::new(hooks.haptics, config.haptics);
        let gesture = GestureController::spawn(
            geometry.table,
            GestureScalars::new(),
            haptics,
            hooks.on_point_selected,
        )?;

        debug!(
            points = points.len(),
            width = layout.width,
            height = layout.height,
            "balance chart mounted"
        );
        Ok(Self {
            renderer,
            config,
            points,
            latest,
            layout,
            scales: geometry.scales,
            path: geometry.path,
            gesture,
            measurer: hooks.measurer,
            formatter: hooks.formatter,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn layout(&self) -> LayoutBox {
        self.layout
    }

    #[must_use]
    pub fn scales(&self) -> ChartScales {
        self.scales
    }

    #[must_use]
    pub fn path(&self) -> &LinePath {
        &self.path
    }

    /// Replaces the dataset. On error the previous dataset stays mounted.
    pub fn set_data(&mut self, points: Vec<DataPoint>) -> ChartResult<()> {
        let latest = points.last().copied().ok_or(ChartError::EmptySeries)?;
        let geometry = SeriesGeometry::build(&points, self.layout, self.config.balance_scale)?;
        debug!(points = points.len(), "balance chart data replaced");
        self.points = points;
        self.latest = latest;
        self.apply_geometry(geometry);
        Ok(())
    }

    /// Replaces the layout box; an identical box is a no-op.
    ///
    /// Any gesture in flight resets to idle and the selection clears, since
    /// its cached pixel positions no longer apply.
    pub fn set_layout(&mut self, layout: LayoutBox) -> ChartResult<()> {
        if layout == self.layout {
            return Ok(());
        }
        let geometry = SeriesGeometry::build(&self.points, layout, self.config.balance_scale)?;
        debug!(
            width = layout.width,
            height = layout.height,
            "balance chart layout changed"
        );
        self.layout = layout;
        self.apply_geometry(geometry);
        Ok(())
    }

    /// Re-derives the layout from the host surface width (rotation, resize).
    pub fn resize_to_surface_width(&mut self, surface_width: f64) -> ChartResult<()> {
        self.set_layout(self.config.responsive_layout(surface_width))
    }

    pub fn pan_begin(&mut self, x: f64) {
        self.gesture.on_begin(x);
    }

    pub fn pan_update(&mut self, x: f64) {
        self.gesture.on_update(x);
    }

    pub fn pan_end(&mut self) {
        self.gesture.on_end();
    }

    /// Waits until the resolver worker has handled every gesture event posted
    /// so far. Never call this from the gesture context.
    pub fn flush_interactions(&self) -> ChartResult<()> {
        self.gesture.flush()
    }

    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    #[must_use]
    pub fn selection(&self) -> Option<DataPoint> {
        self.scalars().selection()
    }

    #[must_use]
    pub fn header(&self) -> HeaderDisplay {
        HeaderDisplay::derive(
            self.selection(),
            self.latest,
            &self.config.default_caption,
            self.formatter.as_ref(),
        )
    }

    #[must_use]
    pub fn scalars(&self) -> &GestureScalars {
        self.gesture.scalars()
    }

    /// Materializes grid, series, cursor and tooltip groups, back to front.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let view = self.scalars().view();
        let formatter = self.formatter.as_ref();
        let measurer = self.measurer.as_ref();
        let grid = GridFrameBuilder::new(&self.config, formatter, measurer);
        let cursor = CursorFrameBuilder::new(&self.config, formatter, measurer);

        let mut series = RenderGroup::new(LayerKind::Series, 1.0);
        if !self.path.is_empty() {
            series.paths.push(PathPrimitive::new(
                self.path.clone(),
                self.config.line.stroke_width,
                self.config.colors.line,
            ));
        }

        RenderFrame::new(self.layout.width, self.layout.height)
            .with_group(grid.build(self.scales, self.layout))
            .with_group(series)
            .with_group(cursor.build_cursor(view.scalars, self.layout))
            .with_group(cursor.build_tooltip(view.scalars, view.selection, self.layout))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    /// Renders the current frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame();
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply_geometry(&mut self, geometry: SeriesGeometry) {
        self.scales = geometry.scales;
        self.path = geometry.path;
        self.gesture.rebuild(geometry.table);
        self.gesture.scalars().clear_selection();
    }
}
