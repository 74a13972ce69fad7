use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
};

/// Draw order of the chart's layers, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Grid,
    Series,
    Cursor,
    Tooltip,
}

/// Opacity-scoped group of primitives drawn together.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderGroup {
    pub kind: LayerKind,
    pub opacity: f64,
    pub lines: Vec<LinePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderGroup {
    #[must_use]
    pub fn new(kind: LayerKind, opacity: f64) -> Self {
        Self {
            kind,
            opacity,
            lines: Vec::new(),
            paths: Vec::new(),
            circles: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Hidden groups still carry geometry; backends skip drawing them.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.paths.len() + self.circles.len() + self.rects.len() + self.texts.len()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(format!(
                "{:?} group opacity must be finite and in [0, 1]",
                self.kind
            )));
        }
        for line in &self.lines {
            line.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<RenderGroup>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: RenderGroup) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn group(&self, kind: LayerKind) -> Option<&RenderGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    /// Rejects non-finite or negative sizes. A zero-area frame is valid and
    /// renders as a no-op.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidLayout {
                width: self.width,
                height: self.height,
            });
        }
        for group in &self.groups {
            group.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.primitive_count() == 0)
    }
}
