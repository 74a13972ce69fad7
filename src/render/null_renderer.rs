use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so invalid geometry surfaces before a real
/// backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_group_count: usize,
    pub last_visible_group_count: usize,
    pub last_primitive_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_group_count = frame.groups.len();
        self.last_visible_group_count = frame.groups.iter().filter(|g| g.is_visible()).count();
        self.last_primitive_count = frame.groups.iter().map(|g| g.primitive_count()).sum();
        Ok(())
    }
}
