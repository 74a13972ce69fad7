use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImpactStyle {
    Light,
    Medium,
    #[default]
    Heavy,
    Rigid,
    Soft,
}

/// Platform tactile feedback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticFeedback {
    Impact(ImpactStyle),
    /// Light picker-style tick.
    Selection,
}

/// Why a gesture emits feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticEvent {
    GestureStart,
    PointChanged,
    GestureEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HapticConfig {
    pub enabled: bool,
    pub point_changed_style: ImpactStyle,
    pub gesture_start_style: ImpactStyle,
    pub gesture_end_enabled: bool,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            point_changed_style: ImpactStyle::Heavy,
            gesture_start_style: ImpactStyle::Heavy,
            gesture_end_enabled: true,
        }
    }
}

impl HapticConfig {
    /// Maps an event to the feedback it should produce, if any.
    #[must_use]
    pub fn feedback_for(self, event: HapticEvent) -> Option<HapticFeedback> {
        if !self.enabled {
            return None;
        }
        match event {
            HapticEvent::GestureStart => Some(HapticFeedback::Impact(self.gesture_start_style)),
            HapticEvent::PointChanged => Some(HapticFeedback::Impact(self.point_changed_style)),
            HapticEvent::GestureEnd => self
                .gesture_end_enabled
                .then_some(HapticFeedback::Selection),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HapticError {
    #[error("haptic feedback is not supported on this platform")]
    Unsupported,
    #[error("haptic driver failed: {0}")]
    Driver(String),
}

/// Platform seam for one-shot tactile feedback.
pub trait HapticDriver: Send + Sync {
    fn trigger(&self, feedback: HapticFeedback) -> Result<(), HapticError>;
}

/// Driver for hosts without tactile hardware.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHaptics;

impl HapticDriver for NoopHaptics {
    fn trigger(&self, _feedback: HapticFeedback) -> Result<(), HapticError> {
        Ok(())
    }
}

/// Applies [`HapticConfig`] and keeps driver failures away from callers.
#[derive(Clone)]
pub struct HapticDispatcher {
    driver: Arc<dyn HapticDriver>,
    config: HapticConfig,
}

impl std::fmt::Debug for HapticDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HapticDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HapticDispatcher {
    #[must_use]
    pub fn new(driver: Arc<dyn HapticDriver>, config: HapticConfig) -> Self {
        Self { driver, config }
    }

    #[must_use]
    pub fn config(&self) -> HapticConfig {
        self.config
    }

    /// Fires the feedback mapped to `event`.
    ///
    /// Driver errors and driver panics are logged and dropped.
    pub fn dispatch(&self, event: HapticEvent) {
        let Some(feedback) = self.config.feedback_for(event) else {
            return;
        };
        trace!(?event, ?feedback, "haptic feedback");
        match panic::catch_unwind(AssertUnwindSafe(|| self.driver.trigger(feedback))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(?event, error = %err, "haptic feedback failed"),
            Err(_) => warn!(?event, "haptic driver panicked"),
        }
    }
}

impl Default for HapticDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(NoopHaptics), HapticConfig::default())
    }
}
