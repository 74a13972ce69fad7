//! Scrubbing interaction: nearest-point lookup, gesture scalars, haptics and
//! the pan-gesture controller with its resolver worker.

mod gesture;
mod haptics;
mod resolver;
mod scalars;

pub use gesture::{GestureController, GesturePhase, SelectionCallback};
pub use haptics::{
    HapticConfig, HapticDispatcher, HapticDriver, HapticError, HapticEvent, HapticFeedback,
    ImpactStyle, NoopHaptics,
};
pub use resolver::{ProjectionTable, ResolvedPoint, resolve_nearest_point};
pub use scalars::{GestureScalars, GestureView, ScalarSnapshot, SubscriptionId};
