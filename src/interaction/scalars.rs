use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

/// Point-in-time copy of the three gesture scalars.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalarSnapshot {
    pub cursor_x: f64,
    pub cursor_y: f64,
    pub active_fraction: f64,
}

impl ScalarSnapshot {
    #[must_use]
    pub fn is_active(self) -> bool {
        self.active_fraction > 0.0
    }
}

/// Scalars and selection read together, so a cursor position is never paired
/// with the point selected for a different one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureView {
    pub scalars: ScalarSnapshot,
    pub selection: Option<DataPoint>,
}

/// Lock-free `f64` cell readable from any thread.
#[derive(Debug, Default)]
struct AtomicScalar(AtomicU64);

impl AtomicScalar {
    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Identifier returned by [`GestureScalars::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(ScalarSnapshot) + Send + Sync>;

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
}

#[derive(Default)]
struct ScalarCells {
    cursor_x: AtomicScalar,
    cursor_y: AtomicScalar,
    active_fraction: AtomicScalar,
    /// Guards cursor writes together with the selection they belong to.
    selection: Mutex<Option<DataPoint>>,
    observers: Mutex<ObserverList>,
}

/// Cursor x, cursor y and active-fraction for one chart mount.
///
/// Values are atomics so the gesture context can write without locking.
/// Only the gesture controller and its worker write; renderers read
/// snapshots or subscribe for change notifications. The worker publishes the
/// cursor and the selected point under one lock before notifying, so
/// observers always see a matching pair through [`GestureScalars::view`].
/// Clones share the same cells.
#[derive(Clone, Default)]
pub struct GestureScalars {
    cells: Arc<ScalarCells>,
}

impl std::fmt::Debug for GestureScalars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureScalars")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl GestureScalars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn snapshot(&self) -> ScalarSnapshot {
        ScalarSnapshot {
            cursor_x: self.cells.cursor_x.load(),
            cursor_y: self.cells.cursor_y.load(),
            active_fraction: self.cells.active_fraction.load(),
        }
    }

    /// Consistent read of the scalars and the selected point.
    #[must_use]
    pub fn view(&self) -> GestureView {
        let selection = self.lock_selection();
        GestureView {
            scalars: self.snapshot(),
            selection: *selection,
        }
    }

    /// Point published with the current cursor; `None` outside a gesture.
    #[must_use]
    pub fn selection(&self) -> Option<DataPoint> {
        *self.lock_selection()
    }

    #[must_use]
    pub fn cursor_x(&self) -> f64 {
        self.cells.cursor_x.load()
    }

    #[must_use]
    pub fn cursor_y(&self) -> f64 {
        self.cells.cursor_y.load()
    }

    #[must_use]
    pub fn active_fraction(&self) -> f64 {
        self.cells.active_fraction.load()
    }

    /// Registers a change observer. Observers run on the application context.
    pub fn subscribe(
        &self,
        observer: impl Fn(ScalarSnapshot) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut list = self
            .cells
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(list.next_id);
        list.next_id += 1;
        list.observers.push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut list = self
            .cells
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = list.observers.len();
        list.observers.retain(|(existing, _)| *existing != id);
        list.observers.len() != before
    }

    pub(crate) fn set_active_fraction(&self, value: f64) {
        self.cells.active_fraction.store(value);
    }

    /// Moves the cursor to the selected point's pixel position.
    pub(crate) fn publish_selection(&self, x: f64, y: f64, point: DataPoint) {
        let mut selection = self.lock_selection();
        self.cells.cursor_x.store(x);
        self.cells.cursor_y.store(y);
        *selection = Some(point);
    }

    /// Drops the selection; the cursor keeps its last position.
    pub(crate) fn clear_selection(&self) {
        *self.lock_selection() = None;
    }

    fn lock_selection(&self) -> std::sync::MutexGuard<'_, Option<DataPoint>> {
        self.cells
            .selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls every observer with the current snapshot.
    ///
    /// The observer list is cloned before calling out so observers may
    /// subscribe or unsubscribe re-entrantly.
    pub(crate) fn notify(&self) {
        let observers: Vec<Observer> = {
            let list = self
                .cells
                .observers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            list.observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect()
        };
        let snapshot = self.snapshot();
        for observer in observers {
            observer(snapshot);
        }
    }
}
