use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

use super::{GestureScalars, HapticDispatcher, HapticEvent, ProjectionTable};

/// External `onPointSelected` hook: `Some` on every resolved begin/update,
/// `None` once per gesture end or structural reset.
pub type SelectionCallback = Arc<dyn Fn(Option<DataPoint>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Active,
}

/// Messages posted from the gesture context to the resolver worker.
enum GestureCommand {
    Begin { x: f64 },
    Update { x: f64 },
    End,
    Rebuild(ProjectionTable),
    Flush(mpsc::Sender<()>),
    Shutdown,
}

/// Pan-gesture state machine living on the interactive context.
///
/// Callbacks only flip the active-fraction scalar and post a message; nearest
/// point resolution, cursor updates, haptics and the selection callback all run
/// on the resolver worker thread. Posting never blocks.
pub struct GestureController {
    phase: GesturePhase,
    scalars: GestureScalars,
    sender: mpsc::Sender<GestureCommand>,
    worker: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for GestureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureController")
            .field("phase", &self.phase)
            .field("scalars", &self.scalars)
            .finish_non_exhaustive()
    }
}

impl GestureController {
    /// Spawns the resolver worker that owns `table`.
    pub fn spawn(
        table: ProjectionTable,
        scalars: GestureScalars,
        haptics: HapticDispatcher,
        on_selection: Option<SelectionCallback>,
    ) -> ChartResult<Self> {
        let (sender, receiver) = mpsc::channel();
        let mut worker = ResolverWorker::new(table, scalars.clone(), haptics, on_selection);
        let handle = thread::Builder::new()
            .name("balance-chart-resolver".to_owned())
            .spawn(move || worker.run(receiver))
            .map_err(|err| {
                warn!(error = %err, "failed to spawn gesture resolver worker");
                ChartError::WorkerUnavailable
            })?;

        Ok(Self {
            phase: GesturePhase::Idle,
            scalars,
            sender,
            worker: Some(handle),
        })
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    #[must_use]
    pub fn scalars(&self) -> &GestureScalars {
        &self.scalars
    }

    pub fn on_begin(&mut self, x: f64) {
        trace!(x, "pan begin");
        self.phase = GesturePhase::Active;
        self.scalars.set_active_fraction(1.0);
        self.post(GestureCommand::Begin { x });
    }

    /// Ignored while idle, which includes a gesture cut short by a rebuild.
    pub fn on_update(&mut self, x: f64) {
        if self.phase != GesturePhase::Active {
            trace!(x, "pan update ignored while idle");
            return;
        }
        self.post(GestureCommand::Update { x });
    }

    /// Always resets: end events are honoured even when already idle.
    pub fn on_end(&mut self) {
        trace!("pan end");
        self.phase = GesturePhase::Idle;
        self.scalars.set_active_fraction(0.0);
        self.post(GestureCommand::End);
    }

    /// Swaps the projection table after a dataset or layout change.
    ///
    /// A gesture in flight is dropped back to idle rather than rebased onto
    /// the new geometry.
    pub fn rebuild(&mut self, table: ProjectionTable) {
        debug!(points = table.len(), "gesture projection table rebuilt");
        self.phase = GesturePhase::Idle;
        self.scalars.set_active_fraction(0.0);
        self.post(GestureCommand::Rebuild(table));
    }

    /// Blocks until the worker has processed everything posted so far.
    ///
    /// For the application context and tests only; the gesture context must
    /// never call this.
    pub fn flush(&self) -> ChartResult<()> {
        let (ack_sender, ack_receiver) = mpsc::channel();
        self.sender
            .send(GestureCommand::Flush(ack_sender))
            .map_err(|_| ChartError::WorkerUnavailable)?;
        ack_receiver
            .recv()
            .map_err(|_| ChartError::WorkerUnavailable)
    }

    fn post(&self, command: GestureCommand) {
        if self.sender.send(command).is_err() {
            warn!("gesture resolver worker is gone; dropping gesture event");
        }
    }
}

impl Drop for GestureController {
    fn drop(&mut self) {
        let _ = self.sender.send(GestureCommand::Shutdown);
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("gesture resolver worker panicked");
            }
        }
    }
}

/// Application-context half of the gesture pipeline.
///
/// Writes the cursor scalars and the selection only; the active fraction
/// belongs to the gesture context so a late `End` cannot hide a newer gesture.
/// Each event publishes state first, then notifies observers, then calls the
/// selection callback.
struct ResolverWorker {
    table: ProjectionTable,
    scalars: GestureScalars,
    haptics: HapticDispatcher,
    on_selection: Option<SelectionCallback>,
    active: bool,
    last_index: Option<usize>,
}

impl ResolverWorker {
    fn new(
        table: ProjectionTable,
        scalars: GestureScalars,
        haptics: HapticDispatcher,
        on_selection: Option<SelectionCallback>,
    ) -> Self {
        Self {
            table,
            scalars,
            haptics,
            on_selection,
            active: false,
            last_index: None,
        }
    }

    fn run(&mut self, receiver: mpsc::Receiver<GestureCommand>) {
        while let Ok(command) = receiver.recv() {
            match command {
                GestureCommand::Begin { x } => self.begin(x),
                GestureCommand::Update { x } => self.update(x),
                GestureCommand::End => self.end(),
                GestureCommand::Rebuild(table) => self.rebuild(table),
                GestureCommand::Flush(ack) => {
                    let _ = ack.send(());
                }
                GestureCommand::Shutdown => break,
            }
        }
        trace!("gesture resolver worker stopped");
    }

    fn begin(&mut self, x: f64) {
        self.active = true;
        self.last_index = None;
        self.haptics.dispatch(HapticEvent::GestureStart);
        self.resolve_and_publish(x);
    }

    fn update(&mut self, x: f64) {
        if !self.active {
            return;
        }
        self.resolve_and_publish(x);
    }

    fn end(&mut self) {
        let was_active = self.active;
        self.active = false;
        self.last_index = None;
        self.scalars.clear_selection();
        self.scalars.notify();
        if was_active {
            self.haptics.dispatch(HapticEvent::GestureEnd);
        }
        self.emit_selection(None);
    }

    fn rebuild(&mut self, table: ProjectionTable) {
        self.table = table;
        self.last_index = None;
        if self.active {
            self.active = false;
            self.scalars.clear_selection();
            self.scalars.notify();
            self.emit_selection(None);
        }
    }

    fn resolve_and_publish(&mut self, x: f64) {
        let Some(resolved) = self.table.resolve(x) else {
            return;
        };
        // The first point of a gesture is covered by the gesture-start feedback.
        if self
            .last_index
            .is_some_and(|previous| previous != resolved.index)
        {
            self.haptics.dispatch(HapticEvent::PointChanged);
        }
        self.last_index = Some(resolved.index);

        trace!(x, index = resolved.index, "resolved nearest point");
        let projection = resolved.projection;
        self.scalars
            .publish_selection(projection.x, projection.y, projection.point);
        self.scalars.notify();
        self.emit_selection(Some(projection.point));
    }

    fn emit_selection(&self, point: Option<DataPoint>) {
        let Some(callback) = &self.on_selection else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| callback(point))).is_err() {
            warn!("selection callback panicked");
        }
    }
}
