//! Metrics sink boundary.
//!
//! All instrumentation flows through [`MetricsEvent`] and
//! [`MetricsSink`]. With no sink installed, events land in the process
//! counters; a session can override the sink for the duration of an
//! operation.

use std::{
    cell::Cell,
    sync::atomic::{AtomicU64, Ordering},
};

thread_local! {
    static SINK_OVERRIDE: Cell<Option<*const dyn MetricsSink>> = const { Cell::new(None) };
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug)]
pub enum ExecKind {
    Fetch,
    Overlay,
    Persist,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity: &'static str,
        /// Rows fetched, fields overlaid, or rows inserted.
        rows_touched: u64,
    },
    RowsDeleted {
        entity: &'static str,
        rows: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// Run `f` with `sink` receiving every event emitted on this thread,
/// restoring the previous sink afterwards.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<*const dyn MetricsSink>);

    impl Drop for Restore {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| cell.set(self.0));
        }
    }

    // SAFETY: the pointer is stored only for the dynamic scope of this
    // call; the `Restore` guard clears it before `sink`'s borrow ends and
    // `emit` only dereferences it synchronously, never persisting it.
    let sink_ptr =
        unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let previous = SINK_OVERRIDE.with(|cell| cell.replace(Some(sink_ptr)));
    let _restore = Restore(previous);

    f()
}

/// Emit one event to the installed sink, or to the process counters
/// when none is installed.
pub(crate) fn emit(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(Cell::get);
    match sink {
        // SAFETY: the pointer is installed by `with_metrics_sink`, whose
        // `Restore` guard clears it before the sink's borrow ends.
        Some(sink) => unsafe { (*sink).record(event) },
        None => COUNTERS.record(event),
    }
}

///
/// Counters
///
/// Process-wide totals kept when no sink override is installed.
///

#[derive(Debug)]
struct Counters {
    fetches: AtomicU64,
    overlays: AtomicU64,
    persists: AtomicU64,
    rows_fetched: AtomicU64,
    fields_overlaid: AtomicU64,
    rows_inserted: AtomicU64,
    rows_deleted: AtomicU64,
}

static COUNTERS: Counters = Counters::new();

impl Counters {
    const fn new() -> Self {
        Self {
            fetches: AtomicU64::new(0),
            overlays: AtomicU64::new(0),
            persists: AtomicU64::new(0),
            rows_fetched: AtomicU64::new(0),
            fields_overlaid: AtomicU64::new(0),
            rows_inserted: AtomicU64::new(0),
            rows_deleted: AtomicU64::new(0),
        }
    }

    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind, .. } => {
                let counter = match kind {
                    ExecKind::Fetch => &self.fetches,
                    ExecKind::Overlay => &self.overlays,
                    ExecKind::Persist => &self.persists,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }
            MetricsEvent::ExecFinish {
                kind, rows_touched, ..
            } => {
                let counter = match kind {
                    ExecKind::Fetch => &self.rows_fetched,
                    ExecKind::Overlay => &self.fields_overlaid,
                    ExecKind::Persist => &self.rows_inserted,
                };
                counter.fetch_add(rows_touched, Ordering::Relaxed);
            }
            MetricsEvent::RowsDeleted { rows, .. } => {
                self.rows_deleted.fetch_add(rows, Ordering::Relaxed);
            }
        }
    }
}

///
/// CountersSnapshot
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CountersSnapshot {
    pub fetches: u64,
    pub overlays: u64,
    pub persists: u64,
    pub rows_fetched: u64,
    pub fields_overlaid: u64,
    pub rows_inserted: u64,
    pub rows_deleted: u64,
}

/// Point-in-time copy of the process counters.
#[must_use]
pub fn counters_snapshot() -> CountersSnapshot {
    CountersSnapshot {
        fetches: COUNTERS.fetches.load(Ordering::Relaxed),
        overlays: COUNTERS.overlays.load(Ordering::Relaxed),
        persists: COUNTERS.persists.load(Ordering::Relaxed),
        rows_fetched: COUNTERS.rows_fetched.load(Ordering::Relaxed),
        fields_overlaid: COUNTERS.fields_overlaid.load(Ordering::Relaxed),
        rows_inserted: COUNTERS.rows_inserted.load(Ordering::Relaxed),
        rows_deleted: COUNTERS.rows_deleted.load(Ordering::Relaxed),
    }
}

/// Reset every process counter to zero.
pub fn counters_reset() {
    COUNTERS.fetches.store(0, Ordering::Relaxed);
    COUNTERS.overlays.store(0, Ordering::Relaxed);
    COUNTERS.persists.store(0, Ordering::Relaxed);
    COUNTERS.rows_fetched.store(0, Ordering::Relaxed);
    COUNTERS.fields_overlaid.store(0, Ordering::Relaxed);
    COUNTERS.rows_inserted.store(0, Ordering::Relaxed);
    COUNTERS.rows_deleted.store(0, Ordering::Relaxed);
}
