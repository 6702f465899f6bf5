//! Observability: runtime counters for engine operations and the sink
//! abstraction instrumentation flows through.
//!
//! Engine logic never touches counter state directly; everything goes
//! through [`sink::MetricsEvent`].

pub mod sink;

pub use sink::{counters_reset, counters_snapshot, CountersSnapshot, MetricsSink};
