//! Self-play pipeline
//!
//! This module provides:
//! - The self-play session driving a roster of agents through a schedule
//! - Observers for progress reporting and metrics

pub mod observers;
pub mod self_play;

pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use self_play::{SelfPlaySession, SessionSummary};

pub use crate::ports::Observer;
