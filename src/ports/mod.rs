//! Ports (trait boundaries) for external collaborators.
//!
//! The self-play loop owns these traits; progress reporting and metric
//! collection implement them.

pub mod observer;

pub use observer::Observer;
