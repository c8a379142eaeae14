//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweeper: expires stale entries and trims both caches to size

mod sweeper;

pub use sweeper::{spawn_sweeper, sweep_caches, sweep_store, SweepReport};
