//! Thirty Batch - Parallel playouts and result aggregation
//!
//! This crate drives the core engine at scale:
//! - Batch play of many independent games against one card pool
//! - Winner histogram and average game length
//! - Append-only CSV log of every result
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_batch (orchestration)
//! - Level 2: Summary aggregation (phases)
//! - Level 3: play_game (steps)
//! - Level 4: configuration, CSV utilities

mod batch;
mod config;
pub mod csv_log;
mod error;
mod game_runner;
mod summary;

pub use batch::{run_batch, BatchResult};
pub use config::{BatchConfig, DEFAULT_PROGRESS_INTERVAL};
pub use error::BatchError;
pub use game_runner::GameRunner;
pub use summary::{Standing, Summary};
