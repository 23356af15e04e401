//! Driftwall Core - signal register protocol, worker pool and coordinator
//!
//! Long-running animation tasks paint into a shared frame buffer while a
//! coordinator thread composites it to a display and steers transitions
//! between animations through a single shared signal word.

pub mod animation;
pub mod config;
pub mod coordinator;
pub mod display;
pub mod frame;
pub mod pool;
pub mod raster;
pub mod signal;
pub mod types;
pub mod worker;

pub use types::*;
