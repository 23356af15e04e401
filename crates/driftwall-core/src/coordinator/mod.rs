//! Coordinator - compositing and slot transitions
//!
//! One dedicated thread alternates between two modes on a fixed tick budget:
//!
//! ```text
//!   ┌───────────────┐  elapsed >= budget   ┌──────────────────────────────┐
//!   │  Composite    │ ◄─────────────────── │  Control                     │
//!   │  present()    │ ───────────────────► │  clock += 1                  │
//!   └───────────────┘  elapsed < budget    │  due retries                 │
//!                                          │  read register once, branch  │
//!                                          │  pool reports                │
//!                                          │  sleep rest of budget        │
//!                                          └──────────────────────────────┘
//! ```
//!
//! Register branches in control mode:
//!
//! | Register value          | Action                                          |
//! |-------------------------|-------------------------------------------------|
//! | terminated feedback     | idle; active slot goes dormant, successor runs  |
//! | transient feedback      | idle                                            |
//! | stop-rule command       | stop code if the gate slot is active, else a    |
//! |                         | fresh random command                            |
//! | other command           | idle after `stuck_command_ticks` ticks          |
//! | idle / stop / unknown   | random command once the scheduled deadline hits |
//!
//! A `Finished` report for a slot still marked active counts as its
//! terminated feedback, so a handoff survives the acknowledgment being
//! overwritten before the coordinator reads it.
//!
//! With the default wiring the fountain/lightning pair can deadlock: each
//! stop rule requires the other slot to be running, and only one of them
//! runs at a time. Random commands never hand off between them; only a
//! direct stop code does.

mod control;
mod error;
mod launcher;
mod schedule;
mod slots;

pub use control::{spawn, ControlAction, Coordinator, CoordinatorHandle, TickMode};
pub use error::{LaunchError, StartupError};
pub use launcher::{Launcher, PoolLauncher};
