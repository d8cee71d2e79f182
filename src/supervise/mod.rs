// src/supervise/mod.rs

//! Process supervision.
//!
//! - [`signals`] maps the three recognized shutdown signals (SIGINT,
//!   SIGQUIT, SIGTERM) onto one channel observed by the supervisor's
//!   wait loop.
//! - [`supervisor`] owns the child registry: sequential launch with
//!   per-job log redirection, then graceful, in-order group teardown
//!   once a shutdown request arrives.

pub mod signals;
pub mod supervisor;

pub use signals::{spawn_signal_listener, ShutdownSignal};
pub use supervisor::Supervisor;
