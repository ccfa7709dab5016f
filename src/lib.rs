//! Terminal arcade hub: a falling-block puzzle, a maze chase and a
//! brick-breaker behind one tabbed menu.
//!
//! Each game is a [`games::Simulation`] wrapped in a [`games::Session`],
//! which drives the init/start/stop lifecycle against a shared
//! [`scheduler::Scheduler`].

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod games;
pub mod input;
pub mod scheduler;
pub mod ui;
