//! Worker lifecycle and event routing.
//!
//! ```text
//! Parsed ──install──▶ Installing ──▶ Installed ──activate──▶ Activating ──▶ Activated
//!                                                               ▲              │
//!                                                               └──activate────┘
//! any state except Redundant ──terminate──▶ Redundant
//! ```
//!
//! Fetches are only routed while [`WorkerState::Activated`]; in every other
//! state they pass through to the network.

mod event;
mod state;
mod worker;

pub use event::{Event, EventOutcome, FetchOutcome};
pub use state::{InvalidTransition, Phase, WorkerState};
pub use worker::{ActivateReport, InstallReport, ServiceWorker};
