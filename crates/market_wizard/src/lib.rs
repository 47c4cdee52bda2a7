//! Market Wizard: headless controller for the market and group creation flow.
//!
//! The crate models the multi-step wizard as a reducer over an owned
//! [`core::state::WizardState`]; see [`core`] for the action/effect pipeline
//! and [`domain`] for the draft, step and validation rules.

pub mod action;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod services;

pub use crate::action::{Action, PopupResult};
pub use crate::core::r#loop::{Outcome, WizardLoop};
pub use crate::core::state::{MountOptions, WizardPhase, WizardState};
