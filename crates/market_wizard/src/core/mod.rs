//! Core subsystem of the wizard.
//!
//! Flow of one user interaction:
//!   Action -> `reducer::reduce` (pure, mutates `WizardState`) -> `Vec<Effect>`
//!   -> `loop::WizardLoop` runs the effects (notify, navigate, confirm)
//!   -> `Effect::Async` goes to `executor::TaskExecutor`
//!   -> task result re-enters as `Action::TaskFinished`.
//!
//! - `state`    : owned wizard state + mount options
//! - `reducer`  : state transitions
//! - `effects`  : declarative side effects and task kinds
//! - `executor` : background task runner with cancellation
//! - `loop`     : drives actions and effects for one mounted wizard
pub mod effects;
pub mod executor;
pub mod r#loop;
pub mod reducer;
pub mod state;
