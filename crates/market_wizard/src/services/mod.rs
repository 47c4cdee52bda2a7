//! Collaborators the wizard talks to but does not own: the toast surface,
//! routing and the confirm prompt. Each is a trait with in-memory
//! implementations for the CLI and tests.

pub mod confirm;
pub mod navigation;
pub mod notify;
