//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential lookup, token handling and module probing
//! so route handlers can stay focused on protocol translation and auth
//! plumbing. None of them hold mutable state after startup.

pub mod credentials;
pub mod probe;
pub mod registry;
pub mod status;
pub mod token;
