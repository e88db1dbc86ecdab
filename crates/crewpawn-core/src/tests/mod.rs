//! Cross-module tests.
//!
//! - `determinism.rs`: seeded input streams replay identically, parallel
//!   and sequential ticks agree
//! - `integration.rs`: end-to-end crew scenarios (pick up, switch, use, drop)
//! - `helpers.rs`: scripted collaborators and factories

mod helpers;

// Re-export for convenience
pub use helpers::*;
