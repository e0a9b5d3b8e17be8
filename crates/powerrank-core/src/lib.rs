// Library root: club power rankings and weekly team selection.
//
// Re-exports all modules so the binary and integration tests can reach the
// public API.

pub mod attendance;
pub mod config;
pub mod member;
pub mod ranking;
pub mod ratings;
pub mod roster;
pub mod session;
pub mod split;
pub mod update;
