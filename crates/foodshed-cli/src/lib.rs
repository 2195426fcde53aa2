//! `foodshed-cli` — application layer shared by the two binaries.
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`selection`] | CLI distance/mode selection parsing                   |
//! | [`server`]    | Viewer state, axum router, API handlers               |
//! | [`telemetry`] | tracing-subscriber initialization                     |

pub mod selection;
pub mod server;
pub mod telemetry;

#[cfg(test)]
mod tests;
