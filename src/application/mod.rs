// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between a host (CLI or embedding app) and the services
// - Translates between DTOs and domain requests
// - Turns every failure into the host's error object

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
