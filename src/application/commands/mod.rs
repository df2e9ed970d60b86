// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a host and the services
// - Commands accept DTOs, return the host response shape
// - Commands NEVER contain business logic

pub mod list_commands;

pub use list_commands::*;
