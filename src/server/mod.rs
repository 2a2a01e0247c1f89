//! Server core functionality
//!
//! This module contains the HTTP server, its routes and listener lifecycle.

pub mod core;
pub mod routes;

pub use core::Server;
