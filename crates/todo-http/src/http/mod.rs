//! HTTP components for the Todo Server client
//!
//! - Request/response types for the REST API
//! - Status-code policy shared by every call
//! - The reqwest client and the CLI built on top of it

pub mod cli;
pub mod client;
pub mod common;
pub mod error;

pub use client::TodoClient;
pub use common::*;
pub use error::{Operation, check_status};
