//! Hugging Face Hub access.
//!
//! This module provides the API client used by the harvest subcommands.

pub mod client;

pub use client::{HubClient, HubClientConfig};
