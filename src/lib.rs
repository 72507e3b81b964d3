//! Finds Git repository roots under a directory subtree and keeps a
//! persistent, deduplicated registry of their paths.
//!
//! The walker ([`scan`]) and the registry ([`store`]) are independent; the
//! orchestrator ([`app`]) composes them.

pub mod app;
pub mod cli;
pub mod pathset;
pub mod scan;
pub mod store;
