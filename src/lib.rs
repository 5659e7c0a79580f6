//! Library crate for user-directory.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state and update loop (`app`)
//! - Canonical record store (`store`) and the derived view (`pipeline`)
//! - Add-user form and validation (`form`)
//! - Seed data sources (`source`) and spreadsheet export (`export`)
//! - Error and result types (`error`), settings (`cli`), logging setup (`logging`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `user-directory` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod source;
pub mod store;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
