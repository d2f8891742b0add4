//! Command-line front end for the property dashboard store.

pub mod command;
pub mod config;
pub mod toasts;
