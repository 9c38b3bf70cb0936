//! Termlock: advisory edit locks for taxonomy terms.
//!
//! A lock is a single `"<timestamp>:<owner>"` metadata value. Guards read it
//! on every request and decide whether the acting principal may update,
//! delete or manage the term: owners always may, holders of the override
//! capability may, and everyone else is refused (for mutations) or shown a
//! narrowed interface (for rendering).

pub mod authz;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod guard;
pub mod hooks;
pub mod locks;
pub mod principal;
pub mod store;

#[cfg(test)]
mod test_support;
