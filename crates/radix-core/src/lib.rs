#![forbid(unsafe_code)]

//! Core: terminal lifecycle and canonical key events.
//!
//! # Role in radix
//! `radix-core` is the input layer. It owns terminal session setup/teardown
//! and the normalized event types that the runtime consumes.
//!
//! # Primary responsibilities
//! - **TerminalSession**: RAII lifecycle for raw mode, alt-screen, and cleanup.
//! - **Event**: canonical input events (keys, resize, focus).
//!
//! # How it fits in the system
//! The runtime (`radix-runtime`) consumes `radix_core::event::Event` values
//! and drives application models. Nothing here knows about number bases.

pub mod event;
#[cfg(feature = "crossterm")]
pub mod terminal_session;
