//! Cadence CLI - command-line driver for the playback queue
//!
//! Every invocation rehydrates the queue from the state file, applies one
//! command and writes the result back, so successive invocations behave
//! like successive clicks in a player UI.

pub mod commands;
pub mod config;
pub mod error;
