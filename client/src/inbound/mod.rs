//! Inbound adapters that turn operator input into screen actions.
//!
//! The command line is the only driver today; see [`cli`].

pub mod cli;
