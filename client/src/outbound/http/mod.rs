//! HTTP outbound adapter.
//!
//! One reqwest-backed client implements every LocalPay API port.

mod client;
mod dto;

pub use client::LocalPayHttpClient;
