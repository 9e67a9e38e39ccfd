//! LocalPay client library.
//!
//! Role-gated access to the LocalPay payments API: a credential store that
//! decodes bearer tokens, a route guard, paginated screen controllers and
//! report export. HTTP and file-system adapters live under [`outbound`]; the
//! command-line driver lives under [`inbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
mod test_support;
