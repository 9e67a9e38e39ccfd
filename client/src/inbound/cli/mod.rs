//! Command-line driver: argument grammar, dispatch and plain-text output.

mod args;
mod render;
mod shell;

pub use args::{
    Cli, Command, DateArgs, FlavourArg, PaymentsArgs, ProfileArgs, RegisterArgs, ReportArgs,
    ReportKind, RoleArg, UpdatePaymentArgs, UpdateUserArgs, UsersArgs,
};
pub use shell::{Output, Ports, Shell};
