//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::fixture;
use rstest::rstest;

use super::*;

#[derive(Clone, Copy)]
struct LintSingle;

impl LintSingle {
    fn lint(self, file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
        lint_sources(&[LintSource {
            file: PathBuf::from(file),
            contents: contents.to_owned(),
        }])
    }
}

#[fixture]
fn lint_single() -> LintSingle {
    LintSingle
}

#[rstest]
#[case(
    "inbound/cli/shell.rs",
    "use crate::domain::screens::UsersScreen; fn run() { let _ = UsersScreen::new; }",
    true
)]
#[case(
    "inbound/cli/args.rs",
    "use clap::Parser; #[derive(Parser)] struct Cli;",
    true
)]
#[case(
    "inbound/cli/shell.rs",
    "use crate::outbound::http::LocalPayHttpClient; fn run() { let _ = LocalPayHttpClient::new; }",
    false
)]
#[case(
    "inbound/cli/shell.rs",
    "use localpay_client::outbound::storage::FileReportSink; fn run() {}",
    false
)]
#[case("inbound/cli/shell.rs", "use reqwest::Client; fn run() {}", false)]
#[case(
    "inbound/cli/render.rs",
    "fn write() { let _ = std::fs::write(\"out\", b\"\"); }",
    false
)]
#[case(
    "domain/screens/users.rs",
    "use crate::inbound::cli::Output; fn thing() { let _ = 1; }",
    false
)]
#[case("domain/credential_store.rs", "use cap_std::fs::Dir; fn thing() {}", false)]
#[case("domain/navigation.rs", "use std::{fmt, fs}; fn thing() {}", false)]
#[case(
    "domain/credential_store.rs",
    "use std::sync::Arc; use tokio::sync::watch; fn thing() {}",
    true
)]
#[case(
    "outbound/http/client.rs",
    "use crate::inbound::cli::Command; fn thing() { let _ = 1; }",
    false
)]
#[case("outbound/storage/atomic_io.rs", "use clap::Args; fn thing() {}", false)]
#[case(
    "outbound/storage/atomic_io.rs",
    "use cap_std::fs::Dir; use std::fs::File; fn thing() {}",
    true
)]
fn detects_boundary_violations(
    lint_single: LintSingle,
    #[case] file: &str,
    #[case] contents: &str,
    #[case] ok: bool,
) {
    let result = lint_single.lint(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn files_outside_layers_are_rejected(lint_single: LintSingle) {
    let result = lint_single.lint("main.rs", "fn main() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn each_rule_reports_once_per_file(lint_single: LintSingle) {
    let result = lint_single.lint(
        "inbound/cli/shell.rs",
        "use std::fs::File; use std::fs::read; use reqwest::Client; \
         use localpay_client::outbound::storage::FileReportSink; fn run() {}",
    );
    let Err(ArchitectureLintError::Violations(violations)) = result else {
        panic!("expected violations, got {result:?}");
    };
    let messages: Vec<_> = violations.into_iter().map(|v| v.message).collect();
    assert_eq!(
        messages,
        vec![
            "inbound module must not depend on crate::outbound".to_owned(),
            "inbound module must not depend on external crate `reqwest`".to_owned(),
            "inbound module must not perform I/O through std::fs".to_owned(),
        ]
    );
}
