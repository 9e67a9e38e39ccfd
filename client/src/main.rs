//! `localpay` entry-point: loads settings, restores the session and runs one
//! command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use localpay_client::config::ClientSettings;
use localpay_client::domain::CredentialStore;
use localpay_client::domain::screens::PAGE_SIZE_OPTIONS;
use localpay_client::inbound::cli::{Cli, Output, Ports, Shell};
use localpay_client::outbound::http::LocalPayHttpClient;
use localpay_client::outbound::storage::{FileCredentialStorage, FileReportSink};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build runtime")?;
    let output = runtime.block_on(run(cli))?;

    let mut stdout = io::stdout().lock();
    for line in &output.lines {
        writeln!(stdout, "{line}").wrap_err("failed to write output")?;
    }
    Ok(if output.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn run(cli: Cli) -> Result<Output> {
    let program = env::args_os()
        .next()
        .unwrap_or_else(|| OsString::from("localpay"));
    let settings = ClientSettings::load_from_iter([program])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let page_size = settings
        .page_size()
        .map_err(|_| eyre!("LOCALPAY_PAGE_SIZE must be one of {PAGE_SIZE_OPTIONS:?}"))?;

    let clock = Arc::new(DefaultClock);
    let storage = FileCredentialStorage::open(&settings.state_dir())
        .wrap_err("failed to open state directory")?;
    let store = Arc::new(CredentialStore::new(Arc::new(storage), clock.clone()));
    let role = store.restore().wrap_err("failed to restore session")?;
    info!(%role, "session restored");

    let base = settings.api_url().wrap_err("invalid API URL")?;
    let http = Arc::new(
        LocalPayHttpClient::new(base, settings.timeout(), store.clone())
            .wrap_err("failed to build HTTP client")?,
    );
    let sink = FileReportSink::open(&settings.report_dir())
        .wrap_err("failed to open report directory")?;

    let ports = Ports {
        auth: http.clone(),
        users: http.clone(),
        payments: http.clone(),
        reports: http,
        sink: Arc::new(sink),
    };
    let shell = Shell::new(store, ports, clock, page_size);
    Ok(shell.run(cli.command).await)
}
