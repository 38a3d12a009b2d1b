//! Sample ops script: basic host, service and command health checks.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use opscripts::config::v1::{CommonArgs, ConfigLoader, ScriptConfig};
use opscripts::logging::v1 as ops_logging;
use opscripts::utils::v1 as ops_utils;
use opscripts::utils::v1::columns::{format_columns, Alignment};
use opscripts::utils::v1::error::{log_fatal_and_exit, OpsError};
use opscripts::utils::v1::exec::{exec_cmd, ExecOptions};
use opscripts::utils::v1::monitor::ScriptMonitor;

#[derive(Debug, Parser)]
#[command(name = "ops-healthcheck")]
#[command(about = "Basic host and service health checks")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Hostnames to sanity-check (comma-separated)
    #[arg(long, value_delimiter = ',')]
    hosts: Vec<String>,

    /// URL to probe with a GET request
    #[arg(long)]
    url: Option<String>,

    /// Command to run as part of the check
    #[arg(long, default_value = "uptime")]
    command: String,

    /// Refuse to run without root privileges
    #[arg(long)]
    require_root: bool,

    /// Ask for confirmation before running the command check
    #[arg(long)]
    confirm: bool,

    /// Log resource usage while running
    #[arg(long)]
    monitor: bool,
}

fn bootstrap(args: &Args) -> anyhow::Result<ScriptConfig> {
    let config = ConfigLoader::new(args.common.clone())
        .parse()
        .context("failed to resolve configuration")?;
    ops_logging::init(&config.log_options()).context("failed to initialize logging")?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match bootstrap(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting ops-healthcheck");
    if config.verbosity > 0 {
        match config.dump_json() {
            Ok(dump) => tracing::debug!("Resolved config: {}", dump),
            Err(e) => tracing::warn!("Could not dump config: {}", e),
        }
    }

    if args.require_root {
        if let Err(e) = ops_utils::sys::verify_root() {
            log_fatal_and_exit(&e);
        }
    }

    let monitor = ScriptMonitor::new(args.monitor);

    tokio::select! {
        _ = ops_utils::error::exit_on_sigint() => {}
        result = run(&args, &config) => {
            monitor.log_final_stats();
            match result {
                Ok(()) => tracing::info!("✅ All checks passed"),
                Err(e) => log_fatal_and_exit(&e),
            }
        }
    }
}

async fn run(args: &Args, config: &ScriptConfig) -> ops_utils::error::Result<()> {
    let mut rows = vec![
        vec!["Check".to_string(), "Target".to_string(), "Result".to_string()],
        vec!["-----".to_string(), "------".to_string(), "------".to_string()],
    ];
    let mut failures = 0usize;

    for host in &args.hosts {
        let valid = ops_utils::is_valid_hostname(host);
        if !valid {
            failures += 1;
        }
        rows.push(vec![
            "hostname".to_string(),
            host.clone(),
            if valid { "valid" } else { "INVALID" }.to_string(),
        ]);
    }

    if let Some(url) = &args.url {
        if config.dry_run {
            tracing::info!("Dry run: skipping probe of {}", url);
            rows.push(vec!["probe".to_string(), url.clone(), "skipped".to_string()]);
        } else {
            match ops_utils::http::http_get_text(url, config.http_timeout).await {
                Ok(_) => rows.push(vec!["probe".to_string(), url.clone(), "ok".to_string()]),
                Err(e) => {
                    tracing::warn!("Probe of {} failed: {}", url, e);
                    failures += 1;
                    rows.push(vec!["probe".to_string(), url.clone(), "FAILED".to_string()]);
                }
            }
        }
    }

    if config.dry_run {
        tracing::info!("Dry run: would execute '{}'", args.command);
        rows.push(vec![
            "command".to_string(),
            args.command.clone(),
            "skipped".to_string(),
        ]);
    } else {
        ops_utils::validation::validate_non_empty_string("command", &args.command)?;
        if args.confirm
            && !ops_utils::sys::request_confirmation(&format!("Run '{}'?", args.command))?
        {
            return Err(OpsError::fatal("Aborted by operator.", 1));
        }
        let argv: Vec<&str> = args.command.split_whitespace().collect();
        let output = exec_cmd(&argv, &ExecOptions::default()).await?;
        if output.status != 0 {
            tracing::warn!("'{}' exited with status {}", args.command, output.status);
            failures += 1;
        }
        rows.push(vec![
            "command".to_string(),
            args.command.clone(),
            format!("exit {}", output.status),
        ]);
    }

    println!("Health check report ({})", Local::now().format("%Y-%m-%d %H:%M:%S"));
    for line in format_columns(&rows, &[Alignment::Left, Alignment::Left, Alignment::Right]) {
        println!("{}", line);
    }

    if failures > 0 {
        return Err(OpsError::fatal(format!("{} check(s) failed", failures), 1));
    }
    Ok(())
}
