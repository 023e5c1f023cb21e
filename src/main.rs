//! http-probe command line.
//!
//! Runs exactly one check, either described on the command line or picked by
//! name from a TOML config file, and exits 0 on pass, 1 on fail, 2 on usage or
//! configuration errors.
//!
//! ```text
//! http-probe --target https://svc.test/health --expect "status_code=200;regex_match=\d"
//! http-probe --config probes.toml --check api-health --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use http_probe::assertion::AssertionInput;
use http_probe::config::{load_config, ProbeConfig};
use http_probe::observability::logging::init_logging;
use http_probe::probe::{ProbeRequest, ProbeResult, Prober};

#[derive(Parser)]
#[command(name = "http-probe")]
#[command(about = "Run a single HTTP check and report pass/fail", long_about = None)]
struct Cli {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of a check in the config file.
    #[arg(long, requires = "config", conflicts_with = "target")]
    check: Option<String>,

    /// URL to probe.
    #[arg(short, long)]
    target: Option<String>,

    /// HTTP verb.
    #[arg(long, default_value = "GET")]
    verb: String,

    /// Assertions, e.g. "status_code=200;substring_match=ok".
    #[arg(short, long, default_value = "")]
    expect: String,

    #[arg(short, long, default_value = "")]
    username: String,

    /// Password, or a raw Authorization token when no username is given.
    #[arg(short, long, default_value = "")]
    password: String,

    /// Deadline in seconds (overrides the config).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => ProbeConfig::default(),
    };

    init_logging(&config.observability);

    let (request, input, timeout) = match resolve(&cli, &config) {
        Ok(resolved) => resolved,
        Err(message) => {
            eprintln!("error: {}", message);
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        target_url = %request.target,
        verb = %request.verb,
        timeout_secs = timeout.as_secs(),
        "Starting probe"
    );

    let result = Prober::new(config.probe.clone())
        .run(&request, &input, timeout)
        .await;

    print_result(&result, cli.json);

    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Turn CLI flags (and optionally a named check) into one probe.
fn resolve(
    cli: &Cli,
    config: &ProbeConfig,
) -> Result<(ProbeRequest, AssertionInput, Duration), String> {
    if let Some(name) = &cli.check {
        let check = config
            .check(name)
            .ok_or_else(|| format!("no check named '{}' in config", name))?;
        let timeout = cli
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| check.timeout(&config.probe));
        return Ok((check.request(), check.assertion_input(), timeout));
    }

    let target = cli
        .target
        .clone()
        .ok_or_else(|| "either --target or --check is required".to_string())?;
    let request = ProbeRequest::new(target, cli.verb.clone())
        .with_credentials(cli.username.clone(), cli.password.clone());
    let timeout = cli
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.probe.timeout());

    Ok((request, AssertionInput::from(cli.expect.clone()), timeout))
}

fn print_result(result: &ProbeResult, json: bool) {
    if json {
        match serde_json::to_string(result) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("error: failed to encode result: {}", e),
        }
    } else if result.success {
        println!("PASS");
    } else {
        println!("FAIL: {}", result.message);
    }
}
