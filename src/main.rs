use anyhow::{Context, Result, bail};
use clap::Parser;
use std::process;
use std::time::Duration;

use ubuntu_series_gen::{config, generate, output};

/// Generate a Make include listing the recently relevant series of an
/// Ubuntu-family distribution.
///
/// Queries the Launchpad web service anonymously, keeps every series that is
/// still supported or was released less than four years ago, and prints the
/// result as variable assignments for `include` in a Makefile.
#[derive(Parser, Debug)]
#[command(
    name = "ubuntu-series-gen",
    version,
    about,
    after_help = "Examples:\n  ubuntu-series-gen\n  ubuntu-series-gen --output ubuntu-versions.mk\n  ubuntu-series-gen --service-root staging --verbose"
)]
struct Cli {
    /// Distribution whose series should be listed.
    #[arg(long, default_value = "ubuntu")]
    distribution: String,

    /// Service root: production, staging, qastaging, or an http(s) URL.
    /// Falls back to $LAUNCHPAD_SERVICE_ROOT, then production.
    #[arg(long)]
    service_root: Option<String>,

    /// Connect/read timeout for Launchpad requests, in seconds.
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Write the include to a file instead of stdout.
    #[arg(long)]
    output: Option<std::path::PathBuf>,

    /// Report progress on stderr.
    #[arg(long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<()> {
    output::set_verbose(cli.verbose);

    if cli.timeout_secs == 0 {
        bail!("--timeout-secs must be positive");
    }

    let root = config::resolve_service_root(cli.service_root.as_deref())?;
    if root.is_non_https {
        output::note(&format!("service root {} is not HTTPS", root.url));
    }

    let opts = generate::GenerateOptions {
        distribution: cli.distribution,
        service_root: root.url,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    match &cli.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            generate::generate_to(&opts, &mut file)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            generate::generate_to(&opts, &mut lock)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("[ubuntu-series-gen] error: {:#}", e);
        process::exit(1);
    }
}
