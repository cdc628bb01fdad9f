//! The generator pipeline: scratch directory, anonymous login, series
//! listing, filtering, rendering.

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use time::OffsetDateTime;

use crate::launchpad::LaunchpadClient;
use crate::output;
use crate::render;
use crate::series;

/// Program name stamped into the generated header comment.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Resolved options for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Distribution whose series are listed, e.g. "ubuntu".
    pub distribution: String,
    /// Fully resolved service root URL.
    pub service_root: String,
    /// Connect/read timeout for every request.
    pub timeout: Duration,
}

/// Run the full pipeline, writing the include text to `out`.
///
/// Nothing is written until the listing has fully succeeded, so any network
/// or parse failure leaves `out` untouched. The scratch directory backing
/// the client's response cache is removed when this function returns, on
/// success and on error alike.
pub fn generate_to(opts: &GenerateOptions, out: &mut dyn Write) -> Result<()> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;

    if output::is_verbose() {
        output::action(
            "Listing",
            &format!("{} series from {}", opts.distribution, opts.service_root),
        );
    }

    let client = LaunchpadClient::login_anonymously(&opts.service_root, scratch.path(), opts.timeout)?;
    let all_series = client.distro_series(&opts.distribution)?;
    let releases = series::qualifying_releases(all_series, OffsetDateTime::now_utc());

    if output::is_verbose() {
        output::detail(&format!("{} qualifying releases", releases.len()));
    }

    let prefix = render::variable_prefix(&opts.distribution);
    render::render_include(out, PROGRAM_NAME, &prefix, &releases)
        .context("Failed to write the generated include")?;
    Ok(())
}
