//! Make-include rendering of the qualifying release list.

use std::io::{self, Write};

use crate::series::Release;

/// Derive the variable prefix from a distribution name: uppercased ASCII,
/// with anything outside `[A-Za-z0-9]` mapped to `_`. "ubuntu" becomes
/// "UBUNTU".
pub fn variable_prefix(distribution: &str) -> String {
    distribution
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Render the full include text: a header comment naming the generator, the
/// two backslash-continued list assignments, and the two index maps.
///
/// Continuation lines are TAB-indented and end in ` \`; each block is
/// followed by exactly one blank line. Entries are emitted in the order
/// given, so callers sort first.
pub fn render_include(
    out: &mut dyn Write,
    program: &str,
    prefix: &str,
    releases: &[Release],
) -> io::Result<()> {
    writeln!(out, "# Autogenerated by {program}")?;

    writeln!(out, "{prefix}_VERSIONS := \\")?;
    for release in releases {
        writeln!(out, "\t{} \\", release.version)?;
    }
    writeln!(out)?;

    writeln!(out, "{prefix}_ALIASES := \\")?;
    for release in releases {
        writeln!(out, "\t{} \\", release.alias)?;
    }
    writeln!(out)?;

    for release in releases {
        writeln!(
            out,
            "{prefix}_VERSION_TO_ALIAS[{}] := {}",
            release.version, release.alias
        )?;
    }
    writeln!(out)?;

    for release in releases {
        writeln!(
            out,
            "{prefix}_ALIAS_TO_VERSION[{}] := {}",
            release.alias, release.version
        )?;
    }
    writeln!(out)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
