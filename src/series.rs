//! Series filtering: which releases are recent enough to publish.

use time::OffsetDateTime;

use crate::launchpad::DistroSeries;

/// Unsupported releases stay listed for this many days after their release.
pub const RECENCY_WINDOW_DAYS: i64 = 365 * 4;

/// A qualifying release pair carried through to rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Dotted version identifier, the primary sort key.
    pub version: String,
    /// Codename alias for the same release.
    pub alias: String,
}

/// Apply the inclusion predicate and return the survivors in output order.
///
/// A series with no recorded release date is dropped: upcoming series carry a
/// null `datereleased` and have no usable images yet. Everything still
/// supported stays regardless of age; unsupported series stay while they are
/// less than [`RECENCY_WINDOW_DAYS`] days old at `now`.
pub fn qualifying_releases(series: Vec<DistroSeries>, now: OffsetDateTime) -> Vec<Release> {
    let mut releases: Vec<Release> = series
        .into_iter()
        .filter_map(|s| {
            let released = s.datereleased?;
            let days_old = (now - released).whole_days();
            (s.supported || days_old < RECENCY_WINDOW_DAYS).then(|| Release {
                version: s.version,
                alias: s.name,
            })
        })
        .collect();

    // Byte-wise order, version first: "10.04" sorts before "9.10". The include
    // format has always been emitted in this order and its consumers index by
    // the literal strings, so the comparison stays lexicographic.
    releases.sort_by(|a, b| {
        a.version
            .cmp(&b.version)
            .then_with(|| a.alias.cmp(&b.alias))
    });
    releases
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
