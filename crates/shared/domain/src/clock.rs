//! Wall clock used by entity mutations.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to microseconds, the finest precision every
/// supported storage engine keeps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
