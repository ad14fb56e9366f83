//! Page outcome definitions
//!
//! Every page task popped from the frontier ends in exactly one outcome.

use std::fmt;

/// How a single page task finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page was fetched, rewritten and written to disk
    Written,

    /// Page was beyond the depth bound or already visited; nothing happened
    Skipped,

    /// Page could not be fetched (network, timeout, non-2xx status)
    FetchFailed,

    /// Page was fetched and rewritten but could not be persisted
    WriteFailed,

    /// Page redirected to another host; nothing was saved
    LeftSite,
}

impl PageOutcome {
    /// Returns true if the page ended up on disk
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written)
    }

    /// Returns true if this outcome represents a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::WriteFailed)
    }

    /// Short label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::Skipped => "skipped",
            Self::FetchFailed => "fetch_failed",
            Self::WriteFailed => "write_failed",
            Self::LeftSite => "left_site",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
