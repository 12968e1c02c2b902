use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::error::{Error, Result};

static RE_DAYS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)[dD]?$").unwrap());

/// A time window for narrowing event collections.
///
/// The cutoff is anchored at an explicit `as_of` instant rather than reading
/// the clock, so a whole query stays a pure function of its inputs. The CLI
/// captures `Utc::now()` once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// No filtering.
    All,
    /// Records whose filtering timestamp is within the last N days.
    LastDays(u32),
}

impl Window {
    /// Parse a window string.
    ///
    /// Supported formats:
    /// - `all` — no filtering
    /// - `30d`, `7d` — rolling last N days
    /// - `30` — bare day count
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Window::All);
        }
        if let Some(caps) = RE_DAYS.captures(s) {
            let days: u32 = caps[1]
                .parse()
                .map_err(|_| Error::WindowParse(format!("day count out of range: {s}")))?;
            if days == 0 {
                return Err(Error::WindowParse(format!(
                    "window must cover at least one day: {s}"
                )));
            }
            return Ok(Window::LastDays(days));
        }
        Err(Error::WindowParse(format!("unrecognized window: {s}")))
    }

    /// The inclusive lower bound for filtering timestamps, if any.
    pub fn cutoff(&self, as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Window::All => None,
            Window::LastDays(n) => Some(as_of - Duration::days(*n as i64)),
        }
    }

    /// Whether a record with the given filtering timestamp is retained.
    /// The boundary is inclusive: a record dated exactly at the cutoff stays.
    pub fn contains(&self, ts: DateTime<Utc>, as_of: DateTime<Utc>) -> bool {
        match self.cutoff(as_of) {
            None => true,
            Some(cutoff) => ts >= cutoff,
        }
    }

    /// Canonical key string.
    pub fn to_key(&self) -> String {
        match self {
            Window::All => "all".to_string(),
            Window::LastDays(n) => format!("{n}d"),
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_key())
    }
}
