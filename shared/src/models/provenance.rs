//! Live/demo provenance of aggregated data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why demo data stands in for a live series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DemoReason {
    /// Transport or parse failure before a usable response arrived
    Network(String),
    /// The relay or provider answered with an error or a malformed payload
    Upstream(String),
    /// Every daily value was missing
    EmptySeries,
}

impl fmt::Display for DemoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoReason::Network(msg) => write!(f, "network error: {}", msg),
            DemoReason::Upstream(msg) => write!(f, "upstream error: {}", msg),
            DemoReason::EmptySeries => write!(f, "no valid daily values"),
        }
    }
}

/// Aggregated data tagged with where it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance<T> {
    Live { data: T },
    Demo { data: T, reason: DemoReason },
}

impl<T> Provenance<T> {
    pub fn live(data: T) -> Self {
        Provenance::Live { data }
    }

    pub fn demo(data: T, reason: DemoReason) -> Self {
        Provenance::Demo { data, reason }
    }

    pub fn data(&self) -> &T {
        match self {
            Provenance::Live { data } | Provenance::Demo { data, .. } => data,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Provenance::Demo { .. })
    }

    pub fn reason(&self) -> Option<&DemoReason> {
        match self {
            Provenance::Live { .. } => None,
            Provenance::Demo { reason, .. } => Some(reason),
        }
    }

    /// Transform the payload, keeping provenance
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Provenance<U> {
        match self {
            Provenance::Live { data } => Provenance::Live { data: f(data) },
            Provenance::Demo { data, reason } => Provenance::Demo {
                data: f(data),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_reason() {
        let demo = Provenance::demo(2, DemoReason::EmptySeries).map(|v| v * 10);
        assert_eq!(demo.data(), &20);
        assert_eq!(demo.reason(), Some(&DemoReason::EmptySeries));

        let live = Provenance::live("x").map(str::len);
        assert!(!live.is_demo());
        assert_eq!(live.data(), &1);
        assert_eq!(live.reason(), None);
    }
}
