//! Status enums for composed views and operator plans.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregate outcome of composing a storefront view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComposeStatus {
    /// No facet has settled yet.
    #[default]
    Loading,
    /// Every facet succeeded.
    Ready,
    /// Some facets succeeded and some failed.
    Partial,
    /// Every facet failed, or every facet succeeded with nothing to show.
    Empty,
}

impl ComposeStatus {
    /// Whether the view is missing data the visitor would normally see.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Partial | Self::Empty)
    }
}

impl fmt::Display for ComposeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Partial => write!(f, "partial"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Subscription plan reported by the trial check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Trial,
    Premium,
    Expired,
    /// Anything the backend sends that we do not know about.
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trial => write!(f, "trial"),
            Self::Premium => write!(f, "premium"),
            Self::Expired => write!(f, "expired"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Trial/plan status of an operator account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrialStatus {
    #[serde(default)]
    pub plan: Plan,
    #[serde(default, rename = "daysLeft")]
    pub days_left: Option<i64>,
}

impl TrialStatus {
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self.plan, Plan::Expired)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_status_from_backend() {
        let status: TrialStatus =
            serde_json::from_str(r#"{"plan":"trial","daysLeft":4}"#).unwrap();
        assert_eq!(status.plan, Plan::Trial);
        assert_eq!(status.days_left, Some(4));
        assert!(!status.is_expired());
    }

    #[test]
    fn test_unknown_plan_is_tolerated() {
        let status: TrialStatus = serde_json::from_str(r#"{"plan":"enterprise"}"#).unwrap();
        assert_eq!(status.plan, Plan::Unknown);
        assert_eq!(status.days_left, None);
    }

    #[test]
    fn test_expired_plan() {
        let status: TrialStatus =
            serde_json::from_str(r#"{"plan":"expired","daysLeft":0}"#).unwrap();
        assert!(status.is_expired());
    }

    #[test]
    fn test_compose_status_display() {
        assert_eq!(ComposeStatus::Partial.to_string(), "partial");
        assert_eq!(ComposeStatus::default(), ComposeStatus::Loading);
        assert!(ComposeStatus::Empty.is_degraded());
        assert!(!ComposeStatus::Ready.is_degraded());
    }
}
