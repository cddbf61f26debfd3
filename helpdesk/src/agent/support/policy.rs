//! Which of the model's requested tool calls a turn executes.

use std::fmt;
use std::str::FromStr;

/// Tool call policy for one turn.
///
/// The model may request several calls in one response; the turn controller executes
/// only the selected ones. Calls that are not selected stay on the assistant message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallPolicy {
    /// Execute the first requested call; ignore the rest.
    #[default]
    FirstOnly,
    /// Execute every requested call in listed order.
    All,
}

impl ToolCallPolicy {
    /// Number of calls to execute out of `requested`.
    pub fn select_count(self, requested: usize) -> usize {
        match self {
            Self::FirstOnly => requested.min(1),
            Self::All => requested,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstOnly => "first_only",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ToolCallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCallPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "first_only" | "first" => Ok(Self::FirstOnly),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "unknown tool call policy: {} (use first_only or all)",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!("first_only".parse(), Ok(ToolCallPolicy::FirstOnly));
        assert_eq!("First-Only".parse(), Ok(ToolCallPolicy::FirstOnly));
        assert_eq!("all".parse(), Ok(ToolCallPolicy::All));
        assert!("some".parse::<ToolCallPolicy>().is_err());
    }

    #[test]
    fn select_count_caps_first_only_at_one() {
        assert_eq!(ToolCallPolicy::FirstOnly.select_count(0), 0);
        assert_eq!(ToolCallPolicy::FirstOnly.select_count(3), 1);
        assert_eq!(ToolCallPolicy::All.select_count(3), 3);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for policy in [ToolCallPolicy::FirstOnly, ToolCallPolicy::All] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }
}
