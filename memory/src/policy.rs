//! Memory policy: how long ephemeral memory stays trusted, how far back it is summarized, and
//! how many turns go into a reply request verbatim.

use chrono::Duration;

/// Ephemeral memory older than this is marked stale in the reply prompt.
pub const EPHEMERAL_TTL_HOURS: i64 = 24;
/// Only turns newer than this feed the ephemeral summary.
pub const EPHEMERAL_WINDOW_HOURS: i64 = 24;
/// Most recent turns included verbatim in a reply request.
pub const MAX_CONTEXT_MSGS: usize = 8;
/// Upper bound for the TTL and the window: 100 years.
pub const MAX_POLICY_HOURS: i64 = 24 * 365 * 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPolicy {
    pub ephemeral_ttl_hours: i64,
    pub ephemeral_window_hours: i64,
    pub max_context_msgs: usize,
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self {
            ephemeral_ttl_hours: EPHEMERAL_TTL_HOURS,
            ephemeral_window_hours: EPHEMERAL_WINDOW_HOURS,
            max_context_msgs: MAX_CONTEXT_MSGS,
        }
    }
}

impl MemoryPolicy {
    /// Both hour settings must lie in `1..=MAX_POLICY_HOURS`.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, hours) in [
            ("EPHEMERAL_TTL_HOURS", self.ephemeral_ttl_hours),
            ("EPHEMERAL_WINDOW_HOURS", self.ephemeral_window_hours),
        ] {
            if !(1..=MAX_POLICY_HOURS).contains(&hours) {
                anyhow::bail!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    MAX_POLICY_HOURS,
                    hours
                );
            }
        }
        Ok(())
    }

    /// Clamped to `0..=MAX_POLICY_HOURS`, so an unvalidated policy cannot overflow.
    pub fn ephemeral_ttl(&self) -> Duration {
        clamped_hours(self.ephemeral_ttl_hours)
    }

    /// Clamped like [`Self::ephemeral_ttl`].
    pub fn ephemeral_window(&self) -> Duration {
        clamped_hours(self.ephemeral_window_hours)
    }
}

fn clamped_hours(hours: i64) -> Duration {
    Duration::hours(hours.clamp(0, MAX_POLICY_HOURS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        assert!(MemoryPolicy::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_hours_are_rejected() {
        let policy = MemoryPolicy {
            ephemeral_ttl_hours: 0,
            ..MemoryPolicy::default()
        };
        assert!(policy.validate().is_err());

        let policy = MemoryPolicy {
            ephemeral_window_hours: MAX_POLICY_HOURS + 1,
            ..MemoryPolicy::default()
        };
        let err = policy.validate().unwrap_err().to_string();
        assert!(err.contains("EPHEMERAL_WINDOW_HOURS"));

        let policy = MemoryPolicy {
            ephemeral_window_hours: MAX_POLICY_HOURS,
            ..MemoryPolicy::default()
        };
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn huge_or_negative_hours_clamp_instead_of_panicking() {
        let policy = MemoryPolicy {
            ephemeral_ttl_hours: 10_000_000_000_000,
            ephemeral_window_hours: -5,
            max_context_msgs: MAX_CONTEXT_MSGS,
        };
        assert_eq!(policy.ephemeral_ttl(), Duration::hours(MAX_POLICY_HOURS));
        assert_eq!(policy.ephemeral_window(), Duration::zero());
    }
}
