use serde::{Deserialize, Serialize};

/// Lifecycle phase of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Instance is animating in; existence climbs toward 1
    Entering,
    /// Instance is fully present; no progress computation runs
    Present,
    /// Instance is animating out; existence falls toward 0
    Leaving,
    /// Entering instance was retired under the symmetric policy; the next
    /// tick converts it to Leaving starting from its current existence
    Reversing,
}

impl Phase {
    /// Get the name of this phase
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Present => "present",
            Self::Leaving => "leaving",
            Self::Reversing => "reversing",
        }
    }

    /// Check if the instance still needs ticks to make progress
    #[inline]
    pub fn is_animating(&self) -> bool {
        !matches!(self, Self::Present)
    }

    /// Check if the instance is on its way out of the stack
    #[inline]
    pub fn is_departing(&self) -> bool {
        matches!(self, Self::Leaving | Self::Reversing)
    }

    /// Check if the instance has settled at full presence
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Present)
    }
}

impl From<&str> for Phase {
    fn from(s: &str) -> Self {
        match s {
            "entering" => Self::Entering,
            "present" => Self::Present,
            "leaving" => Self::Leaving,
            "reversing" => Self::Reversing,
            _ => Self::Present,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for phase in [
            Phase::Entering,
            Phase::Present,
            Phase::Leaving,
            Phase::Reversing,
        ] {
            assert_eq!(Phase::from(phase.name()), phase);
        }
    }

    #[test]
    fn predicates() {
        assert!(Phase::Entering.is_animating());
        assert!(Phase::Reversing.is_animating());
        assert!(!Phase::Present.is_animating());
        assert!(Phase::Present.is_settled());
        assert!(Phase::Leaving.is_departing());
        assert!(Phase::Reversing.is_departing());
        assert!(!Phase::Entering.is_departing());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Phase::Entering).unwrap();
        assert_eq!(json, "\"entering\"");
        let back: Phase = serde_json::from_str("\"reversing\"").unwrap();
        assert_eq!(back, Phase::Reversing);
    }
}
