//! Scheduler options: typed surface plus the host-facing JSON document.

use serde::{Deserialize, Serialize};

use crate::error::PresenceError;

/// Default enter duration in milliseconds.
pub const DEFAULT_ENTER_MS: f64 = 1000.0;
/// Default leave duration in milliseconds.
pub const DEFAULT_LEAVE_MS: f64 = 1000.0;

/// Resolved options captured by each instance at creation.
///
/// `configure` applies a new set to instances created afterward; in-flight
/// instances keep the snapshot they were born with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceOptions {
    /// Enter animation duration in milliseconds
    pub enter_ms: f64,
    /// Leave animation duration in milliseconds
    pub leave_ms: f64,
    /// Retire an entering instance by reversing from its current existence
    /// instead of letting the enter animation finish first
    pub symmetric: bool,
}

impl Default for PresenceOptions {
    fn default() -> Self {
        Self {
            enter_ms: DEFAULT_ENTER_MS,
            leave_ms: DEFAULT_LEAVE_MS,
            symmetric: false,
        }
    }
}

impl PresenceOptions {
    /// Set the enter duration
    #[inline]
    pub fn with_enter_ms(mut self, ms: f64) -> Self {
        self.enter_ms = ms;
        self
    }

    /// Set the leave duration
    #[inline]
    pub fn with_leave_ms(mut self, ms: f64) -> Self {
        self.leave_ms = ms;
        self
    }

    /// Set the symmetric flag
    #[inline]
    pub fn with_symmetric(mut self, symmetric: bool) -> Self {
        self.symmetric = symmetric;
        self
    }

    /// Clamp negative or non-finite durations to 0. Zero stays legal; it
    /// makes existence jump to the boundary on the first tick.
    pub fn normalized(mut self) -> Self {
        self.enter_ms = clamp_duration(self.enter_ms);
        self.leave_ms = clamp_duration(self.leave_ms);
        self
    }
}

#[inline]
fn clamp_duration(ms: f64) -> f64 {
    if ms.is_finite() && ms > 0.0 {
        ms
    } else {
        0.0
    }
}

/// Raw options document as hosts supply it. All keys are optional; missing
/// keys resolve to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsDoc {
    pub symmetric: Option<bool>,
    pub timings: Option<TimingsDoc>,
    /// Deprecated: single duration applied to both enter and leave.
    /// Superseded by `timings`; still honored when `timings` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// The `timings` object of an options document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsDoc {
    pub enter: Option<f64>,
    pub leave: Option<f64>,
}

impl OptionsDoc {
    /// Resolve the document against defaults. Returns the normalized
    /// options and whether a deprecated key was present (the caller decides
    /// whether that warrants an advisory).
    pub fn resolve(&self) -> (PresenceOptions, bool) {
        let mut opts = PresenceOptions::default();
        if let Some(both) = self.duration {
            opts.enter_ms = both;
            opts.leave_ms = both;
        }
        if let Some(timings) = &self.timings {
            if let Some(enter) = timings.enter {
                opts.enter_ms = enter;
            }
            if let Some(leave) = timings.leave {
                opts.leave_ms = leave;
            }
        }
        if let Some(symmetric) = self.symmetric {
            opts.symmetric = symmetric;
        }
        (opts.normalized(), self.has_deprecated_keys())
    }

    /// Check whether the document uses any deprecated key
    #[inline]
    pub fn has_deprecated_keys(&self) -> bool {
        self.duration.is_some()
    }
}

/// Parse a host-supplied JSON options document.
///
/// Malformed JSON reports as a serialization error; well-formed JSON of the
/// wrong shape reports as invalid options. Out-of-range durations are not
/// errors; they clamp during `resolve`.
pub fn parse_options_json(s: &str) -> crate::Result<OptionsDoc> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    let doc: OptionsDoc = serde_json::from_value(value)
        .map_err(|e| PresenceError::invalid_options(e.to_string()))?;
    Ok(doc)
}
