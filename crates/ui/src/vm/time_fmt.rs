use quiz_core::timer::{format_countdown, is_urgent};

/// Countdown badge text plus whether it should be styled as urgent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerLabelVm {
    pub text: String,
    pub urgent: bool,
}

impl TimerLabelVm {
    #[must_use]
    pub fn from_remaining(remaining_secs: u32) -> Self {
        Self {
            text: format_countdown(remaining_secs),
            urgent: is_urgent(remaining_secs),
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.urgent {
            "timer timer--urgent"
        } else {
            "timer"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_minute_is_not_urgent() {
        let label = TimerLabelVm::from_remaining(60);
        assert_eq!(label.text, "1:00");
        assert!(!label.urgent);
        assert_eq!(label.class(), "timer");
    }

    #[test]
    fn last_minute_is_urgent() {
        let label = TimerLabelVm::from_remaining(59);
        assert_eq!(label.text, "0:59");
        assert_eq!(label.class(), "timer timer--urgent");
    }
}
