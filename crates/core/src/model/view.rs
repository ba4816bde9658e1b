use std::fmt;

/// The screen that is currently active. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Setup,
    Quiz,
    Results,
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Setup => f.write_str("setup"),
            ViewState::Quiz => f.write_str("quiz"),
            ViewState::Results => f.write_str("results"),
        }
    }
}
