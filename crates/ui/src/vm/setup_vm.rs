use std::fmt;

use quiz_core::model::QuizMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeCardVm {
    pub mode: QuizMode,
    pub title: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

impl ModeCardVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.selected {
            "mode-card mode-card--selected"
        } else {
            "mode-card"
        }
    }
}

#[must_use]
pub fn map_mode_cards(selected: Option<QuizMode>) -> Vec<ModeCardVm> {
    QuizMode::ALL
        .into_iter()
        .map(|mode| ModeCardVm {
            mode,
            title: mode.label(),
            description: mode.description(),
            selected: selected == Some(mode),
        })
        .collect()
}

/// The duration field did not hold a whole number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupInputError {
    raw: String,
}

impl fmt::Display for SetupInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" is not a whole number of minutes", self.raw)
    }
}

/// Parse the duration field. Range checks happen when the quiz starts.
///
/// # Errors
///
/// Returns `SetupInputError` if `raw` is not an integer.
pub fn parse_minutes(raw: &str) -> Result<i64, SetupInputError> {
    raw.trim().parse().map_err(|_| SetupInputError {
        raw: raw.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_only_the_chosen_mode() {
        let cards = map_mode_cards(Some(QuizMode::Practice));
        assert_eq!(cards.len(), 2);
        assert!(!cards[0].selected);
        assert!(cards[1].selected);
        assert_eq!(cards[1].class(), "mode-card mode-card--selected");
        assert!(map_mode_cards(None).iter().all(|card| !card.selected));
    }

    #[test]
    fn parses_trimmed_minutes() {
        assert_eq!(parse_minutes(" 45 "), Ok(45));
        assert_eq!(parse_minutes("0"), Ok(0));
        assert_eq!(parse_minutes("-3"), Ok(-3));
    }

    #[test]
    fn rejects_non_numeric_minutes() {
        let err = parse_minutes("ten").unwrap_err();
        assert_eq!(err.to_string(), "\"ten\" is not a whole number of minutes");
        assert!(parse_minutes("").is_err());
    }
}
