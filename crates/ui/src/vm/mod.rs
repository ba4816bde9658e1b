mod quiz_vm;
mod results_vm;
mod setup_vm;
mod time_fmt;

pub use quiz_vm::{
    ExplanationVm, OptionTone, OptionVm, PaletteItemVm, QuizScreenVm, map_quiz_screen,
    option_letter,
};
pub use results_vm::{ResultsVm, map_results};
pub use setup_vm::{ModeCardVm, SetupInputError, map_mode_cards, parse_minutes};
pub use time_fmt::TimerLabelVm;
