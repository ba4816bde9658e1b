mod quiz;
mod results;
mod root;
mod setup;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use quiz::QuizView;
pub use results::ResultsView;
pub use root::{QuizRoot, QuizScreens};
pub use setup::SetupView;

#[cfg(test)]
pub(crate) use quiz::QuizTestHandles;
