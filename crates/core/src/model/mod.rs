mod bank;
mod ids;
mod mode;
mod question;
mod session;
mod settings;
mod view;

pub use bank::{QuestionBank, QuestionBankError};
pub use ids::QuestionId;
pub use mode::QuizMode;
pub use question::{MIN_OPTIONS, Question, QuestionError};
pub use session::{QuestionStatus, Session, SessionError};
pub use settings::{DEFAULT_DURATION_MINUTES, DurationError, QuizDuration};
pub use view::ViewState;
