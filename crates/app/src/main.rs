use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{QuestionBank, QuizDuration};
use services::config::parse_duration;
use services::{AppServices, Clock, ConfigError, ExplanationProvider, QuizConfig};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDuration(ConfigError),
    EmptyTitle,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDuration(err) => write!(f, "invalid --duration value: {err}"),
            ArgsError::EmptyTitle => write!(f, "--title must not be blank"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::InvalidDuration(err) => Some(err),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn config(&self) -> Arc<QuizConfig> {
        self.services.config()
    }

    fn question_bank(&self) -> QuestionBank {
        self.services.question_bank()
    }

    fn explanations(&self) -> Arc<dyn ExplanationProvider> {
        self.services.explanations()
    }

    fn clock(&self) -> Clock {
        self.services.clock()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--duration <minutes>] [--questions <path>] [--title <text>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --duration 50");
    eprintln!("  --questions <bundled question bank>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DURATION_MINUTES, QUIZ_QUESTIONS_PATH, QUIZ_TITLE");
    eprintln!("  QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL, QUIZ_AI_LANGUAGE,");
    eprintln!("  QUIZ_AI_TIMEOUT_SECS, RUST_LOG");
}

/// Flag overrides layered on top of the environment config.
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    duration: Option<QuizDuration>,
    questions: Option<PathBuf>,
    title: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Command, ArgsError> {
        let mut args = args.into_iter();
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--duration" => {
                    let value = require_value(&mut args, "--duration")?;
                    let duration = parse_duration("--duration", &value)
                        .map_err(ArgsError::InvalidDuration)?;
                    parsed.duration = Some(duration);
                }
                "--questions" => {
                    let value = require_value(&mut args, "--questions")?;
                    parsed.questions = Some(PathBuf::from(value));
                }
                "--title" => {
                    let value = require_value(&mut args, "--title")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyTitle);
                    }
                    parsed.title = Some(value);
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Run(parsed))
    }

    fn apply(self, mut config: QuizConfig) -> QuizConfig {
        if let Some(duration) = self.duration {
            config = config.with_default_duration(duration);
        }
        if let Some(path) = self.questions {
            config = config.with_questions_path(path);
        }
        if let Some(title) = self.title {
            config = config.with_title(title);
        }
        config
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = match Args::parse(std::env::args().skip(1)).inspect_err(|_| print_usage())? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Run(args) => args,
    };

    let config = args.apply(QuizConfig::from_env()?);
    let window_title = config.title.clone();
    let services = AppServices::from_config(config, Clock::system())?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(window_title)
            .with_always_on_top(false),
    );

    log::info!("launching quiz window");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
