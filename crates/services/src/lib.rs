#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod explanation_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use error::{AppServicesError, ConfigError, ExplanationError, QuizError};
pub use explanation_service::{
    ExplanationConfig, ExplanationProvider, ExplanationService, FETCH_FAILED_FALLBACK,
    NOT_AVAILABLE_FALLBACK,
};
pub use quiz::{
    ExplanationReply, ExplanationRequest, ExplanationSlot, ExplanationTicket, QuizController,
    QuizFlow, QuizSnapshot, SelectOutcome,
};
