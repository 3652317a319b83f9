pub mod generation_client;
pub mod prompt_builder;
pub mod session_service;

pub use generation_client::{GeminiClient, QuizGenerator};
pub use session_service::SessionService;
