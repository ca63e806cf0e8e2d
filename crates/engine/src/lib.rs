#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod progress;
pub mod rotation;
pub mod selection;
pub mod session;

pub use assess_core::Clock;

pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use progress::Progress;
pub use selection::{FirstCandidate, SelectionPolicy, UniformRandom};
pub use session::AssessmentSession;
