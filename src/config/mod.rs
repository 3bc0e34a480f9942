#[cfg(feature = "cli")]
pub mod cli;
pub mod session;

#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use session::{LogFormat, SessionConfig};
