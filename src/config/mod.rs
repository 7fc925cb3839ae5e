//! Configuration for mindlink
//!
//! Settings are an injected collaborator: resolved once by the caller (from
//! the environment or a JSON file) and passed to the provider constructor.
//! The adapter itself never reads process-wide state.

pub mod settings;

pub use self::settings::Settings;
