//! Run configuration
//!
//! Loads the seed inputs delivered by the pipeline, the registry credential
//! and the registry location. Everything here is read once at startup and
//! never mutated afterwards.

pub mod credential;
pub mod inputs;
pub mod settings;

pub use credential::{API_KEY_ENV, ApiKey};
pub use inputs::{ActionsEnv, InputField, InputSource, Inputs, Layered};
pub use settings::{DEFAULT_REGISTRY_URL, REGISTRY_URL_ENV, RegistrySettings};
