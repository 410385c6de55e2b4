//! Verchain Core Library
//!
//! Resolves the version identifiers of the core, plugin-interface and
//! frontend drivers by walking chains of lookups against the version
//! registry, publishing every resolved value as a pipeline output.

pub mod config;
pub mod output;
pub mod registry;
pub mod resolver;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        ActionsEnv, ApiKey, InputField, InputSource, Inputs, Layered, RegistrySettings,
    };

    // Registry
    pub use crate::registry::{
        Edge, HttpTransport, ParamValue, RawResponse, RegistryClient, RegistryLookupFailed,
        ReqwestTransport,
    };

    // Resolution
    pub use crate::resolver::{Chain, ChainResolver, EdgeInput, Resolution, ResolvedOutput, Step};

    // Outputs
    pub use crate::output::{GithubOutputFile, MemorySink, OutputSink, StdoutSink};
}
