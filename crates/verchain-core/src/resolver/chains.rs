//! Chain definitions
//!
//! Each chain is an ordered list of steps. A step names the output it
//! publishes, the edge it evaluates and the value it consumes: either the
//! chain seed or the output of an earlier step.

use crate::config::InputField;
use crate::registry::Edge;
use crate::registry::edge::{
    AUTH_REACT_TAG, AUTH_REACT_VERSION, AUTH_REACT_VERSION_XY, CORE_TAG, CORE_VERSION,
    CORE_VERSION_XY, FRONTEND_TAG, FRONTEND_VERSION, FRONTEND_VERSION_XY, NODE_TAG,
    NODE_VERSION_XY, PLUGIN_INTERFACE_TAG, PLUGIN_INTERFACE_VERSION, PLUGIN_INTERFACE_VERSION_XY,
    WEB_JS_REACT_VERSION_XY,
};

/// Value a step feeds into its edge's `Upstream` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInput {
    Seed,
    /// Output of an earlier step in the same chain.
    Output(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Name the resolved value is published under.
    pub output: &'static str,
    pub edge: &'static Edge,
    pub input: EdgeInput,
}

impl Step {
    pub const fn new(output: &'static str, edge: &'static Edge, input: EdgeInput) -> Self {
        Self {
            output,
            edge,
            input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub name: &'static str,
    pub seed: InputField,
    pub steps: Vec<Step>,
}

impl Chain {
    /// Check that every step consumes the seed or an earlier output and that
    /// output names are unique.
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            if let EdgeInput::Output(source) = step.input
                && !seen.contains(&source)
            {
                anyhow::bail!(
                    "Chain '{}': step '{}' consumes '{}' which is not produced earlier",
                    self.name,
                    step.output,
                    source
                );
            }
            if seen.contains(&step.output) {
                anyhow::bail!(
                    "Chain '{}': output '{}' is produced twice",
                    self.name,
                    step.output
                );
            }
            seen.push(step.output);
        }
        Ok(())
    }

    /// Output names in evaluation order.
    pub fn outputs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|step| step.output)
    }
}

/// Core and plugin-interface versions, seeded by `cdi-version`.
pub fn core_chain() -> Chain {
    use EdgeInput::{Output, Seed};
    Chain {
        name: "core",
        seed: InputField::CdiVersion,
        steps: vec![
            Step::new("coreVersionXy", &CORE_VERSION_XY, Seed),
            Step::new("coreTag", &CORE_TAG, Output("coreVersionXy")),
            Step::new("coreVersion", &CORE_VERSION, Output("coreVersionXy")),
            Step::new(
                "pluginInterfaceVersionXy",
                &PLUGIN_INTERFACE_VERSION_XY,
                Output("coreVersionXy"),
            ),
            Step::new(
                "pluginInterfaceTag",
                &PLUGIN_INTERFACE_TAG,
                Output("pluginInterfaceVersionXy"),
            ),
            Step::new(
                "pluginInterfaceVersion",
                &PLUGIN_INTERFACE_VERSION,
                Output("pluginInterfaceVersionXy"),
            ),
        ],
    }
}

/// Website, node and auth-react versions, seeded by `fdi-version`.
///
/// The three sub-chains share the seed but not each other's outputs.
pub fn frontend_chain() -> Chain {
    use EdgeInput::{Output, Seed};
    Chain {
        name: "frontend",
        seed: InputField::FdiVersion,
        steps: vec![
            Step::new("frontendVersionXy", &FRONTEND_VERSION_XY, Seed),
            Step::new("frontendTag", &FRONTEND_TAG, Output("frontendVersionXy")),
            Step::new("frontendVersion", &FRONTEND_VERSION, Output("frontendVersionXy")),
            Step::new("nodeVersionXy", &NODE_VERSION_XY, Seed),
            Step::new("nodeTag", &NODE_TAG, Output("nodeVersionXy")),
            Step::new("authReactVersionXy", &AUTH_REACT_VERSION_XY, Seed),
            Step::new("authReactTag", &AUTH_REACT_TAG, Output("authReactVersionXy")),
            Step::new(
                "authReactVersion",
                &AUTH_REACT_VERSION,
                Output("authReactVersionXy"),
            ),
        ],
    }
}

/// auth-react versions compatible with a web-js interface version.
pub fn web_js_chain() -> Chain {
    use EdgeInput::{Output, Seed};
    Chain {
        name: "web-js",
        seed: InputField::WebJsInterfaceVersion,
        steps: vec![
            Step::new("webJsReactVersionXy", &WEB_JS_REACT_VERSION_XY, Seed),
            Step::new("webJsReactTag", &AUTH_REACT_TAG, Output("webJsReactVersionXy")),
            Step::new(
                "webJsReactVersion",
                &AUTH_REACT_VERSION,
                Output("webJsReactVersionXy"),
            ),
        ],
    }
}

/// Every chain, in run order.
pub fn all() -> Vec<Chain> {
    vec![core_chain(), frontend_chain(), web_js_chain()]
}
