//! Seed inputs delivered by the pipeline.
//!
//! Inputs arrive through an [`InputSource`]. On a pipeline runner they are
//! environment variables (`INPUT_DRIVER-NAME`, ...); the CLI layers its own
//! flags on top so a local run can supply or override any of them.

use std::collections::HashMap;

use serde::Serialize;

/// Key-value source of pipeline inputs.
pub trait InputSource {
    /// Raw value for an input name such as `driver-name`.
    fn get(&self, key: &str) -> Option<String>;
}

/// Inputs passed by the pipeline runner as `INPUT_<NAME>` variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsEnv;

impl ActionsEnv {
    /// Variable name the runner uses for an input.
    ///
    /// Spaces become underscores and the name is upper-cased; hyphens are kept.
    pub fn variable_name(key: &str) -> String {
        format!("INPUT_{}", key.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for ActionsEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::variable_name(key))
            .ok()
            .map(|value| value.trim().to_string())
    }
}

impl InputSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Looks up `overrides` first and falls back to `fallback`.
///
/// An empty override does not hide the fallback value.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    overrides: A,
    fallback: B,
}

impl<A, B> Layered<A, B> {
    pub fn new(overrides: A, fallback: B) -> Self {
        Self {
            overrides,
            fallback,
        }
    }
}

impl<A: InputSource, B: InputSource> InputSource for Layered<A, B> {
    fn get(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .filter(|value| !value.is_empty())
            .or_else(|| self.fallback.get(key))
    }
}

/// Names of every input the resolver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    DriverName,
    CdiVersion,
    CoreMode,
    CorePlanType,
    FrontendMode,
    FdiVersion,
    WebJsInterfaceVersion,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::DriverName,
        InputField::CdiVersion,
        InputField::CoreMode,
        InputField::CorePlanType,
        InputField::FrontendMode,
        InputField::FdiVersion,
        InputField::WebJsInterfaceVersion,
    ];

    /// Input name as declared by the pipeline step.
    pub fn key(self) -> &'static str {
        match self {
            InputField::DriverName => "driver-name",
            InputField::CdiVersion => "cdi-version",
            InputField::CoreMode => "core-mode",
            InputField::CorePlanType => "core-plan-type",
            InputField::FrontendMode => "frontend-mode",
            InputField::FdiVersion => "fdi-version",
            InputField::WebJsInterfaceVersion => "web-js-interface-version",
        }
    }
}

/// Immutable record of the seed inputs for one run.
///
/// Optional fields double as chain switches: a chain whose seed is `None`
/// is not run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    pub driver_name: String,
    pub cdi_version: Option<String>,
    pub core_mode: Option<String>,
    pub core_plan_type: Option<String>,
    pub frontend_mode: Option<String>,
    pub fdi_version: Option<String>,
    pub web_js_interface_version: Option<String>,
}

impl Inputs {
    /// Load inputs from a source. Empty values count as absent.
    pub fn load(source: &impl InputSource) -> anyhow::Result<Self> {
        let read = |field: InputField| source.get(field.key()).filter(|value| !value.is_empty());

        let driver_name = read(InputField::DriverName).ok_or_else(|| {
            anyhow::anyhow!(
                "Input required and not supplied: {}",
                InputField::DriverName.key()
            )
        })?;

        Ok(Self {
            driver_name,
            cdi_version: read(InputField::CdiVersion),
            core_mode: read(InputField::CoreMode),
            core_plan_type: read(InputField::CorePlanType),
            frontend_mode: read(InputField::FrontendMode),
            fdi_version: read(InputField::FdiVersion),
            web_js_interface_version: read(InputField::WebJsInterfaceVersion),
        })
    }

    /// Value of a field, `None` when absent or empty.
    pub fn get(&self, field: InputField) -> Option<&str> {
        let value = match field {
            InputField::DriverName => Some(&self.driver_name),
            InputField::CdiVersion => self.cdi_version.as_ref(),
            InputField::CoreMode => self.core_mode.as_ref(),
            InputField::CorePlanType => self.core_plan_type.as_ref(),
            InputField::FrontendMode => self.frontend_mode.as_ref(),
            InputField::FdiVersion => self.fdi_version.as_ref(),
            InputField::WebJsInterfaceVersion => self.web_js_interface_version.as_ref(),
        };
        value.map(String::as_str).filter(|value| !value.is_empty())
    }
}
