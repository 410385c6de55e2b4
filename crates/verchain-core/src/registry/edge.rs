//! Edge descriptors
//!
//! An edge is one registry lookup: a path under the registry base URL, a
//! parameter template, a description used in failure messages and the JSON
//! field to extract. Edges are static data; chains reference them.

use crate::config::{InputField, Inputs};

/// Where a query parameter takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    /// Fixed value, e.g. a driver name baked into the edge.
    Literal(&'static str),
    /// A configuration field; absent fields are sent as empty strings.
    Input(InputField),
    /// The value consumed by this edge (the chain seed or an earlier output).
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Path relative to the registry base URL.
    pub path: &'static str,
    pub params: &'static [(&'static str, ParamValue)],
    pub description: &'static str,
    /// JSON field holding the resolved value.
    pub output_key: &'static str,
}

impl Edge {
    /// Substitute the parameter template, preserving declaration order.
    pub fn bind(&self, inputs: &Inputs, upstream: &str) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    ParamValue::Literal(literal) => (*literal).to_string(),
                    ParamValue::Input(field) => inputs.get(*field).unwrap_or_default().to_string(),
                    ParamValue::Upstream => upstream.to_string(),
                };
                (name.to_string(), value)
            })
            .collect()
    }
}

pub static CORE_VERSION_XY: Edge = Edge {
    path: "core-driver-interface/dependency/core/latest/",
    params: &[
        ("planType", ParamValue::Input(InputField::CorePlanType)),
        ("mode", ParamValue::Input(InputField::CoreMode)),
        ("driverName", ParamValue::Input(InputField::DriverName)),
        ("version", ParamValue::Upstream),
    ],
    description: "core X.Y version",
    output_key: "core",
};

const CORE_PARAMS: &[(&str, ParamValue)] = &[
    ("planType", ParamValue::Input(InputField::CorePlanType)),
    ("mode", ParamValue::Input(InputField::CoreMode)),
    ("version", ParamValue::Upstream),
];

pub static CORE_TAG: Edge = Edge {
    path: "core/latest",
    params: CORE_PARAMS,
    description: "core tag",
    output_key: "tag",
};

pub static CORE_VERSION: Edge = Edge {
    path: "core/latest",
    params: CORE_PARAMS,
    description: "core version",
    output_key: "version",
};

pub static PLUGIN_INTERFACE_VERSION_XY: Edge = Edge {
    path: "core/dependency/plugin-interface/latest",
    params: CORE_PARAMS,
    description: "plugin-interface X.Y version",
    output_key: "pluginInterface",
};

pub static PLUGIN_INTERFACE_TAG: Edge = Edge {
    path: "plugin-interface/latest",
    params: CORE_PARAMS,
    description: "plugin-interface tag",
    output_key: "tag",
};

pub static PLUGIN_INTERFACE_VERSION: Edge = Edge {
    path: "plugin-interface/latest",
    params: CORE_PARAMS,
    description: "plugin-interface version",
    output_key: "version",
};

pub static FRONTEND_VERSION_XY: Edge = Edge {
    path: "frontend-driver-interface/dependency/frontend/latest/",
    params: &[
        ("frontendName", ParamValue::Literal("website")),
        ("mode", ParamValue::Input(InputField::FrontendMode)),
        ("driverName", ParamValue::Input(InputField::DriverName)),
        ("version", ParamValue::Upstream),
    ],
    description: "frontend X.Y version",
    output_key: "frontend",
};

const WEBSITE_DRIVER_PARAMS: &[(&str, ParamValue)] = &[
    ("mode", ParamValue::Input(InputField::FrontendMode)),
    ("name", ParamValue::Literal("website")),
    ("version", ParamValue::Upstream),
];

pub static FRONTEND_TAG: Edge = Edge {
    path: "driver/latest/",
    params: WEBSITE_DRIVER_PARAMS,
    description: "frontend X.Y.Z version tag",
    output_key: "tag",
};

pub static FRONTEND_VERSION: Edge = Edge {
    path: "driver/latest/",
    params: WEBSITE_DRIVER_PARAMS,
    description: "frontend X.Y.Z version",
    output_key: "version",
};

pub static NODE_VERSION_XY: Edge = Edge {
    path: "frontend-driver-interface/dependency/driver/latest/",
    params: &[
        ("frontendName", ParamValue::Literal("auth-react")),
        ("mode", ParamValue::Input(InputField::FrontendMode)),
        ("driverName", ParamValue::Literal("node")),
        ("version", ParamValue::Upstream),
    ],
    description: "node driver X.Y version",
    output_key: "driver",
};

pub static NODE_TAG: Edge = Edge {
    path: "driver/latest/",
    params: &[
        ("mode", ParamValue::Input(InputField::FrontendMode)),
        ("name", ParamValue::Literal("node")),
        ("version", ParamValue::Upstream),
    ],
    description: "node X.Y.Z version tag",
    output_key: "tag",
};

pub static AUTH_REACT_VERSION_XY: Edge = Edge {
    path: "frontend-driver-interface/dependency/frontend/latest/",
    params: &[
        ("frontendName", ParamValue::Literal("auth-react")),
        ("mode", ParamValue::Input(InputField::FrontendMode)),
        ("driverName", ParamValue::Input(InputField::DriverName)),
        ("version", ParamValue::Upstream),
    ],
    description: "auth-react frontend driver X.Y version",
    output_key: "frontend",
};

const AUTH_REACT_DRIVER_PARAMS: &[(&str, ParamValue)] = &[
    ("mode", ParamValue::Input(InputField::FrontendMode)),
    ("name", ParamValue::Literal("auth-react")),
    ("version", ParamValue::Upstream),
];

pub static AUTH_REACT_TAG: Edge = Edge {
    path: "driver/latest/",
    params: AUTH_REACT_DRIVER_PARAMS,
    description: "auth-react frontend X.Y version tag",
    output_key: "tag",
};

pub static AUTH_REACT_VERSION: Edge = Edge {
    path: "driver/latest/",
    params: AUTH_REACT_DRIVER_PARAMS,
    description: "auth-react frontend X.Y version",
    output_key: "version",
};

pub static WEB_JS_REACT_VERSION_XY: Edge = Edge {
    path: "web-js-interface/dependency/frontend/latest",
    params: &[
        ("frontendName", ParamValue::Literal("auth-react")),
        ("mode", ParamValue::Input(InputField::FrontendMode)),
        ("version", ParamValue::Upstream),
    ],
    description: "web-js-interface React X.Y version",
    output_key: "frontend",
};
