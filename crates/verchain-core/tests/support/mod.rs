//! Scripted in-memory registry for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use url::Url;
use verchain_core::config::{ApiKey, Inputs};
use verchain_core::registry::{HttpTransport, RawResponse, RegistryClient};

pub const BASE_URL: &str = "https://registry.test/0/";
pub const API_KEY: &str = "test-key";

#[derive(Debug)]
struct Route {
    path: String,
    matches: Vec<(String, String)>,
    response: RawResponse,
}

/// Answers requests from a route table and records every URL it was asked for.
///
/// A route matches when the path is equal and every listed parameter has the
/// listed value; the first matching route wins and unmatched requests get 404.
#[derive(Debug, Default)]
pub struct ScriptedRegistry {
    routes: Vec<Route>,
    requests: Mutex<Vec<Url>>,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, matches: &[(&str, &str)], body: serde_json::Value) -> Self {
        self.raw(path, matches, 200, &body.to_string())
    }

    pub fn raw(mut self, path: &str, matches: &[(&str, &str)], status: u16, body: &str) -> Self {
        self.routes.push(Route {
            path: format!("/0/{}", path),
            matches: matches
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            response: RawResponse::new(status, body),
        });
        self
    }

    /// Insert a route ahead of the existing ones.
    pub fn override_raw(
        mut self,
        path: &str,
        matches: &[(&str, &str)],
        status: u16,
        body: &str,
    ) -> Self {
        let existing = std::mem::take(&mut self.routes);
        self = self.raw(path, matches, status, body);
        self.routes.extend(existing);
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Query parameters of every request, in order.
    pub fn request_params(&self) -> Vec<Vec<(String, String)>> {
        self.requests()
            .iter()
            .map(|url| url.query_pairs().into_owned().collect())
            .collect()
    }

    /// `(path, version)` of every request, in order.
    pub fn request_log(&self) -> Vec<(String, String)> {
        self.requests()
            .iter()
            .map(|url| {
                let version = url
                    .query_pairs()
                    .find(|(key, _)| key == "version")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                (url.path().trim_start_matches("/0/").to_string(), version)
            })
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedRegistry {
    async fn get(&self, url: &Url) -> anyhow::Result<RawResponse> {
        self.requests.lock().unwrap().push(url.clone());

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let route = self.routes.iter().find(|route| {
            route.path == url.path() && route.matches.iter().all(|pair| params.contains(pair))
        });

        Ok(route
            .map(|route| route.response.clone())
            .unwrap_or_else(|| RawResponse::new(404, "Not Found")))
    }
}

/// Transport whose every request fails before a response arrives.
#[derive(Debug, Default)]
pub struct UnreachableRegistry;

#[async_trait]
impl HttpTransport for UnreachableRegistry {
    async fn get(&self, _url: &Url) -> anyhow::Result<RawResponse> {
        anyhow::bail!("connection refused")
    }
}

pub fn client<T: HttpTransport>(transport: T) -> RegistryClient<T> {
    RegistryClient::new(transport, Url::parse(BASE_URL).unwrap(), ApiKey::new(API_KEY))
}

/// Inputs with every mode set and no chain seeds.
pub fn inputs() -> Inputs {
    Inputs {
        driver_name: "python".to_string(),
        core_mode: Some("DEV".to_string()),
        core_plan_type: Some("FREE".to_string()),
        frontend_mode: Some("PRODUCTION".to_string()),
        ..Default::default()
    }
}

/// Registry answering every edge of every chain for cdi `2.21`, fdi `1.17`
/// and web-js `0.8`.
pub fn full_registry() -> ScriptedRegistry {
    ScriptedRegistry::new()
        // core
        .json(
            "core-driver-interface/dependency/core/latest/",
            &[("version", "2.21")],
            json!({"core": "7.0"}),
        )
        .json(
            "core/latest",
            &[("version", "7.0")],
            json!({"tag": "v7.0.12", "version": "7.0.12"}),
        )
        .json(
            "core/dependency/plugin-interface/latest",
            &[("version", "7.0")],
            json!({"pluginInterface": "3.0"}),
        )
        .json(
            "plugin-interface/latest",
            &[("version", "3.0")],
            json!({"tag": "v3.0.1", "version": "3.0.1"}),
        )
        // frontend
        .json(
            "frontend-driver-interface/dependency/frontend/latest/",
            &[("frontendName", "website"), ("version", "1.17")],
            json!({"frontend": "0.40"}),
        )
        .json(
            "frontend-driver-interface/dependency/frontend/latest/",
            &[("frontendName", "auth-react"), ("version", "1.17")],
            json!({"frontend": "0.39"}),
        )
        .json(
            "frontend-driver-interface/dependency/driver/latest/",
            &[("driverName", "node"), ("version", "1.17")],
            json!({"driver": "16.7"}),
        )
        .json(
            "driver/latest/",
            &[("name", "website"), ("version", "0.40")],
            json!({"tag": "v0.40.1", "version": "0.40.1"}),
        )
        .json(
            "driver/latest/",
            &[("name", "node"), ("version", "16.7")],
            json!({"tag": "v16.7.3"}),
        )
        .json(
            "driver/latest/",
            &[("name", "auth-react"), ("version", "0.39")],
            json!({"tag": "v0.39.4", "version": "0.39.4"}),
        )
        .json(
            "driver/latest/",
            &[("name", "auth-react"), ("version", "0.42")],
            json!({"tag": "v0.42.2", "version": "0.42.2"}),
        )
        // web-js
        .json(
            "web-js-interface/dependency/frontend/latest",
            &[("frontendName", "auth-react"), ("version", "0.8")],
            json!({"frontend": "0.42"}),
        )
}
