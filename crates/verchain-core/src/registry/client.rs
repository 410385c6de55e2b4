//! Registry client
//!
//! Resolves one edge: builds the authenticated request URL, performs a
//! single GET and extracts the edge's output field from the JSON body.

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::edge::Edge;
use super::error::RegistryLookupFailed;
use super::transport::HttpTransport;
use crate::config::ApiKey;

/// Query parameter carrying the credential.
const CREDENTIAL_PARAM: &str = "password";

#[derive(Debug, Clone)]
pub struct RegistryClient<T> {
    transport: T,
    base_url: Url,
    api_key: ApiKey,
}

impl<T: HttpTransport> RegistryClient<T> {
    pub fn new(transport: T, base_url: Url, api_key: ApiKey) -> Self {
        Self {
            transport,
            base_url,
            api_key,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Look up a single edge with already-bound parameters.
    ///
    /// Succeeds only on a 2xx status whose JSON object body holds a
    /// non-empty value under `edge.output_key`.
    pub async fn resolve_edge(
        &self,
        edge: &Edge,
        params: &[(String, String)],
    ) -> Result<String, RegistryLookupFailed> {
        let failure = |response: String, status: u16| RegistryLookupFailed {
            description: edge.description.to_string(),
            params: params.to_vec(),
            response,
            status,
        };

        let url = self
            .request_url(edge, params)
            .map_err(|err| failure(format!("invalid request URL: {}", err), 0))?;

        debug!(
            path = %url.path(),
            params = %super::error::join_params(params),
            "fetching {}",
            edge.description
        );

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|err| failure(format!("{:#}", err), 0))?;

        if !response.is_success() {
            return Err(failure(response.body, response.status));
        }

        extract_output(&response.body, edge.output_key)
            .map_err(|rendered| failure(rendered, response.status))
    }

    /// Full request URL: edge path under the base URL, the credential, then
    /// the edge parameters in order.
    pub fn request_url(
        &self,
        edge: &Edge,
        params: &[(String, String)],
    ) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(edge.path)?;
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair(CREDENTIAL_PARAM, self.api_key.expose());
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Pull `key` out of a JSON object body.
///
/// Non-empty strings and numbers resolve. Anything else yields the text used
/// as the failure's response: the raw body when it is not a JSON object,
/// otherwise the falsy value followed by the body.
fn extract_output(body: &str, key: &str) -> Result<String, String> {
    let object: Map<String, Value> = match serde_json::from_str(body) {
        Ok(object) => object,
        Err(err) => return Err(format!("{} (invalid JSON object: {})", body, err)),
    };

    match object.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(other) => Err(format!("{} in response {}", other, body)),
        None => Err(format!("undefined in response {}", body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_string_value() {
        assert_eq!(
            extract_output(r#"{"core": "3.5"}"#, "core"),
            Ok("3.5".to_string())
        );
    }

    #[test]
    fn extract_number_value() {
        assert_eq!(extract_output(r#"{"core": 3.5}"#, "core"), Ok("3.5".to_string()));
    }

    #[test]
    fn extract_missing_key() {
        let err = extract_output(r#"{"other": "1"}"#, "core").unwrap_err();
        assert_eq!(err, r#"undefined in response {"other": "1"}"#);
    }

    #[test]
    fn extract_empty_value() {
        let err = extract_output(r#"{"tag": ""}"#, "tag").unwrap_err();
        assert!(err.starts_with("\"\" in response"));
    }

    #[test]
    fn extract_null_value() {
        let err = extract_output(r#"{"tag": null}"#, "tag").unwrap_err();
        assert!(err.starts_with("null in response"));
    }

    #[test]
    fn extract_non_object_body() {
        let err = extract_output("<html>oops</html>", "tag").unwrap_err();
        assert!(err.starts_with("<html>oops</html>"));
        assert!(err.contains("invalid JSON object"));

        assert!(extract_output(r#"["3.5"]"#, "core").is_err());
    }
}
