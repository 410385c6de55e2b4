//! Registry lookup failure.

use thiserror::Error;

/// The single failure kind of a registry lookup.
///
/// Non-success statuses, transport failures, undecodable bodies and missing
/// or empty output fields all surface as this error. The message names the
/// edge and every parameter sent (the credential excluded), so a failed
/// pipeline log is self-explanatory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Fetch {description} for {pairs} yielded: {response} with statusCode={status}", pairs = join_params(.params))]
pub struct RegistryLookupFailed {
    pub description: String,
    pub params: Vec<(String, String)>,
    /// Raw body, or the falsy extracted value for missing-key failures.
    pub response: String,
    /// HTTP status; `0` when no response was received.
    pub status: u16,
}

/// Render parameters as `key=value, key=value`.
pub fn join_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_lists_params_in_order() {
        let err = RegistryLookupFailed {
            description: "core tag".to_string(),
            params: vec![
                ("planType".to_string(), "FREE".to_string()),
                ("mode".to_string(), "DEV".to_string()),
                ("version".to_string(), "3.5".to_string()),
            ],
            response: "Not Found".to_string(),
            status: 404,
        };

        assert_eq!(
            err.to_string(),
            "Fetch core tag for planType=FREE, mode=DEV, version=3.5 yielded: Not Found with statusCode=404"
        );
    }

    #[test]
    fn join_params_empty() {
        assert_eq!(join_params(&[]), "");
    }
}
