use crate::domain::model::{Envelope, Record};
use crate::domain::resource::Resource;
use crate::utils::error::{ProxyError, Result};
use thiserror::Error;

/// Ways a request can fail. Each failure is mapped once, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Failed to fetch data from OpenF1 API")]
    UpstreamUnavailable,

    /// Inbound parameter the extractors could not parse.
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ProxyError> for HandlerError {
    fn from(e: ProxyError) -> Self {
        HandlerError::Internal(e.to_string())
    }
}

/// Turn the outcome of an upstream operation into the response envelope.
pub fn respond(
    resource: Resource,
    outcome: Result<Option<Vec<Record>>>,
) -> std::result::Result<Envelope, HandlerError> {
    match outcome {
        Ok(Some(data)) => {
            tracing::debug!("{}: forwarding {} records", resource.name(), data.len());
            Ok(Envelope::from_records(data))
        }
        Ok(None) => {
            tracing::warn!("{}: upstream returned no usable data", resource.name());
            Err(HandlerError::UpstreamUnavailable)
        }
        Err(e) => {
            tracing::error!("{}: {}", resource.name(), e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_are_wrapped_unmodified() {
        let data = vec![json!({"driver_number": 1}), json!({"nested": {"x": [1, 2]}})];
        let envelope = respond(Resource::Drivers, Ok(Some(data.clone()))).unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.count, 2);
        assert_eq!(envelope.data, data);
    }

    #[test]
    fn test_absence_maps_to_upstream_unavailable_for_every_resource() {
        for resource in Resource::ALL {
            assert_eq!(
                respond(resource, Ok(None)).unwrap_err(),
                HandlerError::UpstreamUnavailable
            );
        }
    }

    #[test]
    fn test_query_error_maps_to_internal() {
        let err = respond(
            Resource::Laps,
            Err(ProxyError::MissingParameterError {
                resource: "laps".to_string(),
                parameter: "session_key".to_string(),
            }),
        )
        .unwrap_err();

        match err {
            HandlerError::Internal(message) => assert!(message.contains("session_key")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HandlerError::UpstreamUnavailable.to_string(),
            "Failed to fetch data from OpenF1 API"
        );
        assert_eq!(
            HandlerError::Internal("boom".to_string()).to_string(),
            "Internal server error: boom"
        );
    }
}
