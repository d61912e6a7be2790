use thiserror::Error;

/// Defensive failures inside the ranking pipeline. These indicate a broken
/// upstream contract (the matcher handed us something impossible), not a
/// user mistake.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    #[error("basket for store `{store}` has no matched items")]
    EmptyBasket { store: String },
    #[error("cannot normalize an empty batch of scored options")]
    EmptyBatch,
}

/// Caller mistakes, rejected with a descriptive message and never retried.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClientInputError {
    #[error("unknown preference mode `{0}` (expected price|quality|balanced)")]
    InvalidPreferenceMode(String),
    #[error("at least one requested item is required")]
    EmptyItemList,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    ClientInput(#[from] ClientInputError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    /// Message safe to show an end user. Client mistakes keep their
    /// descriptive text; everything else collapses to a generic response.
    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message, .. } => message.clone(),
            Self::ServiceUnavailable { .. } => {
                "The service is temporarily unavailable. Please retry shortly.".to_owned()
            }
            Self::Internal { .. } => {
                "Sorry, I could not produce a recommendation for that request.".to_owned()
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::ClientInput(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Ranking(error) => Self::Internal {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Catalog(message) | ApplicationError::Integration(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, ClientInputError, InterfaceError, RankingError};

    #[test]
    fn client_input_error_maps_to_bad_request_with_descriptive_message() {
        let interface =
            ApplicationError::from(ClientInputError::InvalidPreferenceMode("cheap".to_owned()))
                .into_interface("req-1");

        match interface {
            InterfaceError::BadRequest { ref message, ref correlation_id } => {
                assert!(message.contains("cheap"));
                assert!(message.contains("price|quality|balanced"));
                assert_eq!(correlation_id, "req-1");
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn bad_request_user_message_keeps_detail() {
        let interface =
            ApplicationError::from(ClientInputError::EmptyItemList).into_interface("req-2");

        assert_eq!(interface.user_message(), "at least one requested item is required");
    }

    #[test]
    fn ranking_contract_violation_maps_to_internal_with_generic_user_message() {
        let interface = ApplicationError::from(RankingError::EmptyBatch).into_interface("req-3");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(
            interface.user_message(),
            "Sorry, I could not produce a recommendation for that request."
        );
    }

    #[test]
    fn integration_error_maps_to_service_unavailable() {
        let interface = ApplicationError::Integration("language model timed out".to_owned())
            .into_interface("req-4");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "The service is temporarily unavailable. Please retry shortly."
        );
    }
}
