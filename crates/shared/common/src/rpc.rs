//! Mapping between [`AppError`] and the RPC `ServiceError` envelope.
//!
//! Servers call [`into_envelope`] to turn a service result into a response
//! message; clients call [`from_envelope`] to get the `AppResult` back.

use proto::{Envelope, ErrorKind, ServiceError};

use crate::error::{AppError, AppResult};

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        let kind = match &err {
            AppError::NotFound => ErrorKind::NotFound,
            AppError::DuplicateEmail => ErrorKind::DuplicateEmail,
            AppError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AppError::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        };
        ServiceError {
            kind: kind as i32,
            message: err.user_message(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match ErrorKind::try_from(err.kind).unwrap_or(ErrorKind::Unspecified) {
            ErrorKind::NotFound => AppError::NotFound,
            ErrorKind::DuplicateEmail => AppError::DuplicateEmail,
            ErrorKind::InvalidCredentials => AppError::InvalidCredentials,
            ErrorKind::Validation => AppError::Validation(err.message),
            ErrorKind::Internal | ErrorKind::Unspecified => AppError::Internal(err.message),
        }
    }
}

/// Wrap a service result into its response message.
pub fn into_envelope<E: Envelope>(result: AppResult<E::Payload>) -> E {
    E::from_result(result.map_err(ServiceError::from))
}

/// Unwrap a response message. A message without outcome is a protocol fault.
pub fn from_envelope<E: Envelope>(response: E) -> AppResult<E::Payload> {
    match response.into_result() {
        Some(result) => result.map_err(AppError::from),
        None => Err(AppError::internal("RPC response carried no outcome")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::{todo, user};

    #[test]
    fn test_error_kinds_survive_the_wire() {
        for err in [
            AppError::NotFound,
            AppError::DuplicateEmail,
            AppError::InvalidCredentials,
        ] {
            let code = err.code();
            let back = AppError::from(ServiceError::from(err));
            assert_eq!(back.code(), code);
        }
    }

    #[test]
    fn test_validation_keeps_message() {
        let wire = ServiceError::from(AppError::validation("title is required"));
        assert_eq!(wire.kind, ErrorKind::Validation as i32);

        match AppError::from(wire) {
            AppError::Validation(msg) => assert_eq!(msg, "title is required"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_internal_detail_not_sent() {
        let wire = ServiceError::from(AppError::Hashing("argon2 params".into()));
        assert_eq!(wire.kind, ErrorKind::Internal as i32);
        assert!(!wire.message.contains("argon2"));
    }

    #[test]
    fn test_unknown_kind_is_internal() {
        let wire = ServiceError {
            kind: 99,
            message: "future".into(),
        };
        assert!(matches!(AppError::from(wire), AppError::Internal(_)));
    }

    #[test]
    fn test_envelope_helpers() {
        let response: todo::DeleteTodoResponse = into_envelope(Err(AppError::NotFound));
        assert!(matches!(from_envelope(response), Err(AppError::NotFound)));

        let payload = user::User {
            id: "u1".into(),
            ..Default::default()
        };
        let response: user::GetUserResponse = into_envelope(Ok(payload.clone()));
        assert_eq!(from_envelope(response).unwrap(), payload);
    }

    #[test]
    fn test_empty_envelope_is_internal() {
        let response = user::GetUserResponse { outcome: None };
        assert!(matches!(from_envelope(response), Err(AppError::Internal(_))));
    }
}
