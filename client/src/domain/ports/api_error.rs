//! Failures shared by every LocalPay API port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by API adapters.
    pub enum ApiError {
        /// The request never produced a response.
        Transport { message: String } => Unavailable, "API request failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => Unavailable, "API request timed out: {message}",
        /// Credential missing, expired or wrong (HTTP 401).
        Unauthorized { message: String } => Unauthorized, "API rejected the credential: {message}",
        /// Credential valid but not allowed (HTTP 403).
        Forbidden { message: String } => Forbidden, "API refused access: {message}",
        /// Resource absent (HTTP 404).
        NotFound { message: String } => NotFound, "API resource not found: {message}",
        /// Business rule refusal (other 4xx); `message` is the server `detail`.
        Rejected { status: u16, message: String } => Rejected, "API rejected the request ({status}): {message}",
        /// Server failure (5xx).
        Server { status: u16, message: String } => Unavailable, "API server error ({status}): {message}",
        /// Response body did not match the expected shape.
        Decode { message: String } => InternalError, "API response could not be decoded: {message}",
    }
}

impl ApiError {
    /// Server-provided detail for refusals, used to pick a localized message.
    pub fn rejection_detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status for refusals.
    pub fn rejection_status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::timeout("30s"), ErrorCode::Unavailable)]
    #[case(ApiError::server(502_u16, "bad gateway"), ErrorCode::Unavailable)]
    #[case(ApiError::unauthorized("expired"), ErrorCode::Unauthorized)]
    #[case(ApiError::rejected(400_u16, "Not enough money"), ErrorCode::Rejected)]
    #[case(ApiError::decode("eof"), ErrorCode::InternalError)]
    fn errors_are_classified(#[case] err: ApiError, #[case] code: ErrorCode) {
        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn rejection_detail_is_exposed() {
        let err = ApiError::rejected(400_u16, "Not enough money");
        assert_eq!(err.rejection_detail(), Some("Not enough money"));
        assert_eq!(err.rejection_status(), Some(400));
        assert_eq!(ApiError::not_found("x").rejection_detail(), None);
    }
}
