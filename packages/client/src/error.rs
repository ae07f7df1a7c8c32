use crate::model::ErrorResponse;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Building the HTTP client failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No HTTP response was obtained: connection refused, timeout, or a
    /// broken body stream.
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("API error {code}: {message}")]
    Api { code: i32, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Network-level failure: the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Transport { .. })
    }

    /// The structured error code, if this is an API error.
    pub fn api_code(&self) -> Option<i32> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<ErrorResponse> for Error {
    fn from(response: ErrorResponse) -> Self {
        Error::Api {
            code: response.code,
            message: response.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let e = Error::Api {
            code: 400,
            message: "Item is still executing".to_string(),
        };
        assert_eq!(format!("{}", e), "API error 400: Item is still executing");
        assert_eq!(e.api_code(), Some(400));
        assert!(!e.is_transport());
    }

    #[test]
    fn transport_error_is_transport() {
        let e = Error::Transport {
            message: "connection refused".to_string(),
        };
        assert!(e.is_transport());
        assert_eq!(e.api_code(), None);
        assert!(format!("{}", e).contains("connection refused"));
    }

    #[test]
    fn from_error_response() {
        let e: Error = ErrorResponse {
            code: 404,
            message: "Item not found".to_string(),
        }
        .into();
        assert!(matches!(e, Error::Api { code: 404, ref message } if message == "Item not found"));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Json(_)));
        assert!(!e.is_transport());
    }
}
