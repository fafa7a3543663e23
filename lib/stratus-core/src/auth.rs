use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http::header::{AUTHORIZATION, HeaderName};
use reqwest::Request;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::editor::{CallContext, RequestEditor};
use crate::error::ApiClientError;

/// Credentials that cannot be turned into a request header.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthenticationError {
    /// The credential value is not a valid header value.
    #[display("{scheme} credential contains invalid characters: {message}")]
    InvalidCredential {
        /// The authentication scheme (`Bearer`, `Basic`, `ApiKey`).
        scheme: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Basic authentication username cannot hold a colon.
    #[display("Basic auth username '{username}' cannot contain ':'")]
    InvalidUsername {
        /// The rejected username.
        username: String,
    },

    /// API key header name is invalid.
    #[display("Invalid API key header name '{header_name}': {message}")]
    InvalidHeaderName {
        /// The rejected header name.
        header_name: String,
        /// Why the name was rejected.
        message: String,
    },
}

/// A secret that is zeroed on drop and never printed in full.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Wraps a secret.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Exposes the secret, e.g. to build a header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn masked(&self) -> String {
        let value = self.0.as_str();
        let chars = value.chars().count();
        if chars <= 8 {
            return "***".to_string();
        }
        let head: String = value.chars().take(4).collect();
        let tail: String = value.chars().skip(chars - 4).collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString([REDACTED])")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Credentials attached to every request of a client.
///
/// Tokens are supplied by the caller; acquiring or refreshing them is out of
/// the binding's hands.
///
/// ```rust
/// use stratus_core::{ApiClient, Authentication};
///
/// # fn example() -> Result<(), stratus_core::ApiClientError> {
/// let client = ApiClient::builder()
///     .with_server("https://compute.example.com/api")
///     .with_authentication(Authentication::Bearer("my-api-token".into()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub enum Authentication {
    /// `Authorization: Bearer <token>`.
    Bearer(SecureString),

    /// `Authorization: Basic <base64(username:password)>`.
    Basic {
        /// The username; cannot contain `:`.
        username: String,
        /// The password.
        password: SecureString,
    },

    /// `<header_name>: <key>`.
    ApiKey {
        /// The header carrying the key.
        header_name: String,
        /// The key.
        key: SecureString,
    },
}

impl Authentication {
    fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "Bearer",
            Self::Basic { .. } => "Basic",
            Self::ApiKey { .. } => "ApiKey",
        }
    }

    /// The header to add to a request.
    ///
    /// # Errors
    ///
    /// Fails when a credential cannot be represented as a header.
    pub fn to_header(&self) -> Result<(HeaderName, HeaderValue), AuthenticationError> {
        let (name, value) = match self {
            Self::Bearer(token) => (AUTHORIZATION, format!("Bearer {}", token.expose())),
            Self::Basic { username, password } => {
                if username.contains(':') {
                    return Err(AuthenticationError::InvalidUsername {
                        username: username.clone(),
                    });
                }
                let credentials = STANDARD.encode(format!("{username}:{}", password.expose()));
                (AUTHORIZATION, format!("Basic {credentials}"))
            }
            Self::ApiKey { header_name, key } => {
                let name = HeaderName::from_bytes(header_name.as_bytes()).map_err(|err| {
                    AuthenticationError::InvalidHeaderName {
                        header_name: header_name.clone(),
                        message: err.to_string(),
                    }
                })?;
                (name, key.expose().to_string())
            }
        };

        let mut value =
            HeaderValue::from_str(&value).map_err(|err| AuthenticationError::InvalidCredential {
                scheme: self.scheme(),
                message: err.to_string(),
            })?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl RequestEditor for Authentication {
    fn edit(&self, _context: &CallContext, request: &mut Request) -> Result<(), ApiClientError> {
        let (name, value) = self.to_header()?;
        request.headers_mut().insert(name, value);
        Ok(())
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(token) => f.debug_tuple("Bearer").field(token).finish(),
            Self::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", password)
                .finish(),
            Self::ApiKey { header_name, key } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("key", key)
                .finish(),
        }
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(token) => write!(f, "Bearer {token}"),
            Self::Basic { username, .. } => write!(f, "Basic (username: {username})"),
            Self::ApiKey { header_name, key } => write!(f, "ApiKey ({header_name}: {key})"),
        }
    }
}
