//! Crate-level error types shared by providers, the engine, and transports.

// self
use crate::{_prelude::*, provider::ProviderResponse};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Provider answered with an HTTP error status.
	#[error(transparent)]
	Provider(#[from] AuthProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response could not be interpreted.
	#[error(transparent)]
	Response(#[from] ResponseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Returned `state` does not match the one issued with the authorization URL.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Provider rejected a request (`status >= 400`).
///
/// `message` prefers the provider's `message` body field and falls back to the HTTP reason
/// phrase. The full response is kept for diagnostics.
#[derive(Debug, ThisError)]
#[error("Provider responded with HTTP {status}: {message}")]
pub struct AuthProviderError {
	/// HTTP status code.
	pub status: u16,
	/// Human-readable failure message.
	pub message: String,
	/// Response that triggered the failure.
	pub response: Box<ProviderResponse>,
}
impl AuthProviderError {
	/// Creates a new error for the given response.
	pub fn new(status: u16, message: impl Into<String>, response: ProviderResponse) -> Self {
		Self { status, message: message.into(), response: Box::new(response) }
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while interpreting a provider response the provider did not reject.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// HTTP 500 whose body was neither JSON nor form encoded.
	#[error("Provider returned HTTP {status} without a JSON body.")]
	ServerErrorWithoutJson {
		/// HTTP status code.
		status: u16,
	},
	/// Body decoded to something other than a JSON object.
	#[error("Provider returned HTTP {status} with a body that is not a JSON object.")]
	UnexpectedBody {
		/// HTTP status code.
		status: u16,
	},
	/// Token endpoint payload does not match the expected shape.
	#[error("Token endpoint returned an invalid payload.")]
	TokenPayload {
		/// Structured decoding failure, including the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token expiry cannot be represented.
	#[error("Token expiry is out of the supported range.")]
	ExpiryOutOfRange,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a typed error.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
