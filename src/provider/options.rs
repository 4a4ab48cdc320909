//! Client credentials shared by every provider.

// self
use crate::{_prelude::*, auth::Secret};

/// Errors raised while validating provider configuration.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// Client identifier is required.
	#[error("Client identifier cannot be empty.")]
	EmptyClientId,
	/// Endpoint cannot be used to build provider URLs.
	#[error("The {endpoint} endpoint must be an http(s) URL with a host: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Client credentials and redirect URI registered with the provider.
///
/// The struct is serde-friendly so deployments can load it from their configuration format
/// of choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: Secret,
	/// Redirect URI registered for the client.
	pub redirect_uri: Url,
}
impl ProviderOptions {
	/// Creates a new option set.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<Secret>,
		redirect_uri: Url,
	) -> Self {
		Self { client_id: client_id.into(), client_secret: client_secret.into(), redirect_uri }
	}

	/// Validates invariants for the options.
	pub fn validate(&self) -> Result<(), ProviderConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ProviderConfigError::EmptyClientId);
		}

		Ok(())
	}
}

/// Checks that `url` can serve as a base for provider endpoints.
pub fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderConfigError> {
	let scheme_ok = matches!(url.scheme(), "https" | "http");

	if scheme_ok && url.has_host() && !url.cannot_be_a_base() {
		Ok(())
	} else {
		Err(ProviderConfigError::InvalidEndpoint { endpoint: name, url: url.to_string() })
	}
}
