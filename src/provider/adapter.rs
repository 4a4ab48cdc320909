//! Provider adapter hooks consumed by the engine.
//!
//! Implementations stay free of any HTTP client: the engine hands them crate-owned data
//! ([`ProviderResponse`], [`AccessToken`], decoded JSON) and gets URLs, scope rules, and
//! classification results back.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet},
	error::AuthProviderError,
	owner::ResourceOwner,
	provider::ProviderOptions,
};

/// Separator used by providers that do not override [`Provider::scope_separator`].
pub const DEFAULT_SCOPE_SEPARATOR: &str = ",";

/// Platform-specific knowledge plugged into the authorization-code engine.
///
/// Every hook is a pure function of the provider's static configuration and its
/// arguments, so implementors are `Send + Sync` and can be shared behind an [`Arc`].
pub trait Provider: Send + Sync {
	/// Identity type produced from the resource-owner lookup.
	type Owner: ResourceOwner;

	/// Client credentials and redirect URI.
	fn options(&self) -> &ProviderOptions;

	/// Authorization endpoint the user is redirected to.
	fn base_authorization_url(&self) -> Url;

	/// Token endpoint for the given form parameters.
	fn base_access_token_url(&self, params: &BTreeMap<String, String>) -> Url;

	/// Lookup endpoint that describes the owner of `token`.
	fn resource_owner_details_url(&self, token: &AccessToken) -> Url;

	/// Scopes requested when the caller names none.
	fn default_scopes(&self) -> ScopeSet;

	/// String placed between scopes in the `scope` parameter.
	fn scope_separator(&self) -> &str {
		DEFAULT_SCOPE_SEPARATOR
	}

	/// Dotted path of the owner identifier inside token responses, if the provider sends one.
	fn access_token_resource_owner_id(&self) -> Option<&str> {
		None
	}

	/// Classifies a response before the engine interprets its body.
	fn check_response(&self, response: &ProviderResponse) -> Result<(), AuthProviderError>;

	/// Materializes the owner from a successful lookup.
	fn build_resource_owner(&self, response: DecodedResponse, token: &AccessToken) -> Self::Owner;
}

/// Response data handed to [`Provider::check_response`].
///
/// The struct keeps only primitive data (status, reason phrase, decoded body) so providers never depend on a particular HTTP client.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// Reason phrase for the status (empty for non-standard codes).
	pub reason: String,
	/// Decoded body.
	pub body: DecodedResponse,
}
impl ProviderResponse {
	/// Creates a response with the canonical reason phrase for `status`.
	pub fn new(status: u16, body: DecodedResponse) -> Self {
		Self { status, reason: canonical_reason(status).into(), body }
	}

	/// Overrides the reason phrase.
	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = reason.into();

		self
	}

	/// Returns true for HTTP statuses that signal failure (`>= 400`).
	pub fn is_error(&self) -> bool {
		self.status >= 400
	}
}

/// Canonical reason phrase for `status`, or an empty string for unknown codes.
pub fn canonical_reason(status: u16) -> &'static str {
	oauth2::http::StatusCode::from_u16(status)
		.ok()
		.and_then(|code| code.canonical_reason())
		.unwrap_or_default()
}
