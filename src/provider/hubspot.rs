//! HubSpot provider adapter.
//!
//! HubSpot deviates from the common OAuth 2.0 provider shape in three places: scopes are
//! space separated, errors carry a top-level `message` field, and the resource owner is
//! looked up by placing the access token itself in the path
//! (`GET /oauth/v1/access-tokens/{token}`).

/// Builder API for HubSpot adapters.
pub mod builder;
/// Identity returned by the access-token lookup.
pub mod owner;

pub use builder::*;
pub use owner::*;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, ScopeSet},
	error::AuthProviderError,
	extract,
	provider::{Provider, ProviderOptions, ProviderResponse},
};

/// Authorization endpoint users are redirected to.
pub const AUTHORIZATION_ENDPOINT: &str = "https://app.hubspot.com/oauth/authorize";
/// Base of the OAuth API (token exchange and token lookup).
pub const API_BASE: &str = "https://api.hubapi.com/oauth/v1";
/// Body field preferred as the error message.
pub const ERROR_MESSAGE_FIELD: &str = "message";

const TOKEN_SEGMENT: &str = "token";
const ACCESS_TOKENS_SEGMENT: &str = "access-tokens";

/// Endpoint set used by the adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSpotEndpoints {
	/// Authorization endpoint.
	pub authorization: Url,
	/// OAuth API base; the token endpoint and token lookup live below it.
	pub api_base: Url,
}
impl Default for HubSpotEndpoints {
	fn default() -> Self {
		Self {
			authorization: Url::parse(AUTHORIZATION_ENDPOINT)
				.expect("HubSpot authorization endpoint constant must parse."),
			api_base: Url::parse(API_BASE).expect("HubSpot API base constant must parse."),
		}
	}
}

/// HubSpot implementation of [`Provider`].
#[derive(Clone, Debug)]
pub struct HubSpot {
	options: ProviderOptions,
	endpoints: HubSpotEndpoints,
	token_url: Url,
	lookup_base: Url,
}
impl HubSpot {
	/// Creates an adapter that talks to the production HubSpot endpoints.
	pub fn new(options: ProviderOptions) -> Result<Self, crate::provider::ProviderConfigError> {
		Self::builder(options).build()
	}

	/// Creates a builder for custom endpoint sets.
	pub fn builder(options: ProviderOptions) -> HubSpotBuilder {
		HubSpotBuilder::new(options)
	}

	/// Endpoint set the adapter was built with.
	pub fn endpoints(&self) -> &HubSpotEndpoints {
		&self.endpoints
	}

	fn from_validated(options: ProviderOptions, endpoints: HubSpotEndpoints) -> Self {
		let token_url = with_segment(&endpoints.api_base, TOKEN_SEGMENT);
		let lookup_base = with_segment(&endpoints.api_base, ACCESS_TOKENS_SEGMENT);

		Self { options, endpoints, token_url, lookup_base }
	}
}
impl Provider for HubSpot {
	type Owner = HubSpotResourceOwner;

	fn options(&self) -> &ProviderOptions {
		&self.options
	}

	fn base_authorization_url(&self) -> Url {
		self.endpoints.authorization.clone()
	}

	fn base_access_token_url(&self, _params: &BTreeMap<String, String>) -> Url {
		self.token_url.clone()
	}

	fn resource_owner_details_url(&self, token: &AccessToken) -> Url {
		with_segment(&self.lookup_base, token.token())
	}

	fn default_scopes(&self) -> ScopeSet {
		ScopeSet::default()
	}

	fn scope_separator(&self) -> &str {
		" "
	}

	fn check_response(&self, response: &ProviderResponse) -> Result<(), AuthProviderError> {
		if !response.is_error() {
			return Ok(());
		}

		let message = extract::extract(&response.body, ERROR_MESSAGE_FIELD)
			.and_then(Value::as_str)
			.filter(|message| !message.is_empty())
			.unwrap_or(response.reason.as_str());

		Err(AuthProviderError::new(response.status, message, response.clone()))
	}

	fn build_resource_owner(&self, response: DecodedResponse, _token: &AccessToken) -> Self::Owner {
		HubSpotResourceOwner::new(response)
	}
}

/// Appends one percent-encoded path segment, dropping query and fragment.
fn with_segment(base: &Url, segment: &str) -> Url {
	let mut url = base.clone();

	url.set_query(None);
	url.set_fragment(None);

	if let Ok(mut segments) = url.path_segments_mut() {
		segments.pop_if_empty().push(segment);
	}

	url
}
