//! Authorization URL construction and `state` round-tripping.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	client::OAuthClient,
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::Provider,
};

const STATE_LEN: usize = 32;
const DEFAULT_APPROVAL_PROMPT: &str = "auto";
const RESPONSE_TYPE_CODE: &str = "code";

/// Caller-supplied knobs for [`OAuthClient::authorization_url`].
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	/// Scopes to request; the provider's defaults apply when unset.
	pub scope: Option<ScopeSet>,
	/// Fixed `state` value; a random one is generated when unset.
	pub state: Option<String>,
	/// Redirect URI override.
	pub redirect_uri: Option<Url>,
	/// `approval_prompt` value. Wins over an `approval_prompt` extra param; otherwise `auto` is
	/// sent unless `prompt` or `approval_prompt` is among the extra params.
	pub approval_prompt: Option<String>,
	/// Additional query parameters.
	pub extra_params: BTreeMap<String, String>,
}
impl AuthorizationOptions {
	/// Requests the given scopes.
	pub fn with_scope(mut self, scope: ScopeSet) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Uses a caller-chosen `state`.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Overrides the redirect URI for this request.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Overrides `approval_prompt`.
	pub fn with_approval_prompt(mut self, value: impl Into<String>) -> Self {
		self.approval_prompt = Some(value.into());

		self
	}

	/// Adds an extra query parameter. Reserved keys (`client_id`, `redirect_uri`, `state`,
	/// `scope`) are ignored.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.insert(key.into(), value.into());

		self
	}
}

/// Authorization URL plus the values needed to finish the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRequest {
	/// URL the user should be sent to.
	pub url: Url,
	/// Opaque `state` that must round-trip through the redirect.
	pub state: String,
	/// Scopes requested.
	pub scope: ScopeSet,
	/// Redirect URI embedded in the URL.
	pub redirect_uri: Url,
}
impl AuthorizationRequest {
	/// Validates the `state` returned to the redirect handler.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}

impl<P, C> OAuthClient<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the URL that starts the authorization-code flow.
	///
	/// Scopes are joined with [`Provider::scope_separator`] and spaces are encoded as `%20`.
	pub fn authorization_url(&self, options: AuthorizationOptions) -> Result<AuthorizationRequest> {
		const KIND: FlowKind = FlowKind::Authorization;

		let _span = FlowSpan::new(KIND, "authorization_url").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let request = build_request(self.provider.as_ref(), options);

		obs::record_flow_outcome(KIND, FlowOutcome::of(&request));

		request
	}
}

fn build_request<P>(provider: &P, options: AuthorizationOptions) -> Result<AuthorizationRequest>
where
	P: ?Sized + Provider,
{
	let AuthorizationOptions { scope, state, redirect_uri, approval_prompt, extra_params } =
		options;
	let provider_options = provider.options();
	let scope = scope.unwrap_or_else(|| provider.default_scopes());
	let state = state.filter(|value| !value.is_empty()).unwrap_or_else(random_state);
	let redirect_uri = redirect_uri.unwrap_or_else(|| provider_options.redirect_uri.clone());
	let mut params = extra_params;

	if let Some(approval_prompt) = approval_prompt {
		params.insert("approval_prompt".into(), approval_prompt);
	} else if !params.contains_key("prompt") {
		params.entry("approval_prompt".into()).or_insert_with(|| DEFAULT_APPROVAL_PROMPT.into());
	}

	params.entry("response_type".into()).or_insert_with(|| RESPONSE_TYPE_CODE.into());
	params.insert("state".into(), state.clone());
	params.insert("scope".into(), scope.join(provider.scope_separator()));
	params.insert("client_id".into(), provider_options.client_id.clone());
	params.insert("redirect_uri".into(), redirect_uri.to_string());

	let url = append_query(provider.base_authorization_url(), &params);

	Ok(AuthorizationRequest { url, state, scope, redirect_uri })
}

/// Appends `params` to `url`, encoding spaces as `%20` rather than `+`.
fn append_query(mut url: Url, params: &BTreeMap<String, String>) -> Url {
	// `+` can only come from a space: a literal plus is encoded as `%2B`.
	let encoded = form_urlencoded::Serializer::new(String::new())
		.extend_pairs(params.iter())
		.finish()
		.replace('+', "%20");
	let query = match url.query() {
		Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
		_ => encoded,
	};

	url.set_query(Some(&query));

	url
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;
	use crate::provider::{HubSpot, ProviderOptions};

	fn provider() -> HubSpot {
		let options = ProviderOptions::new(
			"mock_client_id",
			"mock_secret",
			Url::parse("https://app.example.com/callback").expect("Redirect URI should parse."),
		);

		HubSpot::new(options).expect("HubSpot adapter should build.")
	}

	fn pairs(url: &Url) -> HashMap<String, String> {
		url.query_pairs().into_owned().collect()
	}

	#[test]
	fn default_request_carries_required_parameters() {
		let request = build_request(&provider(), AuthorizationOptions::default())
			.expect("Authorization URL should build.");
		let query = pairs(&request.url);

		assert_eq!(request.url.host_str(), Some("app.hubspot.com"));
		assert_eq!(request.url.path(), "/oauth/authorize");
		assert_eq!(query.get("client_id").map(String::as_str), Some("mock_client_id"));
		assert_eq!(
			query.get("redirect_uri").map(String::as_str),
			Some("https://app.example.com/callback")
		);
		assert_eq!(query.get("response_type").map(String::as_str), Some("code"));
		assert_eq!(query.get("approval_prompt").map(String::as_str), Some("auto"));
		assert_eq!(query.get("scope").map(String::as_str), Some(""));
		assert_eq!(query.get("state"), Some(&request.state));
		assert_eq!(request.state.len(), STATE_LEN);
		assert!(request.state.chars().all(|c| c.is_ascii_alphanumeric()));
	}

	#[test]
	fn scopes_join_with_percent_encoded_spaces() {
		let scope = ScopeSet::new(["s1", "s2"]).expect("Scope list should be valid.");
		let request = build_request(&provider(), AuthorizationOptions::default().with_scope(scope))
			.expect("Authorization URL should build.");

		assert!(request.url.as_str().contains("scope=s1%20s2"));
		assert_eq!(pairs(&request.url).get("scope").map(String::as_str), Some("s1 s2"));
	}

	#[test]
	fn literal_plus_survives_encoding() {
		let request = build_request(
			&provider(),
			AuthorizationOptions::default().with_state("a+b c").with_param("hint", "x y"),
		)
		.expect("Authorization URL should build.");

		assert!(request.url.as_str().contains("state=a%2Bb%20c"));
		assert_eq!(pairs(&request.url).get("state").map(String::as_str), Some("a+b c"));
		assert_eq!(pairs(&request.url).get("hint").map(String::as_str), Some("x y"));
	}

	#[test]
	fn prompt_replaces_approval_prompt_and_reserved_keys_win() {
		let request = build_request(
			&provider(),
			AuthorizationOptions::default()
				.with_param("prompt", "consent")
				.with_param("client_id", "spoofed")
				.with_redirect_uri(
					Url::parse("https://other.example.com/cb").expect("Override should parse."),
				),
		)
		.expect("Authorization URL should build.");
		let query = pairs(&request.url);

		assert!(!query.contains_key("approval_prompt"));
		assert_eq!(query.get("prompt").map(String::as_str), Some("consent"));
		assert_eq!(query.get("client_id").map(String::as_str), Some("mock_client_id"));
		assert_eq!(request.redirect_uri.as_str(), "https://other.example.com/cb");
	}

	#[test]
	fn caller_approval_prompt_is_kept() {
		let request = build_request(
			&provider(),
			AuthorizationOptions::default().with_param("approval_prompt", "force"),
		)
		.expect("Authorization URL should build.");

		assert_eq!(pairs(&request.url).get("approval_prompt").map(String::as_str), Some("force"));

		let request = build_request(
			&provider(),
			AuthorizationOptions::default()
				.with_param("approval_prompt", "force")
				.with_approval_prompt("auto"),
		)
		.expect("Authorization URL should build.");

		assert_eq!(pairs(&request.url).get("approval_prompt").map(String::as_str), Some("auto"));
	}

	#[test]
	fn state_validation_errors_on_mismatch() {
		let request =
			build_request(&provider(), AuthorizationOptions::default().with_state("expected"))
				.expect("Authorization URL should build.");

		assert!(request.validate_state("expected").is_ok());

		let err = request.validate_state("other").expect_err("State mismatch should fail.");

		assert!(matches!(err, Error::StateMismatch));
	}
}
