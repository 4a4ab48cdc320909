// self
use crate::{
	_prelude::*,
	provider::{
		HubSpot, HubSpotEndpoints, ProviderConfigError, ProviderOptions, validate_endpoint,
	},
};

/// Builder for [`HubSpot`] adapters.
#[derive(Debug)]
pub struct HubSpotBuilder {
	/// Client credentials.
	pub options: ProviderOptions,
	/// Endpoint set, defaulting to production HubSpot.
	pub endpoints: HubSpotEndpoints,
}
impl HubSpotBuilder {
	/// Creates a new builder seeded with the production endpoints.
	pub fn new(options: ProviderOptions) -> Self {
		Self { options, endpoints: HubSpotEndpoints::default() }
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.endpoints.authorization = url;

		self
	}

	/// Overrides the OAuth API base.
	pub fn api_base(mut self, url: Url) -> Self {
		self.endpoints.api_base = url;

		self
	}

	/// Replaces the full endpoint set.
	pub fn endpoints(mut self, endpoints: HubSpotEndpoints) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Consumes the builder and validates the resulting adapter.
	pub fn build(self) -> Result<HubSpot, ProviderConfigError> {
		self.options.validate()?;

		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("api_base", &self.endpoints.api_base)?;

		Ok(HubSpot::from_validated(self.options, self.endpoints))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{auth::AccessToken, provider::Provider};

	fn options() -> ProviderOptions {
		ProviderOptions::new(
			"client",
			"secret",
			Url::parse("https://app.example.com/callback").expect("Redirect URI should parse."),
		)
	}

	#[test]
	fn custom_api_base_moves_derived_endpoints() {
		let provider = HubSpot::builder(options())
			.api_base(Url::parse("http://127.0.0.1:9000/mock/v1/").expect("Base should parse."))
			.authorization_endpoint(
				Url::parse("http://127.0.0.1:9000/authorize").expect("Endpoint should parse."),
			)
			.build()
			.expect("Local endpoints should be accepted.");

		assert_eq!(
			provider.base_access_token_url(&BTreeMap::new()).as_str(),
			"http://127.0.0.1:9000/mock/v1/token"
		);
		assert_eq!(
			provider.resource_owner_details_url(&AccessToken::new("tok")).as_str(),
			"http://127.0.0.1:9000/mock/v1/access-tokens/tok"
		);
		assert_eq!(provider.base_authorization_url().path(), "/authorize");
	}

	#[test]
	fn builder_rejects_invalid_configuration() {
		let err = HubSpot::builder(options())
			.api_base(Url::parse("data:text/plain,hello").expect("Data URL should parse."))
			.build()
			.expect_err("Endpoints without a host must be rejected.");

		assert!(matches!(err, ProviderConfigError::InvalidEndpoint { endpoint: "api_base", .. }));

		let mut blank = options();

		blank.client_id = String::new();

		let err = HubSpot::new(blank).expect_err("Empty client ids must be rejected.");

		assert_eq!(err, ProviderConfigError::EmptyClientId);
	}

	#[test]
	fn endpoints_deserialize_with_defaults() {
		let endpoints: HubSpotEndpoints =
			serde_json::from_str(r#"{"api_base":"https://sandbox.example.com/oauth/v1"}"#)
				.expect("Partial endpoint config should deserialize.");

		assert_eq!(endpoints.authorization.as_str(), super::super::AUTHORIZATION_ENDPOINT);
		assert_eq!(endpoints.api_base.host_str(), Some("sandbox.example.com"));
	}
}
