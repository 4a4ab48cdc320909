//! Authorization-code engine that drives a [`Provider`].
//!
//! The engine owns the transport and the provider adapter. It builds authorization URLs,
//! exchanges codes at the token endpoint, and fetches resource-owner details, calling
//! [`Provider::check_response`] on every response before its body is interpreted. Refresh,
//! PKCE, and retries are out of scope.

pub mod authorization;
pub mod response;

pub use authorization::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::ConfigError,
	http::ProviderHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::Provider,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, provider::HubSpot};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";
const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";

#[cfg(feature = "reqwest")]
/// Engine specialized for the crate's default reqwest transport.
pub type ReqwestOAuthClient<P> = OAuthClient<P, ReqwestHttpClient>;
#[cfg(feature = "reqwest")]
/// HubSpot engine on the default reqwest transport.
pub type HubSpotClient = ReqwestOAuthClient<HubSpot>;

/// Runs the authorization-code flow against a single provider.
pub struct OAuthClient<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Provider adapter supplying endpoints and response rules.
	pub provider: Arc<P>,
	/// Transport used for every outbound provider request.
	pub http_client: Arc<C>,
}
impl<P, C> OAuthClient<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Creates an engine that reuses the caller-provided transport.
	pub fn with_http_client(provider: impl Into<Arc<P>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { provider: provider.into(), http_client: http_client.into() }
	}

	/// Exchanges an authorization code using the provider's configured redirect URI.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		let redirect_uri = self.provider.options().redirect_uri.clone();

		self.exchange_code_with_redirect(code, &redirect_uri).await
	}

	/// Validates the returned `state` and exchanges `code` with the redirect URI the
	/// authorization URL was built with.
	pub async fn exchange_authorization(
		&self,
		request: &AuthorizationRequest,
		returned_state: &str,
		code: &str,
	) -> Result<AccessToken> {
		request.validate_state(returned_state)?;

		self.exchange_code_with_redirect(code, &request.redirect_uri).await
	}

	/// Fetches the decoded resource-owner lookup body for `token`.
	pub async fn fetch_resource_owner_details(
		&self,
		token: &AccessToken,
	) -> Result<DecodedResponse> {
		const KIND: FlowKind = FlowKind::ResourceOwner;

		let span = FlowSpan::new(KIND, "fetch_resource_owner_details");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.lookup(token)).await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	/// Fetches and materializes the owner of `token`.
	pub async fn resource_owner(&self, token: &AccessToken) -> Result<P::Owner> {
		let details = self.fetch_resource_owner_details(token).await?;

		Ok(self.provider.build_resource_owner(details, token))
	}

	async fn exchange_code_with_redirect(
		&self,
		code: &str,
		redirect_uri: &Url,
	) -> Result<AccessToken> {
		const KIND: FlowKind = FlowKind::TokenExchange;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let options = self.provider.options();
				let mut form = BTreeMap::new();

				form.insert("client_id".to_owned(), options.client_id.clone());
				form.insert("client_secret".to_owned(), options.client_secret.expose().to_owned());
				form.insert("redirect_uri".to_owned(), redirect_uri.to_string());
				form.insert("grant_type".to_owned(), GRANT_AUTHORIZATION_CODE.to_owned());
				form.insert("code".to_owned(), code.to_owned());

				let url = self.provider.base_access_token_url(&form);
				let body = form_urlencoded::Serializer::new(String::new())
					.extend_pairs(form.iter())
					.finish();
				let request = Request::builder()
					.method(Method::POST)
					.uri(url.as_str())
					.header(CONTENT_TYPE, FORM)
					.header(ACCEPT, JSON)
					.body(body.into_bytes())
					.map_err(ConfigError::from)?;
				let payload = self.dispatch(request).await?;
				let token = AccessToken::from_response(
					&payload,
					self.provider.access_token_resource_owner_id(),
					OffsetDateTime::now_utc(),
				)?;

				Ok(token)
			})
			.await;

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	async fn lookup(&self, token: &AccessToken) -> Result<DecodedResponse> {
		let url = self.provider.resource_owner_details_url(token);
		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(ACCEPT, JSON)
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		self.dispatch(request).await
	}

	/// Sends `request`, classifies the response, and returns its object body.
	async fn dispatch(&self, request: HttpRequest) -> Result<DecodedResponse> {
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(response::map_transport_error)?;
		let response = response::decode(response)?;

		obs::record_http_status(response.status);
		self.provider.check_response(&response)?;

		response::into_object_body(response)
	}
}
#[cfg(feature = "reqwest")]
impl<P> OAuthClient<P, ReqwestHttpClient>
where
	P: Provider,
{
	/// Creates an engine with its own reqwest-backed transport that never follows redirects.
	pub fn new(provider: impl Into<Arc<P>>) -> Result<Self> {
		Ok(Self::with_http_client(provider, ReqwestHttpClient::without_redirects()?))
	}
}
impl<P, C> Clone for OAuthClient<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self { provider: self.provider.clone(), http_client: self.http_client.clone() }
	}
}
impl<P, C> Debug for OAuthClient<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let options = self.provider.options();

		f.debug_struct("OAuthClient")
			.field("client_id", &options.client_id)
			.field("redirect_uri", &options.redirect_uri)
			.finish()
	}
}
