//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::sync::{Arc, Mutex};
// crates.io
use hubspot_oauth2::{
	client::{HubSpotClient, OAuthClient},
	http::{ProviderHttpClient, ReqwestHttpClient},
	oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode},
	provider::{HubSpot, ProviderOptions},
	reqwest::Client as ReqwestClient,
	url::Url,
};

pub const CLIENT_ID: &str = "mock_client_id";
pub const CLIENT_SECRET: &str = "mock_secret";
pub const REDIRECT_URI: &str = "https://app.example.com/oauth/callback";

/// Token endpoint payload mirroring HubSpot's documented response.
pub const ACCESS_TOKEN_RESPONSE: &str = r#"{
	"access_token": "mock_access_token",
	"refresh_token": "mock_refresh_token",
	"expires_in": 21600
}"#;

/// Token lookup payload mirroring HubSpot's documented response.
pub const ACCESS_TOKEN_INFO: &str = r#"{
	"token": "mock_access_token",
	"user": "test@hubspot.com",
	"hub_domain": "demo.hubapi.com",
	"scopes": ["automation", "contacts", "oauth"],
	"hub_id": 62515,
	"app_id": 456,
	"expires_in": 21588,
	"user_id": 123,
	"token_type": "access"
}"#;

pub fn options() -> ProviderOptions {
	ProviderOptions::new(
		CLIENT_ID,
		CLIENT_SECRET,
		Url::parse(REDIRECT_URI).expect("Redirect URI fixture should parse."),
	)
}

/// Adapter pointed at a mock server root (`http://127.0.0.1:port`).
pub fn provider_at(base: &str) -> HubSpot {
	HubSpot::builder(options())
		.authorization_endpoint(
			Url::parse(&format!("{base}/oauth/authorize"))
				.expect("Mock authorization endpoint should parse."),
		)
		.api_base(Url::parse(&format!("{base}/oauth/v1")).expect("Mock API base should parse."))
		.build()
		.expect("Mock HubSpot adapter should build.")
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock`.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn reqwest_client_at(base: &str) -> HubSpotClient {
	OAuthClient::with_http_client(provider_at(base), test_reqwest_http_client())
}

#[derive(Debug)]
pub struct FakeTransportError(pub &'static str);
impl std::fmt::Display for FakeTransportError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str(self.0)
	}
}
impl std::error::Error for FakeTransportError {}

/// Canned reply served by [`ScriptedHttpClient`].
#[derive(Clone, Debug)]
pub enum Reply {
	Json(u16, &'static str),
	Raw(u16, &'static str, &'static str),
	Fail(&'static str),
}

/// Transport that records requests and serves replies in order.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
	pub replies: Arc<Mutex<Vec<Reply>>>,
	pub requests: Arc<Mutex<Vec<HttpRequest>>>,
}
impl ScriptedHttpClient {
	pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
		let mut replies = replies.into_iter().collect::<Vec<_>>();

		replies.reverse();

		Self { replies: Arc::new(Mutex::new(replies)), requests: Default::default() }
	}

	pub fn recorded(&self) -> Vec<HttpRequest> {
		self.requests.lock().expect("Request log should not be poisoned.").clone()
	}
}
impl ProviderHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		ScriptedHandle(self.clone())
	}
}

pub struct ScriptedHandle(ScriptedHttpClient);
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future = std::pin::Pin<
		Box<dyn std::future::Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>,
	>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			client.requests.lock().expect("Request log should not be poisoned.").push(request);

			let reply = client
				.replies
				.lock()
				.expect("Reply queue should not be poisoned.")
				.pop()
				.expect("Scripted transport ran out of replies.");
			let (status, content_type, body) = match reply {
				Reply::Json(status, body) => (status, "application/json", body),
				Reply::Raw(status, content_type, body) => (status, content_type, body),
				Reply::Fail(reason) =>
					return Err(HttpClientError::Reqwest(Box::new(FakeTransportError(reason)))),
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			*response.status_mut() =
				StatusCode::from_u16(status).expect("Scripted status should be valid.");
			response.headers_mut().insert(
				"content-type",
				content_type.parse().expect("Scripted content type should be valid."),
			);

			Ok(response)
		})
	}
}
