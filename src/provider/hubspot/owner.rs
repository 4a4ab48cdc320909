// self
use crate::{_prelude::*, extract, owner::ResourceOwner};

/// Path of the numeric user identifier.
pub const USER_ID_PATH: &str = "user_id";
/// Path of the user's login email.
pub const EMAIL_PATH: &str = "user";
/// Path of the portal domain.
pub const HUB_DOMAIN_PATH: &str = "hub_domain";

/// HubSpot identity decoded from `GET /oauth/v1/access-tokens/{token}`.
///
/// Accessors never fail: a missing field resolves to `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HubSpotResourceOwner {
	response: DecodedResponse,
}
impl HubSpotResourceOwner {
	/// Wraps a decoded lookup response.
	pub fn new(response: DecodedResponse) -> Self {
		Self { response }
	}

	/// `user_id` field.
	pub fn id(&self) -> Option<&Value> {
		self.get(USER_ID_PATH)
	}

	/// `user` field (the login email).
	pub fn email(&self) -> Option<&Value> {
		self.get(EMAIL_PATH)
	}

	/// `hub_domain` field.
	pub fn account_domain(&self) -> Option<&Value> {
		self.get(HUB_DOMAIN_PATH)
	}

	/// `user_id` as an integer.
	pub fn id_u64(&self) -> Option<u64> {
		self.id().and_then(Value::as_u64)
	}

	/// `user` as a string.
	pub fn email_str(&self) -> Option<&str> {
		self.email().and_then(Value::as_str)
	}

	/// `hub_domain` as a string.
	pub fn account_domain_str(&self) -> Option<&str> {
		self.account_domain().and_then(Value::as_str)
	}

	/// Looks up any dotted path in the response.
	pub fn get(&self, path: &str) -> Option<&Value> {
		extract::extract(&self.response, path)
	}

	/// Returns the wrapped response.
	pub fn to_raw_map(&self) -> &DecodedResponse {
		&self.response
	}

	/// Unwraps the response.
	pub fn into_raw_map(self) -> DecodedResponse {
		self.response
	}
}
impl ResourceOwner for HubSpotResourceOwner {
	fn id(&self) -> Option<&Value> {
		HubSpotResourceOwner::id(self)
	}

	fn to_raw_map(&self) -> &DecodedResponse {
		HubSpotResourceOwner::to_raw_map(self)
	}
}
