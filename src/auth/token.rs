//! Access tokens minted by the token endpoint.

// crates.io
use serde::{Deserializer, de::Error as DeError};
// self
use crate::{_prelude::*, auth::Secret, error::ResponseError, extract};

/// Response fields consumed while building an [`AccessToken`]; everything else lands in
/// [`AccessToken::values`].
const RESERVED_FIELDS: [&str; 5] =
	["access_token", "resource_owner_id", "refresh_token", "expires_in", "expires"];
/// Absolute `expires` values after this instant (2012-10-01) are Unix timestamps; smaller
/// values are relative lifetimes.
const EXPIRES_TIMESTAMP_THRESHOLD: i64 = 1_349_067_600;

/// Lifecycle status of an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token has an expiry in the future.
	Active,
	/// Token reached its expiry instant.
	Expired,
	/// Provider did not report an expiry.
	Unbounded,
}

/// Access token issued by the provider's token endpoint.
///
/// The adapter only reads [`token`](Self::token); the engine builds values through
/// [`from_response`](Self::from_response).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Expiry instant, when the provider reported one.
	#[serde(default, with = "time::serde::timestamp::option")]
	pub expires: Option<OffsetDateTime>,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<Secret>,
	/// Identifier of the owner, for providers that embed it in the token response.
	pub resource_owner_id: Option<String>,
	/// Remaining token response fields.
	#[serde(default)]
	pub values: JsonMap<String, Value>,
}
impl AccessToken {
	/// Creates a token without expiry or extra fields.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: Secret::new(access_token),
			expires: None,
			refresh_token: None,
			resource_owner_id: None,
			values: JsonMap::new(),
		}
	}

	/// Builds a token from a decoded token endpoint body.
	///
	/// `access_token` is required. `expires_in` (number or numeric string, `0` meaning no
	/// expiry) wins over `expires`. `resource_owner_key` is a dotted path naming the owner id,
	/// for providers that return one.
	pub fn from_response(
		body: &DecodedResponse,
		resource_owner_key: Option<&str>,
		now: OffsetDateTime,
	) -> Result<Self, ResponseError> {
		let fields: TokenFields = serde_path_to_error::deserialize(body)
			.map_err(|source| ResponseError::TokenPayload { source })?;
		let expires = resolve_expiry(&fields, now)?;
		let resource_owner_id = resource_owner_key
			.and_then(|key| extract::extract(body, key))
			.and_then(owner_id_string);
		let values = body
			.as_object()
			.map(|map| {
				map.iter()
					.filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
					.map(|(key, value)| (key.clone(), value.clone()))
					.collect()
			})
			.unwrap_or_default();

		Ok(Self {
			access_token: Secret::new(fields.access_token),
			expires,
			refresh_token: fields.refresh_token.map(Secret::new),
			resource_owner_id,
			values,
		})
	}

	/// Sets an absolute expiry instant.
	pub fn with_expires(mut self, instant: OffsetDateTime) -> Self {
		self.expires = Some(instant);

		self
	}

	/// Sets the refresh token value.
	pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(token));

		self
	}

	/// Raw access token value. Callers must avoid logging it.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		match self.expires {
			None => TokenStatus::Unbounded,
			Some(expires) if instant >= expires => TokenStatus::Expired,
			Some(_) => TokenStatus::Active,
		}
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		matches!(self.status_at(OffsetDateTime::now_utc()), TokenStatus::Expired)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &self.access_token)
			.field("expires", &self.expires)
			.field("refresh_token", &self.refresh_token)
			.field("resource_owner_id", &self.resource_owner_id)
			.field("values", &self.values)
			.finish()
	}
}

#[derive(Deserialize)]
struct TokenFields {
	access_token: String,
	#[serde(default, deserialize_with = "deserialize_seconds")]
	expires_in: Option<i64>,
	#[serde(default, deserialize_with = "deserialize_seconds")]
	expires: Option<i64>,
	#[serde(default)]
	refresh_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
	Integer(i64),
	Float(f64),
	Text(String),
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	let Some(raw) = <Option<Seconds>>::deserialize(deserializer)? else {
		return Ok(None);
	};

	match raw {
		Seconds::Integer(value) => Ok(Some(value)),
		Seconds::Float(value) if value.is_finite() => Ok(Some(value.trunc() as i64)),
		Seconds::Float(value) => Err(DeError::custom(format!("expected seconds, found {value}"))),
		Seconds::Text(text) => text
			.trim()
			.parse::<i64>()
			.map(Some)
			.map_err(|_| DeError::custom(format!("expected integer seconds, found `{text}`"))),
	}
}

fn resolve_expiry(
	fields: &TokenFields,
	now: OffsetDateTime,
) -> Result<Option<OffsetDateTime>, ResponseError> {
	if let Some(expires_in) = fields.expires_in {
		if expires_in == 0 {
			return Ok(None);
		}

		return offset(now, expires_in).map(Some);
	}

	match fields.expires {
		None | Some(0) => Ok(None),
		Some(timestamp) if timestamp > EXPIRES_TIMESTAMP_THRESHOLD =>
			OffsetDateTime::from_unix_timestamp(timestamp)
				.map(Some)
				.map_err(|_| ResponseError::ExpiryOutOfRange),
		Some(relative) => offset(now, relative).map(Some),
	}
}

fn offset(now: OffsetDateTime, seconds: i64) -> Result<OffsetDateTime, ResponseError> {
	now.checked_add(Duration::seconds(seconds)).ok_or(ResponseError::ExpiryOutOfRange)
}

fn owner_id_string(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}
