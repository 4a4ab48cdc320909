//! Response decoding shared by every engine call.

// crates.io
use oauth2::{HttpClientError, HttpResponse, http::header::CONTENT_TYPE};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, ResponseError, TransportError},
	provider::ProviderResponse,
};

/// Decodes a raw transport response into a [`ProviderResponse`].
///
/// The body is read as JSON first, then as `application/x-www-form-urlencoded` when the
/// content type says so, and otherwise kept as a JSON string. An HTTP 500 whose body is
/// neither JSON nor form data fails without reaching the provider.
pub fn decode(response: HttpResponse) -> Result<ProviderResponse, ResponseError> {
	let status = response.status();
	let content_type = response
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.map(str::to_owned);
	let raw = response.into_body();
	let body = match serde_json::from_slice::<Value>(&raw) {
		Ok(body) => body,
		Err(_) if content_type.as_deref().is_some_and(|ct| ct.contains("urlencoded")) =>
			Value::Object(
				form_urlencoded::parse(&raw)
					.map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
					.collect(),
			),
		Err(_) if status.as_u16() == 500 =>
			return Err(ResponseError::ServerErrorWithoutJson { status: status.as_u16() }),
		Err(_) => Value::String(String::from_utf8_lossy(&raw).into_owned()),
	};

	Ok(ProviderResponse::new(status.as_u16(), body))
}

/// Returns the body of a classified response, requiring a JSON object.
pub fn into_object_body(response: ProviderResponse) -> Result<DecodedResponse> {
	if response.body.is_object() {
		Ok(response.body)
	} else {
		Err(ResponseError::UnexpectedBody { status: response.status }.into())
	}
}

/// Converts a transport failure into a crate [`Error`].
pub fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unknown transport failure".into() }.into(),
	}
}
