//! Provider-agnostic view of the identity behind an access token.

// self
use crate::_prelude::*;

/// Decoded JSON body handed to providers after a successful lookup.
pub type DecodedResponse = Value;

/// Identity (end user or account) represented by an access token.
///
/// Implementations wrap the decoded lookup response without copying or mutating it, so
/// [`to_raw_map`](Self::to_raw_map) always returns exactly what the provider sent.
pub trait ResourceOwner: Send + Sync {
	/// Provider-side identifier of the owner, when present.
	fn id(&self) -> Option<&Value>;

	/// The decoded response the owner was built from.
	fn to_raw_map(&self) -> &DecodedResponse;
}
