//! Builds a HubSpot authorization URL and stashes the request until the redirect handler
//! validates the returned `state`.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use hubspot_oauth2::{
	auth::ScopeSet,
	client::{AuthorizationOptions, HubSpotClient},
	provider::{HubSpot, ProviderOptions},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let options = ProviderOptions::new(
		"demo-client",
		"demo-secret",
		Url::parse("https://app.example.com/oauth/callback")?,
	);
	let client = HubSpotClient::new(HubSpot::new(options)?)?;
	let scope = ScopeSet::new(["crm.objects.contacts.read", "oauth"])?;
	let request = client.authorization_url(AuthorizationOptions::default().with_scope(scope))?;

	println!("Send your user to {}.", &request.url);

	let mut pending: HashMap<String, _> = HashMap::new();

	pending.insert(request.state.clone(), request.clone());

	// Simulate the redirect handler looking up the stored request by `state`.
	let returned_state = request.state.clone();

	if let Some(stashed) = pending.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("Validated state; redirect URI is {}.", &stashed.redirect_uri);
		println!("Call HubSpotClient::exchange_authorization with the returned code next.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}
