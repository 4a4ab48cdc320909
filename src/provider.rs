//! Provider-facing contracts (behavior) and configuration (data).
//!
//! `adapter` defines [`Provider`], the hook set the engine calls to obtain endpoint URLs,
//! scope formatting rules, response classification, and resource-owner construction.
//! `options` holds the client credentials every provider is configured with, and
//! `hubspot` is the HubSpot implementation of the contract.

pub mod adapter;
pub mod hubspot;
pub mod options;

pub use adapter::*;
pub use hubspot::*;
pub use options::*;
