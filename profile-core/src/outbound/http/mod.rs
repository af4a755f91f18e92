//! HTTP outbound adapters.
//!
//! This module provides a reqwest implementation of the `UserDataService`
//! port against a JSON profile API.

mod http_service;

pub use http_service::HttpUserDataService;
