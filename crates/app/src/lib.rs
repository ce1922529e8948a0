//! Client-side application services for the kiosk commerce platform:
//! durable storage, session state, the uniform API client, and the domain
//! facades a UI binds to.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod storage;
