/// The RSVP action backing both the form and the JSON endpoint
pub mod action;
/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Shared UI behavior: feature gate, countdown, carousel, RSVP form flow, links
pub mod component;
/// Controllers for HTML pages and REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Invitation documents, RSVPs and song suggestions
pub mod model;
/// HTML pages of invitations in their skins
pub mod render;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
