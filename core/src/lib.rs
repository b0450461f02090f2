//! Shared building blocks for the Stayhub services.
//!
//! Each service (hotel-api, reservation-api, user-api, search-api) is an
//! independent Axum application. This crate holds the pieces they share:
//!
//! - [`error::AppError`] - HTTP error type implementing `IntoResponse`
//! - [`auth`] - JWT issuance/verification and request extractors
//! - [`event`] - the event envelope published on hotel creation
//! - [`event_bus`] - the publish/subscribe abstraction the bus crate implements
//! - [`validate`] - small input validation helpers
//!
//! Services deliberately do NOT share database schemas or repositories;
//! each owns its own store and talks to the others over HTTP or the bus.

pub mod auth;
pub mod error;
pub mod event;
pub mod event_bus;
pub mod validate;

pub use auth::{AuthUser, Claims, JwtConfig, RequireAdmin};
pub use error::AppError;
pub use event::{BusEvent, HotelCreated, HOTEL_CREATED_TOPIC};
pub use event_bus::{EventBus, EventBusError, EventStream};
