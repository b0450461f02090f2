//! Stayhub hotel catalog service.
//!
//! CRUD over hotels and amenities. Creating a hotel publishes a
//! `hotel.created` event that search-api consumes to build its index.
//! reservation-api probes `GET /hotels/:id/exists` before writing a
//! reservation.

pub mod config;
pub mod handlers;
pub mod mocks;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
