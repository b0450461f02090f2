//! Stayhub user service.
//!
//! Registration, login, and JWT issuance over a `users` table. Other
//! services verify the tokens issued here with the shared secret, and
//! reservation-api probes `GET /users/:id/exists` before writing a
//! reservation.

pub mod config;
pub mod handlers;
pub mod mocks;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
