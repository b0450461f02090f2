//! Stayhub reservation service.
//!
//! Books stays against the hotel catalog. Before inserting a reservation
//! it synchronously probes user-api and hotel-api existence endpoints;
//! there is no retry or compensation, a failed probe fails the request.

pub mod clients;
pub mod config;
pub mod handlers;
pub mod mocks;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
