//! Admin API request handlers.
//!
//! Every handler checks the admin bearer token, converts DTOs to domain params,
//! calls a service and converts the result back to a DTO.

pub mod collector;
pub mod config;
pub mod event;
pub mod punishment;
