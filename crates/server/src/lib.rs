//! Rateboard server library.
//!
//! This crate provides the platform service as a library, allowing it to
//! be tested and reused. The interesting parts are the access-control
//! layer ([`auth`], [`middleware`]), the rating ledger and owner-upgrade
//! workflow ([`services`]), and the unique-index-backed repositories
//! ([`db`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
