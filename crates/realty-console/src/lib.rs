//! Role-gated marketing and back-office service for residential real estate.
//!
//! The `auth` module owns the session lifecycle (resolving the signed-in
//! principal from the identity service) and the access gate that decides, per
//! protected surface, whether a navigation renders, waits, or redirects. The
//! `console` module carries the back-office workflows the gate protects:
//! the residential catalogue, job postings, customer inquiries, the account
//! directory, and the office contact card.

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod telemetry;
