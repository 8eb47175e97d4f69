//! Blogging platform backend.
//!
//! Module layout (Clean Architecture style):
//! - `bootstrap`: configuration and service wiring
//! - `infrastructure`: Postgres/in-memory stores and mailers
//! - `presentation`: HTTP handlers, extractors and routing
//! - `application`: use cases, ports and token/password services
//! - `domain`: blogging and account models, reaction reconciliation

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
