//! HTTP modules, one per resource, plus cross-cutting middleware

pub mod health;
pub mod home;
pub mod metrics;
pub mod request_id;
pub mod students;
