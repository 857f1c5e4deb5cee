//! Token generation helpers

pub mod csrf;
