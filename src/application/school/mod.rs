//! School-wide statistics

pub mod service;

pub use service::SchoolStatisticsService;
