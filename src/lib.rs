pub mod configuration;
pub mod domain;
pub mod provider;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;
