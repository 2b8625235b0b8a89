pub mod background;
pub mod capture;
pub mod config;
pub mod error;
pub mod models;
pub mod paths;
pub mod routes;
pub mod services;
pub mod state;
pub mod viewer;
