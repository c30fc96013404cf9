#![doc = "The `classroom-api` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, validation rules, CRUD services,"]
#![doc = "authentication gate, routing configuration, and error handling for the"]
#![doc = "classroom API. It is used by the main binary (`main.rs`) to construct and"]
#![doc = "run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
