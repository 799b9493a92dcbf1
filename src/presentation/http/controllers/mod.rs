// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod certificates;
pub mod orders;
pub mod tags;
pub mod users;
