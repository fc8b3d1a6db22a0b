pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod models;
pub mod templates_structs;
pub mod views;
