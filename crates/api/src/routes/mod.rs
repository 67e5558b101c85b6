//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod pages;
pub mod products;
pub mod webhook;
