pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod optimizer;
pub mod scorer;
pub mod timeline;
// cmd and reports are binary modules (see main.rs).
