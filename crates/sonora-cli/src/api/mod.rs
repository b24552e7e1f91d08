//! HTTP surface over a shared [`Engine`](sonora_search::Engine).

pub mod handlers;
pub mod server;

pub use server::{run, AppContext};
