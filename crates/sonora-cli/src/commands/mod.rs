pub mod config;
pub mod engine;
pub mod recommend;
pub mod search;
pub mod serve;
pub mod songs;

pub use recommend::run_recommend;
pub use search::run_search;
pub use serve::run_serve;
pub use songs::list_songs;
