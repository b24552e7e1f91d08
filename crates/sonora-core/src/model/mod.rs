pub mod corpus;
pub mod track;

pub use corpus::Corpus;
pub use track::Track;
