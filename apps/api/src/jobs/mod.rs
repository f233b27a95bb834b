pub mod handlers;
pub mod mock;
pub mod normalizer;
pub mod search;
