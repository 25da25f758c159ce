pub mod client;
pub mod document;

pub use client::{FeedClient, FeedSource};
pub use document::FeedDocument;
