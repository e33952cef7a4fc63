pub mod catalog;
pub mod channel;

pub use catalog::{CatalogEntry, FeedCatalog};
pub use channel::{ChannelSnapshot, HeadlineEntry, MAX_HEADLINES, NO_HEADLINES, NO_TITLE};
