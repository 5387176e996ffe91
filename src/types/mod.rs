mod link;
mod timestamp;

pub use link::{validate, LinkError, VideoLink};
pub use timestamp::{normalize, TimestampError, TimestampPair};
