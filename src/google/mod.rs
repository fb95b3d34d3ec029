pub mod youtube;

pub use youtube::{VideoClient, VideoResult};
