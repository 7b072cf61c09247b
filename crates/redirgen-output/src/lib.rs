pub mod writer;

pub use writer::{BatchPaths, timestamp_base, write_batch};
