//! Content-addressed cache of the JPEG previews embedded in raw files.

pub mod cache;
pub mod hash;
pub mod prefetch;

pub use cache::{ThumbnailCache, ThumbnailRecord};
pub use hash::{hash_file, hash_reader};
pub use prefetch::prefetch_thumbnails;
