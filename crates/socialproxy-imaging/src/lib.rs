//! Image helpers for post attachments: link detection, fetch, grayscale, base64.

pub mod error;
pub mod fetch;
pub mod grayscale;
pub mod link;

pub use error::ImagingError;
pub use fetch::ImageFetcher;
pub use grayscale::{encode_base64, to_grayscale};
pub use link::is_image_link;
