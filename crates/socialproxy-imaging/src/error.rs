use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode image from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("could not re-encode grayscale image: {0}")]
    Encode(#[source] image::ImageError),
}
