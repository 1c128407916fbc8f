//! Domain types: photo records, the manifest source, and the error
//! taxonomy.

pub mod error;
pub mod manifest;
pub mod photo;

pub use error::{AppError, ManifestError};
pub use manifest::PhotoManifest;
pub use photo::{InvalidDimensions, Photo, PhotoId};
