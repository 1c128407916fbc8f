//! Photo records consumed by the layout engine.
//!
//! The engine never mutates photos; it only keys auxiliary maps
//! (measured heights, column assignments) by [`PhotoId`].

use serde::Deserialize;
use thiserror::Error;

/// Stable photo identifier, unique across pages.
///
/// Auxiliary state is keyed by this id rather than by object identity,
/// so it survives photo records being recreated across page fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(u64);

impl PhotoId {
    /// Create a new PhotoId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a photo record carries zero-sized intrinsic dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("photo {id} has invalid intrinsic dimensions {width}x{height}")]
pub struct InvalidDimensions {
    /// Raw id of the offending record.
    pub id: u64,
    /// Intrinsic width as given.
    pub width: usize,
    /// Intrinsic height as given.
    pub height: usize,
}

/// A photo record: stable id plus intrinsic dimensions in pixels.
///
/// Intrinsic dimensions are the source image's natural size; the engine
/// only uses their ratio to estimate rendered heights before the real
/// height is measured.
///
/// # Invariants
/// - `width > 0` and `height > 0`, enforced by [`Photo::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Photo {
    id: PhotoId,
    width: usize,
    height: usize,
}

impl Photo {
    /// Create a photo record, rejecting zero dimensions.
    pub fn new(id: PhotoId, width: usize, height: usize) -> Result<Self, InvalidDimensions> {
        if width == 0 || height == 0 {
            return Err(InvalidDimensions {
                id: id.get(),
                width,
                height,
            });
        }
        Ok(Self { id, width, height })
    }

    /// Stable identifier.
    pub fn id(&self) -> PhotoId {
        self.id
    }

    /// Intrinsic width in pixels. Always > 0.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Intrinsic height in pixels. Always > 0.
    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod photo_id {
        use super::*;

        #[test]
        fn new_wraps_raw_value() {
            assert_eq!(PhotoId::new(42).get(), 42);
        }

        #[test]
        fn display_shows_raw_value() {
            assert_eq!(format!("{}", PhotoId::new(7)), "7");
        }

        #[test]
        fn hash_and_eq_by_value() {
            use std::collections::HashSet;
            let mut set = HashSet::new();
            set.insert(PhotoId::new(1));
            set.insert(PhotoId::new(2));
            set.insert(PhotoId::new(1));
            assert_eq!(set.len(), 2);
        }
    }

    mod photo {
        use super::*;

        #[test]
        fn new_accepts_positive_dimensions() {
            let photo = Photo::new(PhotoId::new(1), 800, 600).unwrap();
            assert_eq!(photo.width(), 800);
            assert_eq!(photo.height(), 600);
        }

        #[test]
        fn new_rejects_zero_width() {
            let err = Photo::new(PhotoId::new(1), 0, 600).unwrap_err();
            assert_eq!(
                err,
                InvalidDimensions {
                    id: 1,
                    width: 0,
                    height: 600
                }
            );
        }

        #[test]
        fn new_rejects_zero_height() {
            assert!(Photo::new(PhotoId::new(1), 800, 0).is_err());
        }

        #[test]
        fn new_rejects_both_zero() {
            assert!(Photo::new(PhotoId::new(1), 0, 0).is_err());
        }
    }
}
