mod tiff_file;


use std::path::Path;

use crate::{
    error::AverageResult,
    image::{Extent, Geometry, Image},
};

pub use self::tiff_file::TiffStore;

/// Decodes and encodes `D`-dimensional images on disk.
///
/// Reads happen one file at a time and each call fully owns the returned
/// image, so callers only ever need a single input resident in memory.
pub trait ImageStore<const D: usize> {
    /// Reads the extent of the image at `path` without decoding its samples.
    ///
    /// # Errors
    /// [`AverageError::MetadataRead`](crate::AverageError::MetadataRead) if the
    /// file is unreadable, in an unknown format, or of the wrong dimensionality.
    fn probe(&self, path: &Path) -> AverageResult<Extent<D>>;

    /// Reads spacing and origin of the image at `path`, again without
    /// decoding its samples.
    ///
    /// # Errors
    /// [`AverageError::MetadataRead`](crate::AverageError::MetadataRead) if the
    /// file is unreadable or in an unknown format.
    fn probe_geometry(&self, path: &Path) -> AverageResult<Geometry<D>>;

    /// Reads samples and geometry of the image at `path`.
    ///
    /// # Errors
    /// [`AverageError::ImageRead`](crate::AverageError::ImageRead) if the file
    /// cannot be decoded.
    fn read(&self, path: &Path) -> AverageResult<Image<D>>;

    /// Writes `image` to `path`, replacing any existing file.
    ///
    /// # Errors
    /// [`AverageError::OutputWrite`](crate::AverageError::OutputWrite) if the
    /// destination cannot be written.
    fn write(&self, path: &Path, image: &Image<D>) -> AverageResult<()>;
}

impl<const D: usize, S: ImageStore<D> + ?Sized> ImageStore<D> for &S {
    fn probe(&self, path: &Path) -> AverageResult<Extent<D>> {
        (**self).probe(path)
    }

    fn probe_geometry(&self, path: &Path) -> AverageResult<Geometry<D>> {
        (**self).probe_geometry(path)
    }

    fn read(&self, path: &Path) -> AverageResult<Image<D>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, image: &Image<D>) -> AverageResult<()> {
        (**self).write(path, image)
    }
}
