use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by an [`ImageStore`](crate::ImageStore) while talking to the file system.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tiff(#[from] tiff::TiffError),
    #[error("{0}")]
    Format(String),
}

/// Every way an averaging run can end up in the `Aborted` state.
///
/// None of these are retried: the first one raised terminates the run
/// and nothing is written to the output path.
#[derive(Debug, Error)]
pub enum AverageError {
    #[error("no input images were given")]
    NoInputs,
    #[error("unsupported image dimensionality {0}, expected 2 or 3")]
    UnsupportedDimensionality(String),
    #[error("failed to read image metadata from {}", path.display())]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },
    #[error("failed to read image {}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },
    #[error("failed to write image {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },
    #[error(
        "image {} has extent {found:?}, which does not fit the {canvas:?} canvas",
        path.display()
    )]
    ExtentExceedsCanvas {
        path: PathBuf,
        found: Vec<usize>,
        canvas: Vec<usize>,
    },
}

pub type AverageResult<T> = Result<T, AverageError>;
