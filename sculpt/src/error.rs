use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    // The only failure the numerical core reports; every other stage is total
    #[error("could not allocate face normal buffer for {faces} faces")]
    FaceBufferAllocation {
        faces: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("preview image error: {0}")]
    Image(#[from] image::ImageError),
}
