use rayon::prelude::*;
use thiserror::Error;

use digitizer_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// Input and output rows do not line up.
    #[error("source and destination must hold the same number of rows")]
    SizeMismatch,
}

/// Controls how per-row operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    if src.is_empty() {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel of row-aligned buffers with a given strategy.
///
/// `src` and `dst` hold whole rows of `cols` pixels with `C1` and `C2`
/// interleaved channels respectively.
///
/// # Errors
///
/// Returns [`ParallelError::SizeMismatch`] if the buffers do not hold the same
/// number of whole rows, and [`ParallelError::InvalidThreadCount`] or
/// [`ParallelError::BuildError`] for a bad [`ExecutionStrategy::Fixed`] pool.
pub fn iter_rows_with<T1, const C1: usize, T2, const C2: usize>(
    strategy: ExecutionStrategy,
    src: &[T1],
    dst: &mut [T2],
    cols: usize,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T1: Send + Sync,
    T2: Send + Sync,
{
    if cols == 0 || (src.is_empty() && dst.is_empty()) {
        return Ok(());
    }

    let (src_stride, dst_stride) = (C1 * cols, C2 * cols);
    if src.len() % src_stride != 0
        || dst.len() % dst_stride != 0
        || src.len() / src_stride != dst.len() / dst_stride
    {
        return Err(ParallelError::SizeMismatch);
    }

    let per_row = |(src_row, dst_row): (&[T1], &mut [T2])| {
        src_row
            .chunks_exact(C1)
            .zip(dst_row.chunks_exact_mut(C2))
            .for_each(|(src_pixel, dst_pixel)| f(src_pixel, dst_pixel));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            src.chunks_exact(src_stride)
                .zip(dst.chunks_exact_mut(dst_stride))
                .for_each(per_row);
        }
        ExecutionStrategy::ParallelRows => {
            src.par_chunks_exact(src_stride)
                .zip(dst.par_chunks_exact_mut(dst_stride))
                .for_each(per_row);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                src.par_chunks_exact(src_stride)
                    .zip(dst.par_chunks_exact_mut(dst_stride))
                    .for_each(per_row);
            });
        }
    }

    Ok(())
}
