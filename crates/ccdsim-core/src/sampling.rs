//! Reproducible chunked sampling.
//!
//! Noise frames are filled in blocks of [`NOISE_CHUNK_ROWS`] rows. Each block
//! owns a `StdRng` seeded from a value drawn, in block order, from the caller's
//! generator. The result therefore depends only on the caller's generator
//! state, not on whether the blocks ran on one thread or many.

use ndarray::{Array2, ArrayViewMut2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::consts::{NOISE_CHUNK_ROWS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;

/// Draw one seed per row chunk of an image with `rows` rows.
pub fn chunk_seeds<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> Vec<u64> {
    let chunks = rows.div_ceil(NOISE_CHUNK_ROWS);
    (0..chunks).map(|_| rng.random::<u64>()).collect()
}

/// Run `processor` over every row chunk of `array` with its own seeded RNG.
///
/// Large arrays are processed with Rayon; the output is identical either way.
pub fn process_chunks<R, F>(array: &mut Array2<f64>, rng: &mut R, processor: F) -> Result<()>
where
    R: Rng + ?Sized,
    F: Fn(ArrayViewMut2<'_, f64>, &mut StdRng) -> Result<()> + Send + Sync,
{
    let seeds = chunk_seeds(array.nrows(), rng);
    let parallel = array.len() >= PARALLEL_PIXEL_THRESHOLD;
    process_chunks_with_seeds(array, &seeds, parallel, processor)
}

pub(crate) fn process_chunks_with_seeds<F>(
    array: &mut Array2<f64>,
    seeds: &[u64],
    parallel: bool,
    processor: F,
) -> Result<()>
where
    F: Fn(ArrayViewMut2<'_, f64>, &mut StdRng) -> Result<()> + Send + Sync,
{
    if parallel {
        array
            .axis_chunks_iter_mut(Axis(0), NOISE_CHUNK_ROWS)
            .into_par_iter()
            .enumerate()
            .try_for_each(|(chunk_idx, chunk)| {
                let mut rng = StdRng::seed_from_u64(seeds[chunk_idx]);
                processor(chunk, &mut rng)
            })
    } else {
        for (chunk, &seed) in array
            .axis_chunks_iter_mut(Axis(0), NOISE_CHUNK_ROWS)
            .zip(seeds)
        {
            let mut rng = StdRng::seed_from_u64(seed);
            processor(chunk, &mut rng)?;
        }
        Ok(())
    }
}
