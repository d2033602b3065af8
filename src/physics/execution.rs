//! How the per-body force and integration loop is scheduled.

use bevy::tasks::{ComputeTaskPool, ParallelSliceMut, TaskPool};
use serde::{Deserialize, Serialize};

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// One body after another on the calling thread
    #[default]
    Sequential,
    /// Chunks of bodies spread over Bevy's compute task pool
    Parallel,
}

/// Chunks handed to each pool thread, on average.
const CHUNKS_PER_THREAD: usize = 4;

impl ExecutionStrategy {
    /// Applies `update` to every item.
    ///
    /// `update` only sees its own item, so both strategies produce identical
    /// results regardless of scheduling.
    pub fn for_each_mut<T, F>(self, mut items: &mut [T], update: F)
    where
        T: Send,
        F: Fn(&mut T) + Send + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => items.iter_mut().for_each(update),
            ExecutionStrategy::Parallel => {
                if items.is_empty() {
                    return;
                }

                let pool = ComputeTaskPool::get_or_init(TaskPool::default);
                let chunk_size = items
                    .len()
                    .div_ceil(pool.thread_num().max(1) * CHUNKS_PER_THREAD)
                    .max(1);

                items.par_chunk_map_mut(pool, chunk_size, |_, chunk| {
                    chunk.iter_mut().for_each(&update);
                });
            }
        }
    }
}
