//! Parallel thumbnail warm-up for a freshly scanned volume.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::bounded;
use log::{debug, info};

use crate::error::CacheError;

use super::cache::{ThumbnailCache, ThumbnailRecord};

/// Fetches thumbnails for `paths` on `workers` threads (CPU count when
/// `None`). Results come back in input order.
///
/// Hashing and extraction are read-only per file, so they parallelise
/// freely; the cache keeps extraction of identical content to one run.
pub fn prefetch_thumbnails(
    cache: &ThumbnailCache,
    paths: &[PathBuf],
    workers: Option<usize>,
) -> Vec<Result<ThumbnailRecord, CacheError>> {
    if paths.is_empty() {
        return Vec::new();
    }

    let worker_count = workers.unwrap_or_else(num_cpus::get).clamp(1, paths.len());
    let (job_sender, job_receiver) = bounded::<(usize, &PathBuf)>(worker_count * 2);
    let (result_sender, result_receiver) =
        bounded::<(usize, Result<ThumbnailRecord, CacheError>)>(worker_count * 2);

    let mut slots: Vec<Option<Result<ThumbnailRecord, CacheError>>> =
        paths.iter().map(|_| None).collect();

    thread::scope(|scope| {
        for worker_id in 0..worker_count {
            let job_rx = job_receiver.clone();
            let result_tx = result_sender.clone();

            scope.spawn(move || {
                debug!("Thumbnail worker {} started", worker_id);
                for (index, path) in job_rx.iter() {
                    if result_tx.send((index, cache.get(path))).is_err() {
                        break;
                    }
                }
                debug!("Thumbnail worker {} stopped", worker_id);
            });
        }
        drop(job_receiver);
        drop(result_sender);

        scope.spawn(move || {
            for job in paths.iter().enumerate() {
                if job_sender.send(job).is_err() {
                    break;
                }
            }
        });

        for (index, result) in result_receiver.iter() {
            slots[index] = Some(result);
        }
    });

    let results: Vec<_> = slots.into_iter().flatten().collect();
    info!(
        "Prefetched {} thumbnails with {} workers",
        results.iter().filter(|r| r.is_ok()).count(),
        worker_count
    );
    results
}
