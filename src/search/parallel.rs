// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel search over root branches.
//!
//! Root branches share nothing but the read-only search, so each root becomes
//! one rayon task. Workers verify their own candidates and send them over a
//! channel; the caller consumes the receiving end as a lazy iterator in
//! whatever order workers finish. Dropping the stream, or a fatal verification
//! error, tells the remaining workers to stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

use super::{verify, Collision, CollisionSearch, Walk};
use crate::error::SearchError;
use crate::state::Statistics;

/// Verified collisions produced by a pool of workers.
pub struct CollisionStream {
    receiver: Receiver<Result<Collision, SearchError>>,
    cancel: Arc<AtomicBool>,
    statistics: Arc<Mutex<Statistics>>,
    driver: Option<JoinHandle<()>>,
}

impl CollisionStream {
    /// Counters merged from every finished root so far.
    pub fn statistics(&self) -> Statistics {
        match self.statistics.lock() {
            Ok(statistics) => statistics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Ask the workers to stop after their current candidate.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

impl Iterator for CollisionStream {
    type Item = Result<Collision, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.recv().ok()
    }
}

impl Drop for CollisionStream {
    fn drop(&mut self) {
        self.cancel();
        if let Some(driver) = self.driver.take() {
            if driver.join().is_err() {
                warn!("Search worker panicked");
            }
        }
    }
}

/// Start walking every root of `search` on a pool of `threads` workers.
///
/// `threads == 0` lets rayon pick one worker per CPU.
pub fn stream<S>(search: Arc<S>, threads: usize) -> Result<CollisionStream, ThreadPoolBuildError>
where
    S: CollisionSearch + Send + 'static,
{
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    let (sender, receiver) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let statistics = Arc::new(Mutex::new(Statistics::new()));

    let driver = {
        let cancel = Arc::clone(&cancel);
        let statistics = Arc::clone(&statistics);
        thread::spawn(move || {
            debug!(
                "{}: {} roots on {} workers",
                search.name(),
                search.roots(),
                pool.current_num_threads()
            );
            let target = search.target();
            let policy = search.mismatch_policy();
            pool.install(|| {
                (0..search.roots())
                    .into_par_iter()
                    .for_each_with(sender, |sender, root| {
                        if cancel.load(Ordering::Relaxed) {
                            return;
                        }
                        let mut walk = search.walk(root..root + 1);
                        while let Some(candidate) = walk.next() {
                            if let Some(result) = verify(candidate, target, policy) {
                                let fatal = result.is_err();
                                if sender.send(result).is_err() || fatal {
                                    cancel.store(true, Ordering::Relaxed);
                                }
                            }
                            if cancel.load(Ordering::Relaxed) {
                                break;
                            }
                        }
                        match statistics.lock() {
                            Ok(mut merged) => merged.merge(walk.statistics()),
                            Err(poisoned) => poisoned.into_inner().merge(walk.statistics()),
                        }
                    });
            });
        })
    };

    Ok(CollisionStream {
        receiver,
        cancel,
        statistics,
        driver: Some(driver),
    })
}
