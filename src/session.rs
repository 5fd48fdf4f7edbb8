// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! One search run: build the precomputed data for the configured strategy,
//! walk it sequentially or on a worker pool, and hand every verified collision
//! to the caller until the limit is reached or the space is exhausted.

use std::sync::Arc;

use log::info;

use crate::config::{SearchConfig, Strategy};
use crate::error::SearchError;
use crate::memo::SuffixTable;
use crate::model::CoefficientMatrix;
use crate::reference::Reference;
use crate::search::{collisions, parallel, BoundedSearch, Collision, CollisionSearch, MeetInMiddle};
use crate::state::Statistics;

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct Report {
    /// Verified collisions reported, the reference itself included if found.
    pub found: usize,
    pub statistics: Statistics,
}

/// Search for collisions with `reference`, calling `on_collision` for each one.
///
/// An empty result is a normal outcome. A verification failure ends the run
/// with an error.
pub fn run<F>(config: &SearchConfig, reference: &Reference, on_collision: F) -> Result<Report, SearchError>
where
    F: FnMut(&Collision),
{
    match config.strategy() {
        Strategy::MeetInMiddle => {
            let table = SuffixTable::build(config.alphabet(), config.block_len());
            info!(
                "{} blocks, hashes {}..{}, two-block hashes {:?}",
                table.len(),
                table.min_hash(),
                table.max_hash(),
                table.pair_range()
            );
            drive(
                MeetInMiddle::new(Arc::new(table), reference.hash()),
                config,
                on_collision,
            )
        }
        Strategy::Bounded => {
            let matrix = CoefficientMatrix::binomial(config.rows(), reference.len());
            let search = BoundedSearch::for_reference(matrix, config.alphabet().clone(), reference);
            info!("Target vector {:?}", search.target_vector().components());
            drive(search, config, on_collision)
        }
    }
}

fn drive<S, F>(search: S, config: &SearchConfig, mut on_collision: F) -> Result<Report, SearchError>
where
    S: CollisionSearch + Send + 'static,
    F: FnMut(&Collision),
{
    let limit = config.limit().unwrap_or(usize::MAX);
    let mut found = 0;
    let statistics = match config.threads() {
        None => {
            let mut walk = collisions(&search);
            while found < limit {
                let Some(result) = walk.next() else {
                    break;
                };
                on_collision(&result?);
                found += 1;
            }
            walk.statistics().clone()
        }
        Some(threads) => {
            let mut stream = parallel::stream(Arc::new(search), threads)?;
            while found < limit {
                let Some(result) = stream.next() else {
                    break;
                };
                on_collision(&result?);
                found += 1;
            }
            stream.cancel();
            stream.statistics()
        }
    };
    info!("Statistics: {}", statistics);
    Ok(Report { found, statistics })
}
