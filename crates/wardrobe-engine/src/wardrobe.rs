use std::time::Instant;

use rayon::prelude::*;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::dressing::{enumerate, finalize, Dressing};
use crate::error::Warning;
use crate::inventory::Inventory;
use crate::oracle::{Rejection, SatOracle, SatisfiabilityOracle, Verdict};

/// Outcome of [`Wardrobe::dress`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DressReport {
    /// Accepted dressings, canonical and duplicate free
    pub dressings: Vec<Dressing>,
    /// Warnings raised while checking candidates
    pub warnings: Vec<Warning>,
    /// Number of candidates enumerated
    pub candidates: usize,
    /// Number of candidates the oracle rejected
    pub rejected: usize,
}

/// A catalog with its compiled rules, ready to dress inventories.
pub struct Wardrobe<O = SatOracle> {
    catalog: Catalog,
    config: EngineConfig,
    oracle: O,
}

impl Wardrobe {
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let oracle = SatOracle::new(config.solve_timeout());
        Self::with_oracle(catalog, config, oracle)
    }
}

impl<O: SatisfiabilityOracle> Wardrobe<O> {
    pub fn with_oracle(catalog: Catalog, config: EngineConfig, oracle: O) -> Self {
        Self {
            catalog,
            config,
            oracle,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve newline separated `garment,color` lines against the catalog
    pub fn inventory(&self, text: &str) -> Inventory {
        Inventory::build(&self.catalog, text)
    }

    /// Every valid dressing that can be put together from `inventory`.
    pub fn dress(&self, inventory: &Inventory) -> DressReport {
        let start = Instant::now();
        let candidates: Vec<Dressing> = enumerate(inventory).collect();
        log::debug!(
            "Checking {} candidate dressings ({})",
            candidates.len(),
            if self.config.parallel { "parallel" } else { "sequential" }
        );

        let check = |candidate: &Dressing| self.oracle.check(&self.catalog, candidate);
        let verdicts: Vec<Verdict> = if self.config.parallel {
            candidates.par_iter().map(check).collect()
        } else {
            candidates.iter().map(check).collect()
        };

        let mut accepted = Vec::new();
        let mut warnings = Vec::new();
        let mut rejected = 0;

        for (candidate, verdict) in candidates.iter().zip(verdicts) {
            match verdict {
                Verdict::Accepted(dressing) => accepted.push(dressing),
                Verdict::Rejected(Rejection::Unsatisfiable) => rejected += 1,
                Verdict::Rejected(Rejection::Timeout(timeout)) => {
                    rejected += 1;
                    let warning = Warning::SolverTimeout {
                        candidate: candidate.display(&self.catalog).to_string(),
                        timeout,
                    };
                    warnings.push(warning.emit());
                }
            }
        }

        let dressings = finalize(accepted);
        log::info!(
            "Found {} dressings in {} candidates ({} rejected) in {:.3} seconds",
            dressings.len(),
            candidates.len(),
            rejected,
            start.elapsed().as_secs_f64()
        );

        DressReport {
            dressings,
            warnings,
            candidates: candidates.len(),
            rejected,
        }
    }
}
