use std::cmp::Ordering;

use indexmap::map::Entry;
use indexmap::IndexMap;
use orrery_layout::radial::{MarkerPlacement, RadialLayout};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::OrreryResultsError;
use crate::options::{decide_strategy, validate_option_count, ResultOption, ResultsStrategy};

/// Kind of interactive component a result record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractiveKind {
    Poll,
    Quiz,
}

/// One reacted state entry observed from the host.
///
/// `option` carries the option the audience member selected on that
/// component, once a selection has been made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InteractiveRecord {
    pub interactive_id: String,
    pub kind: InteractiveKind,
    pub option: Option<ResultOption>,
}

#[derive(Debug, Clone, Default)]
struct ResultEntry {
    option: Option<ResultOption>,
    placement: Option<MarkerPlacement>,
}

/// Accumulates result records from interactive components and keeps one
/// marker placement per tracked component.
///
/// Components are tracked in arrival order. Whenever the tracked set grows,
/// the whole ring of placements is recomputed; the layout holds no state
/// between computations, so the last full recomputation wins.
#[derive(Debug, Clone)]
pub struct DetailedResultsTracker {
    options: Vec<ResultOption>,
    strategy: ResultsStrategy,
    entries: IndexMap<String, ResultEntry>,
}

impl DetailedResultsTracker {
    /// Creates a tracker for a component configured with the given options.
    ///
    /// Rejects configurations with fewer than two or more than four options.
    /// The results strategy is decided from the options: percentage scoring
    /// when every option carries a threshold, category tallying otherwise.
    pub fn try_new(options: Vec<ResultOption>) -> Result<Self, OrreryResultsError> {
        validate_option_count(&options)?;
        let strategy = decide_strategy(&options);
        Ok(Self {
            options,
            strategy,
            entries: IndexMap::new(),
        })
    }

    /// Returns the strategy decided from the configured options.
    pub fn strategy(&self) -> ResultsStrategy {
        self.strategy
    }

    /// Returns the configured options.
    pub fn options(&self) -> &[ResultOption] {
        &self.options
    }

    /// Returns the number of tracked components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the selected option recorded for a component, if any.
    pub fn selected_option(&self, interactive_id: &str) -> Option<&ResultOption> {
        self.entries.get(interactive_id)?.option.as_ref()
    }

    /// Iterates current placements in arrival order.
    pub fn placements(&self) -> impl Iterator<Item = (&str, &MarkerPlacement)> {
        self.entries.iter().filter_map(|(id, entry)| {
            entry
                .placement
                .as_ref()
                .map(|placement| (id.as_str(), placement))
        })
    }

    /// Folds a batch of records into the tracked set.
    ///
    /// Records from the other kind of component are ignored: percentage
    /// scoring tracks quizzes, category tallying tracks polls. The first
    /// selected option reported for a component is kept; later reports for
    /// the same component do not overwrite it. Returns whether any new
    /// component was tracked.
    pub fn observe(&mut self, records: &[InteractiveRecord]) -> bool {
        let mut inserted = false;
        for record in records {
            if record.kind != self.tracked_kind() {
                continue;
            }
            let entry = match self.entries.entry(record.interactive_id.clone()) {
                Entry::Occupied(occupied) => occupied.into_mut(),
                Entry::Vacant(vacant) => {
                    inserted = true;
                    vacant.insert(ResultEntry::default())
                }
            };
            if entry.option.is_none() {
                entry.option = record.option.clone();
            }
        }
        inserted
    }

    /// Folds records in and recomputes the ring if the tracked set grew.
    ///
    /// Returns whether a relayout ran.
    pub fn update(&mut self, records: &[InteractiveRecord]) -> Result<bool, OrreryResultsError> {
        self.update_with(records, &mut rand::thread_rng())
    }

    /// Same as [`update`](Self::update), with an injected random source.
    pub fn update_with<R: Rng + ?Sized>(
        &mut self,
        records: &[InteractiveRecord],
        rng: &mut R,
    ) -> Result<bool, OrreryResultsError> {
        let grew = self.observe(records);
        if grew {
            self.relayout_with(rng)?;
        }
        Ok(grew)
    }

    /// Recomputes placements for every tracked component.
    ///
    /// At least one component must be tracked.
    pub fn relayout_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), OrreryResultsError> {
        let layout = RadialLayout::try_new(self.entries.len())?;
        let placements = layout.compute_with(rng);
        for (entry, placement) in self.entries.values_mut().zip(placements) {
            entry.placement = Some(placement);
        }
        Ok(())
    }

    /// Percentage of answered components whose selected option was correct,
    /// in [0, 100]. Components without a recorded selection are excluded.
    pub fn percentage_score(&self) -> f32 {
        let mut answered = 0usize;
        let mut correct = 0usize;
        for entry in self.entries.values() {
            if let Some(option) = &entry.option {
                answered += 1;
                if option.correct {
                    correct += 1;
                }
            }
        }
        if answered == 0 {
            return 0.0;
        }
        100.0 * correct as f32 / answered as f32
    }

    /// Resolves the configured option the aggregated results land on.
    ///
    /// Under percentage scoring this is the option with the highest threshold
    /// not exceeding the score, falling back to the lowest-threshold option.
    /// Under category tallying it is the option whose category was selected
    /// most often, the first configured option winning ties.
    pub fn winning_option(&self) -> Option<&ResultOption> {
        match self.strategy {
            ResultsStrategy::Percentage => {
                let score = self.percentage_score();
                let mut candidates: Vec<&ResultOption> = self.options.iter().collect();
                candidates.sort_by(|a, b| {
                    b.results_threshold
                        .partial_cmp(&a.results_threshold)
                        .unwrap_or(Ordering::Equal)
                });
                candidates
                    .iter()
                    .find(|option| {
                        option
                            .results_threshold
                            .map_or(false, |threshold| threshold <= score)
                    })
                    .copied()
                    .or_else(|| candidates.last().copied())
            }
            ResultsStrategy::Category => {
                let mut counts: IndexMap<&str, usize> = IndexMap::new();
                for entry in self.entries.values() {
                    if let Some(category) = entry
                        .option
                        .as_ref()
                        .and_then(|option| option.results_category.as_deref())
                    {
                        *counts.entry(category).or_insert(0) += 1;
                    }
                }

                let mut winner: Option<&ResultOption> = None;
                let mut best = 0usize;
                for option in &self.options {
                    if let Some(category) = option.results_category.as_deref() {
                        let count = counts.get(category).copied().unwrap_or(0);
                        if winner.is_none() || count > best {
                            winner = Some(option);
                            best = count;
                        }
                    }
                }
                winner
            }
        }
    }

    fn tracked_kind(&self) -> InteractiveKind {
        match self.strategy {
            ResultsStrategy::Percentage => InteractiveKind::Quiz,
            ResultsStrategy::Category => InteractiveKind::Poll,
        }
    }
}
