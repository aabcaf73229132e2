use crate::api::{IndexStatistics, IndexStatus, StatisticsRow, StatisticsTable};
use crate::models::{FieldDataset, IndexKind};

/// Compute mean, population standard deviation, min and max.
///
/// Returns `None` for an empty slice.
pub fn compute_stats(values: &[f64]) -> Option<IndexStatistics> {
    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    Some(IndexStatistics {
        mean,
        std: variance.sqrt(),
        min,
        max,
    })
}

impl StatisticsTable {
    /// Recompute one layer in place. An empty slice leaves the layer untouched.
    pub fn update(&mut self, kind: IndexKind, values: &[f64]) {
        match compute_stats(values) {
            Some(stats) => *self.get_mut(kind) = stats,
            None => log::warn!("{} has no values; keeping previous statistics", kind),
        }
    }

    /// Statistics for every layer of a dataset, starting from zeroed entries.
    pub fn from_dataset(dataset: &FieldDataset) -> Self {
        let mut table = StatisticsTable::default();
        for kind in IndexKind::ALL {
            table.update(kind, dataset.values(kind));
        }
        table
    }

    /// Table rows in display order.
    pub fn rows(&self) -> Vec<StatisticsRow> {
        IndexKind::ALL
            .into_iter()
            .map(|kind| {
                let stats = self.get(kind);
                StatisticsRow {
                    index: kind,
                    mean: stats.mean,
                    std: stats.std,
                    min: stats.min,
                    max: stats.max,
                    status: index_status(kind, stats.mean),
                }
            })
            .collect()
    }
}

/// Rate an index mean on the dashboard's Good / Fair / Poor scale.
pub fn index_status(kind: IndexKind, mean: f64) -> IndexStatus {
    if kind.is_vegetation() {
        if mean > 0.3 {
            IndexStatus::Good
        } else if mean > 0.1 {
            IndexStatus::Fair
        } else {
            IndexStatus::Poor
        }
    } else if mean < 1.0 {
        IndexStatus::Good
    } else if mean < 2.0 {
        IndexStatus::Fair
    } else {
        IndexStatus::Poor
    }
}
