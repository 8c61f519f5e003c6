use crate::adjacency::{adjacent_pairs, PairCount};
use crate::dataset::Dataset;
use crate::models::{Grid, PICK_COUNT};
use crate::sampler::GenerationOutcome;

/// Nombre de paires affichées dans le classement.
pub const TOP_PAIRS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_draws: usize,
    pub draws_with_adjacency: usize,
    pub adjacency_percentage: f64,
    pub loaded_grids: usize,
    pub window_len: usize,
    pub top_pairs: Vec<PairCount>,
    pub zones: Vec<(u8, u32)>,
}

pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let adjacency = dataset.adjacency();
    DatasetSummary {
        total_draws: dataset.len(),
        draws_with_adjacency: adjacency.draws_with_adjacency,
        adjacency_percentage: adjacency.adjacency_percentage(),
        loaded_grids: dataset.combinations().len(),
        window_len: dataset.recent().len(),
        top_pairs: adjacency.top_pairs(TOP_PAIRS),
        zones: adjacency.zones(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridReport {
    pub numbers: [u8; PICK_COUNT],
    pub pairs: Vec<(u8, u8)>,
}

impl GridReport {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            numbers: grid.numbers,
            pairs: adjacent_pairs(&grid.numbers),
        }
    }

    pub fn has_adjacency(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Vrai si `n` appartient à une paire consécutive de la grille.
    pub fn is_highlighted(&self, n: u8) -> bool {
        self.pairs.iter().any(|&(a, b)| a == n || b == n)
    }

    pub fn highlighted(&self) -> Vec<u8> {
        self.numbers
            .iter()
            .copied()
            .filter(|&n| self.is_highlighted(n))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub grids: usize,
    pub with_adjacency: usize,
    pub adjacency_percentage: f64,
    pub window_len: usize,
    pub target: usize,
    pub partial: bool,
}

pub fn grid_reports(outcome: &GenerationOutcome) -> Vec<GridReport> {
    outcome.grids.iter().map(GridReport::from_grid).collect()
}

/// `window_len` : nombre de tirages réellement utilisés pour les scores.
pub fn summarize_batch(reports: &[GridReport], outcome: &GenerationOutcome, window_len: usize) -> BatchSummary {
    let with_adjacency = reports.iter().filter(|r| r.has_adjacency()).count();
    let adjacency_percentage = if reports.is_empty() {
        0.0
    } else {
        with_adjacency as f64 / reports.len() as f64 * 100.0
    };
    BatchSummary {
        grids: reports.len(),
        with_adjacency,
        adjacency_percentage,
        window_len,
        target: outcome.target,
        partial: outcome.is_partial(),
    }
}
