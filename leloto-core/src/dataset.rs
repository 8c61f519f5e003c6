use std::path::Path;

use anyhow::Result;

use crate::adjacency::AdjacencyStats;
use crate::history::CombinationSet;
use crate::import::{load_csv, parse_draws, ImportReport, RejectedRow};
use crate::models::Draw;

/// Instantané immuable d'un historique chargé.
///
/// Un nouveau chargement produit un nouvel instantané ; rien n'est modifié en place.
#[derive(Debug, Clone)]
pub struct Dataset {
    draws: Vec<Draw>,
    window: usize,
    combinations: CombinationSet,
    adjacency: AdjacencyStats,
}

impl Dataset {
    /// `draws` dans l'ordre du fichier (le plus ancien d'abord).
    pub fn from_draws(draws: Vec<Draw>, window: usize) -> Self {
        let combinations = CombinationSet::build(&draws);
        let adjacency = AdjacencyStats::analyze(&draws);
        Self {
            draws,
            window,
            combinations,
            adjacency,
        }
    }

    pub fn from_import(report: ImportReport, window: usize) -> (Self, Vec<RejectedRow>) {
        (Self::from_draws(report.draws, window), report.rejected)
    }

    pub fn parse(text: &str, window: usize) -> (Self, Vec<RejectedRow>) {
        Self::from_import(parse_draws(text), window)
    }

    pub fn load(path: &Path, window: usize) -> Result<(Self, Vec<RejectedRow>)> {
        let report = load_csv(path)?;
        Ok(Self::from_import(report, window))
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Les `window` derniers tirages (ou tout l'historique s'il est plus court).
    pub fn recent(&self) -> &[Draw] {
        self.last(self.window)
    }

    pub fn last(&self, n: usize) -> &[Draw] {
        let start = self.draws.len().saturating_sub(n);
        &self.draws[start..]
    }

    pub fn combinations(&self) -> &CombinationSet {
        &self.combinations
    }

    pub fn adjacency(&self) -> &AdjacencyStats {
        &self.adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_draws;

    #[test]
    fn test_end_to_end_sample() {
        let text = "date,b1,b2,b3,b4,b5,chance
2020-01-01,1,2,3,4,5,10
2020-01-02,10,20,30,40,49,1
2020-01-03,7,8,9,10,11,2";
        let (dataset, rejected) = Dataset::parse(text, 50);
        assert!(rejected.is_empty());
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.adjacency().total_draws, 3);
        assert_eq!(dataset.adjacency().draws_with_adjacency, 2);
        assert_eq!(dataset.combinations().len(), 3);
        assert_eq!(dataset.recent().len(), 3);
    }

    #[test]
    fn test_recent_is_suffix() {
        let draws = make_test_draws(80);
        let dataset = Dataset::from_draws(draws.clone(), 50);
        let recent = dataset.recent();
        assert_eq!(recent.len(), 50);
        assert_eq!(recent, &draws[30..]);
        assert_eq!(recent.last(), draws.last());
    }

    #[test]
    fn test_last_larger_than_history() {
        let dataset = Dataset::from_draws(make_test_draws(4), 50);
        assert_eq!(dataset.last(10).len(), 4);
        assert_eq!(dataset.last(0).len(), 0);
    }

    #[test]
    fn test_reload_replaces_everything() {
        let (first, _) = Dataset::parse("h\n2020-01-01,1,2,3,4,5,1\n2020-01-02,6,7,8,9,10,1\n", 50);
        let (second, _) = Dataset::parse("h\n2021-01-01,11,22,33,44,45,1\n", 50);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(!second.combinations().contains(&[1, 2, 3, 4, 5]));
        assert_eq!(second.adjacency().draws_with_adjacency, 1);
    }

    #[test]
    fn test_rejected_rows_surface() {
        let (dataset, rejected) = Dataset::parse("h\n2020-01-01,1,2,3,4,5,1\nbad,row\n", 50);
        assert_eq!(dataset.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].line, 3);
    }
}
