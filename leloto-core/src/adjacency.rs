use std::collections::BTreeMap;

use crate::models::Draw;

/// Paires de numéros consécutifs (écart de 1) dans une suite triée.
pub fn adjacent_pairs(numbers: &[u8]) -> Vec<(u8, u8)> {
    numbers
        .windows(2)
        .filter(|w| w[1].checked_sub(w[0]) == Some(1))
        .map(|w| (w[0], w[1]))
        .collect()
}

/// Zone d'un numéro : sa dizaine.
pub fn zone_of(n: u8) -> u8 {
    n / 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairCount {
    pub lower: u8,
    pub count: u32,
}

impl PairCount {
    pub fn upper(&self) -> u8 {
        self.lower + 1
    }

    /// Clé d'affichage `a-b`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.lower, self.upper())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyStats {
    pub total_draws: usize,
    pub draws_with_adjacency: usize,
    /// Occurrences par paire, indexées par le plus petit numéro de la paire.
    pub pair_counts: BTreeMap<u8, u32>,
    pub zone_counts: BTreeMap<u8, u32>,
}

impl AdjacencyStats {
    pub fn analyze(draws: &[Draw]) -> Self {
        let mut stats = Self {
            total_draws: draws.len(),
            ..Self::default()
        };

        for draw in draws {
            let pairs = adjacent_pairs(&draw.numbers);
            if pairs.is_empty() {
                continue;
            }
            stats.draws_with_adjacency += 1;
            for (lower, _) in pairs {
                *stats.pair_counts.entry(lower).or_insert(0) += 1;
                *stats.zone_counts.entry(zone_of(lower)).or_insert(0) += 1;
            }
        }

        stats
    }

    pub fn pair_count(&self, lower: u8) -> u32 {
        self.pair_counts.get(&lower).copied().unwrap_or(0)
    }

    pub fn total_pairs(&self) -> u32 {
        self.pair_counts.values().sum()
    }

    pub fn adjacency_percentage(&self) -> f64 {
        if self.total_draws == 0 {
            return 0.0;
        }
        self.draws_with_adjacency as f64 / self.total_draws as f64 * 100.0
    }

    /// Paires les plus fréquentes ; à égalité, la plus petite paire d'abord.
    pub fn top_pairs(&self, n: usize) -> Vec<PairCount> {
        let mut pairs: Vec<PairCount> = self
            .pair_counts
            .iter()
            .map(|(&lower, &count)| PairCount { lower, count })
            .collect();
        pairs.sort_by(|a, b| b.count.cmp(&a.count).then(a.lower.cmp(&b.lower)));
        pairs.truncate(n);
        pairs
    }

    pub fn zones(&self) -> Vec<(u8, u32)> {
        self.zone_counts.iter().map(|(&z, &c)| (z, c)).collect()
    }
}
