use std::collections::HashSet;

use crate::models::Draw;

/// Forme canonique d'une combinaison : numéros triés, séparés par des virgules.
pub fn canonical_key(numbers: &[u8]) -> String {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Ensemble des combinaisons déjà rencontrées, indexé par forme canonique.
#[derive(Debug, Clone, Default)]
pub struct CombinationSet {
    keys: HashSet<String>,
}

impl CombinationSet {
    pub fn build(draws: &[Draw]) -> Self {
        let mut set = Self::default();
        for draw in draws {
            set.insert(&draw.numbers);
        }
        set
    }

    /// Retourne `false` si la combinaison était déjà présente.
    pub fn insert(&mut self, numbers: &[u8]) -> bool {
        self.keys.insert(canonical_key(numbers))
    }

    pub fn contains(&self, numbers: &[u8]) -> bool {
        self.keys.contains(&canonical_key(numbers))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_test_draws;

    fn parse_key(key: &str) -> Vec<u8> {
        key.split(',').map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_canonical_key_sorted() {
        assert_eq!(canonical_key(&[30, 4, 17, 1, 49]), "1,4,17,30,49");
    }

    #[test]
    fn test_canonical_key_idempotent() {
        let key = canonical_key(&[22, 8, 41, 3, 19]);
        assert_eq!(canonical_key(&parse_key(&key)), key);
    }

    #[test]
    fn test_contains_ignores_order() {
        let draws = vec![Draw::new("2020-01-01", [5, 12, 23, 34, 45], 1)];
        let set = CombinationSet::build(&draws);
        assert!(set.contains(&[45, 34, 23, 12, 5]));
        assert!(set.contains(&[5, 12, 23, 34, 45]));
        assert!(!set.contains(&[5, 12, 23, 34, 46]));
    }

    #[test]
    fn test_one_entry_per_distinct_draw() {
        // 9 combinations distinctes : pas de doublon sur les 9 premiers tirages
        let draws = make_test_draws(9);
        let set = CombinationSet::build(&draws);
        assert_eq!(set.len(), draws.len());
    }

    #[test]
    fn test_duplicate_draws_collapse() {
        let draws = make_test_draws(20);
        let set = CombinationSet::build(&draws);
        assert_eq!(set.len(), 9);
        assert!(set.len() < draws.len());
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = CombinationSet::default();
        assert!(set.is_empty());
        assert!(set.insert(&[1, 2, 3, 4, 5]));
        assert!(!set.insert(&[5, 4, 3, 2, 1]));
        assert_eq!(set.len(), 1);
    }
}
