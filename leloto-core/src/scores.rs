use crate::models::{Draw, POOL_SIZE};

/// Score pondéré par numéro sur la fenêtre récente.
///
/// Le tirage en position `i` (0 = le plus ancien) d'une fenêtre de taille `W`
/// pèse `(i + 1) / W` : rampe linéaire jusqu'à 1 pour le plus récent.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberScores {
    scores: Vec<f64>,
}

impl NumberScores {
    /// `window` doit être en ordre chronologique (le plus ancien d'abord).
    pub fn compute(window: &[Draw]) -> Self {
        let mut scores = vec![0.0f64; POOL_SIZE as usize];
        let w = window.len() as f64;

        for (index, draw) in window.iter().enumerate() {
            let weight = (index + 1) as f64 / w;
            for &n in &draw.numbers {
                let idx = (n as usize).wrapping_sub(1);
                if idx < scores.len() {
                    scores[idx] += weight;
                }
            }
        }

        Self { scores }
    }

    pub fn get(&self, n: u8) -> f64 {
        (n as usize)
            .checked_sub(1)
            .and_then(|idx| self.scores.get(idx))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .map(|(i, &s)| ((i + 1) as u8, s))
    }

    /// Numéros du meilleur score au plus faible ; à égalité, le plus petit d'abord.
    pub fn ranked(&self) -> Vec<u8> {
        self.ranked_excluding(&[])
    }

    pub fn ranked_excluding(&self, excluded: &[u8]) -> Vec<u8> {
        let mut numbers: Vec<u8> = (1..=POOL_SIZE).filter(|n| !excluded.contains(n)).collect();
        numbers.sort_by(|&a, &b| {
            self.get(b)
                .partial_cmp(&self.get(a))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        numbers
    }
}
