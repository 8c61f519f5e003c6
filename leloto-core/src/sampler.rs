use anyhow::{bail, Result};
use rand::{Rng, RngExt};

use crate::adjacency::AdjacencyStats;
use crate::config::{GeneratorConfig, RankRange};
use crate::dataset::Dataset;
use crate::history::CombinationSet;
use crate::models::{Grid, PICK_COUNT, POOL_SIZE};
use crate::scores::NumberScores;

/// Stratégie produisant une combinaison candidate de 5 numéros distincts.
pub trait GridPolicy {
    fn name(&self) -> &str;
    fn propose<R: Rng>(&self, rng: &mut R) -> [u8; PICK_COUNT];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Standard,
    Consecutive,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Standard => write!(f, "Prédictions standard"),
            GenerationMode::Consecutive => write!(f, "Prédictions mode consécutifs"),
        }
    }
}

/// Tirage uniforme sans remise.
fn pick_distinct<R: Rng>(pool: &[u8], count: usize, rng: &mut R) -> Vec<u8> {
    let mut available = pool.to_vec();
    let mut selected = Vec::with_capacity(count);
    for _ in 0..count.min(available.len()) {
        let idx = rng.random_range(0..available.len());
        selected.push(available.swap_remove(idx));
    }
    selected
}

fn into_sorted_grid(numbers: impl IntoIterator<Item = u8>) -> [u8; PICK_COUNT] {
    let mut grid = [0u8; PICK_COUNT];
    for (slot, n) in grid.iter_mut().zip(numbers) {
        *slot = n;
    }
    grid.sort_unstable();
    grid
}

/// Politique générale : 2 numéros du palier haut, 2 du palier médian, 1 du palier bas.
pub struct StandardPolicy {
    tiers: [(Vec<u8>, usize); 3],
}

impl StandardPolicy {
    pub fn new(scores: &NumberScores, config: &GeneratorConfig) -> Self {
        let ranked = scores.ranked();
        let top_end = config.top_tier.min(ranked.len());
        let mid_end = (config.top_tier + config.mid_tier).min(ranked.len());
        Self {
            tiers: [
                (ranked[..top_end].to_vec(), config.top_picks),
                (ranked[top_end..mid_end].to_vec(), config.mid_picks),
                (ranked[mid_end..].to_vec(), config.low_picks),
            ],
        }
    }

    pub fn tiers(&self) -> [&[u8]; 3] {
        [&self.tiers[0].0, &self.tiers[1].0, &self.tiers[2].0]
    }
}

impl GridPolicy for StandardPolicy {
    fn name(&self) -> &str {
        "standard"
    }

    fn propose<R: Rng>(&self, rng: &mut R) -> [u8; PICK_COUNT] {
        let mut picks = Vec::with_capacity(PICK_COUNT);
        for (tier, count) in &self.tiers {
            picks.extend(pick_distinct(tier, *count, rng));
        }
        into_sorted_grid(picks)
    }
}

/// Politique consécutive : une paire (i, i+1) verrouillée parmi les meilleures,
/// complétée par trois numéros choisis par rang de score.
pub struct ConsecutivePolicy {
    scores: NumberScores,
    pairs: Vec<(u8, f64)>,
    near: RankRange,
    far: RankRange,
}

impl ConsecutivePolicy {
    pub fn new(scores: NumberScores, adjacency: &AdjacencyStats, config: &GeneratorConfig) -> Self {
        let mut pairs: Vec<(u8, f64)> = (1..POOL_SIZE)
            .map(|i| {
                let history_bonus = adjacency.pair_count(i) as f64 * config.pair_history_bonus;
                (i, scores.get(i) + scores.get(i + 1) + history_bonus)
            })
            .collect();
        pairs.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        pairs.truncate(config.pair_candidates);

        Self {
            scores,
            pairs,
            near: config.near_range,
            far: config.far_range,
        }
    }

    /// Paires candidates (plus petit numéro, score), de la meilleure à la moins bonne.
    pub fn candidate_pairs(&self) -> &[(u8, f64)] {
        &self.pairs
    }
}

impl GridPolicy for ConsecutivePolicy {
    fn name(&self) -> &str {
        "consecutifs"
    }

    fn propose<R: Rng>(&self, rng: &mut R) -> [u8; PICK_COUNT] {
        let (lower, _) = self.pairs[rng.random_range(0..self.pairs.len())];
        let upper = lower + 1;

        let remaining = self.scores.ranked_excluding(&[lower, upper]);
        let near = rng.random_range(self.near.from..=self.near.to);
        let far = rng.random_range(self.far.from..=self.far.to);

        into_sorted_grid([lower, upper, remaining[0], remaining[near], remaining[far]])
    }
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub grids: Vec<Grid>,
    pub attempts: usize,
    pub target: usize,
}

impl GenerationOutcome {
    /// Vrai si le budget de tentatives a été épuisé avant d'atteindre la cible.
    pub fn is_partial(&self) -> bool {
        self.grids.len() < self.target
    }

    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.grids.len())
    }
}

/// Appelle la politique jusqu'à obtenir `target` grilles inédites et distinctes,
/// ou jusqu'à `max_attempts` appels.
pub fn generate_unique_set<P: GridPolicy, R: Rng>(
    policy: &P,
    history: &CombinationSet,
    target: usize,
    max_attempts: usize,
    rng: &mut R,
) -> GenerationOutcome {
    let mut grids = Vec::with_capacity(target.min(max_attempts));
    let mut batch = CombinationSet::default();
    let mut attempts = 0;

    while grids.len() < target && attempts < max_attempts {
        let numbers = policy.propose(rng);
        attempts += 1;

        if history.contains(&numbers) {
            continue;
        }
        if batch.insert(&numbers) {
            grids.push(Grid::new(numbers));
        }
    }

    log::debug!(
        "Politique {} : {} grilles en {} tentatives",
        policy.name(),
        grids.len(),
        attempts
    );
    if grids.len() < target {
        log::warn!(
            "Seulement {} grilles uniques générées sur {} demandées",
            grids.len(),
            target
        );
    }

    GenerationOutcome {
        grids,
        attempts,
        target,
    }
}

pub fn generate<R: Rng>(
    dataset: &Dataset,
    mode: GenerationMode,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GenerationOutcome> {
    if dataset.is_empty() {
        bail!("Aucun tirage chargé : chargez d'abord un fichier CSV");
    }
    config.validate()?;

    let scores = NumberScores::compute(dataset.last(config.window));
    let history = dataset.combinations();

    let outcome = match mode {
        GenerationMode::Standard => {
            let policy = StandardPolicy::new(&scores, config);
            generate_unique_set(&policy, history, config.target_count, config.max_attempts, rng)
        }
        GenerationMode::Consecutive => {
            let policy = ConsecutivePolicy::new(scores, dataset.adjacency(), config);
            generate_unique_set(&policy, history, config.target_count, config.max_attempts, rng)
        }
    };
    Ok(outcome)
}
