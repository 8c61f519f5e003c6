use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{PICK_COUNT, POOL_SIZE};

/// Plage de rangs inclusive dans la liste des numéros restants (0 = meilleur score).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    pub from: usize,
    pub to: usize,
}

impl RankRange {
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Nombre de tirages récents pris en compte pour les scores.
    pub window: usize,
    pub target_count: usize,
    pub max_attempts: usize,
    pub top_tier: usize,
    pub mid_tier: usize,
    pub top_picks: usize,
    pub mid_picks: usize,
    pub low_picks: usize,
    /// Nombre de meilleures paires parmi lesquelles la paire verrouillée est tirée.
    pub pair_candidates: usize,
    pub pair_history_bonus: f64,
    pub near_range: RankRange,
    pub far_range: RankRange,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            window: 50,
            target_count: 7,
            max_attempts: 10_000,
            top_tier: 15,
            mid_tier: 20,
            top_picks: 2,
            mid_picks: 2,
            low_picks: 1,
            pair_candidates: 10,
            pair_history_bonus: 0.1,
            near_range: RankRange::new(1, 5),
            far_range: RankRange::new(10, 19),
        }
    }
}

impl GeneratorConfig {
    pub fn low_tier(&self) -> usize {
        (POOL_SIZE as usize).saturating_sub(self.top_tier + self.mid_tier)
    }

    pub fn validate(&self) -> Result<()> {
        let pool = POOL_SIZE as usize;

        if self.window == 0 {
            bail!("La fenêtre doit contenir au moins un tirage");
        }
        if self.target_count == 0 {
            bail!("Le nombre de grilles doit être au moins 1");
        }
        if self.top_tier + self.mid_tier > pool {
            bail!(
                "Paliers trop grands : {} + {} > {}",
                self.top_tier, self.mid_tier, pool
            );
        }
        if self.top_picks + self.mid_picks + self.low_picks != PICK_COUNT {
            bail!(
                "Les tirages par palier ({} + {} + {}) doivent totaliser {}",
                self.top_picks, self.mid_picks, self.low_picks, PICK_COUNT
            );
        }
        if self.top_picks > self.top_tier
            || self.mid_picks > self.mid_tier
            || self.low_picks > self.low_tier()
        {
            bail!("Un palier contient moins de numéros que de tirages demandés");
        }
        if self.pair_candidates == 0 || self.pair_candidates > pool - 1 {
            bail!("Nombre de paires candidates invalide : {}", self.pair_candidates);
        }
        if !self.pair_history_bonus.is_finite() || self.pair_history_bonus < 0.0 {
            bail!("Bonus historique invalide : {}", self.pair_history_bonus);
        }

        // Le rang 0 est toujours pris : les plages doivent le laisser libre et ne pas se chevaucher.
        let remaining = pool - 2;
        let (near, far) = (self.near_range, self.far_range);
        if near.from == 0 || near.from > near.to || far.from > far.to {
            bail!("Plages de rangs invalides : {:?} / {:?}", near, far);
        }
        if near.to >= far.from {
            bail!("Les plages de rangs se chevauchent : {:?} / {:?}", near, far);
        }
        if far.to >= remaining {
            bail!("Rang {} au-delà des {} numéros restants", far.to, remaining);
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: GeneratorConfig = serde_json::from_str(&json)
        .with_context(|| format!("Configuration invalide dans {:?}", path))?;
    config.validate()?;
    Ok(config)
}

pub fn save_config(config: &GeneratorConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).with_context(|| format!("Impossible d'écrire {:?}", path))?;
    log::info!("Configuration enregistrée dans {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.window, 50);
        assert_eq!(config.target_count, 7);
        assert_eq!(config.max_attempts, 10_000);
        assert_eq!(config.low_tier(), 14);
        assert!((config.pair_history_bonus - 0.1).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = GeneratorConfig {
            window: 30,
            far_range: RankRange::new(8, 15),
            ..GeneratorConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let restored: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{"window": 20}"#).unwrap();
        assert_eq!(config.window, 20);
        assert_eq!(config.top_tier, 15);
        assert_eq!(config.near_range, RankRange::new(1, 5));
    }

    #[test]
    fn test_invalid_tiers() {
        let config = GeneratorConfig { top_tier: 30, mid_tier: 20, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { low_picks: 2, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            top_tier: 25,
            mid_tier: 24,
            ..GeneratorConfig::default()
        };
        // palier bas vide alors qu'un tirage y est demandé
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_ranges() {
        let config = GeneratorConfig { near_range: RankRange::new(0, 5), ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { near_range: RankRange::new(1, 12), ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { far_range: RankRange::new(10, 47), ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { far_range: RankRange::new(10, 46), ..GeneratorConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_window_and_count() {
        let config = GeneratorConfig { window: 0, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { target_count: 0, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());

        let config = GeneratorConfig { pair_candidates: 0, ..GeneratorConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("leloto-config-{}.json", std::process::id()));
        let config = GeneratorConfig { max_attempts: 500, ..GeneratorConfig::default() };
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
