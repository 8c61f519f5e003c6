use anyhow::{bail, Result};

/// Plus grand numéro tirable (les boules vont de 1 à 49).
pub const POOL_SIZE: u8 = 49;

/// Nombre de boules principales par tirage.
pub const PICK_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub date: String,
    pub numbers: [u8; PICK_COUNT],
    pub bonus: u8,
}

impl Draw {
    /// Les numéros sont triés par ordre croissant à la construction.
    pub fn new(date: impl Into<String>, mut numbers: [u8; PICK_COUNT], bonus: u8) -> Self {
        numbers.sort_unstable();
        Self {
            date: date.into(),
            numbers,
            bonus,
        }
    }
}

/// Grille générée, jamais sortie dans l'historique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    pub numbers: [u8; PICK_COUNT],
}

impl Grid {
    pub fn new(mut numbers: [u8; PICK_COUNT]) -> Self {
        numbers.sort_unstable();
        Self { numbers }
    }
}

pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Numéro {} hors limites (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Historique synthétique pour les tests : chaque tirage est une suite de 5
/// numéros consécutifs, décalée de 5 à chaque pas (cycle de 9 tirages).
#[cfg(test)]
pub(crate) fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 9) as u8 * 5;
            Draw::new(
                format!("2024-01-{:02}", (i % 28) + 1),
                [base + 1, base + 2, base + 3, base + 4, base + 5],
                (i % 10) as u8 + 1,
            )
        })
        .collect()
}
