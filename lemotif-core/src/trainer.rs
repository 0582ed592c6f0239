//! Entraînement de la table de motifs par balayage à fenêtre glissante.
//!
//! Pour chaque position i, la fenêtre est formée des 6 chiffres consécutifs
//! `digits[i..i+6]` et on note la catégorie de la manche i+6. Seules les
//! fenêtres dont toutes les occurrences historiques sont suivies de la même
//! catégorie sont conservées : un seul désaccord exclut la fenêtre entière.
//! Pas de vote majoritaire, pas de seuil de confiance — les faux positifs
//! sont éliminés au prix de la couverture.

use std::collections::{HashMap, HashSet};

use crate::errors::TrackerError;
use crate::models::{Category, Round};

/// Largeur de la fenêtre d'appariement, en chiffres.
pub const WINDOW_LEN: usize = 6;

/// Table fenêtre → catégorie, immuable après entraînement.
/// Chaque entrée est déterministe : toute occurrence historique de la
/// fenêtre a été suivie de cette catégorie.
#[derive(Debug, Clone, Default)]
pub struct PatternMap {
    entries: HashMap<String, Category>,
}

impl PatternMap {
    /// Construit une table depuis des entrées connues (fixtures, affichage).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Category)>,
    {
        PatternMap {
            entries: entries.into_iter().collect(),
        }
    }

    /// Le prédicteur : recherche exacte, sans effet de bord.
    /// `None` = aucun motif sûr pour cette fenêtre, jamais rabattu sur un côté.
    pub fn predict(&self, window: &str) -> Option<Category> {
        self.entries.get(window).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (nombre de motifs BIG, nombre de motifs SMALL)
    pub fn count_by_category(&self) -> (usize, usize) {
        let big = self
            .entries
            .values()
            .filter(|&&c| c == Category::Big)
            .count();
        (big, self.entries.len() - big)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.entries.iter().map(|(w, &c)| (w.as_str(), c))
    }
}

/// Concatène une tranche de manches en clé de fenêtre ("431321").
pub fn window_key(rounds: &[Round]) -> String {
    rounds
        .iter()
        .map(|r| char::from(b'0' + r.digit))
        .collect()
}

pub fn train(rounds: &[Round]) -> Result<PatternMap, TrackerError> {
    if rounds.len() < WINDOW_LEN + 1 {
        return Err(TrackerError::TrainingData {
            got: rounds.len(),
            min: WINDOW_LEN + 1,
        });
    }

    let mut observed: HashMap<String, Category> = HashMap::new();
    let mut conflicting: HashSet<String> = HashSet::new();

    for i in 0..=rounds.len() - WINDOW_LEN - 1 {
        let window = window_key(&rounds[i..i + WINDOW_LEN]);
        let follower = rounds[i + WINDOW_LEN].category;

        match observed.get(&window) {
            Some(&seen) if seen != follower => {
                conflicting.insert(window);
            }
            Some(_) => {}
            None => {
                observed.insert(window, follower);
            }
        }
    }

    for window in &conflicting {
        observed.remove(window);
    }

    Ok(PatternMap { entries: observed })
}
