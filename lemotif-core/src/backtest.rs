//! Rejeu hors ligne d'un jeu de données indépendant.
//!
//! Même logique de notation que le suivi de session, mais sur un état local :
//! fenêtre glissante et compteurs de séries propres au rejeu, jamais l'état
//! de la session en direct. Rejouer deux fois le même jeu de données avec la
//! même table donne un rapport identique.

use serde::Serialize;

use crate::models::{Category, Stats, Verdict};
use crate::trainer::{PatternMap, WINDOW_LEN};

/// Plafond par défaut : seuls les premiers enregistrements sont consommés.
pub const DEFAULT_LIMIT: usize = 500;

/// Une ligne du rapport : une manche du rejeu où une prédiction existait.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestRow {
    #[serde(rename = "manche")]
    pub position: usize,
    #[serde(rename = "motif")]
    pub window: String,
    #[serde(rename = "prediction")]
    pub prediction: Category,
    #[serde(rename = "reel")]
    pub actual: Category,
    #[serde(rename = "verdict")]
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestReport {
    pub wins: u32,
    pub losses: u32,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    /// Nombre de chiffres effectivement consommés (après plafonnement).
    pub scanned: usize,
    pub rows: Vec<BacktestRow>,
}

impl BacktestReport {
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            self.wins as f64 / total as f64 * 100.0
        }
    }

    /// Aucune fenêtre du jeu de données n'a correspondu à un motif entraîné.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn run_backtest(patterns: &PatternMap, digits: &[u8], limit: usize) -> BacktestReport {
    let digits = &digits[..digits.len().min(limit)];

    let mut local = Stats::default();
    let mut window: Vec<u8> = Vec::with_capacity(digits.len());
    let mut rows = Vec::new();

    for (i, &digit) in digits.iter().enumerate() {
        if window.len() >= WINDOW_LEN {
            let key: String = window[window.len() - WINDOW_LEN..]
                .iter()
                .map(|&d| char::from(b'0' + d))
                .collect();

            if let Some(prediction) = patterns.predict(&key) {
                let actual = Category::from_digit(digit);
                let verdict = if prediction == actual {
                    Verdict::Win
                } else {
                    Verdict::Loss
                };
                local.record(verdict);
                rows.push(BacktestRow {
                    position: i + 1,
                    window: key,
                    prediction,
                    actual,
                    verdict,
                });
            }
        }
        window.push(digit);
    }

    BacktestReport {
        wins: local.wins,
        losses: local.losses,
        max_win_streak: local.max_win_streak,
        max_loss_streak: local.max_loss_streak,
        scanned: digits.len(),
        rows,
    }
}
