//! Suivi de session en direct.
//!
//! Machine à deux états : en attente de graine (moins de 6 chiffres saisis)
//! puis suivi actif. À chaque soumission, la fenêtre est relevée *avant*
//! l'ajout du nouveau chiffre, le prédicteur est interrogé, et la manche est
//! notée si une prédiction existait. L'état courant (prédiction, stats,
//! historique) se lit par accesseurs purs : aucune recomputation cachée.

use crate::errors::TrackerError;
use crate::models::{Category, HistoryEntry, Stats, Verdict};
use crate::trainer::{PatternMap, WINDOW_LEN};

/// Choix de comportement de la session, fixés à sa création.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Consigner aussi dans l'historique les manches sans prédiction.
    pub record_unmatched: bool,
    /// Un reset jette aussi la table de motifs (ré-entraînement requis).
    pub reset_discards_patterns: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            record_unmatched: true,
            reset_discards_patterns: false,
        }
    }
}

/// État complet d'une session : table de motifs, séquence saisie, stats et
/// historique. Tout l'état vit ici ; rien n'est global au processus.
#[derive(Debug, Clone)]
pub struct Session {
    patterns: PatternMap,
    sequence: Vec<u8>,
    stats: Stats,
    history: Vec<HistoryEntry>,
    rounds_played: u32,
    config: SessionConfig,
}

impl Session {
    pub fn new(patterns: PatternMap, config: SessionConfig) -> Self {
        Session {
            patterns,
            sequence: Vec::new(),
            stats: Stats::default(),
            history: Vec::new(),
            rounds_played: 0,
            config,
        }
    }

    /// Remplace la table de motifs (après un ré-entraînement réussi).
    pub fn set_patterns(&mut self, patterns: PatternMap) {
        self.patterns = patterns;
    }

    pub fn patterns(&self) -> &PatternMap {
        &self.patterns
    }

    pub fn is_seeded(&self) -> bool {
        self.sequence.len() >= WINDOW_LEN
    }

    /// Initialise la séquence avec exactement 6 chiffres.
    /// Toute autre saisie est rejetée sans changer l'état ; une session
    /// déjà initialisée exige un reset avant une nouvelle graine.
    pub fn seed(&mut self, input: &str) -> Result<(), TrackerError> {
        if self.is_seeded() {
            return Err(TrackerError::InvalidSeed {
                reason: "session déjà initialisée, faire un reset d'abord".to_string(),
            });
        }

        let trimmed = input.trim();
        if trimmed.len() != WINDOW_LEN || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackerError::InvalidSeed {
                reason: format!("attendu exactement {} chiffres", WINDOW_LEN),
            });
        }

        self.sequence = trimmed.bytes().map(|b| b - b'0').collect();
        Ok(())
    }

    /// Les 6 derniers chiffres saisis, concaténés en clé de fenêtre.
    pub fn current_window(&self) -> Option<String> {
        if !self.is_seeded() {
            return None;
        }
        let tail = &self.sequence[self.sequence.len() - WINDOW_LEN..];
        Some(tail.iter().map(|&d| char::from(b'0' + d)).collect())
    }

    pub fn current_prediction(&self) -> Option<Category> {
        self.current_window()
            .and_then(|w| self.patterns.predict(&w))
    }

    /// Soumet le résultat d'une nouvelle manche. La prédiction évaluée est
    /// celle qui existait avant l'arrivée du chiffre ; le chiffre est ensuite
    /// ajouté à la séquence quoi qu'il arrive.
    pub fn submit(&mut self, digit: u8) -> Result<HistoryEntry, TrackerError> {
        if digit > 9 {
            return Err(TrackerError::InvalidDigit(digit));
        }
        if !self.is_seeded() {
            return Err(TrackerError::NotSeeded);
        }

        let prediction = self.current_prediction();
        let actual = Category::from_digit(digit);
        let verdict = prediction.map(|p| {
            if p == actual {
                Verdict::Win
            } else {
                Verdict::Loss
            }
        });

        if let Some(v) = verdict {
            self.stats.record(v);
        }

        self.rounds_played += 1;
        let entry = HistoryEntry {
            round: self.rounds_played,
            digit,
            actual,
            prediction,
            verdict,
            streak: if verdict.is_some() { self.stats.streak } else { 0 },
        };

        if verdict.is_some() || self.config.record_unmatched {
            self.history.push(entry.clone());
        }

        self.sequence.push(digit);
        Ok(entry)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Historique en ordre de soumission ; l'affichage l'inverse.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Remise à zéro de tout l'état de session. La table de motifs survit,
    /// sauf si la configuration demande un reset complet.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.stats = Stats::default();
        self.history.clear();
        self.rounds_played = 0;
        if self.config.reset_discards_patterns {
            self.patterns = PatternMap::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> PatternMap {
        PatternMap::from_entries([
            ("821557".to_string(), Category::Small),
            ("215570".to_string(), Category::Big),
        ])
    }

    fn seeded_session() -> Session {
        let mut session = Session::new(small_map(), SessionConfig::default());
        session.seed("821557").unwrap();
        session
    }

    #[test]
    fn test_seed_rejects_wrong_length() {
        let mut session = Session::new(small_map(), SessionConfig::default());
        assert!(matches!(
            session.seed("82155"),
            Err(TrackerError::InvalidSeed { .. })
        ));
        assert!(matches!(
            session.seed("8215577"),
            Err(TrackerError::InvalidSeed { .. })
        ));
        assert!(!session.is_seeded());
    }

    #[test]
    fn test_seed_rejects_non_digits() {
        let mut session = Session::new(small_map(), SessionConfig::default());
        assert!(matches!(
            session.seed("8215a7"),
            Err(TrackerError::InvalidSeed { .. })
        ));
        assert!(!session.is_seeded());
    }

    #[test]
    fn test_seed_rejects_reseed() {
        let mut session = seeded_session();
        assert!(matches!(
            session.seed("123456"),
            Err(TrackerError::InvalidSeed { .. })
        ));
        assert_eq!(session.sequence(), &[8, 2, 1, 5, 5, 7]);
    }

    #[test]
    fn test_seed_trims_whitespace() {
        let mut session = Session::new(small_map(), SessionConfig::default());
        session.seed(" 821557\n").unwrap();
        assert!(session.is_seeded());
    }

    #[test]
    fn test_submit_before_seed() {
        let mut session = Session::new(small_map(), SessionConfig::default());
        assert!(matches!(session.submit(3), Err(TrackerError::NotSeeded)));
    }

    #[test]
    fn test_submit_rejects_out_of_range() {
        let mut session = seeded_session();
        assert!(matches!(
            session.submit(12),
            Err(TrackerError::InvalidDigit(12))
        ));
        assert_eq!(session.sequence().len(), 6);
    }

    #[test]
    fn test_submit_scored_win() {
        // Graine 821557, motif 821557 → SMALL ; le 0 soumis est SMALL
        let mut session = seeded_session();
        let entry = session.submit(0).unwrap();
        assert_eq!(entry.prediction, Some(Category::Small));
        assert_eq!(entry.actual, Category::Small);
        assert_eq!(entry.verdict, Some(Verdict::Win));
        assert_eq!(session.stats().wins, 1);
        assert_eq!(session.stats().streak, 1);
        assert_eq!(session.stats().max_win_streak, 1);
        assert_eq!(session.sequence(), &[8, 2, 1, 5, 5, 7, 0]);
    }

    #[test]
    fn test_submit_scored_loss() {
        let mut session = seeded_session();
        let entry = session.submit(9).unwrap();
        assert_eq!(entry.verdict, Some(Verdict::Loss));
        assert_eq!(session.stats().losses, 1);
        assert_eq!(session.stats().max_loss_streak, 1);
    }

    #[test]
    fn test_window_taken_before_append() {
        // Après 821557 + 0, la fenêtre devient 215570 → BIG attendu
        let mut session = seeded_session();
        session.submit(0).unwrap();
        assert_eq!(session.current_window().as_deref(), Some("215570"));
        assert_eq!(session.current_prediction(), Some(Category::Big));
    }

    #[test]
    fn test_unmatched_round_no_stats_change() {
        let mut session = Session::new(small_map(), SessionConfig::default());
        session.seed("999999").unwrap();
        let entry = session.submit(4).unwrap();
        assert_eq!(entry.prediction, None);
        assert_eq!(entry.verdict, None);
        assert_eq!(session.stats().scored_rounds(), 0);
        assert_eq!(session.sequence().len(), 7);
        // Politique par défaut : la manche figure quand même dans l'historique
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].streak, 0);
    }

    #[test]
    fn test_unmatched_round_skipped_when_configured() {
        let config = SessionConfig {
            record_unmatched: false,
            ..SessionConfig::default()
        };
        let mut session = Session::new(small_map(), config);
        session.seed("999999").unwrap();
        session.submit(4).unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.sequence().len(), 7);
    }

    #[test]
    fn test_round_numbers_count_all_submissions() {
        let config = SessionConfig {
            record_unmatched: false,
            ..SessionConfig::default()
        };
        let mut session = Session::new(small_map(), config);
        session.seed("999999").unwrap();
        session.submit(8).unwrap(); // sans prédiction, non consignée
        let entry = session.submit(0).unwrap();
        assert_eq!(entry.round, 2);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_streak_across_rounds() {
        // 821557 → SMALL (0 gagne), puis 215570 → BIG (9 gagne) : série de 2
        let mut session = seeded_session();
        session.submit(0).unwrap();
        let entry = session.submit(9).unwrap();
        assert_eq!(entry.verdict, Some(Verdict::Win));
        assert_eq!(entry.streak, 2);
        assert_eq!(session.stats().max_win_streak, 2);
    }

    #[test]
    fn test_reset_keeps_patterns_by_default() {
        let mut session = seeded_session();
        session.submit(0).unwrap();
        session.reset();
        assert!(!session.is_seeded());
        assert_eq!(session.stats().scored_rounds(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.patterns().len(), 2);
        // La graine redevient possible après reset
        session.seed("821557").unwrap();
    }

    #[test]
    fn test_full_reset_discards_patterns() {
        let config = SessionConfig {
            reset_discards_patterns: true,
            ..SessionConfig::default()
        };
        let mut session = Session::new(small_map(), config);
        session.seed("821557").unwrap();
        session.reset();
        assert!(session.patterns().is_empty());
    }
}
