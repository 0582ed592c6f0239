use serde::Serialize;

/// Catégorie d'un résultat : BIG pour un chiffre ≥ 5, SMALL sinon.
/// La même règle sert à étiqueter l'historique et à noter les manches en direct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Big,
    Small,
}

impl Category {
    pub fn from_digit(digit: u8) -> Self {
        if digit >= 5 {
            Category::Big
        } else {
            Category::Small
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Big => write!(f, "BIG"),
            Category::Small => write!(f, "SMALL"),
        }
    }
}

/// Une manche historique normalisée : le chiffre tiré et sa catégorie
/// telle qu'annoncée par la source (qui peut différer de la règle chiffre→catégorie).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub digit: u8,
    pub category: Category,
}

impl Round {
    /// Manche dont la catégorie est dérivée du chiffre lui-même.
    pub fn from_digit(digit: u8) -> Self {
        Round {
            digit,
            category: Category::from_digit(digit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Win,
    Loss,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Win => write!(f, "WIN"),
            Verdict::Loss => write!(f, "LOSS"),
        }
    }
}

/// Compteurs agrégés d'une session. Jamais décrémentés ; remis à zéro
/// uniquement par un reset explicite.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub wins: u32,
    pub losses: u32,
    /// Longueur de la série en cours (même verdict consécutif).
    pub streak: u32,
    pub last_verdict: Option<Verdict>,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
}

impl Stats {
    /// Note une manche et met à jour les séries. Une série de victoires
    /// ne touche jamais au maximum des défaites, et réciproquement.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Win => self.wins += 1,
            Verdict::Loss => self.losses += 1,
        }

        if self.last_verdict == Some(verdict) {
            self.streak += 1;
        } else {
            self.streak = 1;
            self.last_verdict = Some(verdict);
        }

        match verdict {
            Verdict::Win => self.max_win_streak = self.max_win_streak.max(self.streak),
            Verdict::Loss => self.max_loss_streak = self.max_loss_streak.max(self.streak),
        }
    }

    pub fn scored_rounds(&self) -> u32 {
        self.wins + self.losses
    }

    /// Taux de réussite en pourcentage ; 0 tant qu'aucune manche n'est notée.
    pub fn win_rate(&self) -> f64 {
        let total = self.scored_rounds();
        if total == 0 {
            0.0
        } else {
            self.wins as f64 / total as f64 * 100.0
        }
    }
}

/// Une ligne d'historique de session : une manche soumise, avec ou sans prédiction.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Numéro de la manche depuis l'initialisation (1 = première soumission).
    pub round: u32,
    pub digit: u8,
    pub actual: Category,
    pub prediction: Option<Category>,
    pub verdict: Option<Verdict>,
    /// Longueur de la série au moment de la manche ; 0 si la manche n'a pas été notée.
    pub streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_digit_total() {
        for d in 0..=4u8 {
            assert_eq!(Category::from_digit(d), Category::Small);
        }
        for d in 5..=9u8 {
            assert_eq!(Category::from_digit(d), Category::Big);
        }
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Big.to_string(), "BIG");
        assert_eq!(Category::Small.to_string(), "SMALL");
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Win.to_string(), "WIN");
        assert_eq!(Verdict::Loss.to_string(), "LOSS");
    }

    #[test]
    fn test_round_from_digit() {
        assert_eq!(Round::from_digit(7).category, Category::Big);
        assert_eq!(Round::from_digit(0).category, Category::Small);
    }

    #[test]
    fn test_win_rate_empty() {
        assert!((Stats::default().win_rate() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_win_rate_formula() {
        let mut stats = Stats::default();
        stats.record(Verdict::Win);
        stats.record(Verdict::Win);
        stats.record(Verdict::Loss);
        stats.record(Verdict::Win);
        assert_eq!(stats.wins, 3);
        assert_eq!(stats.losses, 1);
        assert!((stats.win_rate() - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_streak_extends_on_same_verdict() {
        let mut stats = Stats::default();
        stats.record(Verdict::Win);
        stats.record(Verdict::Win);
        stats.record(Verdict::Win);
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.max_win_streak, 3);
        assert_eq!(stats.max_loss_streak, 0);
    }

    #[test]
    fn test_streak_resets_on_flip() {
        let mut stats = Stats::default();
        stats.record(Verdict::Win);
        stats.record(Verdict::Win);
        stats.record(Verdict::Loss);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.last_verdict, Some(Verdict::Loss));
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.max_loss_streak, 1);
    }

    #[test]
    fn test_max_streaks_monotone() {
        let mut stats = Stats::default();
        let sequence = [
            Verdict::Win,
            Verdict::Win,
            Verdict::Loss,
            Verdict::Win,
            Verdict::Loss,
            Verdict::Loss,
            Verdict::Loss,
            Verdict::Win,
        ];
        let mut prev_max_win = 0;
        let mut prev_max_loss = 0;
        for v in sequence {
            stats.record(v);
            assert!(stats.max_win_streak >= prev_max_win);
            assert!(stats.max_loss_streak >= prev_max_loss);
            match stats.last_verdict {
                Some(Verdict::Win) => assert!(stats.max_win_streak >= stats.streak),
                Some(Verdict::Loss) => assert!(stats.max_loss_streak >= stats.streak),
                None => unreachable!(),
            }
            prev_max_win = stats.max_win_streak;
            prev_max_loss = stats.max_loss_streak;
        }
        assert_eq!(stats.max_loss_streak, 3);
    }
}
