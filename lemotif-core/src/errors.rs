use thiserror::Error;

/// Erreurs du moteur. Les erreurs d'entraînement et de parsing laissent
/// l'état antérieur intact ; un entraînement raté n'est jamais appliqué
/// partiellement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("données d'entraînement vides : aucune ligne exploitable")]
    EmptyInput,

    #[error("historique insuffisant : {got} manche(s), minimum {min} pour former une fenêtre")]
    TrainingData { got: usize, min: usize },

    #[error("colonne requise absente du jeu de données : '{name}'")]
    MissingColumn { name: String },

    #[error("graine invalide : {reason}")]
    InvalidSeed { reason: String },

    #[error("chiffre hors plage (0-9) : {0}")]
    InvalidDigit(u8),

    #[error("session non initialisée : saisir d'abord les 6 premiers chiffres")]
    NotSeeded,
}
