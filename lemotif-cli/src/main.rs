mod dataset;
mod display;
mod interactive;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use lemotif_core::backtest::{run_backtest, DEFAULT_LIMIT};
use lemotif_core::parser::ParseOutcome;
use lemotif_core::session::SessionConfig;
use lemotif_core::trainer::{train, PatternMap};

#[derive(Parser)]
#[command(name = "lemotif", about = "Traqueur de motifs BIG/SMALL (fenêtres de 6 chiffres)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Entraîner la table de motifs depuis un historique brut
    Train {
        /// Chemin vers le fichier d'historique (texte)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Rejouer un jeu de données indépendant contre la table entraînée
    Backtest {
        /// Fichier d'historique pour l'entraînement
        #[arg(short, long)]
        file: PathBuf,

        /// Jeu de données CSV à rejouer (colonne requise : number)
        #[arg(short, long)]
        data: PathBuf,

        /// Nombre maximal d'enregistrements consommés
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Exporter le rapport complet au format CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mode interactif (REPL) : suivi d'une session en direct
    Interactive {
        /// Historique à charger et entraîner au démarrage
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Consigner aussi les manches sans prédiction dans l'historique
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        record_unmatched: bool,

        /// Le reset jette aussi la table de motifs
        #[arg(long)]
        reset_discards_patterns: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Train { file } => cmd_train(&file),
        Command::Backtest {
            file,
            data,
            limit,
            output,
        } => cmd_backtest(&file, &data, limit, output.as_deref()),
        Command::Interactive {
            file,
            record_unmatched,
            reset_discards_patterns,
        } => {
            let config = SessionConfig {
                record_unmatched,
                reset_discards_patterns,
            };
            interactive::run_interactive(file.as_deref(), config)
        }
    }
}

/// Lecture + parsing + entraînement d'un fichier d'historique.
pub(crate) fn train_from_file(path: &Path) -> Result<(ParseOutcome, PatternMap)> {
    let outcome = dataset::read_training_file(path)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Balayage de {} manches...", outcome.rounds.len()));

    let patterns = train(&outcome.rounds)?;
    pb.finish_and_clear();

    Ok((outcome, patterns))
}

pub(crate) fn cmd_train(file: &Path) -> Result<()> {
    let (outcome, patterns) = train_from_file(file)?;
    display::display_train_summary(&outcome, &patterns);

    if patterns.is_empty() {
        println!("\nAucun motif déterministe : chaque fenêtre observée a des suites contradictoires.");
    } else {
        display::display_patterns(&patterns, 20);
    }
    Ok(())
}

pub(crate) fn cmd_backtest(
    file: &Path,
    data: &Path,
    limit: usize,
    output: Option<&Path>,
) -> Result<()> {
    let (outcome, patterns) = train_from_file(file)?;
    display::display_train_summary(&outcome, &patterns);

    let digits = dataset::read_eval_csv(data)?;
    if digits.is_empty() {
        bail!("Aucun chiffre exploitable dans {:?}", data);
    }

    let report = run_backtest(&patterns, &digits, limit);
    display::display_backtest(&report, 20);

    if report.is_empty() {
        println!(
            "Avertissement : aucune fenêtre du jeu de données ne correspond à un motif entraîné."
        );
    }

    if let Some(out) = output {
        dataset::write_report_csv(out, &report)?;
        println!("\nRapport exporté dans : {}", out.display());
    }

    Ok(())
}
