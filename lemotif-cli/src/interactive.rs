use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use lemotif_core::backtest::{run_backtest, DEFAULT_LIMIT};
use lemotif_core::models::Verdict;
use lemotif_core::session::{Session, SessionConfig};
use lemotif_core::trainer::PatternMap;

use crate::{dataset, display, train_from_file};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Load,
    Seed,
    Play,
    Stats,
    History,
    Backtest,
    Reset,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "charger" | "load" => Some(InteractiveCommand::Load),
        "2" | "graine" | "seed" => Some(InteractiveCommand::Seed),
        "3" | "jouer" | "play" | "j" => Some(InteractiveCommand::Play),
        "4" | "stats" | "statistiques" => Some(InteractiveCommand::Stats),
        "5" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "6" | "backtest" | "bt" => Some(InteractiveCommand::Backtest),
        "7" | "reset" | "raz" => Some(InteractiveCommand::Reset),
        "8" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. charger    Charger et entraîner un historique");
    println!("  2. graine     Saisir les 6 premiers chiffres");
    println!("  3. jouer      Saisir les chiffres un par un");
    println!("  4. stats      Statistiques de session");
    println!("  5. historique Dernières manches");
    println!("  6. backtest   Rejouer un jeu de données CSV");
    println!("  7. reset      Réinitialiser la session");
    println!("  8. quitter    Quitter");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_with_default(msg: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}] : ", msg, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

pub fn run_interactive(file: Option<&Path>, config: SessionConfig) -> Result<()> {
    println!("Bienvenue dans le mode interactif de lemotif !");

    let mut session = Session::new(PatternMap::default(), config);

    if let Some(path) = file {
        if let Err(e) = load_patterns(&mut session, path) {
            println!("Erreur: {e:#}");
        }
    }

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Load) => {
                if let Err(e) = cmd_load(&mut session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Seed) => {
                if let Err(e) = cmd_seed(&mut session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Play) => {
                if let Err(e) = cmd_play(&mut session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Stats) => display::display_stats(session.stats()),
            Some(InteractiveCommand::History) => display::display_history(session.history(), 10),
            Some(InteractiveCommand::Backtest) => {
                if let Err(e) = cmd_backtest_session(&session) {
                    println!("Erreur: {e:#}");
                }
            }
            Some(InteractiveCommand::Reset) => {
                session.reset();
                if session.config().reset_discards_patterns {
                    println!("Session et table de motifs réinitialisées.");
                } else {
                    println!("Session réinitialisée (table de motifs conservée).");
                }
            }
            None => {
                println!(
                    "Commande inconnue : '{}'. Tapez un numéro (1-8) ou un nom de commande.",
                    input
                );
            }
        }
    }

    Ok(())
}

/// Un échec de chargement laisse la table précédente intacte :
/// la session n'est remplacée qu'après un entraînement complet.
fn load_patterns(session: &mut Session, path: &Path) -> Result<()> {
    let (outcome, patterns) = train_from_file(path)?;
    display::display_train_summary(&outcome, &patterns);
    session.set_patterns(patterns);
    Ok(())
}

fn cmd_load(session: &mut Session) -> Result<()> {
    let path = prompt("Fichier d'historique : ")?;
    load_patterns(session, Path::new(&path))
}

fn cmd_seed(session: &mut Session) -> Result<()> {
    if session.patterns().is_empty() {
        println!("(Aucun motif chargé — les prédictions resteront vides jusqu'au chargement.)");
    }
    let input = prompt("6 premiers chiffres (ex : 821557) : ")?;
    session.seed(&input)?;

    let window = session.current_window().unwrap_or_default();
    println!("Session initialisée.");
    display::display_prediction(&window, session.current_prediction());
    Ok(())
}

fn cmd_play(session: &mut Session) -> Result<()> {
    if !session.is_seeded() {
        println!("Saisir d'abord la graine (commande graine).");
        return Ok(());
    }

    println!("Saisie chiffre par chiffre (ligne vide pour revenir au menu).");
    loop {
        if let Some(window) = session.current_window() {
            display::display_prediction(&window, session.current_prediction());
        }

        let input = prompt("chiffre [0-9] > ")?;
        if input.is_empty() {
            break;
        }

        let digit: u8 = match input.parse() {
            Ok(d) if d <= 9 => d,
            _ => {
                println!("Entrez un chiffre entre 0 et 9.");
                continue;
            }
        };

        let entry = session.submit(digit)?;
        match entry.verdict {
            Some(Verdict::Win) => println!(
                "✔ GAGNÉ — {} était bien {} (série : {})",
                digit, entry.actual, entry.streak
            ),
            Some(Verdict::Loss) => println!(
                "✘ PERDU — {} était {} (série : {})",
                digit, entry.actual, entry.streak
            ),
            None => println!("Pas de prédiction pour cette manche, rien à noter."),
        }
    }

    display::display_stats(session.stats());
    Ok(())
}

fn cmd_backtest_session(session: &Session) -> Result<()> {
    if session.patterns().is_empty() {
        println!("Charger d'abord un historique (commande charger).");
        return Ok(());
    }

    let path = prompt("Jeu de données CSV (colonne number) : ")?;
    let limit_str = prompt_with_default("Limite d'enregistrements", &DEFAULT_LIMIT.to_string())?;
    let limit: usize = limit_str.parse().context("Limite invalide")?;

    let digits = dataset::read_eval_csv(Path::new(&path))?;
    let report = run_backtest(session.patterns(), &digits, limit);
    display::display_backtest(&report, 20);

    if report.is_empty() {
        println!(
            "Avertissement : aucune fenêtre du jeu de données ne correspond à un motif entraîné."
        );
    }

    let out = prompt("Exporter le rapport (chemin, vide = non) : ")?;
    if !out.is_empty() {
        dataset::write_report_csv(Path::new(&out), &report)?;
        println!("Rapport exporté dans : {}", out);
    }

    Ok(())
}
