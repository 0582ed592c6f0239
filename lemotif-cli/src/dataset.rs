use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use lemotif_core::backtest::BacktestReport;
use lemotif_core::errors::TrackerError;
use lemotif_core::parser::{parse_history, ParseOutcome};

/// Colonne requise dans le jeu de données de rejeu.
pub const DIGIT_COLUMN: &str = "number";

pub fn read_training_file(path: &Path) -> Result<ParseOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let outcome = parse_history(&content)?;
    Ok(outcome)
}

/// Lit la colonne `number` d'un jeu de données CSV. Les lignes dont le champ
/// n'est pas un chiffre 0-9 sont signalées sur stderr et ignorées.
pub fn read_eval_csv(path: &Path) -> Result<Vec<u8>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;
    parse_eval_records(reader)
}

fn parse_eval_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<u8>> {
    let headers = reader
        .headers()
        .context("Impossible de lire l'en-tête du CSV")?
        .clone();

    let column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(DIGIT_COLUMN))
        .ok_or_else(|| TrackerError::MissingColumn {
            name: DIGIT_COLUMN.to_string(),
        })?;

    let mut digits = Vec::new();
    for (i, record_result) in reader.records().enumerate() {
        match record_result {
            Ok(record) => {
                let parsed = record
                    .get(column)
                    .map(str::trim)
                    .and_then(|s| s.parse::<u8>().ok());
                match parsed {
                    Some(d) if d <= 9 => digits.push(d),
                    _ => eprintln!("Ligne {} ignorée : chiffre invalide", i + 2),
                }
            }
            Err(e) => eprintln!("Erreur lecture ligne {} : {}", i + 2, e),
        }
    }

    Ok(digits)
}

pub fn write_report_csv(path: &Path, report: &BacktestReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Impossible de créer {:?}", path))?;

    for row in &report.rows {
        writer
            .serialize(row)
            .context("Échec de l'écriture du rapport")?;
    }
    writer.flush().context("Échec de l'écriture du rapport")?;
    Ok(())
}
