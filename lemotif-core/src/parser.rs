//! Normalisation des historiques bruts en une suite de manches (chiffre, catégorie).
//!
//! Deux formes de ligne sont acceptées :
//! - trois champs séparés par des tabulations : chiffre, code taille, code couleur ;
//! - un jeton compact d'au moins 3 caractères : chiffre, code taille, reste ignoré.
//!
//! Un code taille commençant par `B` (insensible à la casse) vaut BIG, tout le
//! reste vaut SMALL. Les lignes d'aucune des deux formes sont ignorées en
//! silence (comptées dans `skipped`). L'ordre des lignes est strictement
//! préservé : l'entraînement dépend de l'adjacence temporelle.

use crate::errors::TrackerError;
use crate::models::{Category, Round};

/// Résultat d'une lecture d'historique, avec les compteurs de lignes.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub rounds: Vec<Round>,
    pub total_lines: u32,
    pub skipped: u32,
}

pub fn parse_history(input: &str) -> Result<ParseOutcome, TrackerError> {
    if input.trim().is_empty() {
        return Err(TrackerError::EmptyInput);
    }

    let mut rounds = Vec::new();
    let mut total_lines = 0u32;
    let mut skipped = 0u32;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        total_lines += 1;
        match parse_line(line) {
            Some(round) => rounds.push(round),
            None => skipped += 1,
        }
    }

    if rounds.is_empty() {
        return Err(TrackerError::EmptyInput);
    }

    Ok(ParseOutcome {
        rounds,
        total_lines,
        skipped,
    })
}

fn parse_line(line: &str) -> Option<Round> {
    if line.contains('\t') {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return None;
        }
        let digit = parse_digit_field(fields[0].trim())?;
        let category = size_category(fields[1].trim().chars().next()?);
        return Some(Round { digit, category });
    }

    // Forme compacte : le 3e caractère et suivants (code couleur) sont ignorés.
    let mut chars = line.chars();
    let first = chars.next()?;
    let code = chars.next()?;
    chars.next()?;
    let digit = first.to_digit(10)? as u8;
    Some(Round {
        digit,
        category: size_category(code),
    })
}

fn parse_digit_field(field: &str) -> Option<u8> {
    let digit: u8 = field.parse().ok()?;
    (digit <= 9).then_some(digit)
}

fn size_category(code: char) -> Category {
    if code.eq_ignore_ascii_case(&'B') {
        Category::Big
    } else {
        Category::Small
    }
}
