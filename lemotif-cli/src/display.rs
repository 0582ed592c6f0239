use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use lemotif_core::backtest::BacktestReport;
use lemotif_core::models::{Category, HistoryEntry, Stats, Verdict};
use lemotif_core::parser::ParseOutcome;
use lemotif_core::trainer::PatternMap;

// Couleurs du traqueur d'origine : BIG en rouge, SMALL en vert.
fn category_color(category: Category) -> Color {
    match category {
        Category::Big => Color::Red,
        Category::Small => Color::Green,
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Win => Color::Green,
        Verdict::Loss => Color::Red,
    }
}

pub fn display_train_summary(outcome: &ParseOutcome, patterns: &PatternMap) {
    let (big, small) = patterns.count_by_category();
    println!("Entraînement terminé :");
    println!("  Lignes lues          : {}", outcome.total_lines);
    println!("  Manches retenues     : {}", outcome.rounds.len());
    if outcome.skipped > 0 {
        println!("  Lignes ignorées      : {}", outcome.skipped);
    }
    println!(
        "  Motifs déterministes : {} ({} BIG, {} SMALL)",
        patterns.len(),
        big,
        small
    );
}

pub fn display_patterns(patterns: &PatternMap, limit: usize) {
    println!("\n🎯 Motifs déterministes\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Motif", "Prédiction"]);

    let mut sorted: Vec<(&str, Category)> = patterns.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    for (window, category) in sorted.iter().take(limit) {
        table.add_row(vec![
            Cell::new(window),
            Cell::new(category.to_string()).fg(category_color(*category)),
        ]);
    }
    println!("{table}");

    if patterns.len() > limit {
        println!("({} motifs supplémentaires non affichés)", patterns.len() - limit);
    }
}

pub fn display_prediction(window: &str, prediction: Option<Category>) {
    match prediction {
        Some(category) => println!("Motif {} reconnu → prédiction : {}", window, category),
        None => println!("Motif {} inconnu → aucune prédiction (en attente d'un motif sûr)", window),
    }
}

pub fn display_stats(stats: &Stats) {
    println!("\n📊 Statistiques de session\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Victoires",
            "Défaites",
            "Taux de réussite",
            "Série max WIN",
            "Série max LOSS",
        ]);

    table.add_row(vec![
        Cell::new(stats.wins).fg(Color::Green),
        Cell::new(stats.losses).fg(Color::Red),
        Cell::new(format!("{:.1} %", stats.win_rate())),
        Cell::new(stats.max_win_streak),
        Cell::new(stats.max_loss_streak),
    ]);
    println!("{table}");
}

/// Historique affiché de la plus récente à la plus ancienne, tronqué.
pub fn display_history(history: &[HistoryEntry], limit: usize) {
    if history.is_empty() {
        println!("Aucune manche dans l'historique.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Manche", "Chiffre", "Réel", "Prédiction", "Verdict", "Série"]);

    for entry in history.iter().rev().take(limit) {
        let prediction = match entry.prediction {
            Some(c) => Cell::new(c.to_string()).fg(category_color(c)),
            None => Cell::new("—"),
        };
        let (verdict, streak) = match entry.verdict {
            Some(v) => (
                Cell::new(v.to_string()).fg(verdict_color(v)),
                Cell::new(entry.streak),
            ),
            None => (Cell::new("—"), Cell::new("—")),
        };

        table.add_row(vec![
            Cell::new(entry.round),
            Cell::new(entry.digit),
            Cell::new(entry.actual.to_string()).fg(category_color(entry.actual)),
            prediction,
            verdict,
            streak,
        ]);
    }
    println!("{table}");
}

pub fn display_backtest(report: &BacktestReport, row_limit: usize) {
    println!(
        "\n🎲 Rejeu terminé : {} enregistrement(s) consommé(s), {} manche(s) notée(s)\n",
        report.scanned,
        report.rows.len()
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Victoires",
            "Défaites",
            "Taux de réussite",
            "Série max WIN",
            "Série max LOSS",
        ]);
    table.add_row(vec![
        Cell::new(report.wins).fg(Color::Green),
        Cell::new(report.losses).fg(Color::Red),
        Cell::new(format!("{:.1} %", report.win_rate())),
        Cell::new(report.max_win_streak),
        Cell::new(report.max_loss_streak),
    ]);
    println!("{table}");

    if report.rows.is_empty() {
        return;
    }

    println!("\n── Détail des manches ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Manche", "Motif", "Prédiction", "Réel", "Verdict"]);

    for row in report.rows.iter().take(row_limit) {
        table.add_row(vec![
            Cell::new(row.position),
            Cell::new(&row.window),
            Cell::new(row.prediction.to_string()).fg(category_color(row.prediction)),
            Cell::new(row.actual.to_string()).fg(category_color(row.actual)),
            Cell::new(row.verdict.to_string()).fg(verdict_color(row.verdict)),
        ]);
    }
    println!("{table}");

    if report.rows.len() > row_limit {
        println!(
            "({} manche(s) supplémentaire(s) dans le rapport exporté)",
            report.rows.len() - row_limit
        );
    }
}
