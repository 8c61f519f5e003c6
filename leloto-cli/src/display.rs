use std::path::Path;

use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use leloto_core::config::GeneratorConfig;
use leloto_core::import::RejectedRow;
use leloto_core::models::Draw;
use leloto_core::report::{BatchSummary, DatasetSummary, GridReport};
use leloto_core::scores::NumberScores;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_import_summary(file: &Path, accepted: usize, rejected: &[RejectedRow]) {
    println!("Fichier chargé : {}", file.display());
    println!("  Tirages analysés : {}", accepted);
    if !rejected.is_empty() {
        println!("  Lignes rejetées  : {}", rejected.len());
        for row in rejected.iter().take(10) {
            println!("    ligne {} : {}", row.line, row.reason);
        }
        if rejected.len() > 10 {
            println!("    ... et {} autres", rejected.len() - 10);
        }
    }
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Boules", "Chance"]);

    for draw in draws.iter().rev() {
        table.add_row(vec![
            draw.date.clone(),
            join_numbers(&draw.numbers),
            format!("{:2}", draw.bonus),
        ]);
    }

    println!("{table}");
}

pub fn display_summary(summary: &DatasetSummary) {
    println!("\n🎯 Statistiques globales\n");
    println!("  Tirages analysés          : {}", summary.total_draws);
    println!("  Grilles historiques       : {}", summary.loaded_grids);
    println!(
        "  Tirages avec consécutifs  : {} sur {} ({:.1}%)",
        summary.draws_with_adjacency, summary.total_draws, summary.adjacency_percentage
    );
    println!("  Fenêtre de prédiction     : {} derniers tirages", summary.window_len);

    println!("\n── Top {} paires consécutives ──", summary.top_pairs.len());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Paire", "Occurrences"]);
    for pair in &summary.top_pairs {
        table.add_row(vec![pair.key(), format!("{} fois", pair.count)]);
    }
    println!("{table}");

    println!("\n── Consécutifs par zone ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Zone", "Occurrences"]);
    for &(zone, count) in &summary.zones {
        let start = (zone as u32 * 10).max(1);
        let end = zone as u32 * 10 + 9;
        table.add_row(vec![format!("{:2}-{:2}", start, end), count.to_string()]);
    }
    println!("{table}");
}

fn scores_title(window_len: usize) -> String {
    format!("📊 Scores pondérés (fenêtre de {} tirages)", window_len)
}

/// `window_len` : nombre de tirages effectivement pondérés, pas la taille configurée.
pub fn display_scores(scores: &NumberScores, window_len: usize, config: &GeneratorConfig) {
    println!("\n{}\n", scores_title(window_len));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rang", "Numéro", "Score", "Palier"]);

    for (rank, n) in scores.ranked().into_iter().enumerate() {
        let (tier, color) = if rank < config.top_tier {
            ("HAUT", Color::Green)
        } else if rank < config.top_tier + config.mid_tier {
            ("MILIEU", Color::White)
        } else {
            ("BAS", Color::Red)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{:2}", n)),
            Cell::new(format!("{:.3}", scores.get(n))),
            Cell::new(tier).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_grids(title: &str, reports: &[GridReport]) {
    println!("\n🎲 {title}\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["Grille".to_string()];
    header.extend((1..=5).map(|i| format!("N{i}")));
    header.push("Consécutifs".to_string());
    table.set_header(header);

    for (i, report) in reports.iter().enumerate() {
        let label = if report.has_adjacency() {
            format!("{} 🔥", i + 1)
        } else {
            format!("{}", i + 1)
        };
        let mut row = vec![Cell::new(label)];
        for &n in &report.numbers {
            let cell = Cell::new(format!("{:2}", n));
            row.push(if report.is_highlighted(n) { cell.fg(Color::Green) } else { cell });
        }
        let pairs = if report.has_adjacency() {
            Cell::new(format!("{} paire(s)", report.pairs.len())).fg(Color::Green)
        } else {
            Cell::new("aucune").fg(Color::Yellow)
        };
        row.push(pairs);
        table.add_row(row);
    }
    println!("{table}");
}

pub fn display_batch_summary(batch: &BatchSummary) {
    if batch.partial {
        println!(
            "\n⚠️  Attention : seulement {} grilles uniques générées sur {} demandées",
            batch.grids, batch.target
        );
    }
    println!("\n📊 Statistiques des grilles générées :");
    println!(
        "  • {} grilles sur {} contiennent des consécutifs ({:.1}%)",
        batch.with_adjacency, batch.grids, batch.adjacency_percentage
    );
    println!("  • Toutes les grilles sont uniques et inédites dans l'historique");
    println!("  • Prédictions basées sur les {} derniers tirages", batch.window_len);
}
