use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use traitforge::balancer::{BalanceAudit, BalanceReport};
use traitforge::config::Metric;
use traitforge::model::{trait_label, TraitCatalog};
use traitforge::scorer::{MatchOutcome, ScoreReport};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, cols: std::ops::RangeInclusive<usize>) {
    for i in cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Text bar for a -100..100 value, centered on the midpoint.
fn bar(value: f64) -> String {
    const HALF: usize = 10;
    let filled = ((value.abs() / 100.0) * HALF as f64).round().min(HALF as f64) as usize;
    let (left, right) = if value < 0.0 {
        (
            format!("{}{}", " ".repeat(HALF - filled), "#".repeat(filled)),
            " ".repeat(HALF),
        )
    } else {
        (
            " ".repeat(HALF),
            format!("{}{}", "#".repeat(filled), " ".repeat(HALF - filled)),
        )
    };
    format!("{}|{}", left, right)
}

pub fn scaling(report: &BalanceReport, catalog: &TraitCatalog, target: f64) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Trait").add_attribute(Attribute::Bold),
        Cell::new("Samples"),
        Cell::new("StdDev"),
        Cell::new(format!("Factor\n->{:.1}", target)).fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=3);

    for s in &report.scaling {
        let factor = match s.factor {
            Some(f) => Cell::new(format!("{:.3}", f)).fg(Color::Cyan),
            None => Cell::new("skipped").fg(Color::Yellow),
        };
        table.add_row(vec![
            Cell::new(trait_label(catalog, &s.trait_name)).add_attribute(Attribute::Bold),
            Cell::new(s.samples),
            Cell::new(format!("{:.3}", s.std_dev)),
            factor,
        ]);
    }
    println!("\n{}", table);
}

pub fn ranges(audit: &BalanceAudit, catalog: &TraitCatalog) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Trait").add_attribute(Attribute::Bold),
        Cell::new("Min"),
        Cell::new("Max"),
        Cell::new("Width").fg(Color::Cyan),
    ]);
    align_right(&mut table, 1..=3);

    for row in &audit.ranges {
        let width = if row.range.is_unrangeable() {
            Cell::new(row.width).fg(Color::Red)
        } else {
            Cell::new(row.width).fg(Color::Cyan)
        };
        table.add_row(vec![
            Cell::new(trait_label(catalog, &row.trait_name)).add_attribute(Attribute::Bold),
            Cell::new(row.range.min),
            Cell::new(row.range.max),
            width,
        ]);
    }
    println!("\n{}", table);
}

pub fn means(audit: &BalanceAudit, tolerance: f64) {
    let Some(first) = audit.questions.first() else {
        println!("No questions to audit.");
        return;
    };

    let mut table = new_table();
    let mut header = vec![Cell::new("Question").add_attribute(Attribute::Bold)];
    header.extend(first.means.keys().map(Cell::new));
    table.add_row(header);
    align_right(&mut table, 1..=first.means.len());

    for q in &audit.questions {
        let mut row = vec![Cell::new(&q.label)];
        for m in q.means.values() {
            let cell = Cell::new(format!("{:.3}", m));
            row.push(if m.abs() > tolerance {
                cell.fg(Color::Red)
            } else {
                cell
            });
        }
        table.add_row(row);
    }
    println!("\n{}", table);
}

pub fn profile(report: &ScoreReport, catalog: &TraitCatalog) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Trait").add_attribute(Attribute::Bold),
        Cell::new("Raw"),
        Cell::new("Range"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("-100 .. 100"),
    ]);
    align_right(&mut table, 1..=3);

    for (name, value) in &report.profile {
        let raw = report.raw.get(name).copied().unwrap_or(0.0);
        let range = report
            .ranges
            .get(name)
            .map(|r| format!("{} .. {}", r.min, r.max))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(trait_label(catalog, name)).add_attribute(Attribute::Bold),
            Cell::new(raw),
            Cell::new(range),
            Cell::new(format!("{:.0}", value)).fg(Color::Cyan),
            Cell::new(bar(*value)),
        ]);
    }
    println!("\n{}", table);
}

pub fn ranking(report: &ScoreReport, metric: Metric) {
    let mut table = new_table();
    let score_header = match metric {
        Metric::Euclidean => "Distance",
        Metric::Cosine => "Similarity",
    };
    table.add_row(vec![
        Cell::new("#"),
        Cell::new("Archetype").add_attribute(Attribute::Bold),
        Cell::new(score_header).fg(Color::Cyan),
    ]);
    align_right(&mut table, 2..=2);

    for (i, m) in report.ranking.iter().enumerate() {
        let name = if i == 0 {
            Cell::new(&m.name).fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            Cell::new(&m.name).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(format!("{:.3}", m.score)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn outcome(report: &ScoreReport) {
    match &report.outcome {
        MatchOutcome::Empty => println!("\nCould not determine archetype."),
        MatchOutcome::Single { primary, .. } => {
            println!("\nPrimary: {}", primary);
            if let Some(m) = report.ranking.first() {
                println!("  {}", m.description);
            }
        }
        MatchOutcome::Hybrid { .. } => {
            println!("\nPrimary (hybrid): {}", report.outcome.primary_label());
        }
    }
    let secondaries = report.outcome.secondaries();
    if !secondaries.is_empty() {
        println!("Secondary: {}", secondaries.join(", "));
    }
    println!("Code: {}", report.code);
}
