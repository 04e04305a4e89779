use autoretime::api::AlignmentReport;
use autoretime::optimizer::Progress;
use autoretime::scorer::MismatchDetails;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_progress(restart: usize, p: &Progress) {
    println!(
        "[{}] It {:5} | T {:9.2} | Shift {:9.0}ms | Error {}",
        restart, p.iteration, p.temperature, p.candidate_shift_ms, p.mismatch_score
    );
}

/// The one-line verdict, in seconds.
pub fn print_verdict(report: &AlignmentReport) {
    println!(
        "shifted by {:.2} s (error={})",
        report.shift_seconds(),
        report.best_mismatch_score
    );
}

fn details_row(label: &str, shift_ms: f64, d: &MismatchDetails, color: Color) -> Vec<Cell> {
    vec![
        Cell::new(label).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.0}", shift_ms)),
        Cell::new(d.shift_buckets),
        Cell::new(d.overlap),
        Cell::new(d.uncovered_reference),
        Cell::new(d.stray_target),
        Cell::new(d.total()).fg(color),
    ]
}

pub fn print_summary(report: &AlignmentReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("State").add_attribute(Attribute::Bold),
        Cell::new("Shift ms"),
        Cell::new("Buckets"),
        Cell::new("Overlap"),
        Cell::new("Uncovered"),
        Cell::new("Stray"),
        Cell::new("Error").add_attribute(Attribute::Bold),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.add_row(details_row("Unshifted", 0.0, &report.baseline, Color::Red));
    let best_color = if report.improved() {
        Color::Green
    } else {
        Color::Yellow
    };
    table.add_row(details_row(
        "Best",
        report.best_shift_ms,
        &report.best,
        best_color,
    ));

    println!(
        "\nReference: {} events, {} buckets | Target: {} events, {} buckets",
        report.reference_events,
        report.baseline.reference_buckets,
        report.target_events,
        report.baseline.target_buckets
    );
    println!(
        "Restart #{} | {} iterations",
        report.restart, report.iterations_run
    );
    println!("{}", table);
}
