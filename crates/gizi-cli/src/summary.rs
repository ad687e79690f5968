use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gizi_model::{GrowthTrend, Indicator, NutritionResult, StatusBand};
use gizi_report::PopulationReport;
use gizi_standards::DoctorReport;

pub fn print_doctor(report: &DoctorReport) {
    println!(
        "Reference: {} {} ({})",
        report.source.standard, report.source.version, report.source.publisher
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Sex"),
        header_cell("Rows"),
        header_cell("First"),
        header_cell("Last"),
        header_cell("Step"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut table);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for summary in &report.tables {
        let sha = summary
            .sha256
            .as_deref()
            .map(|sha| sha.chars().take(12).collect::<String>())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(summary.kind.as_str()),
            Cell::new(summary.sex.as_str()),
            Cell::new(summary.rows),
            Cell::new(summary.first_index),
            Cell::new(summary.last_index),
            Cell::new(summary.step),
            dim_cell(sha),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(report.counts.rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    println!(
        "{} tables verified ({} age rows, {} length/height rows)",
        report.counts.tables, report.counts.age_rows, report.counts.height_rows
    );
}

pub fn print_assessment(result: &NutritionResult) {
    println!(
        "Age: {} days ({} completed months)",
        result.age_days, result.age_months
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Indicator"),
        header_cell("Z-score"),
        header_cell("Status"),
        header_cell("Restricted"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    let restricted = [
        result.restricted.bb_u,
        result.restricted.tb_u,
        result.restricted.bb_tb,
    ];
    for (indicator, restricted) in Indicator::ALL.into_iter().zip(restricted) {
        let status = result.status(indicator);
        table.add_row(vec![
            Cell::new(indicator.code()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:+.2}", result.zscore(indicator))),
            band_cell(status.label_id(), status.band()),
            if restricted {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("-")
            },
        ]);
    }
    println!("{table}");
    println!("Growth trend: {}", trend_text(result.status_naik));
}

pub fn print_report(report: &PopulationReport, rejected: usize) {
    let location = report.scope.location.as_deref().unwrap_or("all locations");
    println!("Period: {} ({location})", report.scope.period);

    let mut skdn = Table::new();
    skdn.set_header(vec![
        header_cell("S"),
        header_cell("K"),
        header_cell("D"),
        header_cell("N"),
        header_cell("T"),
        header_cell("O"),
        header_cell("K/S"),
        header_cell("D/S"),
        header_cell("N/D"),
    ]);
    apply_table_style(&mut skdn);
    for column in 0..9 {
        align_column(&mut skdn, column, CellAlignment::Right);
    }
    let counts = report.skdn;
    skdn.add_row(vec![
        Cell::new(counts.s),
        Cell::new(counts.k),
        Cell::new(counts.d),
        Cell::new(counts.n).fg(Color::Green),
        count_cell(counts.t, Color::Red),
        Cell::new(counts.o),
        percent_cell(report.ratios.k_s),
        percent_cell(report.ratios.d_s),
        percent_cell(report.ratios.n_d),
    ]);
    println!("{skdn}");

    let mut prevalence = Table::new();
    prevalence.set_header(vec![
        header_cell("Indicator"),
        header_cell("Status"),
        header_cell("Count"),
        header_cell("%"),
    ]);
    apply_prevalence_table_style(&mut prevalence);
    align_column(&mut prevalence, 2, CellAlignment::Right);
    align_column(&mut prevalence, 3, CellAlignment::Right);
    for row in &report.prevalence {
        prevalence.add_row(vec![
            Cell::new(row.code),
            band_cell(row.label, row.band),
            Cell::new(row.count),
            percent_cell(row.percent),
        ]);
    }
    println!("Measured children: {}", report.measured);
    println!("{prevalence}");

    for deficit in &report.deficits {
        let name = match deficit.indicator {
            Indicator::WeightForAge => "Underweight",
            Indicator::HeightForAge => "Stunting",
            Indicator::WeightForHeight => "Wasting",
        };
        println!("{name} ({}): {}", deficit.code, percent_text(deficit.percent));
    }
    if rejected > 0 {
        eprintln!("warning: {rejected} measured rows were rejected (see log)");
    }
}

fn trend_text(trend: GrowthTrend) -> String {
    format!("{} ({})", trend.code(), trend.label_id())
}

fn percent_text(percent: Option<f64>) -> String {
    percent.map_or_else(|| "-".to_string(), |value| format!("{value:.1}%"))
}

fn percent_cell(percent: Option<f64>) -> Cell {
    match percent {
        Some(value) => Cell::new(format!("{value:.1}")),
        None => dim_cell("-"),
    }
}

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn band_cell(label: &str, band: StatusBand) -> Cell {
    let cell = Cell::new(label);
    match band {
        StatusBand::Severe => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        StatusBand::Moderate => cell.fg(Color::Yellow),
        StatusBand::Normal => cell.fg(Color::Green),
        StatusBand::Above => cell.fg(Color::Magenta),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_prevalence_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
