use chrono::{DateTime, Local};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvmap_model::{Column, ConverterConfig, Profile, cell_value, find_column};
use csvmap_persistence::ProfileStore;
use csvmap_transform::{Diagnostic, DiagnosticLevel};

use crate::commands::ConvertOutcome;

pub fn print_convert_summary(outcome: &ConvertOutcome) {
    let conversion = &outcome.conversion;
    let preview = &conversion.preview;
    let result = &preview.result;

    println!("Profile: {}", conversion.profile_name);
    println!("Encoding: {}", conversion.encoding);
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Mapping"),
        header_cell("Degraded"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let targets = conversion.session.target_columns();
    for stats in &result.mapping_stats {
        table.add_row(vec![
            Cell::new(column_label(targets, &stats.target_column_id)),
            dim_cell(&stats.mapping_id),
            count_cell(stats.degraded_count, Color::Yellow),
        ]);
    }
    for id in &result.skipped_mappings {
        table.add_row(vec![
            Cell::new("(undeclared target)").fg(Color::Red),
            dim_cell(id),
            dim_cell("skipped"),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} of {} rows kept",
            preview.transformed.len(),
            preview.total_rows
        ))
        .add_attribute(Attribute::Bold),
        count_cell(result.degraded_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !conversion.missing_sources.is_empty() {
        eprintln!("Columns missing from the input (converted as empty):");
        for id in &conversion.missing_sources {
            eprintln!("- {id}");
        }
    }
    if outcome.preview_rows > 0 {
        print_preview(outcome);
    }
    if outcome.show_diagnostics {
        print_diagnostics(&result.diagnostics);
    }
}

fn print_preview(outcome: &ConvertOutcome) {
    let conversion = &outcome.conversion;
    let columns = conversion.session.target_columns();
    if columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .map(|column| header_cell(&column.name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in conversion.output_rows().iter().take(outcome.preview_rows) {
        table.add_row(
            columns
                .iter()
                .map(|column| Cell::new(cell_value(row, &column.id)))
                .collect::<Vec<_>>(),
        );
    }
    println!();
    println!(
        "Preview ({} of {} rows):",
        outcome.preview_rows.min(conversion.output_rows().len()),
        conversion.output_rows().len()
    );
    println!("{table}");
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!();
        println!("No converter fell back to a default value.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Row"),
        header_cell("Mapping"),
        header_cell("Step"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for diagnostic in diagnostics {
        table.add_row(vec![
            level_cell(diagnostic.level),
            optional_cell(diagnostic.row.map(|row| row + 1)),
            Cell::new(diagnostic.mapping_id.as_deref().unwrap_or("-")),
            optional_cell(diagnostic.converter_index.map(|index| index + 1)),
            Cell::new(&diagnostic.message),
        ]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

pub fn print_profiles(store: &ProfileStore) {
    if store.profiles().is_empty() {
        println!("No profiles in {}", store.path().display());
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Name"),
        header_cell("Id"),
        header_cell("Targets"),
        header_cell("Mappings"),
        header_cell("Updated"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for profile in store.profiles() {
        let current = store.current_profile_id() == Some(profile.id.as_str());
        table.add_row(vec![
            if current {
                Cell::new("*").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            },
            Cell::new(&profile.name),
            dim_cell(&profile.id),
            Cell::new(profile.target_columns.len()),
            Cell::new(profile.mappings.len()),
            Cell::new(format_millis(profile.updated_at)),
        ]);
    }
    println!("{table}");
}

pub fn print_profile(profile: &Profile, current: bool) {
    println!(
        "Profile: {}{}",
        profile.name,
        if current { " (current)" } else { "" }
    );
    println!("Id: {}", profile.id);
    if let Some(encoding) = profile.encoding {
        println!("Encoding: {encoding}");
    }
    if let Some(filter) = profile.data_filter.as_ref().filter(|f| f.is_active()) {
        println!(
            "Filter: {} matches /{}/",
            filter.column_id, filter.pattern
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Sources"),
        header_cell("Separator"),
        header_cell("Converters"),
    ]);
    apply_summary_table_style(&mut table);
    for mapping in &profile.mappings {
        let sources = mapping
            .source_column_ids
            .iter()
            .map(|id| column_label(&profile.source_columns, id))
            .collect::<Vec<_>>()
            .join(" + ");
        let converters = mapping
            .converters
            .iter()
            .map(ConverterConfig::display_name)
            .collect::<Vec<_>>()
            .join(" -> ");
        table.add_row(vec![
            Cell::new(column_label(&profile.target_columns, &mapping.target_column_id)),
            Cell::new(if sources.is_empty() { "-".to_string() } else { sources }),
            if mapping.is_multi_source() {
                Cell::new(format!("{:?}", mapping.separator()))
            } else {
                dim_cell("-")
            },
            Cell::new(converters),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn column_label(columns: &[Column], id: &str) -> String {
    find_column(columns, id).map_or_else(|| id.to_string(), |column| column.name.clone())
}

fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn level_cell(level: DiagnosticLevel) -> Cell {
    match level {
        DiagnosticLevel::Warning => Cell::new("WARN").fg(Color::Yellow),
        DiagnosticLevel::Info => dim_cell("INFO"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<usize>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: std::fmt::Display>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}
