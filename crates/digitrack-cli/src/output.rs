use serde::Serialize;

use digitrack::{BilingualFields, CatalogRecord, ImportOutcome, ImportReport, ParsedFileName};

/// Renders command results as text or JSON on stdout.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Status line; suppressed in JSON mode.
    pub fn message(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }

    pub fn parsed(&self, parsed: &ParsedFileName) -> anyhow::Result<()> {
        if self.json {
            return print_json(parsed);
        }
        println!("Book:   {}", parsed.book_name);
        println!(
            "Author: {}{}",
            parsed.author_name,
            unknown_marker(parsed.author_known())
        );
        println!("Year:   {}{}", parsed.year, unknown_marker(parsed.year_known()));
        if let Some(stage) = &parsed.stage {
            println!("Stage:  {}", stage);
        }
        Ok(())
    }

    pub fn bilingual(&self, fields: &BilingualFields) -> anyhow::Result<()> {
        if self.json {
            return print_json(fields);
        }
        println!("Title (English): {}", fields.title_english);
        println!("Title (Sindhi):  {}", fields.title_sindhi);
        println!("Author (English): {}", fields.author_english);
        println!("Author (Sindhi):  {}", fields.author_sindhi);
        println!("Year: {}", fields.year.as_deref().unwrap_or("-"));
        Ok(())
    }

    pub fn record(&self, record: &CatalogRecord) -> anyhow::Result<()> {
        if self.json {
            return print_json(record);
        }
        println!("{}", record_line(record));
        Ok(())
    }

    pub fn records(&self, records: &[CatalogRecord]) -> anyhow::Result<()> {
        if self.json {
            return print_json(&records);
        }
        if records.is_empty() {
            println!("No records found.");
            return Ok(());
        }
        for record in records {
            println!("{}", record_line(record));
        }
        println!("\n{} record(s)", records.len());
        Ok(())
    }

    pub fn import_report(&self, report: &ImportReport) -> anyhow::Result<()> {
        if self.json {
            return print_json(report);
        }
        for line in import_summary(report) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn unknown_marker(known: bool) -> &'static str {
    if known {
        ""
    } else {
        "  (not determined)"
    }
}

/// Human-readable lines describing an import run.
pub fn import_summary(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report.outcome {
        ImportOutcome::Imported => lines.push(format!(
            "Imported {} new record(s) from {}; skipped {} duplicate(s).",
            report.inserted, report.source, report.duplicates_skipped
        )),
        ImportOutcome::NoNewRecords => lines.push(format!(
            "No new records to import from {} ({} row(s) read, {} already in the catalog).",
            report.source, report.total_rows, report.duplicates_skipped
        )),
    }
    if report.rows_without_file_name > 0 {
        lines.push(format!(
            "{} row(s) had no file name and were ignored.",
            report.rows_without_file_name
        ));
    }
    lines.push(format!("Catalog now holds {} record(s).", report.catalog_size));
    lines
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn record_line(record: &CatalogRecord) -> String {
    let mut line = format!(
        "{:<40} {:<30} {:<25} {:<6} {}",
        record.file_name, record.book_name, record.author_name, record.year, record.stage
    );
    if let Some(assignee) = &record.assignee {
        line.push_str(&format!("  -> {}", assignee));
    }
    if let Some(deadline) = record.deadline {
        line.push_str(&format!(" (due {})", deadline.format("%Y-%m-%d")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: ImportOutcome, total: usize, dups: usize, no_name: usize) -> ImportReport {
        ImportReport {
            source: "catalog.csv".to_string(),
            outcome,
            total_rows: total,
            inserted: total - dups - no_name,
            duplicates_skipped: dups,
            duplicate_file_names: Vec::new(),
            rows_without_file_name: no_name,
            catalog_size: 10,
        }
    }

    #[test]
    fn test_no_new_records_counts_every_row() {
        let lines = import_summary(&report(ImportOutcome::NoNewRecords, 3, 0, 3));
        assert_eq!(
            lines,
            vec![
                "No new records to import from catalog.csv (3 row(s) read, 0 already in the catalog).",
                "3 row(s) had no file name and were ignored.",
                "Catalog now holds 10 record(s).",
            ]
        );
    }

    #[test]
    fn test_no_new_records_all_duplicates() {
        let lines = import_summary(&report(ImportOutcome::NoNewRecords, 2, 2, 0));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("2 row(s) read, 2 already in the catalog"));
    }

    #[test]
    fn test_imported_summary() {
        let lines = import_summary(&report(ImportOutcome::Imported, 5, 1, 1));
        assert_eq!(
            lines[0],
            "Imported 3 new record(s) from catalog.csv; skipped 1 duplicate(s)."
        );
        assert_eq!(lines.len(), 3);
    }
}
