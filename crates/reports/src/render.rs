//! Render backends for export artifacts.
//!
//! One file per export, written atomically enough for our purposes: the
//! same export id always renders to the same path, so a re-delivered job
//! simply overwrites the previous artifact.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use tempo_core::report::{ExportFormat, ReportResponse};
use tempo_db::models::report_export::ReportExport;

use crate::error::ReportError;

// printpdf's Mm wraps an f32, so the page geometry stays f32 throughout.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_X_MM: f32 = 18.0;
const TOP_Y_MM: f32 = 275.0;
const BOTTOM_Y_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 7.0;

/// Write the report artifact for `export` to `path`.
pub fn render_report(
    path: &Path,
    format: ExportFormat,
    export: &ReportExport,
    response: &ReportResponse,
) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ReportError::Render(e.to_string()))?;
    }
    match format {
        ExportFormat::Csv => render_csv(path, response),
        ExportFormat::Pdf => render_pdf(path, export, response),
    }
}

fn render_csv(path: &Path, response: &ReportResponse) -> Result<(), ReportError> {
    let render_err = |e: csv::Error| ReportError::Render(e.to_string());

    let mut writer = csv::Writer::from_path(path).map_err(render_err)?;
    writer
        .write_record(["Project", "Total minutes", "Billable minutes"])
        .map_err(render_err)?;
    for row in &response.summary {
        writer
            .write_record([
                row.project_name.as_str(),
                &row.total_minutes.to_string(),
                &row.total_billable_minutes.to_string(),
            ])
            .map_err(render_err)?;
    }
    writer
        .write_record([
            "TOTAL",
            &response.total_minutes.to_string(),
            &response.total_billable_minutes.to_string(),
        ])
        .map_err(render_err)?;
    writer
        .flush()
        .map_err(|e| ReportError::Render(e.to_string()))?;
    Ok(())
}

fn render_pdf(
    path: &Path,
    export: &ReportExport,
    response: &ReportResponse,
) -> Result<(), ReportError> {
    let render_err = |e: printpdf::Error| ReportError::Render(e.to_string());

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Time report {}", export.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "report",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(render_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = TOP_Y_MM;

    layer.use_text(
        format!("Time report {} to {}", export.date_from, export.date_to),
        14.0,
        Mm(MARGIN_X_MM),
        Mm(y),
        &bold,
    );
    y -= LINE_HEIGHT_MM * 2.0;

    write_line(&doc, &mut layer, &mut y, &bold, &header_line());
    for row in &response.summary {
        write_line(
            &doc,
            &mut layer,
            &mut y,
            &regular,
            &columns_line(
                &row.project_name,
                row.total_minutes,
                row.total_billable_minutes,
            ),
        );
    }
    write_line(
        &doc,
        &mut layer,
        &mut y,
        &bold,
        &columns_line(
            "TOTAL",
            response.total_minutes,
            response.total_billable_minutes,
        ),
    );

    let file = fs::File::create(path).map_err(|e| ReportError::Render(e.to_string()))?;
    doc.save(&mut BufWriter::new(file)).map_err(render_err)?;
    Ok(())
}

fn header_line() -> String {
    format!("{:<40} {:>14} {:>17}", "Project", "Total minutes", "Billable minutes")
}

fn columns_line(project: &str, total: i64, billable: i64) -> String {
    format!("{:<40} {:>14} {:>17}", project, total, billable)
}

/// Emit one text line, starting a fresh page when the cursor runs off the
/// bottom margin.
fn write_line(
    doc: &PdfDocumentReference,
    layer: &mut printpdf::PdfLayerReference,
    y: &mut f32,
    font: &IndirectFontRef,
    text: &str,
) {
    if *y < BOTTOM_Y_MM {
        let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "report");
        *layer = doc.get_page(page).get_layer(new_layer);
        *y = TOP_Y_MM;
    }
    layer.use_text(text, 11.0, Mm(MARGIN_X_MM), Mm(*y), font);
    *y -= LINE_HEIGHT_MM;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tempo_core::report::ReportSummary;

    fn sample_export(id: i64, format: &str) -> ReportExport {
        let now = Utc::now();
        ReportExport {
            id,
            user_id: 1,
            project_ids: None,
            date_from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            format: format.to_string(),
            status: "pending".to_string(),
            file_path: None,
            job_id: Some(7),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_response() -> ReportResponse {
        ReportResponse {
            summary: vec![
                ReportSummary {
                    project_id: 10,
                    project_name: "Website".to_string(),
                    total_minutes: 75,
                    total_billable_minutes: 45,
                },
                ReportSummary {
                    project_id: 11,
                    project_name: "Internal, ops".to_string(),
                    total_minutes: 30,
                    total_billable_minutes: 0,
                },
            ],
            total_minutes: 105,
            total_billable_minutes: 45,
        }
    }

    #[test]
    fn csv_contains_rows_and_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report_1.csv");
        render_report(&path, ExportFormat::Csv, &sample_export(1, "csv"), &sample_response())
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Project,Total minutes,Billable minutes");
        assert_eq!(lines[1], "Website,75,45");
        // Commas in project names must be quoted.
        assert_eq!(lines[2], "\"Internal, ops\",30,0");
        assert_eq!(lines[3], "TOTAL,105,45");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn csv_with_no_rows_still_writes_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report_2.csv");
        let response = ReportResponse {
            summary: vec![],
            total_minutes: 0,
            total_billable_minutes: 0,
        };
        render_report(&path, ExportFormat::Csv, &sample_export(2, "csv"), &response).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Project,Total minutes,Billable minutes", "TOTAL,0,0"]);
    }

    #[test]
    fn pdf_produces_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report_3.pdf");
        render_report(&path, ExportFormat::Pdf, &sample_export(3, "pdf"), &sample_response())
            .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn pdf_paginates_long_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report_4.pdf");
        let summary: Vec<ReportSummary> = (0..120)
            .map(|i| ReportSummary {
                project_id: i,
                project_name: format!("Project {i}"),
                total_minutes: 10,
                total_billable_minutes: 5,
            })
            .collect();
        let response = ReportResponse {
            summary,
            total_minutes: 1200,
            total_billable_minutes: 600,
        };
        render_report(&path, ExportFormat::Pdf, &sample_export(4, "pdf"), &response).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/exports/report_5.csv");
        render_report(&path, ExportFormat::Csv, &sample_export(5, "csv"), &sample_response())
            .unwrap();
        assert!(path.exists());
    }
}
