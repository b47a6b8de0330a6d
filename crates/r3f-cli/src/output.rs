use crate::error::CliError;
use r3f_migrate::MigrationReport;

/// JSON on stdout, or a log summary on stderr.
pub fn print_report(report: &MigrationReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for file in &report.files {
        tracing::info!(
            file = %file.path.display(),
            components = %file.components.join(", "),
            written = file.written
        );
    }
    for style in &report.style_files {
        tracing::info!(style_file = %style.path.display(), components = style.components.len());
    }
    if !report.dropped_tokens.is_empty() {
        tracing::info!(
            tokens = %report.dropped_tokens.join(" "),
            "classes with no compiled styles were dropped"
        );
    }
    tracing::info!(
        components = report.component_count(),
        dry_run = report.dry_run,
        "done"
    );
    Ok(())
}
