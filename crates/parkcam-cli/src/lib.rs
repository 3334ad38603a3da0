use parkcam_core::models::CameraPhotoPreview;
use parkcam_core::{AppError, ErrorMetadata};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize output: {}", e)))?;
    println!("{}", out);
    Ok(())
}

/// Operator-facing report for a failed command.
pub fn failure_report(err: &AppError) -> String {
    let mut report = format!("error [{}]: {}", err.error_code(), err.detailed_message());
    if let Some(action) = err.suggested_action() {
        report.push_str(&format!("\nhint: {}", action));
    }
    if err.is_recoverable() {
        report.push_str("\nThis failure may be transient.");
    }
    report
}

/// Render camera photos as a fixed-width table.
pub fn photo_table(photos: &[CameraPhotoPreview]) -> String {
    if photos.is_empty() {
        return "No photos found.\n".to_string();
    }

    let mut out = format!(
        "{:<36} {:<19} {:<40} {:<6}\n{}\n",
        "ID",
        "Captured At",
        "Location",
        "URL",
        "-".repeat(104)
    );
    for photo in photos {
        let location = format!("{}/{}", photo.row.storage_bucket, photo.row.storage_path);
        out.push_str(&format!(
            "{:<36} {:<19} {:<40} {:<6}\n",
            photo.row.id,
            photo.row.captured_at.format("%Y-%m-%d %H:%M:%S"),
            truncate_string(&location, 40),
            if photo.image_url.is_some() { "yes" } else { "no" },
        ));
    }
    out
}

/// Log filter from `RUST_LOG`, defaulting to `info`.
///
/// Read at call time, so `.env` must already be loaded.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}
