// src/output/writer.rs
//! Performs the writes an [`OutputPlan`] describes.
//!
//! This module is the only place where file and stdout writes occur.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Sends every document in the plan to its target.
///
/// A failed delivery is recorded in the report and the rest still run.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::default();

    for (target, content) in &plan.deliveries {
        let written = match target {
            DeliveryTarget::File(path) => write_file(path, content),
            DeliveryTarget::Stdout => print_to_stdout(content),
        };
        match written {
            Ok(bytes) => report.bytes_written += bytes,
            Err(e) => {
                log::error!("Could not write to {}: {}", target, e);
                report.failures.push(format!("{}: {}", target, e));
            }
        }
    }

    log::debug!(
        "Delivered {} bytes to {} targets, {} failed",
        report.bytes_written,
        plan.deliveries.len(),
        report.failures.len()
    );
    report
}

/// Turns a report with failures into [`AppError::DeliveryFailed`].
pub fn ensure_delivered(report: OutputReport) -> Result<OutputReport, AppError> {
    if report.is_success() {
        return Ok(report);
    }
    Err(AppError::DeliveryFailed {
        failures: report.failures,
    })
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<usize, AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wikicat-writer-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_writes_file_and_parents() {
        let dir = scratch_dir("parents");
        let path = dir.join("nested").join("members.txt");
        let plan = OutputPlan::to_file_or_stdout(Some(path.clone()), "A\nB\n".to_string());

        let report = ensure_delivered(deliver(plan)).unwrap();

        assert_eq!(report.bytes_written, 4);
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\nB\n");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_path_means_stdout() {
        let plan = OutputPlan::to_file_or_stdout(None, "A\n".to_string());
        assert_eq!(plan.deliveries[0].0, DeliveryTarget::Stdout);
        assert_eq!(DeliveryTarget::Stdout.to_string(), "stdout");
    }

    #[test]
    fn test_failure_is_reported() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // A directory sits where the file should go.
        let plan = OutputPlan::to_file_or_stdout(Some(dir.clone()), "x".to_string());

        let report = deliver(plan);
        assert!(!report.is_success());
        assert!(matches!(
            ensure_delivered(report),
            Err(AppError::DeliveryFailed { failures })
                if failures.len() == 1 && failures[0].starts_with(&dir.display().to_string())
        ));
        fs::remove_dir_all(dir).unwrap();
    }
}
