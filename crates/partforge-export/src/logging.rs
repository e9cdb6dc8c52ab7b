//! Logging helpers for export runs

/// Log the start of an export
#[macro_export]
macro_rules! log_export_start {
    ($model:expr, $path:expr) => {
        tracing::info!(
            model = %$model,
            path = %$path.display(),
            "Starting export"
        );
    };
}

#[macro_export]
macro_rules! log_export_complete {
    ($report:expr, $duration:expr) => {
        tracing::info!(
            path = %$report.output_path.display(),
            duration_ms = %$duration.as_millis(),
            nodes = %$report.nodes,
            materials = %$report.materials,
            textures = %$report.textures.len(),
            bytes = %$report.bytes_written,
            "Export complete"
        );
    };
}

#[macro_export]
macro_rules! log_export_error {
    ($path:expr, $error:expr) => {
        tracing::error!(
            path = %$path.display(),
            error = %$error,
            "Export failed, output left incomplete"
        );
    };
}
