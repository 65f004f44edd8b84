use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Starts file logging under `logs/` with warnings mirrored to stderr and
/// everything mirrored to stdout.
///
/// The returned handle must stay alive for as long as logging is wanted.
pub fn setup_logging(base_level: &str) -> LoggerHandle {
    Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Invalid log filter {}: {}", base_level, e))
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename("roiflex"),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_logging_starts_file_logger() {
        let handle = setup_logging("debug");
        log::info!("logger smoke test");
        handle.flush();
        assert!(std::path::Path::new("logs").is_dir());
    }
}
