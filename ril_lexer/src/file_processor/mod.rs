//! File processor module with compile-time constants and global logging integration

mod processor;

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    processor::process_file(file_path)
}

/// Create a file processor with default settings
pub fn create_processor() -> FileProcessor {
    processor::create_processor()
}

/// Create a file processor with custom runtime preferences
///
/// File size limits are compile-time constants and cannot be changed here;
/// use `get_max_file_size()` to check the current limit.
pub fn create_custom_processor(
    require_ril_extension: bool,
    enable_performance_logging: bool,
) -> FileProcessor {
    processor::create_custom_processor(require_ril_extension, enable_performance_logging)
}

/// Create a file processor from runtime preferences structure
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    processor::create_processor_from_preferences(prefs)
}

/// Check if an error should halt processing
pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    processor::should_halt_on_error(error)
}

/// Get error code for an error
pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    processor::get_error_code(error)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    processor::get_max_file_size()
}

/// Get the compile-time large file threshold
pub fn get_large_file_threshold() -> u64 {
    processor::get_large_file_threshold()
}

/// Get default runtime preferences for file processing
pub fn get_default_preferences() -> FileProcessorPreferences {
    FileProcessorPreferences {
        require_ril_extension: false,
        enable_performance_logging: true,
        log_non_ril_processing: true,
        include_complexity_metrics: false,
    }
}

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::config::constants::compile_time::file_processing::PERFORMANCE_LOG_BUFFER_SIZE;

    // Validate that all file processor error codes are properly configured
    let test_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::INVALID_EXTENSION,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::EMPTY_FILE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::INVALID_ENCODING,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
    ];

    for code in &test_codes {
        let description = crate::logging::codes::get_description(code.as_str());
        if description == "Unknown error" {
            return Err(format!(
                "File processor error code {} has no description",
                code.as_str()
            ));
        }

        // Verify the code exists in the error metadata registry
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    // Log compile-time configuration for startup validation
    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS,
        "perf_buffer_size" => PERFORMANCE_LOG_BUFFER_SIZE);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.ril");
        fs::write(&file_path, "var x is 1\n").unwrap();

        // Test module-level function
        let result = process_file(file_path.to_str().unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_processor() {
        let _processor = create_processor();
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
    }

    #[test]
    fn test_create_custom_processor() {
        let processor = create_custom_processor(true, false);
        assert!(processor.require_ril_extension);
        assert!(!processor.enable_performance_logging);

        // File size is a compile-time constant
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_ril_extension: true,
            enable_performance_logging: false,
            log_non_ril_processing: false,
            include_complexity_metrics: true,
        };

        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_ril_extension);
        assert!(!processor.enable_performance_logging);
        assert!(!processor.log_non_ril_processing);
        assert!(processor.include_complexity_metrics);
    }

    #[test]
    fn test_error_helpers() {
        let error = FileProcessorError::FileNotFound {
            path: "test.ril".to_string(),
        };

        assert!(should_halt_on_error(&error));
        let code = get_error_code(&error);
        assert_eq!(code.as_str(), "E005"); // FILE_NOT_FOUND code
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert_eq!(get_large_file_threshold(), LARGE_FILE_THRESHOLD);

        assert!(get_max_file_size() > 0);
        assert!(get_large_file_threshold() > 0);
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_default_preferences() {
        let prefs = get_default_preferences();
        assert!(!prefs.require_ril_extension);
        assert!(prefs.enable_performance_logging);
        assert!(prefs.log_non_ril_processing);
        assert!(!prefs.include_complexity_metrics);
    }

    #[test]
    fn test_init_logging() {
        let result = init_file_processor_logging();
        assert!(result.is_ok());
    }
}
