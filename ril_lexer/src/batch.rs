//! Batch processing module for RIL file tokenization
//!
//! Provides directory-based batch processing with sequential and parallel
//! execution modes. Integrates with the global logging system and error
//! collector for cargo-style output. Each worker owns its own analyzer
//! instance; no lexer state is shared across files.

use crate::logging::{self, codes};
use crate::pipeline::{self, PipelineError, PipelineResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: std::thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: true,
            fail_fast: false,
        }
    }
}

/// Batch processing results
#[derive(Debug)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self {
            successful_files: Vec::new(),
            failed_files: Vec::new(),
            processing_duration: Duration::new(0, 0),
            files_processed: 0,
            files_discovered: 0,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} successful ({:.1}%), {} failed, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

impl Default for BatchResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No RIL files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover RIL files in a directory
pub fn discover_ril_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.exists() {
        return Err(BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        });
    }

    if !dir_path.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: format!("{} is not a directory", dir_path.display()),
        });
    }

    let mut files = Vec::new();

    if config.recursive {
        visit_directory_recursive(dir_path, &mut files, config)?;
    } else {
        visit_directory_single_level(dir_path, &mut files, config)?;
    }

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    // Sort files for deterministic processing order
    files.sort();

    crate::log_success!(
        codes::success::FILE_VALIDATION_PASSED,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

/// Visit directory recursively
fn visit_directory_recursive(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;

        let path = entry.path();

        if path.is_dir() {
            visit_directory_recursive(&path, files, config)?;
        } else if is_ril_file(&path) {
            files.push(path);

            // Check file count limit
            if let Some(max_files) = config.max_files {
                if files.len() >= max_files {
                    crate::log_warning!(
                        "Reached maximum file limit",
                        "files_found" => files.len(),
                        "limit" => max_files
                    );
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

/// Visit directory at single level only
fn visit_directory_single_level(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<(), BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: e.to_string(),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;

        let path = entry.path();

        if is_ril_file(&path) {
            files.push(path);

            // Check file count limit
            if let Some(max_files) = config.max_files {
                if files.len() >= max_files {
                    crate::log_warning!(
                        "Reached maximum file limit",
                        "files_found" => files.len(),
                        "limit" => max_files
                    );
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Check if a path represents a RIL file
fn is_ril_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("ril"))
            .unwrap_or(false)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Process a directory of RIL files sequentially
pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let discovered_files = discover_ril_files(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = discovered_files.len();

    // Process each file
    for (file_id, file_path) in discovered_files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                discovered_files.len(),
                file_path.display()
            );
        }

        // Process with file context for automatic error collection
        let should_continue = logging::with_file_context(file_path.clone(), file_id, || {
            match pipeline::process_file(&file_path.to_string_lossy()) {
                Ok(pipeline_result) => {
                    results.add_success(file_path.clone(), pipeline_result);
                    true
                }
                Err(pipeline_error) => {
                    crate::log_error!(
                        codes::file_processing::IO_ERROR,
                        "File processing failed",
                        "file" => file_path.display(),
                        "file_id" => file_id
                    );
                    results.add_failure(file_path.clone(), pipeline_error);

                    // Check for fail-fast mode
                    if config.fail_fast {
                        crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
                        return false;
                    }
                    true
                }
            }
        });

        if !should_continue {
            break;
        }
    }

    results.processing_duration = start_time.elapsed();

    crate::log_success!(
        codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
        "Sequential batch processing completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

/// Process files in parallel using a thread pool
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => config.max_threads
    );

    let discovered_files = discover_ril_files(dir_path, config)?;

    let mut results = BatchResults::new();
    results.files_discovered = discovered_files.len();

    if discovered_files.is_empty() {
        results.processing_duration = start_time.elapsed();
        return Ok(results);
    }

    // Calculate optimal chunk size for memory management
    let chunk_size = calculate_chunk_size(&discovered_files, config.max_threads);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => discovered_files.len(),
        "chunk_size" => chunk_size,
        "threads" => config.max_threads
    );

    // Process files in chunks
    for chunk in discovered_files.chunks(chunk_size) {
        let chunk_results = process_chunk_parallel(chunk, config)?;
        results.merge(chunk_results);

        // Check for fail-fast mode
        if config.fail_fast && results.failure_count() > 0 {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.processing_duration = start_time.elapsed();

    crate::log_success!(
        codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
        "Parallel batch processing completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => config.max_threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}

/// Process a chunk of files in parallel
fn process_chunk_parallel(
    files: &[PathBuf],
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(std::sync::Mutex::new(BatchResults::new()));

    // Create thread handles
    let mut handles = Vec::new();
    let files_per_thread = (files.len() + config.max_threads - 1) / config.max_threads;

    for thread_id in 0..config.max_threads {
        let start_idx = thread_id * files_per_thread;
        let end_idx = ((thread_id + 1) * files_per_thread).min(files.len());

        if start_idx >= files.len() {
            break;
        }

        let thread_files: Vec<PathBuf> = files[start_idx..end_idx].to_vec();
        let results_clone = Arc::clone(&results);

        let handle = thread::spawn(move || {
            for (local_file_id, file_path) in thread_files.iter().enumerate() {
                let global_file_id = start_idx + local_file_id;

                logging::with_file_context(file_path.clone(), global_file_id, || {
                    match pipeline::process_file(&file_path.to_string_lossy()) {
                        Ok(pipeline_result) => {
                            let mut results_guard = results_clone.lock().unwrap();
                            results_guard.add_success(file_path.clone(), pipeline_result);
                        }
                        Err(pipeline_error) => {
                            let mut results_guard = results_clone.lock().unwrap();
                            results_guard.add_failure(file_path.clone(), pipeline_error);
                        }
                    }
                });
            }
        });

        handles.push(handle);
    }

    // Wait for all threads to complete
    for handle in handles {
        handle.join().map_err(|_| BatchError::ThreadError {
            message: "Thread panicked during processing".to_string(),
        })?;
    }

    // Extract results
    let final_results = Arc::try_unwrap(results)
        .map_err(|_| BatchError::ThreadError {
            message: "Failed to extract results from thread pool".to_string(),
        })?
        .into_inner()
        .unwrap();

    Ok(final_results)
}

/// Calculate optimal chunk size for parallel processing
fn calculate_chunk_size(files: &[PathBuf], max_threads: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 1;
    const MAX_CHUNK_SIZE: usize = 50; // Prevent memory pressure

    let ideal_chunk_size = (files.len() + max_threads - 1) / max_threads;
    ideal_chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Process a directory using the configured execution mode
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.max_threads <= 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

/// Information about batch processing capabilities
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub max_recommended_threads: usize,
    pub supports_recursive_discovery: bool,
    pub supports_parallel_processing: bool,
    pub supports_progress_reporting: bool,
    pub supports_fail_fast: bool,
    pub supported_file_extensions: Vec<String>,
}

/// Get batch processing capabilities
pub fn get_batch_info() -> BatchInfo {
    BatchInfo {
        max_recommended_threads: std::thread::available_parallelism()
            .map(|n| n.get().min(8))
            .unwrap_or(4),
        supports_recursive_discovery: true,
        supports_parallel_processing: true,
        supports_progress_reporting: true,
        supports_fail_fast: true,
        supported_file_extensions: vec!["ril".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_config() -> BatchConfig {
        BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_discover_files_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.ril"), "var x is 1").unwrap();
        fs::write(dir.path().join("a.ril"), "var y is 2").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not ril").unwrap();

        let files = discover_ril_files(dir.path(), &quiet_config()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.ril"));
        assert!(files[1].ends_with("b.ril"));
    }

    #[test]
    fn test_discover_recursive_and_single_level() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("top.ril"), "var x is 1").unwrap();
        fs::write(nested.join("deep.ril"), "var y is 2").unwrap();

        let recursive = discover_ril_files(dir.path(), &quiet_config()).unwrap();
        assert_eq!(recursive.len(), 2);

        let flat_config = BatchConfig {
            recursive: false,
            ..quiet_config()
        };
        let flat = discover_ril_files(dir.path(), &flat_config).unwrap();
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_discover_respects_max_files() {
        let dir = tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("f{}.ril", i)), "var x is 1").unwrap();
        }

        let config = BatchConfig {
            max_files: Some(3),
            ..quiet_config()
        };
        let files = discover_ril_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_discover_missing_directory() {
        let result = discover_ril_files(Path::new("/no/such/dir"), &quiet_config());
        assert_matches!(result, Err(BatchError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        let result = discover_ril_files(dir.path(), &quiet_config());
        assert_matches!(result, Err(BatchError::NoFilesFound { .. }));
    }

    #[test]
    fn test_sequential_processing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.ril"), "var x is 1\n").unwrap();
        fs::write(dir.path().join("also_good.ril"), "print x\n").unwrap();

        let results = process_directory_sequential(dir.path(), &quiet_config()).unwrap();
        assert_eq!(results.files_discovered, 2);
        assert_eq!(results.success_count(), 2);
        assert_eq!(results.failure_count(), 0);
        assert!((results.success_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sequential_counts_failures() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.ril"), "var x is 1\n").unwrap();
        fs::write(dir.path().join("empty.ril"), "").unwrap(); // empty file fails stage 1

        let results = process_directory_sequential(dir.path(), &quiet_config()).unwrap();
        assert_eq!(results.files_processed, 2);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn test_parallel_processing() {
        let dir = tempdir().unwrap();
        for i in 0..6 {
            fs::write(
                dir.path().join(format!("f{}.ril", i)),
                format!("var x{} is {}\n", i, i),
            )
            .unwrap();
        }

        let config = BatchConfig {
            max_threads: 3,
            ..quiet_config()
        };
        let results = process_directory_parallel(dir.path(), &config).unwrap();
        assert_eq!(results.success_count(), 6);
    }

    #[test]
    fn test_results_merge() {
        let mut a = BatchResults::new();
        let mut b = BatchResults::new();
        b.add_failure(
            PathBuf::from("x.ril"),
            PipelineError::pipeline_error("boom"),
        );

        a.merge(b);
        assert_eq!(a.files_processed, 1);
        assert_eq!(a.failure_count(), 1);
    }

    #[test]
    fn test_chunk_size_bounds() {
        let files: Vec<PathBuf> = (0..500).map(|i| PathBuf::from(format!("{}.ril", i))).collect();
        let size = calculate_chunk_size(&files, 4);
        assert!(size >= 1);
        assert!(size <= 50);
    }

    #[test]
    fn test_batch_info() {
        let info = get_batch_info();
        assert!(info.max_recommended_threads >= 1);
        assert!(info.supports_parallel_processing);
        assert_eq!(info.supported_file_extensions, ["ril"]);
    }
}
