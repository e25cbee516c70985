use ril_lexer::{batch, lexical, logging, pipeline};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.ril|directory> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let input_path = Path::new(&args[1]);

    // Parse additional options
    let options = parse_options(&args[2..]);

    if input_path.is_file() {
        // Single file processing
        process_single_file(&args[1], &options)?;
    } else if input_path.is_dir() {
        // Batch directory processing
        process_directory_batch(input_path, &options.batch)?;
    } else {
        eprintln!("Error: Input must be a file (.ril) or directory");
        eprintln!("  Path: {}", input_path.display());
        std::process::exit(1);
    }

    Ok(())
}

struct CliOptions {
    batch: batch::BatchConfig,
    dump_tokens: Option<String>,
}

fn print_help(program_name: &str) {
    println!("RIL Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizer for RIL source files with batch processing");
    println!();
    println!("USAGE:");
    println!(
        "    {} <input.ril> [options]          # Tokenize single file",
        program_name
    );
    println!(
        "    {} <directory> [options]          # Tokenize directory",
        program_name
    );
    println!();
    println!("ARGUMENTS:");
    println!("    <input.ril>    Path to the RIL file to tokenize");
    println!("    <directory>    Path to directory containing RIL files");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --dump-tokens FILE  Write the token stream as JSON to FILE");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --parallel          Force parallel processing (default)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first error");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("SINGLE FILE OUTPUT:");
    println!("    Success: token distribution summary, optional JSON token dump");
    println!("    Failure: comprehensive error information with recommendations");
    println!();
    println!("BATCH PROCESSING OUTPUT:");
    println!("    Cargo-style error reporting grouped by file");
    println!("    Processing summary with success/failure statistics");
    println!("    Performance metrics and throughput information");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} example.ril                     # Single file",
        program_name
    );
    println!(
        "    {} example.ril --dump-tokens out.json",
        program_name
    );
    println!(
        "    {} sources/ --threads 4            # 4 threads max",
        program_name
    );
    println!(
        "    {} tests/ --sequential --fail-fast # Sequential with early exit",
        program_name
    );
    println!();

    // Print lexer capabilities
    let limits = lexical::get_security_limits();
    println!("LEXER LIMITS:");
    println!("    Max identifier length: {}", limits.max_identifier_length);
    println!("    Max token count: {}", limits.max_token_count);
    println!();

    // Print batch capabilities
    let batch_info = batch::get_batch_info();
    println!("BATCH PROCESSING CAPABILITIES:");
    println!(
        "    Max recommended threads: {}",
        batch_info.max_recommended_threads
    );
    println!(
        "    Recursive discovery: {}",
        batch_info.supports_recursive_discovery
    );
    println!(
        "    Parallel processing: {}",
        batch_info.supports_parallel_processing
    );
    println!("    Fail-fast mode: {}", batch_info.supports_fail_fast);
    println!(
        "    Supported extensions: {}",
        batch_info.supported_file_extensions.join(", ")
    );
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        batch: batch::BatchConfig::default(),
        dump_tokens: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--sequential" => {
                options.batch.max_threads = 1;
            }
            "--parallel" => {
                // Keep default parallel setting
            }
            "--threads" => {
                if i + 1 < args.len() {
                    if let Ok(threads) = args[i + 1].parse::<usize>() {
                        options.batch.max_threads = threads.clamp(1, 32);
                        i += 1; // Skip the number argument
                    } else {
                        eprintln!(
                            "Warning: Invalid thread count '{}', using default",
                            args[i + 1]
                        );
                        i += 1;
                    }
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--no-recursive" => {
                options.batch.recursive = false;
            }
            "--max-files" => {
                if i + 1 < args.len() {
                    if let Ok(max_files) = args[i + 1].parse::<usize>() {
                        options.batch.max_files = Some(max_files);
                        i += 1; // Skip the number argument
                    } else {
                        eprintln!("Warning: Invalid max files '{}', ignoring", args[i + 1]);
                        i += 1;
                    }
                } else {
                    eprintln!("Warning: --max-files requires a number");
                }
            }
            "--fail-fast" => {
                options.batch.fail_fast = true;
            }
            "--quiet" => {
                options.batch.progress_reporting = false;
            }
            "--dump-tokens" => {
                if i + 1 < args.len() {
                    options.dump_tokens = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --dump-tokens requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

fn process_single_file(
    file_path: &str,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tokenizing file: {}", file_path);

    match pipeline::process_file(file_path) {
        Ok(result) => {
            println!("\nSUCCESS: Tokenization completed");
            print_token_summary(&result);

            if let Some(ref dump_path) = options.dump_tokens {
                let output =
                    pipeline::PipelineOutput::from_result(file_path.to_string(), &result);
                std::fs::write(dump_path, output.to_json()?)?;
                println!("Token dump written to {}", dump_path);
            }

            // Print cargo-style summary (if any diagnostics were collected)
            logging::print_cargo_style_summary();
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_detailed_error(&error);

            // Print cargo-style error summary
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_token_summary(result: &pipeline::PipelineResult) {
    let counts = lexical::get_token_counts(&result.tokens);

    println!("Token Summary:");
    println!("  Total tokens: {}", counts.total);
    println!("  Keywords: {}", counts.keywords);
    println!("  Identifiers: {}", counts.identifiers);
    println!("  Numbers: {}", counts.numbers);
    println!("  Operators: {}", counts.operators);
    println!("  Punctuation: {}", counts.punctuation);
    println!("  Separators: {}", counts.separators);

    if counts.illegal > 0 {
        println!("  Illegal characters: {}", counts.illegal);
    }

    println!(
        "  Processing time: {:.2}ms",
        result.processing_duration.as_secs_f64() * 1000.0
    );
}

fn process_directory_batch(
    dir_path: &Path,
    config: &batch::BatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting batch processing: {}", dir_path.display());
    println!(
        "Configuration: {} threads, recursive={}, fail_fast={}",
        config.max_threads, config.recursive, config.fail_fast
    );

    if let Some(max_files) = config.max_files {
        println!("File limit: {} files maximum", max_files);
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            println!("\nBatch processing completed!");
            print_batch_results(&results);

            // Print detailed cargo-style error report
            logging::print_cargo_style_summary();

            // Exit with error code if any files failed
            if results.failure_count() > 0 {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);

            // Still print any collected errors
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_batch_results(results: &batch::BatchResults) {
    println!("Batch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!(
        "  Successful: {} ({:.1}%)",
        results.success_count(),
        results.success_rate() * 100.0
    );
    println!("  Failed: {}", results.failure_count());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );

    if results.files_processed > 0 {
        let avg_time = results.processing_duration.as_secs_f64() / results.files_processed as f64;
        println!("  Average time per file: {:.2}s", avg_time);
    }

    // Performance metrics
    if !results.successful_files.is_empty() {
        let total_bytes: u64 = results
            .successful_files
            .iter()
            .map(|(_, result)| result.file_metadata.size)
            .sum();

        let total_tokens: usize = results
            .successful_files
            .iter()
            .map(|(_, result)| result.token_count)
            .sum();

        if results.processing_duration.as_secs_f64() > 0.0 {
            let bytes_per_sec = total_bytes as f64 / results.processing_duration.as_secs_f64();
            let tokens_per_sec = total_tokens as f64 / results.processing_duration.as_secs_f64();

            println!(
                "  Processing rate: {:.0} bytes/sec, {:.0} tokens/sec",
                bytes_per_sec, tokens_per_sec
            );
        }
    }

    // Show failed files summary
    if results.failure_count() > 0 {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), get_error_summary(error));
        }
    }

    // Show successful files if not too many
    if results.success_count() > 0 && results.success_count() <= 10 {
        println!("\nSuccessful Files:");
        for (file_path, result) in &results.successful_files {
            println!(
                "  {}: {} tokens, {} illegal",
                file_path.display(),
                result.token_count,
                result.lexical_metrics.illegal_tokens
            );
        }
    } else if results.success_count() > 10 {
        println!(
            "\n{} files processed successfully (showing first 5):",
            results.success_count()
        );
        for (file_path, result) in results.successful_files.iter().take(5) {
            println!(
                "  {}: {} tokens, {} illegal",
                file_path.display(),
                result.token_count,
                result.lexical_metrics.illegal_tokens
            );
        }
        println!("  ... and {} more", results.success_count() - 5);
    }
}

fn get_error_summary(error: &pipeline::PipelineError) -> String {
    match error {
        pipeline::PipelineError::FileProcessing(_) => "File processing error".to_string(),
        pipeline::PipelineError::LexicalAnalysis(_) => "Lexical analysis error".to_string(),
        pipeline::PipelineError::Pipeline { .. } => "Pipeline error".to_string(),
    }
}

fn print_detailed_error(error: &pipeline::PipelineError) {
    match error {
        pipeline::PipelineError::FileProcessing(ref file_err) => {
            eprintln!("File processing stage failed:");
            eprintln!("  {}", file_err);
        }
        pipeline::PipelineError::LexicalAnalysis(ref lex_err) => {
            eprintln!("Lexical analysis stage failed:");
            eprintln!("  {}", lex_err);
        }
        pipeline::PipelineError::Pipeline { message } => {
            eprintln!("Pipeline error: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        let args = vec![
            "--threads".to_string(),
            "4".to_string(),
            "--fail-fast".to_string(),
            "--no-recursive".to_string(),
            "--dump-tokens".to_string(),
            "out.json".to_string(),
        ];

        let options = parse_options(&args);
        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert!(!options.batch.recursive);
        assert_eq!(options.dump_tokens.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_parse_options_invalid() {
        let args = vec![
            "--threads".to_string(),
            "invalid".to_string(),
            "--unknown-option".to_string(),
        ];

        let options = parse_options(&args);
        // Should use default threads when invalid number provided
        assert_ne!(options.batch.max_threads, 0);
    }

    #[test]
    fn test_get_error_summary() {
        let error = pipeline::PipelineError::pipeline_error("test");
        let summary = get_error_summary(&error);
        assert_eq!(summary, "Pipeline error");
    }
}
