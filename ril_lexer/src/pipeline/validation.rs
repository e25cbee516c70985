/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    // Validate file processor integration
    crate::file_processor::init_file_processor_logging()?;

    // Validate lexical analyzer integration
    crate::lexical::init_lexical_analysis_logging()?;
    crate::lexical::validate_tokenization()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 2,
        "file_processing" => true,
        "lexical_analysis" => true
    );

    Ok(())
}
