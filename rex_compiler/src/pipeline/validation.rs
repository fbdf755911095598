/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating complete pipeline configuration");

    // Validate source intake integration
    crate::source::init_source_logging()?;

    // Validate scanner integration
    crate::lexical::init_scan_logging()?;
    crate::lexical::validate_scanning()?;

    // Validate syntax analyzer integration
    crate::syntax::init_syntax_logging()?;

    // Validate compiler integration
    crate::compile::init_compile_logging()?;

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Complete pipeline validation succeeded",
        "stages_validated" => 4,
        "source_intake" => true,
        "scanning" => true,
        "syntax_analysis" => true,
        "compilation" => true
    );

    Ok(())
}
