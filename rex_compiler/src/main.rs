use rex_compiler::utils::PatternExcerpt;
use rex_compiler::{batch, logging, pipeline};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <pattern> [options]", args[0]);
        eprintln!("       {} --compare <a> <b>", args[0]);
        eprintln!("       {} --batch <file> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--help" => {
            print_help(&args[0]);
            Ok(())
        }
        "--compare" => {
            if args.len() < 4 {
                eprintln!("Error: --compare needs two patterns");
                std::process::exit(1);
            }
            compare_patterns(&args[2], &args[3])
        }
        "--batch" => {
            if args.len() < 3 {
                eprintln!("Error: --batch needs a pattern file");
                std::process::exit(1);
            }
            let config = parse_batch_options(&args[3..]);
            process_pattern_batch(Path::new(&args[2]), &config)
        }
        pattern => compile_single_pattern(pattern),
    }
}

fn print_help(program_name: &str) {
    println!("Pattern Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Regex pattern compilation with total escape classification");
    println!();
    println!("USAGE:");
    println!(
        "    {} <pattern>                      # Compile a single pattern",
        program_name
    );
    println!(
        "    {} --compare <a> <b>              # Check two patterns for equivalence",
        program_name
    );
    println!(
        "    {} --batch <file> [options]       # Compile a pattern file",
        program_name
    );
    println!();
    println!("ARGUMENTS:");
    println!("    <pattern>      Raw pattern text, or /pattern/flags literal form");
    println!("    <file>         Pattern file, one pattern per line ('#' comments)");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --sequential        Force sequential batch processing");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --fail-fast         Stop batch on first error");
    println!("    --quiet             Suppress progress reporting");
    println!();
    println!("EXAMPLES:");
    println!("    {} '[a-z]+'", program_name);
    println!("    {} '/[\\§]/'                        # Redundant escape, compiles fine", program_name);
    println!("    {} --compare '[\\§]' '[§]'          # => equivalent", program_name);
    println!("    {} --compare '\\d' 'd'              # => not equivalent", program_name);
    println!("    {} --batch patterns.txt --threads 4", program_name);
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!();

    let batch_info = batch::get_batch_info();
    println!("BATCH PROCESSING CAPABILITIES:");
    println!(
        "    Max recommended threads: {}",
        batch_info.max_recommended_threads
    );
    println!(
        "    Max patterns per batch: {}",
        batch_info.max_patterns_per_batch
    );
}

fn compile_single_pattern(pattern: &str) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::compile_pattern(pattern) {
        Ok(result) => {
            println!("Pattern compiled successfully");
            println!("  Tokens: {}", result.token_count);
            println!("  Branches: {}", result.program.branches.len());
            println!("  Steps: {}", result.program.step_count());
            println!("  Scalar spans: {}", result.program.span_count());
            println!(
                "  Escapes: {} ({} meaningful, {} redundant)",
                result.scan_metrics.escape_sequences,
                result.scan_metrics.meaningful_escapes,
                result.scan_metrics.redundant_escapes
            );
            println!(
                "  Duration: {:.3}ms",
                result.processing_duration.as_secs_f64() * 1000.0
            );
            Ok(())
        }
        Err(error) => {
            report_failure(pattern, &error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }
}

fn report_failure(pattern: &str, error: &pipeline::PipelineError) {
    eprintln!("Pattern compilation failed: {}", error);

    let span = match error {
        pipeline::PipelineError::SyntaxAnalysis(e) => e.span(),
        pipeline::PipelineError::Compilation(e) => e.span(),
        _ => None,
    };

    if let Some(span) = span {
        let excerpt = PatternExcerpt::new(pattern.to_string());
        eprint!("{}", excerpt.format_error(&span, &error.to_string()));
    }
}

fn compare_patterns(a: &str, b: &str) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::equivalent(a, b) {
        Ok(true) => {
            println!("equivalent");
            Ok(())
        }
        Ok(false) => {
            println!("not equivalent");
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("Equivalence check failed: {}", error);
            std::process::exit(2);
        }
    }
}

fn process_pattern_batch(
    path: &Path,
    config: &batch::BatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = batch::compile_pattern_file(path, config)?;

    if !config.progress_reporting {
        println!("{}", results.summary());
        return exit_for(&results);
    }

    println!("{}", results.summary());

    if results.failure_count() > 0 {
        println!();
        logging::print_cargo_style_summary();
    }

    exit_for(&results)
}

fn exit_for(results: &batch::BatchResults) -> Result<(), Box<dyn std::error::Error>> {
    if results.failure_count() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_batch_options(options: &[String]) -> batch::BatchConfig {
    let mut config = batch::BatchConfig::default();

    let mut iter = options.iter();
    while let Some(option) = iter.next() {
        match option.as_str() {
            "--sequential" => config.parallel = false,
            "--fail-fast" => config.fail_fast = true,
            "--quiet" => config.progress_reporting = false,
            "--threads" => {
                if let Some(n) = iter.next().and_then(|v| v.parse().ok()) {
                    config.max_threads = n;
                } else {
                    eprintln!("Warning: --threads needs a number, using default");
                }
            }
            other => {
                eprintln!("Warning: unknown option '{}' ignored", other);
            }
        }
    }

    config
}
