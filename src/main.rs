use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use b64forge::application::{BackgroundConverter, ConversionService};
use b64forge::domain::repositories::DrainGuard;
use b64forge::domain::services::SignatureRegistry;
use b64forge::presentation::cli::{Cli, Commands};
use b64forge::{ConversionResult, format_file_size};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let service = Arc::new(ConversionService::local(cli.service_options()));
    let _cleanup = DrainGuard::new(service.ledger());
    let runner = BackgroundConverter::new(Arc::clone(&service));

    match cli.command {
        Commands::Encode {
            file,
            full,
            output,
            json,
        } => run_encode(&runner, &file, full, output.as_deref(), json).await,
        Commands::Decode { file, output, json } => {
            run_decode(&runner, &file, output.as_deref(), json).await
        }
        Commands::Paste { output } => run_paste(&runner, &output).await,
        Commands::Detect { file } => {
            let detected = service.detect(&file)?;
            println!("{}\t.{}", detected.label(), detected.extension());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if service.is_valid_base64(&text) {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Signatures => {
            list_signatures();
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_encode(
    runner: &BackgroundConverter,
    file: &Path,
    full: bool,
    output: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    if full || output.is_some() {
        let text = runner.get_full_base64(file).await?;
        match output {
            Some(destination) => {
                runner.service().save_text(destination, &text)?;
                println!(
                    "Wrote {} base64 characters to {}",
                    text.len(),
                    destination.display()
                );
            }
            None => println!("{}", text),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let result = runner.encode_file(file).await;
    report(&result, json)?;
    if result.is_success() && !json {
        println!("{}", result.preview().unwrap_or_default());
    }
    Ok(exit_code(&result))
}

async fn run_decode(
    runner: &BackgroundConverter,
    file: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let result = runner.decode_base64_file(file).await;
    report(&result, json)?;

    if let (Some(destination), Some(artifact)) = (output, result.temporary_file_path()) {
        let copied = runner.service().save_decoded(artifact, destination)?;
        if !json {
            println!(
                "Saved {} to {}",
                format_file_size(copied),
                destination.display()
            );
        }
    }
    Ok(exit_code(&result))
}

async fn run_paste(runner: &BackgroundConverter, output: &Path) -> Result<ExitCode> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read standard input")?;

    let staged = runner.service().stage_pasted_base64(&text)?;
    let result = runner.decode_base64_file(staged.as_path()).await;
    runner.service().release_temporary_file(&staged);

    let Some(artifact) = result.temporary_file_path() else {
        bail!("{}", result.error_message().unwrap_or("decode failed"));
    };
    let copied = runner.service().save_decoded(artifact, output)?;
    println!(
        "{} saved to {} ({})",
        result.file_type().unwrap_or_default(),
        output.display(),
        format_file_size(copied)
    );
    Ok(ExitCode::SUCCESS)
}

fn report(result: &ConversionResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if result.is_success() {
        println!("{}", result.summary());
    } else {
        eprintln!("{}", result.error_message().unwrap_or_default());
    }
    Ok(())
}

fn exit_code(result: &ConversionResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn list_signatures() {
    let registry = SignatureRegistry::shared();
    println!("{:<28} {:<6} {:>6}  MAGIC", "TYPE", "EXT", "OFFSET");
    println!("{}", "-".repeat(64));
    for signature in registry.signatures() {
        let detected = signature.detected();
        println!(
            "{:<28} {:<6} {:>6}  {}",
            detected.label(),
            detected.extension(),
            signature.header_offset(),
            hex::encode_upper(signature.header())
        );
    }
    println!("\n{} signatures", registry.signature_count());
}
