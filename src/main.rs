use spdx_to_osv::adapters::outbound::console::StderrProgressReporter;
use spdx_to_osv::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use spdx_to_osv::adapters::outbound::formatters::JsonFormatter;
use spdx_to_osv::adapters::outbound::network::{CachingSwhReleaseLookup, OsvClient, SwhClient};
use spdx_to_osv::application::dto::ConversionRequest;
use spdx_to_osv::application::use_cases::ConvertSbomUseCase;
use spdx_to_osv::cli::Args;
use spdx_to_osv::config::{self, Settings};
use spdx_to_osv::osv_conversion::parsers::MavenNaming;
use spdx_to_osv::osv_conversion::services::RelevanceMode;
use spdx_to_osv::ports::outbound::{OutputPresenter, VulnerabilityFormatter};
use spdx_to_osv::shared::error::{ExitCode, SpdxToOsvError};
use spdx_to_osv::shared::Result;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the level
/// chosen by `--verbose` / `--quiet`.
fn init_tracing(args: &Args) {
    let level = match (args.verbose, args.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "warn",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,spdx_to_osv={}", level)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let input_format = args
        .resolve_input_format()
        .map_err(|message| SpdxToOsvError::Validation { message })?;

    // Load configuration (explicit path or auto-discovery)
    let config_file = match &args.config {
        Some(path) => {
            let loaded = config::load_config_from_path(path)?;
            if !args.quiet {
                eprintln!("📄 Loaded config from: {}", path.display());
            }
            Some(loaded)
        }
        None => {
            let cwd = std::env::current_dir()?;
            let discovered = config::discover_config(&cwd)?;
            if discovered.is_some() && !args.quiet {
                eprintln!(
                    "📄 Auto-discovered config file: {}",
                    cwd.join(config::CONFIG_FILENAME).display()
                );
            }
            discovered
        }
    };
    let settings = Settings::merge(&args, config_file);
    tracing::debug!(?settings, "effective settings");

    // Refuse an existing output before any network work
    let writer = args.output.clone().map(FileSystemWriter::new);
    if let Some(writer) = &writer {
        writer.ensure_writable()?;
    }

    // Create adapters (Dependency Injection)
    let document_reader = FileSystemReader::new();
    let osv_client = OsvClient::new(settings.osv_api_url.clone(), settings.timeout)?;
    let swh_lookup = if settings.resolve_swh_releases {
        Some(CachingSwhReleaseLookup::new(SwhClient::new(
            SwhClient::DEFAULT_BASE_URL,
            settings.timeout,
        )?))
    } else {
        None
    };
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    // Create use case with injected dependencies
    let use_case =
        ConvertSbomUseCase::new(document_reader, osv_client, swh_lookup, progress_reporter);

    let request = ConversionRequest::new(args.input.clone(), input_format)
        .with_relevance_mode(if settings.all_packages {
            RelevanceMode::AllPackages
        } else {
            RelevanceMode::Reachable
        })
        .with_maven_naming(if settings.maven_group_names {
            MavenNaming::GroupQualified
        } else {
            MavenNaming::ArtifactOnly
        })
        .with_max_concurrent_queries(settings.max_concurrent_queries)
        .with_resolve_swh_releases(settings.resolve_swh_releases);

    // Execute use case
    let response = use_case.execute(request).await?;
    tracing::info!(
        relevant = response.relevant_package_count,
        requests = response.request_count,
        failed = response.failed_query_count,
        diagnostics = response.diagnostics.len(),
        vulnerabilities = response.vulnerabilities.len(),
        "conversion finished"
    );

    // Format and present output
    let output = JsonFormatter::new().format(&response.vulnerabilities)?;
    match &writer {
        Some(writer) => writer.present(&output)?,
        None => StdoutPresenter::new().present(&output)?,
    }

    if settings.fail_on_vulnerabilities && response.has_vulnerabilities() {
        Ok(ExitCode::VulnerabilitiesFound)
    } else {
        Ok(ExitCode::Success)
    }
}
