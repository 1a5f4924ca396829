//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the history store adapter
//! - Pick the rate source
//! - Create the converter service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ConverterService, inbound::HttpServer};
use converter_repo::{Repo, build_repo};
use converter_types::RateSource;
use exchange_rates::{AwesomeApiRateSource, RateSourceKind, StaticRateSource};

use config::Config;

/// Set when spans should be exported over OTLP.
const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("converter-service"), provider))
}

async fn serve<P: RateSource>(config: &Config, repo: Repo, rates: P) -> anyhow::Result<()> {
    let service = ConverterService::new(repo, rates)
        .with_recent_limit(config.recent_limit)
        .with_dependency_timeout(config.dependency_timeout);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // OpenTelemetry only when a collector is configured
    let otel = if std::env::var_os(OTLP_ENDPOINT_VAR).is_some() {
        Some(init_tracer()?)
    } else {
        None
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,converter_app=debug,converter_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting converter server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!(
        rate_source = %config.rate_source,
        recent_limit = config.recent_limit,
        timeout_secs = config.dependency_timeout.as_secs(),
        "Service settings"
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    let result = match config.rate_source {
        RateSourceKind::Awesome => {
            tracing::info!("Using AwesomeAPI quotes at {}", config.rate_api_url);
            let rates =
                AwesomeApiRateSource::with_timeout(&config.rate_api_url, config.dependency_timeout)?;
            serve(&config, repo, rates).await
        }
        RateSourceKind::Static => {
            let rates = if config.rate_fluctuation {
                StaticRateSource::with_fluctuation()
            } else {
                StaticRateSource::new()
            };
            tracing::info!(fluctuating = rates.is_fluctuating(), "Using static quote table");
            serve(&config, repo, rates).await
        }
    };

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    result
}
