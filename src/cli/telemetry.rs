//! Tracing subscriber setup: formatted logs plus optional OTLP span export.

use anyhow::Result;
use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{runtime::Tokio, trace::TracerProvider, Resource};
use std::{sync::OnceLock, time::Duration};
use tracing::{debug, warn, Level};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

static TRACER_PROVIDER: OnceLock<TracerProvider> = OnceLock::new();

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Install the global subscriber.
///
/// Spans are exported over OTLP/gRPC only when `OTEL_EXPORTER_OTLP_ENDPOINT`
/// is set; otherwise logging stays local.
///
/// # Errors
/// Returns an error if the exporter cannot be built or a global subscriber is
/// already installed.
pub fn init(verbosity_level: Level, log_format: LogFormat) -> Result<()> {
    let tracer = match otlp_endpoint() {
        Some(endpoint) => {
            let exporter = SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(3))
                .build()?;

            let provider = TracerProvider::builder()
                .with_batch_exporter(exporter, Tokio)
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ]))
                .build();

            let tracer = provider.tracer(env!("CARGO_PKG_NAME"));
            global::set_tracer_provider(provider.clone());
            let _ = TRACER_PROVIDER.set(provider);
            Some(tracer)
        }
        None => None,
    };

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let (text_layer, json_layer) = match log_format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_thread_ids(true)
                    .with_target(false),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            ),
        ),
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(tracer.map(OpenTelemetryLayer::new));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Flush pending spans and shut down the tracer provider (noop if not initialized)
pub fn shutdown_tracer() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        debug!("shutting down tracer provider");
        if let Err(err) = provider.shutdown() {
            warn!("Failed to shut down tracer provider: {err}");
        }
        debug!("tracer provider shutdown complete");
    }
}

fn otlp_endpoint() -> Option<String> {
    std::env::var(OTLP_ENDPOINT_ENV)
        .ok()
        .map(|endpoint| endpoint.trim().to_string())
        .filter(|endpoint| !endpoint.is_empty())
}
