//! Process-wide tracing: an env-filtered fmt subscriber, plus span export
//! over OTLP/HTTP when an endpoint is configured.

use anyhow::Result;
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,tower_http=warn,sqlx=warn";

/// Set once the subscriber is installed; holds the exporter when there is one.
static INSTALLED: OnceCell<Option<SdkTracerProvider>> = OnceCell::new();

/// Logging setup. Unset fields fall back to `RUST_LOG` / `OTLP_ENDPOINT`.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "hr-server",
            env_filter: None,
            otlp_endpoint: None,
        }
    }
}

impl ObsConfig {
    fn resolved_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }

    fn resolved_endpoint(&self) -> Option<String> {
        self.otlp_endpoint
            .clone()
            .or_else(|| std::env::var("OTLP_ENDPOINT").ok())
            .filter(|endpoint| !endpoint.trim().is_empty())
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(config: ObsConfig) -> Result<()> {
    INSTALLED.get_or_try_init(|| install(&config))?;
    Ok(())
}

/// Flush pending spans and stop the exporter, if one was started.
pub fn shutdown_tracing() -> Result<()> {
    if let Some(Some(provider)) = INSTALLED.get() {
        provider.shutdown()?;
    }
    Ok(())
}

fn install(config: &ObsConfig) -> Result<Option<SdkTracerProvider>> {
    let provider = config
        .resolved_endpoint()
        .map(|endpoint| span_exporter(config.service_name, endpoint))
        .transpose()?;
    let otel = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name))
    });

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(config.resolved_filter())?)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(otel)
        .try_init()?;
    Ok(provider)
}

fn span_exporter(service_name: &'static str, endpoint: String) -> Result<SdkTracerProvider> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(endpoint)
        .build()?;
    Ok(SdkTracerProvider::builder()
        .with_resource(Resource::builder().with_service_name(service_name).build())
        .with_batch_exporter(exporter)
        .build())
}
