//! OTLP tracer provider.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::{ServerConfig, observability::ObservabilityConfig};

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ServerConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let ObservabilityConfig {
        otel_exporter_otlp_endpoint,
        otel_exporter_otlp_timeout_seconds,
        otel_service_name,
        otel_service_version,
        otel_deployment_environment,
        otel_trace_sample_ratio,
        ..
    } = &config.observability;

    let resource = Resource::builder_empty()
        .with_service_name(otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                otel_deployment_environment.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(*otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            sample_ratio(*otel_trace_sample_ratio),
        ))))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

/// Clamp to `[0, 1]`; NaN samples nothing.
fn sample_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }

    ratio.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::sample_ratio;

    #[test]
    fn sample_ratio_is_clamped() {
        assert!((sample_ratio(1.5) - 1.0).abs() < f64::EPSILON);
        assert!(sample_ratio(-0.5).abs() < f64::EPSILON);
        assert!(sample_ratio(f64::NAN).abs() < f64::EPSILON);
        assert!((sample_ratio(0.25) - 0.25).abs() < f64::EPSILON);
    }
}
