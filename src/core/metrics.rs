use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static RECORDER: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = RECORDER.set(handle);
    Ok(())
}

/// Text snapshot of the registry, None while the exporter is off.
pub(crate) fn render() -> Option<String> {
    RECORDER.get().map(PrometheusHandle::render)
}
