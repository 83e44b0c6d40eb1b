pub mod http;
pub mod simulated;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::{SinkConfig, SinkMode};
use crate::infra::sink::http::HttpSink;
use crate::infra::sink::simulated::SimulatedSink;
use crate::usecase::ports::sink::{DocumentSink, RowSink};

pub struct Sinks {
    pub rows: Arc<dyn RowSink>,
    pub documents: Arc<dyn DocumentSink>,
}

pub fn build_sinks(config: &SinkConfig) -> Result<Sinks> {
    match config.mode {
        SinkMode::Simulated => {
            let sink = Arc::new(SimulatedSink::new(Duration::from_millis(
                config.simulated_delay_ms,
            )));
            tracing::info!(delay_ms = config.simulated_delay_ms, "using simulated sink");
            Ok(Sinks {
                rows: sink.clone(),
                documents: sink,
            })
        }
        SinkMode::Http => {
            let sink = Arc::new(
                HttpSink::new(
                    config.rows_endpoint.clone(),
                    config.documents_endpoint.clone(),
                    config.request_timeout_ms.map(Duration::from_millis),
                )
                .context("failed to build http sink")?,
            );
            tracing::info!(endpoint = %config.rows_endpoint, "using http sink");
            Ok(Sinks {
                rows: sink.clone(),
                documents: sink,
            })
        }
    }
}
