use std::fmt::Display;
use std::io;
use std::path::PathBuf;

use tracing_subscriber::{
    EnvFilter, Layer, filter::filter_fn, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::rotating::{RotatingFileWriter, RotationPolicy};

/// Target of audit events. Events with this target are written to the audit
/// log file in addition to stdout.
pub const AUDIT_TARGET: &str = "audit";

/// Where and how the audit log is written.
#[derive(Debug, Clone)]
pub struct AuditLogConfig {
    pub dir: PathBuf,
    pub file: String,
    pub max_bytes: u64,
    pub backup_count: usize,
}

impl AuditLogConfig {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

/// Initialize structured stdout tracing. Call once at service startup.
/// Uses JSON format with env-filter (`RUST_LOG` env var, default `info`).
///
/// With an [`AuditLogConfig`], `audit` events are also appended to a
/// size-rotated plain-text file.
///
/// Safe to call multiple times; subsequent calls are silently ignored.
pub fn init_tracing(audit: Option<&AuditLogConfig>) -> io::Result<()> {
    let stdout = fmt::layer().json().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );

    let audit_layer = match audit {
        Some(config) => {
            let writer = RotatingFileWriter::open(
                config.path(),
                RotationPolicy {
                    max_bytes: config.max_bytes,
                    backup_count: config.backup_count,
                },
            )?;
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_filter(filter_fn(|meta| meta.target() == AUDIT_TARGET)),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(stdout)
        .with(audit_layer)
        .try_init();
    Ok(())
}

/// Record a user-visible action in the audit log.
pub fn audit(action: impl Display) {
    tracing::info!(target: AUDIT_TARGET, "ACTION: {action}");
}
