//! Process-wide model readiness.
//!
//! Initialized once at startup and read-only afterwards.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, warn};

static READINESS: OnceLock<ModelReadiness> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReadiness {
    weights_file: PathBuf,
    model_loaded: bool,
}

impl ModelReadiness {
    /// Inspects `weights_file` without touching global state.
    pub fn check(weights_file: &Path) -> Self {
        Self {
            weights_file: weights_file.to_path_buf(),
            model_loaded: weights_file.is_file(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.model_loaded
    }

    pub fn weights_file(&self) -> &Path {
        &self.weights_file
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            model_loaded: self.model_loaded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Records readiness for the process. Later calls return the first result.
pub fn initialize(weights_file: &Path) -> &'static ModelReadiness {
    READINESS.get_or_init(|| {
        let readiness = ModelReadiness::check(weights_file);
        if readiness.is_ready() {
            info!(weights = %weights_file.display(), "Model weights found");
        } else {
            warn!(weights = %weights_file.display(), "Model weights not found; design requests will be refused");
        }
        readiness
    })
}

pub fn current() -> Option<&'static ModelReadiness> {
    READINESS.get()
}

pub fn is_model_ready() -> bool {
    current().is_some_and(ModelReadiness::is_ready)
}

/// Health of the process; reports no model before [`initialize`] runs.
pub fn health() -> HealthReport {
    current().map_or(
        HealthReport {
            status: "ok",
            model_loaded: false,
        },
        ModelReadiness::health,
    )
}
