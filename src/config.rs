// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangulation configuration

use crate::geometry::EPSILON;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`TriangulationConfig::load`]
pub const CONFIG_FILE: &str = "lowpoly.toml";

/// Tunables for a triangulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangulationConfig {
    /// Absolute tolerance for degeneracy and circumcircle containment tests
    pub epsilon: f64,
    /// Distance of the super-triangle vertices from the point set, in multiples
    /// of the larger bounding-box side
    pub super_triangle_margin: f64,
    /// Skip points whose coordinates exactly repeat an earlier point
    pub skip_duplicates: bool,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            super_triangle_margin: 20.0,
            skip_duplicates: true,
        }
    }
}

impl TriangulationConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: TriangulationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        log::info!("Loaded triangulation config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let base = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        base.with_env_overrides()
    }

    /// Apply `LOWPOLY_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `LOWPOLY_*` overrides resolved through `lookup`.
    ///
    /// Every value that is present must parse; a malformed override is an
    /// error rather than silently falling back to the current value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(epsilon) = lookup("LOWPOLY_EPSILON") {
            self.epsilon = epsilon
                .parse()
                .with_context(|| format!("Invalid LOWPOLY_EPSILON: {}", epsilon))?;
        }

        if let Some(margin) = lookup("LOWPOLY_SUPER_MARGIN") {
            self.super_triangle_margin = margin
                .parse()
                .with_context(|| format!("Invalid LOWPOLY_SUPER_MARGIN: {}", margin))?;
        }

        if let Some(skip) = lookup("LOWPOLY_SKIP_DUPLICATES") {
            self.skip_duplicates = skip
                .parse()
                .with_context(|| format!("Invalid LOWPOLY_SKIP_DUPLICATES: {}", skip))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Reject values the triangulator cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            bail!("epsilon must be a positive finite number, got {}", self.epsilon);
        }
        if !self.super_triangle_margin.is_finite() || self.super_triangle_margin < 2.0 {
            bail!(
                "super_triangle_margin must be finite and at least 2, got {}",
                self.super_triangle_margin
            );
        }
        Ok(())
    }
}
