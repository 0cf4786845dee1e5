// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::ModuleListing;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed reading listing {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid listing JSON {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Loads a listing file produced by the upstream analyzer.
pub fn load_module_listing(path: impl AsRef<Path>) -> Result<ModuleListing, StoreError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_module_listing(&raw, path)
}

/// Parses listing JSON, attributing errors to `path`.
pub fn parse_module_listing(raw: &str, path: &Path) -> Result<ModuleListing, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
