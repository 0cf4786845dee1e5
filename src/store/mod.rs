// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Loading module listings from disk.
//!
//! The listing file is the JSON document the upstream module analyzer emits;
//! Offlens only ever reads it.

pub mod listing_file;

pub use listing_file::{load_module_listing, parse_module_listing, StoreError};
