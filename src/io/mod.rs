// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - importing point sets and exporting results

mod export_json;
mod exporter;
mod importer;

pub use export_json::{export as export_json, to_json_string, TriangulationOutput};
pub use exporter::{export_stl, export_stl_ascii};
pub use importer::{import_points, parse_points_json, parse_points_text};
