// Copyright (c) 2026 The molsasa developers
// Part of the molsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! PDB file format parser.
//!
//! Reads ATOM/HETATM records from fixed-column PDB content. Hydrogen,
//! heteroatom, and water filtering happens here; alternate-location
//! resolution is shared with the mmCIF parser and happens in the parent
//! module.

use super::{AtomRecord, ParseOptions, fix_undefined, is_acceptable, normalize_atom_name};

/// Extract a trimmed substring from fixed-width PDB columns (1-indexed,
/// inclusive), tolerating short lines.
fn column(line: &str, start: usize, end: usize) -> &str {
    let start_idx = start.saturating_sub(1);
    if start_idx >= line.len() {
        return "";
    }
    line.get(start_idx..end.min(line.len())).unwrap_or("").trim()
}

fn column_f64(line: &str, start: usize, end: usize) -> Option<f64> {
    let s = column(line, start, end);
    if s.is_empty() { None } else { s.parse().ok() }
}

fn column_i32(line: &str, start: usize, end: usize) -> Option<i32> {
    let s = column(line, start, end);
    if s.is_empty() { None } else { s.parse().ok() }
}

/// Parse one ATOM/HETATM line into an [`AtomRecord`]. Serial, sequence
/// number, and all three coordinates are required; the rest may be blank.
fn parse_atom_line(line: &str) -> Option<AtomRecord> {
    let tag = column(line, 1, 6);
    if tag != "ATOM" && tag != "HETATM" {
        return None;
    }

    let name = column(line, 13, 16);
    if name.is_empty() {
        return None;
    }

    Some(AtomRecord {
        record_name: tag.to_string(),
        serial: column_i32(line, 7, 11)?,
        name: normalize_atom_name(name),
        alt_loc: fix_undefined(column(line, 17, 17)),
        res_name: fix_undefined(column(line, 18, 20)),
        chain_id: fix_undefined(column(line, 22, 22)),
        res_seq: column_i32(line, 23, 26)?,
        i_code: fix_undefined(column(line, 27, 27)),
        x: column_f64(line, 31, 38)?,
        y: column_f64(line, 39, 46)?,
        z: column_f64(line, 47, 54)?,
        element: fix_undefined(column(line, 77, 78)),
    })
}

/// Parse PDB content into accepted atom records.
#[must_use]
pub fn parse_pdb(content: &str, options: &ParseOptions) -> Vec<AtomRecord> {
    let mut records = Vec::new();
    let mut model_num = 1;

    for line in content.lines() {
        let tag = column(line, 1, 6);
        if tag == "END" {
            break;
        }
        if tag == "ENDMDL" {
            if !options.as_assembly {
                break;
            }
            model_num += 1;
            continue;
        }
        if tag != "ATOM" && tag != "HETATM" {
            continue;
        }

        let Some(mut record) = parse_atom_line(line) else {
            continue;
        };
        if !is_acceptable(&record, options) {
            continue;
        }
        // Distinguish chains of later models in assembly mode
        if options.as_assembly && model_num > 1 {
            record.chain_id = format!("{}{}", record.chain_id, model_num);
        }
        records.push(record);
    }

    records
}
