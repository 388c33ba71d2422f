// Copyright (c) 2026 The molsasa developers
// Part of the molsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! mmCIF file format parser.
//!
//! Extracts `_atom_site` loop blocks. Tokenization handles quoted values
//! and `#` comments; multi-line semicolon text fields do not occur inside
//! `_atom_site` loops and are not supported.

use super::{AtomRecord, ParseOptions, fix_undefined, is_acceptable, normalize_atom_name};

/// Column positions of the `_atom_site` fields we consume, filled in while
/// reading the loop header. Unrecognized columns still advance the width so
/// data rows stay aligned.
#[derive(Debug, Default)]
struct ColumnMap {
    n_cols: usize,
    group: Option<usize>,
    serial: Option<usize>,
    atom_auth: Option<usize>,
    atom_label: Option<usize>,
    alt_loc: Option<usize>,
    comp_auth: Option<usize>,
    comp_label: Option<usize>,
    asym_auth: Option<usize>,
    asym_label: Option<usize>,
    seq_auth: Option<usize>,
    seq_label: Option<usize>,
    ins_code: Option<usize>,
    x: Option<usize>,
    y: Option<usize>,
    z: Option<usize>,
    element: Option<usize>,
    model: Option<usize>,
}

impl ColumnMap {
    /// Register the next header column.
    fn add_column(&mut self, field: &str) {
        let idx = Some(self.n_cols);
        self.n_cols += 1;
        match field {
            "group_PDB" => self.group = idx,
            "id" => self.serial = idx,
            "auth_atom_id" => self.atom_auth = idx,
            "label_atom_id" => self.atom_label = idx,
            "label_alt_id" => self.alt_loc = idx,
            "auth_comp_id" => self.comp_auth = idx,
            "label_comp_id" => self.comp_label = idx,
            "auth_asym_id" => self.asym_auth = idx,
            "label_asym_id" => self.asym_label = idx,
            "auth_seq_id" => self.seq_auth = idx,
            "label_seq_id" => self.seq_label = idx,
            "pdbx_PDB_ins_code" => self.ins_code = idx,
            "Cartn_x" => self.x = idx,
            "Cartn_y" => self.y = idx,
            "Cartn_z" => self.z = idx,
            "type_symbol" => self.element = idx,
            "pdbx_PDB_model_num" => self.model = idx,
            _ => {}
        }
    }

    fn cell<'a>(&self, row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map_or("", String::as_str)
    }

    /// Prefer the `auth_*` column, falling back to its `label_*` twin when
    /// the file carries only one of the pair.
    fn auth_or_label<'a>(
        &self,
        row: &'a [String],
        auth: Option<usize>,
        label: Option<usize>,
    ) -> &'a str {
        match self.cell(row, auth) {
            "" => self.cell(row, label),
            value => value,
        }
    }

    fn model_id<'a>(&self, row: &'a [String]) -> &'a str {
        self.cell(row, self.model)
    }

    /// Assemble an [`AtomRecord`] from one data row.
    fn record_from_row(&self, row: &[String]) -> Option<AtomRecord> {
        let x: f64 = self.cell(row, self.x).parse().ok()?;
        let y: f64 = self.cell(row, self.y).parse().ok()?;
        let z: f64 = self.cell(row, self.z).parse().ok()?;
        let serial: i32 = self.cell(row, self.serial).parse().ok()?;
        let res_seq: i32 = self
            .auth_or_label(row, self.seq_auth, self.seq_label)
            .parse()
            .ok()?;

        let name = self.auth_or_label(row, self.atom_auth, self.atom_label);
        let group = self.cell(row, self.group);
        if name.is_empty() || group.is_empty() {
            return None;
        }

        Some(AtomRecord {
            record_name: group.to_string(),
            serial,
            name: normalize_atom_name(name),
            alt_loc: fix_undefined(self.cell(row, self.alt_loc)),
            res_name: fix_undefined(self.auth_or_label(row, self.comp_auth, self.comp_label)),
            chain_id: fix_undefined(self.auth_or_label(row, self.asym_auth, self.asym_label)),
            res_seq,
            i_code: fix_undefined(self.cell(row, self.ins_code)),
            x,
            y,
            z,
            element: fix_undefined(self.cell(row, self.element)),
        })
    }
}

/// Split one line into CIF tokens: whitespace-separated words, quoted
/// strings, with `#` starting a comment.
fn tokenize_line(line: &str, out: &mut Vec<String>) {
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b'#' {
            return;
        }

        if bytes[pos] == b'\'' || bytes[pos] == b'"' {
            let quote = bytes[pos];
            pos += 1;
            let start = pos;
            while pos < bytes.len() && bytes[pos] != quote {
                pos += 1;
            }
            out.push(String::from_utf8_lossy(&bytes[start..pos]).to_string());
            if pos < bytes.len() {
                pos += 1; // closing quote
            }
        } else {
            let start = pos;
            while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            out.push(String::from_utf8_lossy(&bytes[start..pos]).to_string());
        }
    }
}

/// True for tokens that terminate an `_atom_site` data block.
fn ends_data_block(token: &str) -> bool {
    token.starts_with('_') || token.starts_with("data_") || token == "loop_"
}

/// Parse mmCIF content into accepted atom records.
#[must_use]
pub fn parse_mmcif(content: &str, options: &ParseOptions) -> Vec<AtomRecord> {
    let mut tokens = Vec::new();
    for line in content.lines() {
        tokenize_line(line, &mut tokens);
    }

    let mut records = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() {
        if tokens[pos] != "loop_" {
            pos += 1;
            continue;
        }
        pos += 1;

        // Header: consecutive _atom_site.* field names
        let mut columns = ColumnMap::default();
        while pos < tokens.len()
            && let Some(field) = tokens[pos].strip_prefix("_atom_site.")
        {
            columns.add_column(field);
            pos += 1;
        }
        if columns.n_cols == 0 {
            continue; // some other loop category
        }

        pos = read_atom_site_rows(&tokens, pos, &columns, options, &mut records);
    }

    records
}

/// Consume data rows of an `_atom_site` loop; returns the position of the
/// first token past the block.
fn read_atom_site_rows(
    tokens: &[String],
    mut pos: usize,
    columns: &ColumnMap,
    options: &ParseOptions,
    records: &mut Vec<AtomRecord>,
) -> usize {
    let mut first_model_id: Option<String> = None;

    while pos < tokens.len() && !ends_data_block(&tokens[pos]) {
        if pos + columns.n_cols > tokens.len() {
            return tokens.len(); // truncated row
        }
        let row = &tokens[pos..pos + columns.n_cols];
        pos += columns.n_cols;

        let model_id = columns.model_id(row).to_string();
        if first_model_id.is_none() {
            first_model_id = Some(model_id.clone());
        }

        // Only the first model is read unless assembling
        let in_scope =
            options.as_assembly || first_model_id.as_ref().is_some_and(|fm| fm == &model_id);

        if in_scope
            && let Some(mut record) = columns.record_from_row(row)
            && is_acceptable(&record, options)
        {
            if options.as_assembly && model_id != "1" && !model_id.is_empty() {
                record.chain_id = format!("{}{}", record.chain_id, model_id);
            }
            records.push(record);
        }
    }

    pos
}
