// Copyright (c) 2026 The molsasa developers
// Part of the molsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Input parsing for PDB, mmCIF, and XYZR structure files.
//!
//! Provides format auto-detection, atom-record filtering, alternate-location
//! resolution, and radius/class assignment through the [`Classifier`].

pub mod mmcif;
pub mod pdb;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::classify::Classifier;
use crate::types::{Atom, AtomClass};

/// One ATOM/HETATM record as read from a structure file.
#[derive(Clone, Debug)]
pub struct AtomRecord {
    /// "ATOM" or "HETATM".
    pub record_name: String,
    /// Serial number from the file.
    pub serial: i32,
    /// Atom name, normalized ("CA", "OG1", ...).
    pub name: String,
    /// Alternate location indicator; cleared once resolved.
    pub alt_loc: String,
    /// Three-letter residue name.
    pub res_name: String,
    /// Chain the atom belongs to.
    pub chain_id: String,
    /// Sequence number of the residue within its chain.
    pub res_seq: i32,
    /// Insertion code, usually empty.
    pub i_code: String,
    /// Position in Ångström.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Element symbol, possibly empty.
    pub element: String,
}

/// Supported structure file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Protein Data Bank fixed-column records (.pdb, .ent, .pdb1).
    Pdb,
    /// Macromolecular CIF `_atom_site` loops (.cif, .mmcif).
    Mmcif,
    /// Bare `x y z radius` columns (.xyzr).
    Xyzr,
}

impl InputFormat {
    /// Detect the format from a file extension.
    fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let format = match ext.as_str() {
            "pdb" | "ent" | "pdb1" => Self::Pdb,
            "cif" | "mmcif" => Self::Mmcif,
            "xyzr" => Self::Xyzr,
            _ => return None,
        };
        Some(format)
    }

    /// Detect the format from the first non-empty line of content.
    fn from_content(content: &str) -> Option<Self> {
        let line = content.lines().map(str::trim).find(|l| !l.is_empty())?;

        if ["data_", "loop_", "_"].iter().any(|p| line.starts_with(p)) {
            return Some(Self::Mmcif);
        }
        if ["ATOM", "HETATM", "HEADER", "REMARK"]
            .iter()
            .any(|p| line.starts_with(p))
        {
            return Some(Self::Pdb);
        }
        // XYZR: the line ends in at least 4 numeric columns
        let numeric = line
            .split_whitespace()
            .rev()
            .take_while(|w| w.parse::<f64>().is_ok())
            .count();
        (numeric >= 4).then_some(Self::Xyzr)
    }
}

/// Filters applied while reading a structure file.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Drop HETATM records entirely.
    pub exclude_heteroatoms: bool,
    /// Keep hydrogens, which are dropped by default.
    pub include_hydrogens: bool,
    /// Read all models of a multi-model file as one assembly.
    pub as_assembly: bool,
}

/// Result of parsing a structure file.
///
/// For XYZR input `records` is empty and every class is `Unknown` since the
/// format carries no atom metadata.
#[derive(Debug, Default)]
pub struct ParsedStructure {
    /// Atoms with coordinates and assigned radii.
    pub atoms: Vec<Atom>,
    /// Polarity class per atom.
    pub classes: Vec<AtomClass>,
    /// Original atom records with metadata.
    pub records: Vec<AtomRecord>,
}

/// Parse XYZR content (last 4 whitespace-separated columns per line).
fn parse_xyzr(content: &str) -> Vec<Atom> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace().rev();
            let r: f64 = parts.next()?.parse().ok()?;
            let z: f64 = parts.next()?.parse().ok()?;
            let y: f64 = parts.next()?.parse().ok()?;
            let x: f64 = parts.next()?.parse().ok()?;
            Some(Atom::new(x, y, z, r))
        })
        .collect()
}

/// Fix undefined string values ("." or "?" become empty).
pub(crate) fn fix_undefined(s: &str) -> String {
    match s {
        "." | "?" => String::new(),
        _ => s.to_string(),
    }
}

/// Move leading digits to the end of an atom name ("1HG2" becomes "HG21").
pub(crate) fn normalize_atom_name(name: &str) -> String {
    let split = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    let (digits, rest) = name.split_at(split);
    format!("{rest}{digits}")
}

/// Check if an atom is a hydrogen based on name or element.
pub(crate) fn is_hydrogen(record: &AtomRecord) -> bool {
    record.name.starts_with('H') || record.element == "H" || record.element == "D"
}

/// Record-level filters shared by the PDB and mmCIF parsers. Alternate
/// locations are *not* filtered here; see [`resolve_alt_locs`].
pub(crate) fn is_acceptable(record: &AtomRecord, options: &ParseOptions) -> bool {
    if record.record_name == "HETATM" && options.exclude_heteroatoms {
        return false;
    }
    if !options.include_hydrogens && is_hydrogen(record) {
        return false;
    }
    // Water is never part of the solute
    if record.res_name == "HOH" {
        return false;
    }
    true
}

/// Resolve alternate locations: per atom identity (chain, residue, insertion
/// code, atom name) the first alt-loc seen wins; records carrying any other
/// alt-loc for the same identity are dropped. One warning summarizes the
/// drops.
fn resolve_alt_locs(records: Vec<AtomRecord>) -> Vec<AtomRecord> {
    use std::collections::HashMap;

    let mut first_seen: HashMap<(String, i32, String, String), String> = HashMap::new();
    let mut dropped = 0usize;

    let mut kept: Vec<AtomRecord> = records
        .into_iter()
        .filter(|r| {
            let key = (
                r.chain_id.clone(),
                r.res_seq,
                r.i_code.clone(),
                r.name.clone(),
            );
            let chosen = first_seen.entry(key).or_insert_with(|| r.alt_loc.clone());
            if *chosen == r.alt_loc {
                true
            } else {
                dropped += 1;
                false
            }
        })
        .collect();

    if dropped > 0 {
        warn!("dropped {dropped} atom(s) with secondary alternate locations");
    }
    for r in &mut kept {
        r.alt_loc.clear();
    }
    kept
}

/// Assign radii and classes to records, producing the final structure.
fn records_to_structure(records: Vec<AtomRecord>, classifier: &Classifier) -> ParsedStructure {
    let mut atoms = Vec::with_capacity(records.len());
    let mut classes = Vec::with_capacity(records.len());
    let mut unknown = 0usize;

    for r in &records {
        let props = classifier.classify(&r.res_name, &r.name, &r.element);
        if props.class == AtomClass::Unknown {
            unknown += 1;
        }
        atoms.push(Atom::new(r.x, r.y, r.z, props.radius));
        classes.push(props.class);
    }

    if unknown > 0 {
        warn!("{unknown} atom(s) could not be classified (class Unknown)");
    }

    ParsedStructure {
        atoms,
        classes,
        records,
    }
}

/// Parse structure content with a known format.
#[must_use]
pub fn parse_str(
    content: &str,
    format: InputFormat,
    options: &ParseOptions,
    classifier: &Classifier,
) -> ParsedStructure {
    match format {
        InputFormat::Xyzr => {
            let atoms = parse_xyzr(content);
            let classes = vec![AtomClass::Unknown; atoms.len()];
            ParsedStructure {
                atoms,
                classes,
                records: Vec::new(),
            }
        }
        InputFormat::Pdb => {
            let records = resolve_alt_locs(pdb::parse_pdb(content, options));
            debug!("parsed {} PDB atom records", records.len());
            records_to_structure(records, classifier)
        }
        InputFormat::Mmcif => {
            let records = resolve_alt_locs(mmcif::parse_mmcif(content, options));
            debug!("parsed {} mmCIF atom records", records.len());
            records_to_structure(records, classifier)
        }
    }
}

/// Parse a structure file with auto-detected format.
///
/// # Errors
/// Returns an error if the file cannot be read or the format cannot be
/// detected.
pub fn parse_file(
    path: &Path,
    options: &ParseOptions,
    classifier: &Classifier,
) -> io::Result<ParsedStructure> {
    let content = fs::read_to_string(path)?;
    let format = InputFormat::from_extension(path)
        .or_else(|| InputFormat::from_content(&content))
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "unable to detect input format")
        })?;
    info!("detected input format {format:?}");
    Ok(parse_str(&content, format, options, classifier))
}

/// Parse a structure from stdin with content-based format detection.
///
/// # Errors
/// Returns an error if stdin cannot be read or the format cannot be
/// detected.
pub fn parse_stdin(
    options: &ParseOptions,
    classifier: &Classifier,
) -> io::Result<ParsedStructure> {
    let mut content = String::new();
    io::stdin().lock().read_to_string(&mut content)?;
    let format = InputFormat::from_content(&content).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            "unable to detect input format from stdin",
        )
    })?;
    info!("detected input format {format:?} from stdin");
    Ok(parse_str(&content, format, options, classifier))
}

/// Dense group ids (0, 1, 2, ... in first-appearance order) for whatever key
/// the closure derives from each record.
fn group_by_key<K: std::hash::Hash + Eq>(
    records: &[AtomRecord],
    key: impl Fn(&AtomRecord) -> K,
) -> Vec<i32> {
    use std::collections::HashMap;

    let mut ids: HashMap<K, i32> = HashMap::new();
    records
        .iter()
        .map(|r| {
            #[allow(clippy::cast_possible_truncation)]
            let next = ids.len() as i32;
            *ids.entry(key(r)).or_insert(next)
        })
        .collect()
}

/// Group atoms by chain: one dense group id per atom.
#[must_use]
pub fn build_chain_grouping(records: &[AtomRecord]) -> Vec<i32> {
    group_by_key(records, |r| r.chain_id.clone())
}

/// Group atoms by residue (chain + sequence number + insertion code).
#[must_use]
pub fn build_residue_grouping(records: &[AtomRecord]) -> Vec<i32> {
    group_by_key(records, |r| {
        (r.chain_id.clone(), r.res_seq, r.i_code.clone())
    })
}
