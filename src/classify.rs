// Copyright (c) 2026 The molsasa developers
// Part of the molsasa project, licensed under the MIT License.
// SPDX-License-Identifier: MIT

//! Atom classification: van der Waals radius and polarity per atom.
//!
//! Rules pair an optional residue name with an atom-name pattern (exact,
//! prefix, or match-all). Every rule is scored against the atom and the most
//! specific match wins: a residue-specific rule beats a residue wildcard,
//! an exact atom name beats a prefix, and a longer prefix beats a shorter
//! one. Between equally specific rules the later one wins, so custom rules
//! loaded on top of the built-ins override them.

use crate::error::SasaError;
use crate::types::AtomClass;

const DEFAULT_RADIUS: f64 = 1.8;

/// Radius and polarity assigned to one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomProperties {
    pub radius: f64,
    pub class: AtomClass,
}

/// Atom-name pattern of one rule.
#[derive(Debug, Clone)]
enum AtomPattern {
    Exact(String),
    Prefix(String),
    Any,
}

impl AtomPattern {
    fn parse(text: &str) -> Self {
        if text == "*" {
            Self::Any
        } else if let Some(stem) = text.strip_suffix('*') {
            Self::Prefix(stem.to_string())
        } else {
            Self::Exact(text.to_string())
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(s) => name == s,
            Self::Prefix(p) => name.starts_with(p.as_str()),
            Self::Any => true,
        }
    }

    /// Higher is more specific.
    #[allow(clippy::cast_possible_truncation)]
    fn rank(&self) -> u32 {
        match self {
            Self::Exact(_) => u32::MAX,
            Self::Prefix(p) => 1 + p.len() as u32,
            Self::Any => 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    /// `None` applies to every residue.
    residue: Option<String>,
    atom: AtomPattern,
    props: AtomProperties,
}

impl Rule {
    /// Specificity of this rule for the given atom, `None` if it does not
    /// apply. Residue-specific rules outrank residue wildcards; within a
    /// tier the atom-pattern rank decides.
    fn score(&self, res_name: &str, atom_name: &str) -> Option<(bool, u32)> {
        if let Some(res) = &self.residue
            && res != res_name
        {
            return None;
        }
        if !self.atom.matches(atom_name) {
            return None;
        }
        Some((self.residue.is_some(), self.atom.rank()))
    }
}

/// Best-match rule classifier.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Classifier with the built-in protein rule set.
    #[must_use]
    pub fn new() -> Self {
        let mut c = Self::empty();
        for &(symbol, radius, class) in ELEMENTS {
            c.push(None, &format!("{symbol}*"), radius, class);
        }
        for &(pattern, radius) in HALOGENS {
            c.push(None, pattern, radius, AtomClass::Apolar);
        }
        for &(name, radius, class) in BACKBONE {
            c.push(None, name, radius, class);
        }
        for &(residue, atoms) in SIDECHAINS {
            for &(pattern, radius) in atoms {
                c.push(Some(residue), pattern, radius, class_of_pattern(pattern));
            }
        }
        for &(ion, radius) in IONS {
            c.push(Some(ion), ion, radius, AtomClass::Unknown);
        }
        c
    }

    /// Empty classifier for fully custom rule sets.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    fn push(&mut self, residue: Option<&str>, pattern: &str, radius: f64, class: AtomClass) {
        self.rules.push(Rule {
            residue: residue.map(str::to_string),
            atom: AtomPattern::parse(pattern),
            props: AtomProperties { radius, class },
        });
    }

    /// Load custom rules from text, one per line:
    /// `resName atomPattern radius [polar|apolar|unknown]`.
    /// The class column may be omitted, in which case it is inferred from
    /// the pattern's element. Lines starting with `#` are comments.
    ///
    /// # Errors
    /// [`SasaError::InvalidInput`] on malformed lines or negative radii.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), SasaError> {
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut cols = line.split_whitespace();
            let (Some(res), Some(pattern), Some(radius_text)) =
                (cols.next(), cols.next(), cols.next())
            else {
                return Err(SasaError::invalid_input(format!(
                    "classifier rule needs at least 3 columns: {line}"
                )));
            };

            let radius: f64 = radius_text.parse().map_err(|_| {
                SasaError::invalid_input(format!("invalid radius value: {radius_text}"))
            })?;
            if radius < 0.0 {
                return Err(SasaError::invalid_input(format!(
                    "negative radius: {radius}"
                )));
            }

            let class = match cols.next() {
                Some("polar") => AtomClass::Polar,
                Some("apolar") => AtomClass::Apolar,
                Some("unknown") => AtomClass::Unknown,
                Some(other) => {
                    return Err(SasaError::invalid_input(format!(
                        "unknown class '{other}' in rule: {line}"
                    )));
                }
                None => class_of_pattern(pattern),
            };

            let residue = if res == "*" { None } else { Some(res) };
            self.push(residue, pattern, radius, class);
        }
        Ok(())
    }

    /// Look up radius and class for one atom.
    ///
    /// `element` is the declared element symbol (may be empty); it is only
    /// consulted when no name rule matches.
    #[must_use]
    pub fn classify(&self, res_name: &str, atom_name: &str, element: &str) -> AtomProperties {
        if !atom_name.is_empty() && atom_name != "*" {
            let mut best: Option<((bool, u32), AtomProperties)> = None;
            for rule in &self.rules {
                if let Some(score) = rule.score(res_name, atom_name)
                    && best.as_ref().is_none_or(|(top, _)| score >= *top)
                {
                    best = Some((score, rule.props));
                }
            }
            if let Some((_, props)) = best {
                return props;
            }
        }

        let symbol = if element.is_empty() {
            leading_element(atom_name)
        } else {
            element
        };
        element_properties(symbol).unwrap_or(AtomProperties {
            radius: DEFAULT_RADIUS,
            class: AtomClass::Unknown,
        })
    }
}

/// Leading alphabetic character of an atom name, as a best-effort element.
fn leading_element(atom_name: &str) -> &str {
    let start = atom_name
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(0);
    atom_name.get(start..=start).unwrap_or("")
}

/// Polarity implied by a pattern's element.
fn class_of_pattern(pattern: &str) -> AtomClass {
    element_properties(leading_element(pattern)).map_or(AtomClass::Unknown, |p| p.class)
}

/// Fallback radius and class per element symbol.
fn element_properties(symbol: &str) -> Option<AtomProperties> {
    let symbol = if symbol == "D" { "H" } else { symbol };
    ELEMENTS
        .iter()
        .find(|(s, ..)| *s == symbol)
        .map(|&(_, radius, class)| AtomProperties { radius, class })
}

/// Element fallbacks, also installed as `X*` name-prefix rules.
const ELEMENTS: &[(&str, f64, AtomClass)] = &[
    ("C", 1.80, AtomClass::Apolar),
    ("N", 1.60, AtomClass::Polar),
    ("O", 1.50, AtomClass::Polar),
    ("P", 1.90, AtomClass::Polar),
    ("S", 1.90, AtomClass::Polar),
    ("H", 1.30, AtomClass::Apolar),
];

const HALOGENS: &[(&str, f64)] = &[("F*", 1.33), ("CL*", 1.81), ("BR*", 1.96), ("I*", 2.20)];

/// Backbone atoms, common to every residue.
const BACKBONE: &[(&str, f64, AtomClass)] = &[
    ("C", 1.75, AtomClass::Apolar),
    ("CA", 1.90, AtomClass::Apolar),
    ("N", 1.70, AtomClass::Polar),
    ("O", 1.49, AtomClass::Polar),
];

/// Side-chain radii per residue; polarity follows the pattern's element.
const SIDECHAINS: &[(&str, &[(&str, f64)])] = &[
    ("ALA", &[("CB", 1.92)]),
    (
        "ARG",
        &[
            ("CB", 1.91),
            ("CD*", 1.88),
            ("CG*", 1.92),
            ("CZ*", 1.80),
            ("NE*", 1.62),
            ("NH1", 1.62),
            ("NH2", 1.67),
        ],
    ),
    (
        "ASN",
        &[("CB", 1.91), ("CG*", 1.81), ("ND2", 1.62), ("OD1", 1.52)],
    ),
    (
        "ASP",
        &[("CB", 1.91), ("CG*", 1.76), ("OD1", 1.49), ("OD2", 1.49)],
    ),
    ("CYS", &[("CB", 1.91), ("S*", 1.88)]),
    (
        "GLN",
        &[
            ("CB", 1.91),
            ("CD*", 1.81),
            ("CG*", 1.80),
            ("NE2", 1.62),
            ("OE1", 1.52),
        ],
    ),
    (
        "GLU",
        &[
            ("CB", 1.91),
            ("CD*", 1.76),
            ("CG*", 1.88),
            ("OE1", 1.49),
            ("OE2", 1.49),
        ],
    ),
    (
        "HIS",
        &[
            ("CB", 1.91),
            ("CD*", 1.74),
            ("CE*", 1.74),
            ("CG*", 1.80),
            ("ND1", 1.60),
            ("NE2", 1.60),
        ],
    ),
    (
        "ILE",
        &[("CB", 2.01), ("CD1", 1.92), ("CG1", 1.92), ("CG2", 1.92)],
    ),
    (
        "LEU",
        &[("CB", 1.91), ("CD1", 1.92), ("CD2", 1.92), ("CG*", 2.01)],
    ),
    (
        "LYS",
        &[
            ("CB", 1.91),
            ("CD*", 1.92),
            ("CE*", 1.88),
            ("CG*", 1.92),
            ("NZ*", 1.67),
        ],
    ),
    (
        "MET",
        &[("CB", 1.91), ("CE*", 1.80), ("CG*", 1.92), ("S*", 1.94)],
    ),
    (
        "PHE",
        &[
            ("CB", 1.91),
            ("CD*", 1.82),
            ("CE*", 1.82),
            ("CG*", 1.74),
            ("CZ*", 1.82),
        ],
    ),
    ("PRO", &[("CB", 1.91), ("CD*", 1.92), ("CG*", 1.92)]),
    ("SER", &[("CB", 1.91), ("OG*", 1.54)]),
    ("THR", &[("CB", 2.01), ("CG2", 1.92), ("OG*", 1.54)]),
    (
        "TRP",
        &[
            ("CB", 1.91),
            ("CD*", 1.82),
            ("CE*", 1.82),
            ("CE2", 1.74),
            ("CG*", 1.74),
            ("CH*", 1.82),
            ("CZ*", 1.82),
            ("NE1", 1.66),
        ],
    ),
    (
        "TYR",
        &[
            ("CB", 1.91),
            ("CD*", 1.82),
            ("CE*", 1.82),
            ("CG*", 1.74),
            ("CZ*", 1.80),
            ("OH*", 1.54),
        ],
    ),
    (
        "VAL",
        &[("CB", 2.01), ("CG1", 1.92), ("CG2", 1.92)],
    ),
];

/// Ionic radii for common metal hetero-atoms; in PDB files the residue name
/// of a bare ion equals its atom name.
const IONS: &[(&str, f64)] = &[
    ("CA", 1.00),
    ("CD", 0.95),
    ("CO", 0.65),
    ("CU", 0.73),
    ("FE", 0.61),
    ("HG", 1.02),
    ("K", 1.38),
    ("LI", 0.76),
    ("MG", 0.72),
    ("MN", 0.83),
    ("NA", 1.02),
    ("NI", 0.69),
    ("ZN", 0.74),
];
