//! Per-atom SASA results and aggregation.

use serde::Serialize;

use crate::types::AtomClass;

/// Subtotals per polarity class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ClassTotals {
    pub polar: f64,
    pub apolar: f64,
    pub unknown: f64,
}

/// Per-atom area vector produced by either integrator.
///
/// Classification and residue grouping are caller concerns: the aggregation
/// methods take the class / group vectors produced by the loader so the core
/// itself stays chemistry-free.
#[derive(Debug, Clone, Serialize)]
pub struct SasaResult {
    areas: Vec<f64>,
}

impl SasaResult {
    pub(crate) fn new(areas: Vec<f64>) -> Self {
        Self { areas }
    }

    #[must_use]
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Total SASA, summed in atom-index order so the value is independent of
    /// how the computation was parallelized.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.areas.iter().sum()
    }

    /// Sum of areas over atoms of one class.
    ///
    /// # Panics
    /// Panics if `classes` is shorter than the area vector.
    #[must_use]
    pub fn by_class(&self, classes: &[AtomClass], class: AtomClass) -> f64 {
        assert!(classes.len() >= self.areas.len());
        self.areas
            .iter()
            .zip(classes)
            .filter(|(_, c)| **c == class)
            .map(|(a, _)| a)
            .sum()
    }

    /// All three class subtotals in one pass.
    #[must_use]
    pub fn class_totals(&self, classes: &[AtomClass]) -> ClassTotals {
        assert!(classes.len() >= self.areas.len());
        let mut totals = ClassTotals::default();
        for (area, class) in self.areas.iter().zip(classes) {
            match class {
                AtomClass::Polar => totals.polar += area,
                AtomClass::Apolar => totals.apolar += area,
                AtomClass::Unknown => totals.unknown += area,
            }
        }
        totals
    }

    /// Sum areas per group, for grouping vectors like the loader's residue
    /// or chain groupings (dense ids starting at 0).
    ///
    /// # Panics
    /// Panics if `groups` is shorter than the area vector or contains a
    /// negative id.
    #[must_use]
    pub fn group_totals(&self, groups: &[i32]) -> Vec<f64> {
        assert!(groups.len() >= self.areas.len());
        let n_groups = groups
            .iter()
            .take(self.areas.len())
            .map(|&g| {
                assert!(g >= 0, "negative group id");
                g as usize + 1
            })
            .max()
            .unwrap_or(0);

        let mut totals = vec![0.0; n_groups];
        for (area, &g) in self.areas.iter().zip(groups) {
            totals[g as usize] += area;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn total_sums_in_index_order() {
        let result = SasaResult::new(vec![1.0, 2.5, 0.5]);
        assert_relative_eq!(result.total(), 4.0);
    }

    #[test]
    fn class_subtotals() {
        let result = SasaResult::new(vec![10.0, 20.0, 30.0, 40.0]);
        let classes = [
            AtomClass::Polar,
            AtomClass::Apolar,
            AtomClass::Polar,
            AtomClass::Unknown,
        ];
        assert_relative_eq!(result.by_class(&classes, AtomClass::Polar), 40.0);
        assert_relative_eq!(result.by_class(&classes, AtomClass::Apolar), 20.0);

        let totals = result.class_totals(&classes);
        assert_relative_eq!(totals.polar, 40.0);
        assert_relative_eq!(totals.apolar, 20.0);
        assert_relative_eq!(totals.unknown, 40.0);
        assert_relative_eq!(
            totals.polar + totals.apolar + totals.unknown,
            result.total()
        );
    }

    #[test]
    fn group_sums() {
        let result = SasaResult::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let groups = [0, 0, 1, 2, 1];
        let totals = result.group_totals(&groups);
        assert_eq!(totals.len(), 3);
        assert_relative_eq!(totals[0], 3.0);
        assert_relative_eq!(totals[1], 8.0);
        assert_relative_eq!(totals[2], 4.0);
    }
}
