//! Coordinate arena: the single owner of atom positions and radii.
//!
//! Positions live in one contiguous `xyz` buffer with stride 3 and radii in a
//! parallel buffer; both are read-only after construction. Indices `0..len()`
//! are the stable atom identifiers used by every downstream structure.

use nalgebra::Point3;

use crate::error::SasaError;
use crate::types::Atom;

#[derive(Debug, Clone)]
pub struct CoordArena {
    xyz: Vec<f64>,
    radii: Vec<f64>,
}

impl CoordArena {
    /// Build the arena from user atoms.
    ///
    /// # Errors
    /// [`SasaError::InvalidInput`] if the atom set is empty or any radius is
    /// non-positive or non-finite.
    pub fn from_atoms(atoms: &[Atom]) -> Result<Self, SasaError> {
        if atoms.is_empty() {
            return Err(SasaError::invalid_input("atom set is empty"));
        }

        let mut xyz = Vec::with_capacity(atoms.len() * 3);
        let mut radii = Vec::with_capacity(atoms.len());

        for (i, atom) in atoms.iter().enumerate() {
            if !(atom.x.is_finite() && atom.y.is_finite() && atom.z.is_finite()) {
                return Err(SasaError::invalid_input(format!(
                    "atom {i} has a non-finite coordinate"
                )));
            }
            if !atom.r.is_finite() || atom.r <= 0.0 {
                return Err(SasaError::invalid_input(format!(
                    "atom {i} has radius {}, expected a positive finite value",
                    atom.r
                )));
            }
            xyz.extend_from_slice(&[atom.x, atom.y, atom.z]);
            radii.push(atom.r);
        }

        Ok(Self { xyz, radii })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn x(&self, i: usize) -> f64 {
        self.xyz[i * 3]
    }

    #[inline]
    #[must_use]
    pub fn y(&self, i: usize) -> f64 {
        self.xyz[i * 3 + 1]
    }

    #[inline]
    #[must_use]
    pub fn z(&self, i: usize) -> f64 {
        self.xyz[i * 3 + 2]
    }

    #[inline]
    #[must_use]
    pub fn radius(&self, i: usize) -> f64 {
        self.radii[i]
    }

    #[inline]
    #[must_use]
    pub fn point(&self, i: usize) -> Point3<f64> {
        Point3::new(self.x(i), self.y(i), self.z(i))
    }

    #[must_use]
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Largest value of `r + probe` over all atoms; positive whenever the
    /// arena is non-empty and `probe >= 0`.
    #[must_use]
    pub fn max_inflated_radius(&self, probe: f64) -> f64 {
        self.radii.iter().fold(0.0, |m, r| m.max(r + probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(
            CoordArena::from_atoms(&[]),
            Err(SasaError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_positive_radius() {
        for r in [0.0, -1.0, f64::NAN] {
            let atoms = [Atom::new(0.0, 0.0, 0.0, r)];
            assert!(matches!(
                CoordArena::from_atoms(&atoms),
                Err(SasaError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn stride_three_access() {
        let atoms = [
            Atom::new(1.0, 2.0, 3.0, 1.5),
            Atom::new(-4.0, 5.0, -6.0, 2.0),
        ];
        let arena = CoordArena::from_atoms(&atoms).unwrap();
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.point(1), Point3::new(-4.0, 5.0, -6.0));
        assert_eq!(arena.radius(0), 1.5);
        assert_eq!(arena.max_inflated_radius(1.4), 3.4);
    }
}
