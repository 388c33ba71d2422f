//! Geometric scenarios with analytically known SASA totals.

mod common;

use std::f64::consts::PI;

use common::{assert_relative, two_sphere_total};
use molsasa::{Algorithm, Atom, SasaParams, compute};

fn sr_params(points: u32) -> SasaParams {
    SasaParams {
        probe_radius: 0.0,
        sr_points: points,
        ..Default::default()
    }
}

fn lr_params(delta: f64) -> SasaParams {
    SasaParams {
        probe_radius: 0.0,
        lr_delta: delta,
        ..Default::default()
    }
}

#[test]
fn two_spheres_along_x_analytic() {
    // r = [1, 2] at distance 2: total = 20*pi - 2.5*pi = 17.5*pi
    let atoms = [Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(2.0, 0.0, 0.0, 2.0)];
    let expected = two_sphere_total(1.0, 2.0, 2.0, 0.0);
    assert_relative("analytic closed form", expected, 17.5 * PI, 1e-12);

    let lr = compute(&atoms, Algorithm::LeeRichards, &lr_params(1e-4)).unwrap();
    assert_relative("L&R total", lr.total(), expected, 1e-5);

    let sr = compute(&atoms, Algorithm::ShrakeRupley, &sr_params(5000)).unwrap();
    assert_relative("S&R total", sr.total(), expected, 5e-3);
}

#[test]
fn two_spheres_axis_choice_is_irrelevant() {
    let along_x = [Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(2.0, 0.0, 0.0, 2.0)];
    let along_y = [Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(0.0, 2.0, 0.0, 2.0)];
    let along_z = [Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(0.0, 0.0, 2.0, 2.0)];

    let params = lr_params(1e-4);
    let reference = compute(&along_x, Algorithm::LeeRichards, &params)
        .unwrap()
        .total();
    for (name, atoms) in [("y axis", &along_y), ("z axis", &along_z)] {
        let total = compute(atoms, Algorithm::LeeRichards, &params).unwrap().total();
        assert_relative(name, total, reference, 1e-5);
    }
    assert_relative("vs analytic", reference, 17.5 * PI, 1e-5);
}

#[test]
fn four_spheres_translation_leaves_total_unchanged() {
    let base = [
        Atom::new(0.0, 0.0, 0.0, 1.0),
        Atom::new(1.0, 0.0, 0.0, 1.0),
        Atom::new(0.0, 1.0, 0.0, 2.0),
        Atom::new(1.0, 1.0, 0.0, 1.0),
    ];
    let shifted: Vec<Atom> = base
        .iter()
        .map(|a| Atom::new(a.x + 1.0, a.y + 1.0, a.z + 1.0, a.r))
        .collect();

    for (algorithm, tol) in [
        (Algorithm::LeeRichards, 1e-10),
        (Algorithm::ShrakeRupley, 1e-10),
    ] {
        let params = SasaParams {
            probe_radius: 0.0,
            ..Default::default()
        };
        let a0 = compute(&base, algorithm, &params).unwrap();
        let a1 = compute(&shifted, algorithm, &params).unwrap();
        assert_relative(
            &format!("{algorithm:?} translated total"),
            a1.total(),
            a0.total(),
            tol,
        );
        for i in 0..base.len() {
            assert_relative(
                &format!("{algorithm:?} translated atom {i}"),
                a1.areas()[i],
                a0.areas()[i],
                tol,
            );
        }
    }
}

#[test]
fn four_spheres_rotation_leaves_total_unchanged() {
    // 90 degree rotation around z: (x, y) -> (-y, x), shifted back into the
    // same quadrant; radii stay with their atom identities.
    let base = [
        Atom::new(0.0, 0.0, 0.0, 1.0),
        Atom::new(1.0, 0.0, 0.0, 1.0),
        Atom::new(0.0, 1.0, 0.0, 2.0),
        Atom::new(1.0, 1.0, 0.0, 1.0),
    ];
    let rotated = [
        Atom::new(0.0, 1.0, 0.0, 1.0),
        Atom::new(0.0, 0.0, 0.0, 1.0),
        Atom::new(1.0, 1.0, 0.0, 2.0),
        Atom::new(1.0, 0.0, 0.0, 1.0),
    ];

    let a0 = compute(&base, Algorithm::LeeRichards, &lr_params(1e-3)).unwrap();
    let a1 = compute(&rotated, Algorithm::LeeRichards, &lr_params(1e-3)).unwrap();
    assert_relative("L&R rotated total", a1.total(), a0.total(), 1e-6);
    for i in 0..base.len() {
        assert_relative(
            &format!("L&R rotated atom {i}"),
            a1.areas()[i],
            a0.areas()[i],
            1e-6,
        );
    }

    let s0 = compute(&base, Algorithm::ShrakeRupley, &sr_params(5000)).unwrap();
    let s1 = compute(&rotated, Algorithm::ShrakeRupley, &sr_params(5000)).unwrap();
    assert_relative("S&R rotated total", s1.total(), s0.total(), 1e-2);
}

#[test]
fn single_atom_is_exact() {
    let r = 1.7;
    let probe = 1.4;
    let atoms = [Atom::new(5.0, -3.0, 8.0, r)];
    let expected = 4.0 * PI * (r + probe) * (r + probe);

    let params = SasaParams::default();
    for algorithm in [Algorithm::ShrakeRupley, Algorithm::LeeRichards] {
        let result = compute(&atoms, algorithm, &params).unwrap();
        assert_relative(&format!("{algorithm:?}"), result.areas()[0], expected, 1e-12);
    }
}

#[test]
fn disjoint_pair_sums_full_spheres() {
    let probe = 1.4;
    let atoms = [
        Atom::new(0.0, 0.0, 0.0, 1.0),
        Atom::new(20.0, 0.0, 0.0, 2.0),
    ];
    let expected = 4.0 * PI * (2.4 * 2.4 + 3.4 * 3.4);

    for algorithm in [Algorithm::ShrakeRupley, Algorithm::LeeRichards] {
        let result = compute(
            &atoms,
            algorithm,
            &SasaParams {
                probe_radius: probe,
                ..Default::default()
            },
        )
        .unwrap();
        assert_relative(&format!("{algorithm:?}"), result.total(), expected, 1e-12);
    }
}

#[test]
fn coincident_identical_atoms_split_the_sphere() {
    let r = 1.5;
    let probe = 1.4;
    let atoms = [Atom::new(2.0, 2.0, 2.0, r), Atom::new(2.0, 2.0, 2.0, r)];
    let half = 2.0 * PI * (r + probe) * (r + probe);

    for algorithm in [Algorithm::ShrakeRupley, Algorithm::LeeRichards] {
        let result = compute(
            &atoms,
            algorithm,
            &SasaParams {
                probe_radius: probe,
                ..Default::default()
            },
        )
        .unwrap();
        assert_relative(&format!("{algorithm:?} atom 0"), result.areas()[0], half, 1e-12);
        assert_relative(&format!("{algorithm:?} atom 1"), result.areas()[1], half, 1e-12);
    }
}

#[test]
fn probe_inflates_the_contact_criterion() {
    // Separated vdW spheres that overlap once probe-inflated.
    let atoms = [Atom::new(0.0, 0.0, 0.0, 1.0), Atom::new(4.0, 0.0, 0.0, 1.0)];
    let probe = 1.4;
    let expected = two_sphere_total(1.0, 1.0, 4.0, probe);

    let result = compute(
        &atoms,
        Algorithm::LeeRichards,
        &SasaParams {
            probe_radius: probe,
            lr_delta: 1e-4,
            ..Default::default()
        },
    )
    .unwrap();
    assert_relative("probed pair", result.total(), expected, 1e-5);
}

#[test]
fn algorithms_agree_on_a_cluster() {
    let atoms = [
        Atom::new(0.0, 0.0, 0.0, 1.7),
        Atom::new(1.5, 0.0, 0.0, 1.7),
        Atom::new(0.75, 1.3, 0.0, 1.55),
        Atom::new(2.25, 1.3, 0.0, 1.52),
        Atom::new(-0.75, 1.3, 0.0, 1.7),
        Atom::new(0.75, 0.4, 1.4, 1.8),
    ];
    let params = SasaParams {
        sr_points: 5000,
        lr_delta: 1e-3,
        ..Default::default()
    };
    let sr = compute(&atoms, Algorithm::ShrakeRupley, &params).unwrap();
    let lr = compute(&atoms, Algorithm::LeeRichards, &params).unwrap();
    assert_relative("method agreement", sr.total(), lr.total(), 5e-3);
}
