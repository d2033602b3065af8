//! Barnes-Hut forces compared against direct pairwise summation

use gravitree::physics::bound::Bound;
use gravitree::physics::gravity::force_from_point;
use gravitree::physics::math::{Scalar, Vector, random_point_in_ball};
use gravitree::physics::octree::{ForceParameters, Octree, OctreeBody};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const GRAVITY: Scalar = 1.0;
const SOFTENING: Scalar = 0.1;

fn random_bodies(count: usize, seed: u64) -> Vec<OctreeBody> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count as u32)
        .map(|id| OctreeBody {
            id,
            position: random_point_in_ball(&mut rng, 8.0),
            mass: rng.random_range(0.5..2.0),
        })
        .collect()
}

fn build_tree(bodies: &[OctreeBody]) -> Octree {
    let mut octree = Octree::new(Bound::centered(10.0));
    octree.build(bodies.iter().copied());
    octree
}

fn direct_force(body: &OctreeBody, bodies: &[OctreeBody]) -> Vector {
    bodies
        .iter()
        .filter(|other| other.id != body.id)
        .map(|other| {
            force_from_point(
                body.position,
                body.mass,
                other.position,
                other.mass,
                GRAVITY,
                SOFTENING,
            )
        })
        .sum()
}

/// Summed absolute error over summed exact magnitude.
fn relative_error(bodies: &[OctreeBody], theta: Scalar) -> Scalar {
    let octree = build_tree(bodies);
    let parameters = ForceParameters::new(theta, GRAVITY, SOFTENING);

    let (error, magnitude) = bodies.iter().fold((0.0, 0.0), |(error, magnitude), body| {
        let exact = direct_force(body, bodies);
        let approximate = octree.calculate_force(body, &parameters);
        (
            error + (approximate - exact).length(),
            magnitude + exact.length(),
        )
    });

    error / magnitude
}

#[test]
fn test_zero_theta_matches_direct_sum() {
    let bodies = random_bodies(150, 1);
    let octree = build_tree(&bodies);
    let parameters = ForceParameters::new(0.0, GRAVITY, SOFTENING);

    for body in &bodies {
        let exact = direct_force(body, &bodies);
        let approximate = octree.calculate_force(body, &parameters);
        let tolerance = 1e-9 * exact.length().max(1.0);
        assert!(
            (approximate - exact).length() < tolerance,
            "body {}: {approximate} vs {exact}",
            body.id
        );
    }
}

#[test]
fn test_moderate_theta_is_accurate() {
    let bodies = random_bodies(300, 2);
    let error = relative_error(&bodies, 0.5);
    assert!(error < 0.05, "relative error {error} at theta 0.5");
}

#[test]
fn test_smaller_theta_is_more_accurate() {
    let bodies = random_bodies(300, 3);
    let coarse = relative_error(&bodies, 1.5);
    let fine = relative_error(&bodies, 0.25);
    assert!(fine <= coarse, "theta 0.25 error {fine} vs theta 1.5 error {coarse}");
}

#[test]
fn test_no_self_force() {
    let body = OctreeBody {
        id: 0,
        position: Vector::new(1.0, 2.0, 3.0),
        mass: 5.0,
    };
    let octree = build_tree(&[body]);

    for theta in [0.0, 0.5, 1.0, 100.0] {
        let parameters = ForceParameters::new(theta, GRAVITY, SOFTENING);
        assert_eq!(octree.calculate_force(&body, &parameters), Vector::ZERO);
    }
}

#[test]
fn test_large_theta_never_pulls_body_toward_itself() {
    // Two bodies sharing a deep subtree with a distant third; even when
    // everything else collapses, the node holding the query body is opened
    let bodies = [
        OctreeBody {
            id: 0,
            position: Vector::new(1.0, 1.0, 1.0),
            mass: 1.0,
        },
        OctreeBody {
            id: 1,
            position: Vector::new(1.1, 1.0, 1.0),
            mass: 1.0,
        },
        OctreeBody {
            id: 2,
            position: Vector::new(-9.0, -9.0, -9.0),
            mass: 1.0,
        },
    ];
    let octree = build_tree(&bodies);
    let parameters = ForceParameters::new(1e6, GRAVITY, SOFTENING);

    let force = octree.calculate_force(&bodies[0], &parameters);
    let exact = direct_force(&bodies[0], &bodies);

    // Body 1 is the dominant attractor and lies along +x
    assert!(force.x > 0.0);
    assert!((force - exact).length() < 0.5 * exact.length());
}

#[test]
fn test_query_point_outside_tree() {
    let bodies = random_bodies(50, 4);
    let octree = build_tree(&bodies);
    let far_body = OctreeBody {
        id: u32::MAX,
        position: Vector::new(50.0, 0.0, 0.0),
        mass: 1.0,
    };

    let parameters = ForceParameters::new(0.0, GRAVITY, SOFTENING);
    let approximate = octree.calculate_force(&far_body, &parameters);
    let exact = direct_force(&far_body, &bodies);

    assert!((approximate - exact).length() < 1e-9 * exact.length().max(1.0));
    assert!(approximate.x < 0.0);
}
