use proptest::prelude::*;
use voxterra_geom::{Aabb, Vec3};

fn coord() -> impl Strategy<Value = f32> {
    -1.0e4f32..1.0e4
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn contains(b: &Aabb, p: Vec3) -> bool {
    p.x >= b.min.x && p.x <= b.max.x && p.y >= b.min.y && p.y <= b.max.y && p.z >= b.min.z && p.z <= b.max.z
}

proptest! {
    // Every included point lies inside the resulting box
    #[test]
    fn include_contains_all_points(points in prop::collection::vec(arb_vec3(), 1..32)) {
        let mut b = Aabb::EMPTY;
        for &p in &points {
            b.include(p);
        }
        for &p in &points {
            prop_assert!(contains(&b, p));
        }
        prop_assert!(b.min.x <= b.max.x && b.min.y <= b.max.y && b.min.z <= b.max.z);
    }

    // Union is commutative and contains both operands' corners
    #[test]
    fn union_commutes(a in arb_vec3(), b in arb_vec3(), c in arb_vec3(), d in arb_vec3()) {
        let mut x = Aabb::EMPTY;
        x.include(a);
        x.include(b);
        let mut y = Aabb::EMPTY;
        y.include(c);
        y.include(d);
        let u = x.union(y);
        prop_assert_eq!(u, y.union(x));
        for p in [a, b, c, d] {
            prop_assert!(contains(&u, p));
        }
    }

    // Cross product is orthogonal to both inputs for axis-aligned unit vectors
    #[test]
    fn cross_of_axes_is_orthogonal(i in 0usize..3, j in 0usize..3) {
        let axes = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)];
        let c = axes[i].cross(axes[j]);
        prop_assert_eq!(c.dot(axes[i]), 0.0);
        prop_assert_eq!(c.dot(axes[j]), 0.0);
    }
}
