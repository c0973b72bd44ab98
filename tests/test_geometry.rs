use circle_blaster::geometry::{aim, distance, Vec2};

#[test]
fn aim_is_a_unit_vector() {
    let from = Vec2::new(3.0, 4.0);
    for to in [
        Vec2::new(100.0, 4.0),
        Vec2::new(-50.0, 80.0),
        Vec2::new(3.0, -1000.0),
        Vec2::new(3.5, 4.5),
    ] {
        assert!((aim(from, to).length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn aim_cardinal_directions() {
    let o = Vec2::ZERO;
    let right = aim(o, Vec2::new(10.0, 0.0));
    assert!((right.x - 1.0).abs() < 1e-12 && right.y.abs() < 1e-12);

    let down = aim(o, Vec2::new(0.0, 10.0));
    assert!(down.x.abs() < 1e-12 && (down.y - 1.0).abs() < 1e-12);

    let up = aim(o, Vec2::new(0.0, -10.0));
    assert!(up.x.abs() < 1e-12 && (up.y + 1.0).abs() < 1e-12);
}

#[test]
fn aim_diagonal() {
    let v = aim(Vec2::ZERO, Vec2::new(1.0, 1.0));
    let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
    assert!((v.x - inv_sqrt2).abs() < 1e-12);
    assert!((v.y - inv_sqrt2).abs() < 1e-12);
}

#[test]
fn distance_matches_hypot() {
    assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    assert_eq!(distance(Vec2::new(-3.0, 0.0), Vec2::new(0.0, -4.0)), 5.0);
    assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
}

#[test]
fn vec2_arithmetic() {
    let a = Vec2::new(1.0, 2.0);
    let b = Vec2::new(-3.0, 0.5);
    assert_eq!(a + b, Vec2::new(-2.0, 2.5));
    assert_eq!(a - b, Vec2::new(4.0, 1.5));
    assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));

    let mut c = a;
    c += b;
    assert_eq!(c, Vec2::new(-2.0, 2.5));
}

#[test]
fn vec2_length() {
    assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
    assert_eq!(Vec2::ZERO.length(), 0.0);
}
