use circle_blaster::entities::*;
use circle_blaster::geometry::Vec2;

#[test]
fn entity_enums_clone_and_eq() {
    assert_eq!(Behavior::Linear, Behavior::Linear);
    assert_ne!(Behavior::Linear, Behavior::Homing);
    assert_ne!(Behavior::Spinning, Behavior::HomingSpinning);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);

    let b = Behavior::HomingSpinning;
    assert_eq!(b, b.clone());
}

#[test]
fn enemy_anchor_starts_at_spawn_position() {
    let pos = Vec2::new(40.0, -25.0);
    let e = Enemy::new(pos, 8.0, Rgb::WHITE, Vec2::new(1.0, 0.0), Behavior::Spinning);
    assert_eq!(e.center, pos);
    assert_eq!(e.radians, 0.0);
}

#[test]
fn particle_starts_fully_opaque() {
    let p = Particle::new(Vec2::ZERO, 1.0, Rgb::WHITE, Vec2::ZERO);
    assert_eq!(p.alpha, 1.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player::new(Vec2::new(200.0, 200.0), 10.0, Rgb::WHITE),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width: 400.0,
        height: 400.0,
    };
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy::new(
        Vec2::new(5.0, 5.0),
        5.0,
        Rgb::WHITE,
        Vec2::ZERO,
        Behavior::Linear,
    ));

    assert_eq!(original.player.pos.x, 200.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}

// ── colour ────────────────────────────────────────────────────────────────────

#[test]
fn hsl_primary_hues() {
    assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb { r: 255, g: 0, b: 0 });
    assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb { r: 0, g: 255, b: 0 });
    assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb { r: 0, g: 0, b: 255 });
}

#[test]
fn hsl_zero_saturation_is_grey() {
    assert_eq!(Rgb::from_hsl(77.0, 0.0, 0.5), Rgb { r: 128, g: 128, b: 128 });
}

#[test]
fn hsl_enemy_palette_is_half_bright() {
    // The spawner uses 50% saturation / 50% lightness
    let c = Rgb::from_hsl(0.0, 0.5, 0.5);
    assert_eq!(c, Rgb { r: 191, g: 64, b: 64 });
}

#[test]
fn hsl_hue_wraps() {
    assert_eq!(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::from_hsl(0.0, 1.0, 0.5));
    assert_eq!(Rgb::from_hsl(-120.0, 1.0, 0.5), Rgb::from_hsl(240.0, 1.0, 0.5));
}

#[test]
fn scaled_darkens_toward_black() {
    assert_eq!(Rgb::WHITE.scaled(0.0), Rgb { r: 0, g: 0, b: 0 });
    assert_eq!(Rgb::WHITE.scaled(1.0), Rgb::WHITE);
    let half = Rgb::WHITE.scaled(0.5);
    assert!(half.r == 127 && half.g == 127 && half.b == 127);
    // Out-of-range factors are clamped, never wrapped
    assert_eq!(Rgb::WHITE.scaled(2.0), Rgb::WHITE);
}
