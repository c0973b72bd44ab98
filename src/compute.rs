/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// value.  Side effects are limited to the injected RNG, so a seeded RNG
/// makes every test deterministic.

use rand::Rng;

use crate::entities::{
    Behavior, Enemy, GameState, GameStatus, Particle, Player, Projectile, Rgb,
};
use crate::geometry::{aim, distance, Vec2};

// ── Tuning constants ──────────────────────────────────────────────────────────

pub const PLAYER_RADIUS: f64 = 10.0;
/// Isotropic damping applied to the player and to particles every frame.
pub const FRICTION: f64 = 0.99;
/// Per-component cap on the player's velocity.
pub const PLAYER_SPEED_CAP: f64 = 2.0;
/// Velocity added per frame while a movement key is held.
pub const PLAYER_THRUST: f64 = 0.5;

pub const PROJECTILE_RADIUS: f64 = 5.0;
pub const PROJECTILE_SPEED: f64 = 5.0;

pub const ENEMY_MIN_RADIUS: f64 = 4.0;
pub const ENEMY_MAX_RADIUS: f64 = 30.0;
/// Distance of a spinning enemy from its orbit anchor.
pub const ORBIT_RADIUS: f64 = 30.0;
/// Orbit phase advance per frame.
pub const ORBIT_STEP: f64 = 0.1;

/// An enemy and a projectile collide when their gap is below this slack.
pub const HIT_SLACK: f64 = 0.5;
/// The game ends only once an enemy overlaps the player deeper than this.
pub const GAME_OVER_OVERLAP: f64 = -0.3;

pub const PARTICLE_MIN_RADIUS: f64 = 0.5;
pub const PARTICLE_MAX_RADIUS: f64 = 2.0;
pub const PARTICLE_MAX_SPEED: f64 = 6.0;
/// Alpha lost per frame; a particle lives 100 frames at most.
pub const PARTICLE_FADE: f64 = 0.01;

/// One enemy per second at the nominal 60 FPS frame rate.
pub const SPAWN_INTERVAL_FRAMES: u64 = 60;

pub const SCORE_PER_KILL: u32 = 100;

// ── Constructors ──────────────────────────────────────────────────────────────

/// Build the initial game state for a canvas of the given logical size.
/// The player starts at the canvas centre, at rest.
pub fn init_state(width: f64, height: f64) -> GameState {
    GameState {
        player: Player::new(
            Vec2::new(width / 2.0, height / 2.0),
            PLAYER_RADIUS,
            Rgb::WHITE,
        ),
        projectiles: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ─────────────────────────────────────

/// Add a thrust impulse to the player's velocity.  `dir` is a unit-ish
/// direction from the movement keys; the per-component cap is enforced on
/// the next tick.
pub fn apply_thrust(state: &GameState, dir: Vec2) -> GameState {
    let mut player = state.player.clone();
    player.velocity += dir * PLAYER_THRUST;
    GameState { player, ..state.clone() }
}

/// Fire one projectile from the player toward `target`.
pub fn shoot(state: &GameState, target: Vec2) -> GameState {
    let velocity = aim(state.player.pos, target) * PROJECTILE_SPEED;
    let projectile = Projectile::new(state.player.pos, PROJECTILE_RADIUS, Rgb::WHITE, velocity);

    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    GameState { projectiles, ..state.clone() }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

/// Create one enemy just off-canvas, aimed at the player's current position.
///
/// Radius is uniform in [4, 30); the spawn point sits on one of the four
/// edges, pushed outward by the radius so the enemy starts fully hidden.
/// The aim is frozen here — only the homing variants re-aim later.
pub fn spawn_enemy(width: f64, height: f64, player_pos: Vec2, rng: &mut impl Rng) -> Enemy {
    let radius = rng.gen_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);

    let pos = if rng.gen_bool(0.5) {
        let x = if rng.gen_bool(0.5) { -radius } else { width + radius };
        Vec2::new(x, rng.gen_range(0.0..height))
    } else {
        let y = if rng.gen_bool(0.5) { -radius } else { height + radius };
        Vec2::new(rng.gen_range(0.0..width), y)
    };

    let color = Rgb::from_hsl(rng.gen_range(0.0..360.0), 0.5, 0.5);
    let velocity = aim(pos, player_pos);

    Enemy::new(pos, radius, color, velocity, roll_behavior(rng))
}

/// One weighted draw replacing chained coin flips:
/// Linear 50%, Homing 25%, Spinning 12.5%, HomingSpinning 12.5%.
fn roll_behavior(rng: &mut impl Rng) -> Behavior {
    let roll: f64 = rng.gen();
    if roll < 0.5 {
        Behavior::Linear
    } else if roll < 0.75 {
        Behavior::Homing
    } else if roll < 0.875 {
        Behavior::Spinning
    } else {
        Behavior::HomingSpinning
    }
}

// ── Per-entity update rules (pure) ────────────────────────────────────────────

/// Advance the player one frame: cap velocity, apply friction, then move on
/// each axis independently.  An axis whose move would push any part of the
/// circle outside the canvas keeps its position and has its velocity zeroed.
pub fn advance_player(player: &Player, width: f64, height: f64) -> Player {
    let mut p = player.clone();

    p.velocity.x = p.velocity.x.clamp(-PLAYER_SPEED_CAP, PLAYER_SPEED_CAP);
    p.velocity.y = p.velocity.y.clamp(-PLAYER_SPEED_CAP, PLAYER_SPEED_CAP);
    p.velocity.x *= FRICTION;
    p.velocity.y *= FRICTION;

    if p.pos.x + p.radius + p.velocity.x <= width && p.pos.x - p.radius + p.velocity.x >= 0.0 {
        p.pos.x += p.velocity.x;
    } else {
        p.velocity.x = 0.0;
    }

    if p.pos.y + p.radius + p.velocity.y <= height && p.pos.y - p.radius + p.velocity.y >= 0.0 {
        p.pos.y += p.velocity.y;
    } else {
        p.velocity.y = 0.0;
    }

    p
}

/// Advance one enemy by its behaviour rule.
///
/// Linear keeps its frozen spawn-time aim while Homing re-aims every frame —
/// that asymmetry is what tells the variants apart, so it is deliberate.
pub fn advance_enemy(enemy: &Enemy, player_pos: Vec2) -> Enemy {
    let mut e = enemy.clone();
    match e.behavior {
        Behavior::Linear => {
            e.pos += e.velocity;
        }
        Behavior::Homing => {
            e.velocity = aim(e.pos, player_pos);
            e.pos += e.velocity;
        }
        Behavior::Spinning => {
            e.radians += ORBIT_STEP;
            e.center += e.velocity;
            e.pos = orbit_pos(e.center, e.radians);
        }
        Behavior::HomingSpinning => {
            e.radians += ORBIT_STEP;
            e.velocity = aim(e.center, player_pos);
            e.center += e.velocity;
            e.pos = orbit_pos(e.center, e.radians);
        }
    }
    e
}

fn orbit_pos(center: Vec2, radians: f64) -> Vec2 {
    Vec2::new(
        center.x + radians.cos() * ORBIT_RADIUS,
        center.y + radians.sin() * ORBIT_RADIUS,
    )
}

// ── Collision predicates ──────────────────────────────────────────────────────

/// A projectile hits an enemy when the gap between their rims is below
/// `HIT_SLACK`.
pub fn projectile_hits_enemy(projectile: &Projectile, enemy: &Enemy) -> bool {
    distance(projectile.pos, enemy.pos) - enemy.radius - projectile.radius < HIT_SLACK
}

/// An enemy ends the game when it overlaps the player deeper than the
/// `GAME_OVER_OVERLAP` tolerance.
pub fn enemy_reaches_player(enemy: &Enemy, player: &Player) -> bool {
    distance(enemy.pos, player.pos) - enemy.radius - player.radius < GAME_OVER_OVERLAP
}

/// A projectile is gone once its circle is fully outside the canvas on any
/// side.
pub fn off_canvas(projectile: &Projectile, width: f64, height: f64) -> bool {
    projectile.pos.x + projectile.radius < 0.0
        || projectile.pos.x - projectile.radius > width
        || projectile.pos.y + projectile.radius < 0.0
        || projectile.pos.y - projectile.radius > height
}

// ── Per-frame tick (nearly pure — RNG is injected) ────────────────────────────

/// Advance the simulation by one frame.
///
/// Removal never happens mid-iteration: each pass collects indices and the
/// removals are applied afterwards, which keeps every index valid for the
/// whole pass.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    let player = advance_player(&state.player, state.width, state.height);

    // ── 2. Projectiles: advance, drop the ones fully off-canvas ─────────────
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .filter_map(|p| {
            let mut p = p.clone();
            p.pos += p.velocity;
            if off_canvas(&p, state.width, state.height) {
                None
            } else {
                Some(p)
            }
        })
        .collect();

    // ── 3. Enemies advance by behaviour ──────────────────────────────────────
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| advance_enemy(e, player.pos))
        .collect();

    // ── 4. Enemy reaching the player ends the game ───────────────────────────
    let status = if enemies.iter().any(|e| enemy_reaches_player(e, &player)) {
        GameStatus::GameOver
    } else {
        state.status
    };

    // ── 5. Collision: projectiles ↔ enemies ──────────────────────────────────
    let mut dead_enemies: Vec<usize> = Vec::new();
    let mut spent_projectiles: Vec<usize> = Vec::new();

    for (ei, enemy) in enemies.iter().enumerate() {
        for (pi, projectile) in projectiles.iter().enumerate() {
            if projectile_hits_enemy(projectile, enemy)
                && !dead_enemies.contains(&ei)
                && !spent_projectiles.contains(&pi)
            {
                dead_enemies.push(ei);
                spent_projectiles.push(pi);
            }
        }
    }

    let score_gain = dead_enemies.len() as u32 * SCORE_PER_KILL;

    // ── 6. Particles: fade the old, burst for each destroyed enemy ───────────
    let mut particles: Vec<Particle> = state
        .particles
        .iter()
        .filter_map(|pt| {
            let mut pt = pt.clone();
            pt.velocity.x *= FRICTION;
            pt.velocity.y *= FRICTION;
            pt.pos += pt.velocity;
            pt.alpha -= PARTICLE_FADE;
            if pt.alpha <= 0.0 {
                None
            } else {
                Some(pt)
            }
        })
        .collect();

    for &ei in &dead_enemies {
        burst(&enemies[ei], &mut particles, rng);
    }

    // ── 7. Apply the collected removals ──────────────────────────────────────
    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !dead_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();

    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent_projectiles.contains(i))
        .map(|(_, p)| p)
        .collect();

    // ── 8. Spawn a new enemy on the interval ─────────────────────────────────
    let mut enemies = enemies;
    if frame % SPAWN_INTERVAL_FRAMES == 0 {
        enemies.push(spawn_enemy(state.width, state.height, player.pos, rng));
    }

    GameState {
        player,
        projectiles,
        enemies,
        particles,
        score: state.score + score_gain,
        status,
        frame,
        ..state.clone()
    }
}

/// Scatter a ring of short-lived particles at a destroyed enemy's last
/// position.  Count scales with the enemy's size; velocities cover the full
/// circle.
fn burst(enemy: &Enemy, particles: &mut Vec<Particle>, rng: &mut impl Rng) {
    let count = (enemy.radius * 2.0) as usize;
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let speed = rng.gen_range(0.0..PARTICLE_MAX_SPEED);
        let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);
        let radius = rng.gen_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
        particles.push(Particle::new(enemy.pos, radius, enemy.color, velocity));
    }
}
