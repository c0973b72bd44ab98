/// All game entity types — pure data, no logic.

use crate::geometry::Vec2;

// ── Colour ────────────────────────────────────────────────────────────────────

/// 24-bit colour. Enemies get a random hue via `from_hsl`; everything else
/// is white.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Build from HSL components: hue in degrees, saturation and lightness
    /// in [0, 1].
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Rgb {
        let h = hue.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return Rgb { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        fn channel(mut t: f64, p: f64, q: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 1.0 / 2.0 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        }

        Rgb {
            r: (channel(h + 1.0 / 3.0, p, q) * 255.0).round() as u8,
            g: (channel(h, p, q) * 255.0).round() as u8,
            b: (channel(h - 1.0 / 3.0, p, q) * 255.0).round() as u8,
        }
    }

    /// Scale toward black by a factor in [0, 1].  Used for the trail fade
    /// and for particle alpha.
    pub fn scaled(self, factor: f64) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb {
            r: (self.r as f64 * f) as u8,
            g: (self.g as f64 * f) as u8,
            b: (self.b as f64 * f) as u8,
        }
    }
}

// ── Enemy behaviour ───────────────────────────────────────────────────────────

/// Motion rule, fixed at spawn and never changing afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Moves along its spawn-time aim forever.
    Linear,
    /// Re-aims at the player every frame.
    Homing,
    /// Orbits a drifting anchor point; the anchor keeps the spawn-time aim.
    Spinning,
    /// Orbits an anchor that re-aims at the player every frame.
    HomingSpinning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn check_circle(pos: Vec2, radius: f64) {
    debug_assert!(pos.x.is_finite() && pos.y.is_finite(), "non-finite position");
    debug_assert!(radius.is_finite() && radius > 0.0, "bad radius {radius}");
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, radius: f64, color: Rgb) -> Player {
        check_circle(pos, radius);
        Player { pos, radius, color, velocity: Vec2::ZERO }
    }
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, radius: f64, color: Rgb, velocity: Vec2) -> Projectile {
        check_circle(pos, radius);
        Projectile { pos, radius, color, velocity }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Vec2,
    pub behavior: Behavior,
    /// Anchor point of the spinning orbit; starts at the spawn position.
    pub center: Vec2,
    /// Orbit phase, monotonically increasing.
    pub radians: f64,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f64, color: Rgb, velocity: Vec2, behavior: Behavior) -> Enemy {
        check_circle(pos, radius);
        Enemy { pos, radius, color, velocity, behavior, center: pos, radians: 0.0 }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f64,
    pub color: Rgb,
    pub velocity: Vec2,
    /// Fades from 1.0 toward 0; the particle is removed at 0.
    pub alpha: f64,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f64, color: Rgb, velocity: Vec2) -> Particle {
        check_circle(pos, radius);
        Particle { pos, radius, color, velocity, alpha: 1.0 }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Canvas size in logical pixels, fixed at load.
    pub width: f64,
    pub height: f64,
}
