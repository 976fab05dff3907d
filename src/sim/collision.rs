//! Ball/ball collision detection and response
//!
//! Balls are equal-mass circles and collide elastically. Resolution runs in
//! three steps: velocity impulse along the line of centers, a random nudge
//! for motionless overlapping pairs, then de-penetration so the pair no
//! longer overlaps.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use crate::consts::{MAX_REWIND_RADII, SEPARATION_SLOP};
use crate::polar_to_cartesian;

/// How overlapping balls are pushed apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separation {
    /// After the impulse, move each ball along its own velocity by half the
    /// overlap (plus a small slop)
    #[default]
    AlongVelocity,
    /// Before the impulse, rewind both balls along their velocities to the
    /// moment they first touched
    TimeOfImpact,
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the balls overlap or touch
    pub hit: bool,
    /// `a.pos - b.pos`
    pub offset: Vec2,
    /// Distance between centers
    pub distance: f32,
    /// Sum of radii
    pub min_distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            offset: Vec2::ZERO,
            distance: 0.0,
            min_distance: 0.0,
        }
    }

    /// Overlap depth (0 when exactly touching)
    #[inline]
    pub fn penetration(&self) -> f32 {
        self.min_distance - self.distance
    }
}

/// Check collision between two circles
pub fn ball_ball_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let offset = a_pos - b_pos;
    let distance = offset.length();
    let min_distance = a_radius + b_radius;

    if distance > min_distance {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        offset,
        distance,
        min_distance,
    }
}

/// Detect and resolve a collision between two balls
///
/// Separated balls are left untouched. `rng` is only drawn from when both
/// balls are motionless and overlapping.
pub fn resolve<R: Rng>(a: &mut Ball, b: &mut Ball, separation: Separation, rng: &mut R) {
    let mut contact = ball_ball_collision(a.pos, a.radius, b.pos, b.radius);
    if !contact.hit {
        return;
    }

    log::trace!(
        "collision {} <-> {} (penetration {:.4})",
        a.id,
        b.id,
        contact.penetration()
    );

    match separation {
        Separation::AlongVelocity => {
            apply_impulse(a, b, contact.offset);
            push_along_velocity(a, b, &contact, rng);
        }
        Separation::TimeOfImpact => {
            rewind_to_contact(a, b, &contact);
            contact.offset = a.pos - b.pos;
            apply_impulse(a, b, contact.offset);
        }
    }
}

/// Elastic equal-mass impulse along the line of centers
///
/// Concentric balls have no defined normal, so the impulse is skipped.
fn apply_impulse(a: &mut Ball, b: &mut Ball, offset: Vec2) {
    let distance_sq = offset.length_squared();
    if distance_sq == 0.0 {
        return;
    }

    // Same scalar for both balls: the B-relative form only flips the sign of
    // both the velocity and position differences.
    let coeff = (a.vel - b.vel).dot(offset) / distance_sq;
    a.vel -= offset * coeff;
    b.vel += offset * coeff;
}

fn push_along_velocity<R: Rng>(a: &mut Ball, b: &mut Ball, contact: &CollisionResult, rng: &mut R) {
    // Two motionless overlapping balls have nothing to push along. Borrow a
    // random direction for the push and stop them again afterwards.
    let motionless = a.is_resting() && b.is_resting();
    if motionless {
        let mut dir = polar_to_cartesian(1.0, rng.random_range(0.0..TAU));
        if dir.dot(contact.offset) < 0.0 {
            dir = -dir;
        }
        log::debug!("balls {} and {} overlap at rest, nudging along {:?}", a.id, b.id, dir);
        a.vel = dir;
        b.vel = -dir;
    }

    let push = contact.penetration() / 2.0 + SEPARATION_SLOP;
    let (dir_a, dir_b) = push_directions(a.vel, b.vel, contact.offset);
    a.pos += dir_a * push;
    b.pos += dir_b * push;

    if motionless {
        a.vel = Vec2::ZERO;
        b.vel = Vec2::ZERO;
    }
}

/// Unit push direction for each ball
///
/// A ball with zero velocity is pushed straight away from the other one. If
/// the centers coincide too, it goes opposite to the other ball's push.
fn push_directions(a_vel: Vec2, b_vel: Vec2, offset: Vec2) -> (Vec2, Vec2) {
    let away = offset.normalize_or_zero();
    let mut dir_a = a_vel.normalize_or_zero();
    let mut dir_b = b_vel.normalize_or_zero();

    if dir_a == Vec2::ZERO {
        dir_a = if away != Vec2::ZERO { away } else { -dir_b };
    }
    if dir_b == Vec2::ZERO {
        dir_b = if away != Vec2::ZERO { -away } else { -dir_a };
    }

    (dir_a, dir_b)
}

/// Move both balls back along their velocities to where they first touched
///
/// Solves `|(pa - t·va) - (pb - t·vb)| = ra + rb` for the earliest `t >= 0`.
/// Falls back to a symmetric push along the line of centers when there is no
/// usable root or the rewind would be implausibly long.
fn rewind_to_contact(a: &mut Ball, b: &mut Ball, contact: &CollisionResult) {
    let rel_vel = a.vel - b.vel;
    let offset = contact.offset;
    let min_distance = contact.min_distance;

    let qa = rel_vel.length_squared();
    let qb = -2.0 * offset.dot(rel_vel);
    let qc = offset.length_squared() - min_distance * min_distance;
    let discriminant = qb * qb - 4.0 * qa * qc;

    let rewound = if qa > 0.0 && discriminant >= 0.0 {
        let root = discriminant.sqrt();
        let mut t = (-qb - root) / (2.0 * qa);
        if t < 0.0 {
            t = (-qb + root) / (2.0 * qa);
        }

        let a_pos = a.pos - a.vel * t;
        let b_pos = b.pos - b.vel * t;
        let max_change = a.radius * MAX_REWIND_RADII;
        (t >= 0.0 && a_pos.distance(a.pos) <= max_change && b_pos.distance(b.pos) <= max_change)
            .then_some((a_pos, b_pos))
    } else {
        None
    };

    match rewound {
        Some((a_pos, b_pos)) => {
            a.pos = a_pos;
            b.pos = b_pos;
        }
        None if contact.distance == 0.0 => {
            // Concentric: lift A clear
            a.pos.y -= min_distance;
        }
        None => {
            let away = offset.normalize_or_zero();
            let half = contact.penetration() / 2.0;
            a.pos += away * half;
            b.pos -= away * half;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Variant;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f32 = 1e-5;

    fn ball(id: u32, x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball::new(id, Vec2::new(x, y), Vec2::new(vx, vy), 1.0, Variant::Free)
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_no_collision_is_noop() {
        let mut a = ball(1, 50.0, 50.0, 10.0, 0.0);
        let mut b = ball(2, 60.0, 50.0, 10.0, 0.0);
        let (a0, b0) = (a.clone(), b.clone());

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert_eq!(a.pos, a0.pos);
        assert_eq!(a.vel, a0.vel);
        assert_eq!(b.pos, b0.pos);
        assert_eq!(b.vel, b0.vel);
    }

    #[test]
    fn test_one_moving_ball_transfers_momentum() {
        let mut a = ball(1, 50.0, 50.0, 10.0, 0.0);
        let mut b = ball(2, 50.5, 50.0, 0.0, 0.0);

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert_eq!(a.vel, Vec2::ZERO);
        assert!((b.vel - Vec2::new(10.0, 0.0)).length() < EPS);
        assert!(b.pos.x > 50.5, "B should move away from A");
        assert_eq!(b.pos.y, 50.0);
        // A stopped dead, so it falls back to backing away from B
        assert!(a.pos.x < 50.0);
        assert_eq!(a.pos.y, 50.0);
        assert!(a.pos.distance(b.pos) > 2.0);
    }

    #[test]
    fn test_two_moving_balls_swap_velocities() {
        let mut a = ball(1, 50.0, 50.0, 10.0, 0.0);
        let mut b = ball(2, 50.5, 50.0, -7.0, 0.0);

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert!((a.vel - Vec2::new(-7.0, 0.0)).length() < EPS);
        assert!((b.vel - Vec2::new(10.0, 0.0)).length() < EPS);
        assert!(a.pos.x < 50.0);
        assert!(b.pos.x > 50.5);
        assert_eq!(a.pos.y, 50.0);
        assert_eq!(b.pos.y, 50.0);
    }

    #[test]
    fn test_glancing_collision_conserves_energy() {
        let mut a = ball(1, 50.0, 50.0, 3.0, 1.0);
        let mut b = ball(2, 51.2, 51.0, -1.0, 0.5);
        let energy = a.kinetic_energy() + b.kinetic_energy();
        let momentum = a.vel + b.vel;

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert!((a.kinetic_energy() + b.kinetic_energy() - energy).abs() < 1e-4);
        assert!((a.vel + b.vel - momentum).length() < 1e-4);
    }

    #[test]
    fn test_exactly_touching_counts_as_collision() {
        let contact = ball_ball_collision(Vec2::new(10.0, 10.0), 1.0, Vec2::new(12.0, 10.0), 1.0);
        assert!(contact.hit);
        assert_eq!(contact.penetration(), 0.0);

        let contact = ball_ball_collision(Vec2::new(10.0, 10.0), 1.0, Vec2::new(12.5, 10.0), 1.0);
        assert!(!contact.hit);
    }

    #[test]
    fn test_motionless_overlap_is_pushed_apart_and_stays_at_rest() {
        let mut a = ball(1, 50.0, 50.0, 0.0, 0.0);
        let mut b = ball(2, 50.5, 50.3, 0.0, 0.0);
        let before = a.pos.distance(b.pos);

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert_eq!(a.vel, Vec2::ZERO);
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(a.pos.distance(b.pos) > before);
        // Pushed by equal and opposite amounts
        let centroid = (a.pos + b.pos) / 2.0;
        assert!((centroid - Vec2::new(50.25, 50.15)).length() < EPS);
    }

    #[test]
    fn test_concentric_motionless_balls_separate() {
        let mut a = ball(1, 30.0, 30.0, 0.0, 0.0);
        let mut b = ball(2, 30.0, 30.0, 0.0, 0.0);

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!((a.pos.distance(b.pos) - (2.0 + 2.0 * SEPARATION_SLOP)).abs() < EPS);
        assert!(a.is_resting() && b.is_resting());
    }

    #[test]
    fn test_concentric_with_one_moving_ball() {
        let mut a = ball(1, 30.0, 30.0, 0.0, 2.0);
        let mut b = ball(2, 30.0, 30.0, 0.0, 0.0);

        resolve(&mut a, &mut b, Separation::AlongVelocity, &mut rng());

        // No normal: velocities untouched, B backs off opposite to A
        assert_eq!(a.vel, Vec2::new(0.0, 2.0));
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(a.pos.y > 30.0);
        assert!(b.pos.y < 30.0);
        assert_eq!(a.pos.x, 30.0);
        assert_eq!(b.pos.x, 30.0);
    }

    #[test]
    fn test_push_directions_fallbacks() {
        let (dir_a, dir_b) = push_directions(Vec2::new(3.0, 0.0), Vec2::ZERO, Vec2::new(0.0, -2.0));
        assert_eq!(dir_a, Vec2::X);
        assert_eq!(dir_b, Vec2::Y);

        let (dir_a, dir_b) = push_directions(Vec2::ZERO, Vec2::new(0.0, 5.0), Vec2::ZERO);
        assert_eq!(dir_a, -Vec2::Y);
        assert_eq!(dir_b, Vec2::Y);
    }

    #[test]
    fn test_time_of_impact_rewinds_to_contact() {
        // A moved 1.5 units into a resting B this tick
        let mut a = ball(1, 50.0, 50.0, 2.0, 0.0);
        let mut b = ball(2, 50.5, 50.0, 0.0, 0.0);

        resolve(&mut a, &mut b, Separation::TimeOfImpact, &mut rng());

        assert!((a.pos.x - 48.5).abs() < EPS);
        assert_eq!(b.pos.x, 50.5);
        assert!((a.pos.distance(b.pos) - 2.0).abs() < EPS);
        assert!(a.vel.length() < EPS);
        assert!((b.vel - Vec2::new(2.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_time_of_impact_falls_back_for_equal_velocities() {
        let mut a = ball(1, 50.0, 50.0, 1.0, 1.0);
        let mut b = ball(2, 51.0, 50.0, 1.0, 1.0);

        resolve(&mut a, &mut b, Separation::TimeOfImpact, &mut rng());

        assert!((a.pos.distance(b.pos) - 2.0).abs() < EPS);
        assert!((a.pos.x - 49.5).abs() < EPS);
        assert!((b.pos.x - 51.5).abs() < EPS);
    }

    #[test]
    fn test_time_of_impact_concentric_lifts_a() {
        let mut a = ball(1, 20.0, 20.0, 0.0, 0.0);
        let mut b = ball(2, 20.0, 20.0, 0.0, 0.0);

        resolve(&mut a, &mut b, Separation::TimeOfImpact, &mut rng());

        assert_eq!(a.pos, Vec2::new(20.0, 18.0));
        assert_eq!(b.pos, Vec2::new(20.0, 20.0));
        assert!(a.is_resting() && b.is_resting());
    }

    proptest! {
        #[test]
        fn prop_resolve_conserves_momentum(
            ax in 40.0f32..60.0, ay in 40.0f32..60.0,
            dx in -1.9f32..1.9, dy in -1.9f32..1.9,
            avx in -5.0f32..5.0, avy in -5.0f32..5.0,
            bvx in -5.0f32..5.0, bvy in -5.0f32..5.0,
            seed in any::<u64>(),
        ) {
            let mut a = ball(1, ax, ay, avx, avy);
            let mut b = ball(2, ax + dx, ay + dy, bvx, bvy);
            let before = a.vel + b.vel;

            resolve(&mut a, &mut b, Separation::AlongVelocity, &mut Pcg32::seed_from_u64(seed));

            prop_assert!((a.vel + b.vel - before).length() < 1e-3);
            prop_assert!(a.pos.is_finite() && b.pos.is_finite());
        }

        #[test]
        fn prop_separated_balls_untouched(
            ax in 0.0f32..100.0, ay in 0.0f32..100.0,
            angle in 0.0f32..TAU, gap in 2.01f32..50.0,
            avx in -5.0f32..5.0, bvy in -5.0f32..5.0,
            toi in any::<bool>(),
        ) {
            let mut a = ball(1, ax, ay, avx, 0.0);
            let mut b = ball(2, 0.0, 0.0, 0.0, bvy);
            b.pos = a.pos + polar_to_cartesian(gap, angle);
            let (a0, b0) = (a.clone(), b.clone());
            let separation = if toi { Separation::TimeOfImpact } else { Separation::AlongVelocity };

            resolve(&mut a, &mut b, separation, &mut rng());

            prop_assert_eq!(a.pos, a0.pos);
            prop_assert_eq!(a.vel, a0.vel);
            prop_assert_eq!(b.pos, b0.pos);
            prop_assert_eq!(b.vel, b0.vel);
        }
    }
}
