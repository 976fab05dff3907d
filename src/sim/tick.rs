//! Fixed timestep simulation tick
//!
//! Two phases, always in this order: resolve every unordered ball pair, then
//! integrate every ball. Pairs are resolved against positions already moved
//! by earlier pairs in the same tick; there is no iterative relaxation.

use rand::Rng;

use super::ball::Ball;
use super::collision::{Separation, resolve};
use super::state::Simulation;

/// Advance the simulation by one tick
pub fn tick(state: &mut Simulation) {
    state.time_ticks += 1;

    if state.settings.collisions {
        resolve_pairs(&mut state.balls, state.settings.separation, &mut state.rng);
    }

    for ball in &mut state.balls {
        ball.integrate(&state.arena);
    }
}

/// Resolve each unordered pair (i < j) exactly once, in index order
fn resolve_pairs<R: Rng>(balls: &mut [Ball], separation: Separation, rng: &mut R) {
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            resolve(a, b, separation, rng);
        }
    }
}
