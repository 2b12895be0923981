//! Axis-aligned bounding-box collision engine.

use crate::entities::{Bullet, Enemy};

/// Axis-aligned box.  Overlap uses strict inequalities on both axes, so
/// exactly-touching edges do not count as a hit; the same rule applies to
/// every entity pairing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Pair up bullets and enemies that overlap this frame.
///
/// Each bullet spends itself on at most one enemy and each enemy dies to
/// at most one bullet.  Returns (spent bullet indices, killed enemy
/// indices) for the caller to filter out in one pass, so removal never
/// disturbs the scan.
pub fn bullet_enemy_hits(bullets: &[Bullet], enemies: &[Enemy]) -> (Vec<usize>, Vec<usize>) {
    let mut spent: Vec<usize> = Vec::new();
    let mut killed: Vec<usize> = Vec::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let bullet_box = bullet.aabb();
        for (ei, enemy) in enemies.iter().enumerate() {
            if killed.contains(&ei) {
                continue;
            }
            if bullet_box.intersects(&enemy.aabb()) {
                spent.push(bi);
                killed.push(ei);
                break;
            }
        }
    }

    (spent, killed)
}
