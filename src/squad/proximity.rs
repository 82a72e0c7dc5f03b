//! Near-enemy detection for squad members
//!
//! A member is near an enemy when any known enemy unit is strictly closer
//! than the configured radius. The grid below answers the same predicate
//! without scanning every enemy for every member.

use ahash::AHashMap;

use crate::core::types::{UnitTag, Vec2};
use crate::world::unit::Unit;

/// Reference predicate: scan every enemy
pub fn is_near_enemy(position: Vec2, enemies: &[&Unit], radius: f32) -> bool {
    enemies
        .iter()
        .any(|enemy| position.distance(&enemy.position) < radius)
}

/// Cell indices beyond this magnitude are too coarse in f64 for the
/// neighbourhood guarantee to hold
const MAX_CELL_INDEX: f64 = (1u64 << 40) as f64;

/// Uniform grid of enemy positions with cells slightly wider than the radius
///
/// Any point strictly within `radius` of a query position lies in the
/// query cell or one of its eight neighbours, so only those are checked.
/// The extra width keeps that true under float rounding at cell edges.
/// Positions whose cell index is out of range (tiny radius, huge
/// coordinates) are kept in a flat list and scanned exhaustively.
pub struct EnemyGrid {
    cell_size: f64,
    cells: AHashMap<(i64, i64), Vec<Vec2>>,
    unbinned: Vec<Vec2>,
}

impl EnemyGrid {
    pub fn new(enemies: &[&Unit], radius: f32) -> Self {
        let mut grid = Self {
            cell_size: f64::from(radius.max(f32::EPSILON)) * 1.01,
            cells: AHashMap::new(),
            unbinned: Vec::new(),
        };
        for enemy in enemies {
            match grid.cell_coord(enemy.position) {
                Some(coord) => grid.cells.entry(coord).or_default().push(enemy.position),
                None => grid.unbinned.push(enemy.position),
            }
        }
        grid
    }

    #[inline]
    fn cell_coord(&self, pos: Vec2) -> Option<(i64, i64)> {
        let cx = (f64::from(pos.x) / self.cell_size).floor();
        let cy = (f64::from(pos.y) / self.cell_size).floor();
        if cx.abs() < MAX_CELL_INDEX && cy.abs() < MAX_CELL_INDEX {
            Some((cx as i64, cy as i64))
        } else {
            None
        }
    }

    /// Is any enemy strictly within `radius` of `position`?
    ///
    /// `radius` must not exceed the radius the grid was built with.
    pub fn any_within(&self, position: Vec2, radius: f32) -> bool {
        let near = |p: &Vec2| position.distance(p) < radius;

        if self.unbinned.iter().any(near) {
            return true;
        }

        match self.cell_coord(position) {
            Some((cx, cy)) => (-1..=1).any(|dx| {
                (-1..=1).any(|dy| {
                    self.cells
                        .get(&(cx + dx, cy + dy))
                        .map(|cell| cell.iter().any(near))
                        .unwrap_or(false)
                })
            }),
            None => self.cells.values().flatten().any(near),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.unbinned.is_empty()
    }
}

/// Flag every member; the returned key set is exactly the members given
pub fn near_enemy_flags(members: &[Unit], enemies: &[&Unit], radius: f32) -> AHashMap<UnitTag, bool> {
    let grid = EnemyGrid::new(enemies, radius);
    members
        .iter()
        .map(|unit| (unit.tag, grid.any_within(unit.position, radius)))
        .collect()
}
