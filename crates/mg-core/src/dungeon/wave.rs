//! Wave-front (Lee) path search.
//!
//! Breadth-first distance marking over a grid whose room interiors and wall
//! rings are pre-blocked, followed by a backward walk down the distance
//! gradient. The frontier is an explicit queue, so grid size never runs into
//! recursion limits. Tie-breaking while backtracking is the only place the
//! curve bias matters; it never changes whether a path exists or how long
//! the shortest one is.

use super::grid::Point;
use super::params::CurvePolicy;
use super::room::Room;
use crate::rng::GenRng;

/// One cell of the search scratch field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCell {
    /// Room interior or wall ring, never enterable
    Blocked,
    /// Not reached yet
    Unmarked,
    /// Reached at this distance from the start
    Marked(u32),
}

/// Scratch distance field, cloned from a static base per search
#[derive(Debug, Clone)]
pub struct WaveField {
    width: usize,
    height: usize,
    cells: Vec<WaveCell>,
}

impl WaveField {
    /// Build the static base: all room boxes plus their wall rings blocked
    pub fn base(width: usize, height: usize, rooms: &[Room]) -> Self {
        let mut field = Self {
            width,
            height,
            cells: vec![WaveCell::Unmarked; width * height],
        };
        for room in rooms {
            for y in room.y - 1..=room.bottom() + 1 {
                for x in room.x - 1..=room.right() + 1 {
                    field.cells[y * width + x] = WaveCell::Blocked;
                }
            }
        }
        field
    }

    pub fn get(&self, p: Point) -> WaveCell {
        self.cells[p.y * self.width + p.x]
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// The outermost cell ring is always impassable
    fn in_inset(&self, p: Point) -> bool {
        p.x >= 1 && p.y >= 1 && p.x + 1 < self.width && p.y + 1 < self.height
    }

    /// Mark an unmarked in-inset cell with a distance; false when rejected
    fn mark(&mut self, p: Point, dist: u32) -> bool {
        if !self.in_inset(p) || self.get(p) != WaveCell::Unmarked {
            return false;
        }
        self.cells[p.y * self.width + p.x] = WaveCell::Marked(dist);
        true
    }
}

/// Resolved tie-breaking bias for one search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveBias {
    Straight,
    Curved,
}

impl CurveBias {
    /// Resolve the configured policy for one corridor
    pub fn resolve(policy: CurvePolicy, rng: &mut GenRng) -> Self {
        match policy {
            CurvePolicy::Straight => CurveBias::Straight,
            CurvePolicy::Curved => CurveBias::Curved,
            CurvePolicy::Random => {
                if rng.one_in(2) {
                    CurveBias::Straight
                } else {
                    CurveBias::Curved
                }
            }
        }
    }
}

/// Shortest orthogonal path from `start` to `dest` over a clone of `base`.
///
/// Returns the full point sequence including both endpoints, or `None` when
/// the destination cannot be reached. The caller treats `None` as "no
/// corridor for this door-point choice" and retries elsewhere.
pub fn find_path(
    base: &WaveField,
    start: Point,
    dest: Point,
    bias: CurveBias,
    rng: &mut GenRng,
) -> Option<Vec<Point>> {
    if !base.in_bounds(start) || !base.in_bounds(dest) {
        return None;
    }
    // Endpoints inside a room box mean this door pairing cannot produce a
    // legal corridor; the caller picks other doors.
    if base.get(start) == WaveCell::Blocked || base.get(dest) == WaveCell::Blocked {
        return None;
    }
    if start == dest {
        return Some(vec![start]);
    }

    let mut field = base.clone();
    // The start may sit on the grid margin and is set unconditionally; the
    // inset rule still applies to everything expanded from it.
    field.cells[start.y * field.width + start.x] = WaveCell::Marked(0);

    let mut frontier = vec![start];
    let mut reached = false;
    while !frontier.is_empty() && !reached {
        let mut next = Vec::new();
        for p in frontier {
            let dist = match field.get(p) {
                WaveCell::Marked(d) => d + 1,
                _ => continue,
            };
            for n in p.neighbors4(field.width, field.height) {
                if field.mark(n, dist) {
                    if n == dest {
                        reached = true;
                    }
                    next.push(n);
                }
            }
        }
        frontier = next;
    }
    if !reached {
        return None;
    }

    backtrack(&field, start, dest, bias, rng)
}

/// Walk the gradient from `dest` back to `start`, one distance step at a time
fn backtrack(
    field: &WaveField,
    start: Point,
    dest: Point,
    bias: CurveBias,
    rng: &mut GenRng,
) -> Option<Vec<Point>> {
    let mut path = vec![dest];
    let mut cur = dest;
    let mut prev_step: Option<(i64, i64)> = None;

    while cur != start {
        let cur_dist = match field.get(cur) {
            WaveCell::Marked(d) => d,
            _ => return None,
        };
        let candidates: Vec<Point> = cur
            .neighbors4(field.width, field.height)
            .filter(|&n| field.get(n) == WaveCell::Marked(cur_dist.wrapping_sub(1)))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let next = match bias {
            CurveBias::Curved => *rng.choose(&candidates)?,
            CurveBias::Straight => {
                let continued = prev_step.and_then(|(dx, dy)| {
                    candidates.iter().copied().find(|n| {
                        n.x as i64 - cur.x as i64 == dx && n.y as i64 - cur.y as i64 == dy
                    })
                });
                continued.unwrap_or(candidates[0])
            }
        };
        prev_step = Some((next.x as i64 - cur.x as i64, next.y as i64 - cur.y as i64));
        path.push(next);
        cur = next;
    }

    path.reverse();
    Some(path)
}
