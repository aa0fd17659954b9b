use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Cell, Dir, Maze, Point};

/// Carves the maze body with an iterative randomized depth-first search.
///
/// Nodes are the odd cells; each move jumps two cells and opens the wall in
/// between. `bias` is the chance of keeping the current heading whenever that
/// is possible. The den and the ring of walls around it are never touched.
/// A seed outside the interior carves nothing.
pub fn carve_corridors(maze: &mut Maze, rng: &mut impl Rng, seed: Point, bias: f64) {
    if !maze.is_interior(seed) {
        return;
    }

    let mut stack = vec![seed];
    maze.set(seed, Cell::Path);
    let mut carved = 1usize;

    while let Some(&current) = stack.last() {
        let neighbors = carvable_neighbors(maze, current);
        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let next = choose_biased(&neighbors, &stack, bias, rng);
        let wall = Point::new((current.x + next.x) / 2, (current.y + next.y) / 2);
        maze.set(wall, Cell::Path);
        maze.set(next, Cell::Path);
        stack.push(next);
        carved += 1;
    }
    trace!("carved {carved} passage cells from {seed}");
}

fn carvable_neighbors(maze: &Maze, p: Point) -> Vec<Point> {
    let mut neighbors = Vec::new();
    for dir in Dir::ALL {
        let (dx, dy) = dir.delta();
        let next = p.offset(dx * 2, dy * 2);
        if !maze.is_interior(next) || !maze.is_wall(next) {
            continue;
        }
        if maze.is_inside_den(p.step(dir)) || maze.is_adjacent_to_den(next) {
            continue;
        }
        neighbors.push(next);
    }
    neighbors
}

/// Picks the straight continuation with probability `bias`, otherwise any
/// neighbor uniformly. The heading is the step from the stack predecessor to
/// the top of the stack, zero at the seed.
fn choose_biased(neighbors: &[Point], stack: &[Point], bias: f64, rng: &mut impl Rng) -> Point {
    let current = stack[stack.len() - 1];
    let heading = match stack {
        [.., prev, _] => (current.x - prev.x, current.y - prev.y),
        _ => (0, 0),
    };

    let straight = neighbors
        .iter()
        .copied()
        .find(|n| (n.x - current.x, n.y - current.y) == heading);

    if let Some(straight) = straight {
        if rng.gen::<f64>() < bias {
            return straight;
        }
    }
    *neighbors.choose(rng).unwrap_or(&current)
}
