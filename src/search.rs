use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Dir, Maze, Point};

/// Breadth-first search over walkable cells inside the border.
///
/// Returns the visited cell farthest from `from` that is neither inside nor
/// beside the den, with its distance. The first cell to reach the maximum in
/// visit order wins. Falls back to `(from, 0)` when nothing qualifies or
/// `from` is not an open interior cell.
pub fn farthest_point(maze: &Maze, from: Point) -> (Point, u32) {
    if !maze.is_interior(from) || !maze.is_walkable(from) {
        return (from, 0);
    }

    let mut dist = vec![vec![-1i32; maze.width as usize]; maze.height as usize];
    let mut q = VecDeque::new();
    dist[from.y as usize][from.x as usize] = 0;
    q.push_back(from);

    let mut farthest = from;
    let mut max_dist = 0;

    while let Some(pos) = q.pop_front() {
        let base = dist[pos.y as usize][pos.x as usize];
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if !maze.is_interior(next) || !maze.is_walkable(next) {
                continue;
            }
            let seen = &mut dist[next.y as usize][next.x as usize];
            if *seen != -1 {
                continue;
            }
            *seen = base + 1;
            q.push_back(next);

            if *seen > max_dist && !maze.is_inside_den(next) && !maze.is_adjacent_to_den(next) {
                max_dist = *seen;
                farthest = next;
            }
        }
    }
    (farthest, max_dist as u32)
}

/// Tunnels from `origin` through wall cells to the nearest walkable maze
/// cell and carves the corridor, `origin` included.
///
/// The den interior never counts as a target and walls beside the den are
/// never tunneled, so the corridor cannot open into the den.
pub fn carve_path_to_nearest(maze: &mut Maze, origin: Point) -> Result<()> {
    let mut q = VecDeque::new();
    let mut parent: HashMap<Point, Point> = HashMap::new();
    parent.insert(origin, origin);
    q.push_back(origin);

    let mut target = None;
    'search: while let Some(pos) = q.pop_front() {
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if !maze.is_interior(next) || maze.is_inside_den(next) {
                continue;
            }
            if maze.is_walkable(next) {
                parent.insert(next, pos);
                target = Some(next);
                break 'search;
            }
            if maze.is_adjacent_to_den(next) || parent.contains_key(&next) {
                continue;
            }
            parent.insert(next, pos);
            q.push_back(next);
        }
    }

    let Some(target) = target else {
        return Err(MazeError::NoPathToMaze(origin));
    };

    let mut carved = 0;
    let mut p = target;
    while p != origin {
        p = parent[&p];
        maze.set(p, Cell::Path);
        carved += 1;
    }
    trace!("carved {carved} cells from {origin} to reach {target}");
    Ok(())
}

/// Shortest walkable route from `from` to `to`, both ends included.
pub fn shortest_path(maze: &Maze, from: Point, to: Point) -> Option<Vec<Point>> {
    if !maze.in_bounds(from) || !maze.in_bounds(to) {
        return None;
    }

    let mut visited = vec![vec![false; maze.width as usize]; maze.height as usize];
    let mut parent: HashMap<Point, Point> = HashMap::new();
    let mut q = VecDeque::new();
    visited[from.y as usize][from.x as usize] = true;
    q.push_back(from);

    let mut found = false;
    while let Some(pos) = q.pop_front() {
        if pos == to {
            found = true;
            break;
        }
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if !maze.is_walkable(next) || visited[next.y as usize][next.x as usize] {
                continue;
            }
            visited[next.y as usize][next.x as usize] = true;
            parent.insert(next, pos);
            q.push_back(next);
        }
    }

    if !found {
        return None;
    }

    let mut path = vec![to];
    let mut p = to;
    while p != from {
        p = parent[&p];
        path.push(p);
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(rows: &[&str]) -> Maze {
        let mut start = Point::default();
        let mut end = Point::default();
        let grid: Vec<Vec<Cell>> = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .map(|(x, ch)| match ch {
                        '#' => Cell::Wall,
                        'S' => {
                            start = Point::new(x as i32, y as i32);
                            Cell::Start
                        }
                        'E' => {
                            end = Point::new(x as i32, y as i32);
                            Cell::End
                        }
                        _ => Cell::Path,
                    })
                    .collect()
            })
            .collect();
        Maze::from_rows(grid, start, end).unwrap()
    }

    #[test]
    fn shortest_path_walks_corridor() {
        let maze = parse(&["#####", "#S E#", "#####"]);
        let path = shortest_path(&maze, maze.start(), maze.end()).unwrap();
        assert_eq!(
            path,
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)]
        );
    }

    #[test]
    fn shortest_path_prefers_shorter_branch() {
        let maze = parse(&[
            "#######", //
            "#S    #",
            "# ### #",
            "#   E #",
            "#######",
        ]);
        let path = shortest_path(&maze, maze.start(), maze.end()).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.end()));
    }

    #[test]
    fn shortest_path_blocked() {
        let maze = parse(&["#####", "#S#E#", "#####"]);
        assert_eq!(shortest_path(&maze, maze.start(), maze.end()), None);
    }

    #[test]
    fn shortest_path_to_self() {
        let maze = parse(&["###", "#S#", "###"]);
        let p = Point::new(1, 1);
        assert_eq!(shortest_path(&maze, p, p), Some(vec![p]));
    }

    #[test]
    fn shortest_path_out_of_bounds() {
        let maze = parse(&["###", "#S#", "###"]);
        assert_eq!(shortest_path(&maze, Point::new(1, 1), Point::new(9, 9)), None);
    }

    #[test]
    fn farthest_point_finds_dead_end() {
        let maze = parse(&[
            "#######", //
            "#     #",
            "##### #",
            "#     #",
            "#######",
        ]);
        let (p, d) = farthest_point(&maze, Point::new(1, 1));
        assert_eq!(p, Point::new(1, 3));
        assert_eq!(d, 10);
    }

    #[test]
    fn farthest_point_ties_go_to_first_visited() {
        let maze = parse(&["#######", "#     #", "#######"]);
        // Both ends are two steps from the middle; left is scanned before right.
        let (p, d) = farthest_point(&maze, Point::new(3, 1));
        assert_eq!(p, Point::new(1, 1));
        assert_eq!(d, 2);
    }

    #[test]
    fn farthest_point_isolated() {
        let maze = parse(&["###", "# #", "###"]);
        assert_eq!(farthest_point(&maze, Point::new(1, 1)), (Point::new(1, 1), 0));
    }

    #[test]
    fn farthest_point_skips_den_and_its_border() {
        let mut maze = Maze::new(9, 9, 3, 3).unwrap();
        // Den occupies (3..=5, 3..=5). Open a corridor that runs along its top.
        for x in 1..8 {
            maze.set(Point::new(x, 1), Cell::Path);
        }
        for y in 1..3 {
            maze.set(Point::new(4, y), Cell::Path);
        }
        let (p, _) = farthest_point(&maze, Point::new(1, 1));
        assert_eq!(p, Point::new(7, 1));
        assert!(!maze.is_adjacent_to_den(p));
    }

    #[test]
    fn carve_to_nearest_opens_corridor() {
        let mut maze = parse(&[
            "#######", //
            "#     #",
            "#######",
            "#######",
            "#######",
        ]);
        carve_path_to_nearest(&mut maze, Point::new(3, 3)).unwrap();
        assert!(maze.is_walkable(Point::new(3, 3)));
        assert!(maze.is_walkable(Point::new(3, 2)));
        assert!(shortest_path(&maze, Point::new(3, 3), Point::new(1, 1)).is_some());
    }

    #[test]
    fn carve_to_nearest_fails_without_paths() {
        let mut maze = Maze::new(7, 7, 0, 0).unwrap();
        assert_eq!(
            carve_path_to_nearest(&mut maze, Point::new(3, 3)),
            Err(MazeError::NoPathToMaze(Point::new(3, 3)))
        );
    }

    #[test]
    fn carve_to_nearest_ignores_den() {
        // The den is the only open area, so there is nothing to reach.
        let mut maze = Maze::new(11, 11, 3, 3).unwrap();
        assert!(matches!(
            carve_path_to_nearest(&mut maze, Point::new(4, 1)),
            Err(MazeError::NoPathToMaze(_))
        ));
        assert!(maze.is_wall(Point::new(4, 1)));
    }

    #[test]
    fn farthest_point_from_outside_or_wall() {
        let maze = parse(&["#####", "#S E#", "#####"]);
        for p in [Point::new(-1, 0), Point::new(5, 1), Point::new(0, 1), Point::new(2, 9)] {
            assert_eq!(farthest_point(&maze, p), (p, 0));
        }
    }
}
