use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthChar;

use crate::grid::{Cell, Maze, Point};

/// The leading share of a solution to draw, start excluded.
///
/// Any ratio above zero shows at least one step. Ratios outside `[0, 1]`
/// are clamped.
pub fn solution_overlay(path: &[Point], ratio: f64) -> HashSet<Point> {
    if path.len() < 2 {
        return HashSet::new();
    }
    let ratio = ratio.clamp(0.0, 1.0);
    let shown = ((path.len() - 1) as f64 * ratio).ceil() as usize;
    path.iter().skip(1).take(shown).copied().collect()
}

/// The cell a presentation layer should draw at `p`.
pub fn display_cell(maze: &Maze, overlay: &HashSet<Point>, p: Point) -> Cell {
    match maze.cell_at(p) {
        Some(Cell::Path) if overlay.contains(&p) => Cell::Solution,
        Some(cell) => cell,
        None => Cell::default(),
    }
}

pub fn render_text(maze: &Maze, overlay: &HashSet<Point>) -> String {
    let mut out = String::with_capacity(((maze.width() + 1) * maze.height()) as usize);
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            out.push(display_cell(maze, overlay, Point::new(x, y)).glyph());
        }
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Terminal columns per cell.
    pub cell_width: usize,
    pub color: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            cell_width: 1,
            color: true,
        }
    }
}

fn cell_color(cell: Cell) -> Color {
    match cell {
        Cell::Wall => Color::Blue,
        Cell::Path => Color::Reset,
        Cell::Start => Color::Green,
        Cell::End => Color::Red,
        Cell::Solution => Color::Yellow,
    }
}

fn cell_text(cell: Cell, cell_width: usize) -> String {
    let glyph = cell.glyph();
    let w = UnicodeWidthChar::width(glyph).unwrap_or(1).max(1);
    // Walls fill every column; everything else pads with spaces.
    let fill = if cell == Cell::Wall { glyph } else { ' ' };
    let mut text = String::new();
    text.push(glyph);
    let mut used = w;
    while used < cell_width {
        text.push(fill);
        used += 1;
    }
    text
}

/// Writes the maze row by row through queued terminal commands.
pub fn draw<W: Write>(
    out: &mut W,
    maze: &Maze,
    overlay: &HashSet<Point>,
    style: RenderStyle,
) -> io::Result<()> {
    let cell_width = style.cell_width.max(1);
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            let cell = display_cell(maze, overlay, Point::new(x, y));
            if style.color {
                out.queue(SetForegroundColor(cell_color(cell)))?;
            }
            out.queue(Print(cell_text(cell, cell_width)))?;
        }
        if style.color {
            out.queue(ResetColor)?;
        }
        out.queue(Print('\n'))?;
    }
    out.flush()
}
