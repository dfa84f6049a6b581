use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::direction::Direction;
use crate::engine::Snapshot;
use crate::grid::{Cell, Grid};

/// Terminal columns per logical cell, so cells look roughly square.
pub const CELL_WIDTH: u16 = 2;

const SNAKE_COLOR: Color = Color::Rgb(3, 160, 98);
const FOOD_COLOR: Color = Color::Red;

const GLYPH_BODY: &str = "██";
const GLYPH_FOOD: &str = "()";

/// Renders the board from a read-only snapshot.
pub fn render(frame: &mut Frame<'_>, grid: Grid, snapshot: &Snapshot) {
    let block = Block::bordered()
        .title(" snake ")
        .title_bottom(format!(" {:.1} ticks/s ", snapshot.speed));

    let area = board_area(frame.area(), grid);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buffer = frame.buffer_mut();
    for cell in &snapshot.food {
        if let Some((x, y)) = logical_to_terminal(inner, grid, *cell) {
            buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(FOOD_COLOR));
        }
    }

    let head = snapshot.head();
    for segment in &snapshot.snake {
        let Some((x, y)) = logical_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if Some(*segment) == head {
            buffer.set_string(
                x,
                y,
                head_glyph(snapshot.direction),
                Style::new()
                    .fg(Color::Black)
                    .bg(SNAKE_COLOR)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_BODY, Style::new().fg(SNAKE_COLOR));
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲▲",
        Direction::Down => "▼▼",
        Direction::Left => "◀ ",
        Direction::Right => " ▶",
    }
}

/// Returns the bordered board rectangle anchored at the top-left of `area`,
/// clipped to what fits.
fn board_area(area: Rect, grid: Grid) -> Rect {
    let width = grid.cols.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.rows.saturating_add(2);

    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::direction::Direction;
    use crate::engine::Snapshot;
    use crate::grid::{Cell, Grid};

    use super::{logical_to_terminal, render};

    #[test]
    fn cells_map_to_double_width_columns() {
        let inner = Rect::new(1, 1, 20, 10);
        let grid = Grid::new(10, 10);

        assert_eq!(logical_to_terminal(inner, grid, Cell::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, grid, Cell::new(3, 9)), Some((19, 4)));
        assert_eq!(logical_to_terminal(inner, grid, Cell::new(0, 10)), None);
    }

    #[test]
    fn cells_outside_a_small_terminal_are_clipped() {
        let inner = Rect::new(1, 1, 6, 2);
        let grid = Grid::new(10, 10);

        assert_eq!(logical_to_terminal(inner, grid, Cell::new(1, 2)), Some((5, 2)));
        assert_eq!(logical_to_terminal(inner, grid, Cell::new(1, 3)), None);
        assert_eq!(logical_to_terminal(inner, grid, Cell::new(2, 0)), None);
    }

    #[test]
    fn snapshot_renders_snake_and_food() {
        let grid = Grid::new(3, 4);
        let snapshot = Snapshot {
            snake: vec![Cell::new(1, 0), Cell::new(1, 1)],
            food: [Cell::new(0, 3)].into_iter().collect::<BTreeSet<_>>(),
            speed: 10.0,
            direction: Direction::Right,
            tick: 0,
        };
        let mut terminal = Terminal::new(TestBackend::new(12, 6)).expect("test backend");

        terminal
            .draw(|frame| render(frame, grid, &snapshot))
            .expect("draw succeeds");

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(1, 2)].symbol(), "█");
        assert_eq!(buffer[(4, 2)].symbol(), "▶");
        assert_eq!(buffer[(7, 1)].symbol(), "(");
    }
}
