#![allow(
    // Board dimensions always fit in a u16
    clippy::cast_possible_truncation
)]

use crate::app::App;
use crate::components::{Board, EventLog, GameState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

// Each board cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const MIN_INFO_WIDTH: u16 = 24;

/// Outer size of the bordered board for `board`.
#[must_use]
pub fn board_size(board: &Board) -> (u16, u16) {
    let columns = u16::try_from(board.columns).unwrap_or(u16::MAX);
    let rows = u16::try_from(board.rows).unwrap_or(u16::MAX);
    (
        columns.saturating_mul(CELL_WIDTH).saturating_add(2),
        rows.saturating_add(2),
    )
}

pub fn render(f: &mut Frame, app: &mut App) {
    let (board_width, board_height) = board_size(app.world.resource::<Board>());
    let min_total_width = board_width.saturating_add(MIN_INFO_WIDTH);

    // Check if the terminal is too small to render the game properly
    if f.area().width < min_total_width || f.area().height < board_height {
        let mut game_state = app.world.resource_mut::<GameState>();
        if !game_state.game_over {
            game_state.was_paused_for_resize = true;
        }

        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tetris - Paused"),
        );

        f.render_widget(warning_text, centered_rect(80, 60, f.area()));
        return;
    } else if app.world.resource::<GameState>().was_paused_for_resize {
        app.world.resource_mut::<GameState>().was_paused_for_resize = false;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(f.area());

    let board_area = Rect {
        height: board_height,
        ..main_layout[0]
    };
    render_game_board(f, app, board_area);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stats
            Constraint::Min(4),    // Recent events
            Constraint::Length(8), // Controls
        ])
        .split(main_layout[1]);

    render_stats(f, app, info_layout[0]);
    render_events(f, app, info_layout[1]);

    let controls = Paragraph::new(
        "←/→: Move left/right\n\
        ↓: Soft drop\n\
        W: Nudge up\n\
        ↑/Space: Rotate\n\
        M: Music  N: Sound\n\
        +/-: Volume\n\
        Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP).title("Controls"))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("TETRIS");
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    render_locked_cells(f.buffer_mut(), app.world.resource::<Board>(), inner_area);

    if let Some(brick) = app.active_brick() {
        f.render_widget(&brick, inner_area);
    }

    if app.is_game_over() {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

/// Draw the stack of landed blocks.
pub fn render_locked_cells(buf: &mut Buffer, board: &Board, area: Rect) {
    for (column, cells) in board.cells.iter().enumerate() {
        for (row, cell) in cells.iter().enumerate() {
            let Some(color) = cell else {
                continue;
            };

            let x = area
                .left()
                .saturating_add((column as u16).saturating_mul(CELL_WIDTH));
            let y = area.top().saturating_add(row as u16);
            if y >= area.bottom() {
                continue;
            }

            for dx in 0..CELL_WIDTH {
                let x = x.saturating_add(dx);
                if x >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("█");
                    cell.set_fg(*color);
                    cell.set_bg(Color::Black);
                }
            }
        }
    }
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let game_state = app.world.resource::<GameState>();

    let text = if game_state.game_over {
        format!(
            "Score: {}\nRows: {}\nGAME OVER! Enter to restart",
            game_state.score, game_state.rows_completed
        )
    } else {
        format!(
            "Score: {}\nRows: {}\nBricks: {}",
            game_state.score, game_state.rows_completed, game_state.bricks_dropped
        )
    };

    let style = if game_state.game_over {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let stats = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::BOTTOM).title("INFO"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, area);
}

fn render_events(f: &mut Frame, app: &App, area: Rect) {
    let log = app.world.resource::<EventLog>();

    if log.is_empty() {
        let placeholder = Paragraph::new("No events yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::NONE).title("Events"));
        f.render_widget(placeholder, area);
        return;
    }

    // Newest on top
    let items: Vec<ListItem> = log
        .recent()
        .rev()
        .map(|event| ListItem::new(event.kind().name()))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::NONE).title("Events"));
    f.render_widget(list, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
