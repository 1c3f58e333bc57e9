use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_ai::{game::Game, player::PlayerColor};

fn chip_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Blue => Color::Cyan,
        PlayerColor::Black => Color::DarkGrey,
    }
}

/// Draws the grid below the cursor, column labels on top, winning chips highlighted
pub fn draw(game: &Game) -> Result<()> {
    let grid = game.grid();
    let mut stdout = stdout();

    let cols: String = (1..=grid.column_count())
        .map(|x| (x % 10).to_string())
        .collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..grid.row_count() {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor sits one line below the bottom row
    let (origin_x, origin_y) = crossterm::cursor::position()?;
    let origin_y = origin_y.saturating_sub(1);

    for column in 0..grid.column_count() {
        for row in 0..grid.row_count() {
            let (pos_x, pos_y) = (
                origin_x + column as u16,
                origin_y.saturating_sub(row as u16),
            );
            let chip = grid.chip(column, row);
            let color = chip
                .and_then(|chip| game.player(chip.player()))
                .map_or(Color::DarkBlue, |player| chip_color(player.color));
            let background = match chip {
                Some(chip) if chip.is_winning() => Color::White,
                _ => Color::DarkBlue,
            };

            stdout.queue(MoveTo(pos_x, pos_y))?.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(color),
            ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x + grid.column_count() as u16, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
