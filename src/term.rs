use crate::config::{BOARD_CELLS, SIZE};
use crate::error::{GameError, GameResult};
use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// A board cell is drawn as this many terminal columns, which keeps it
/// roughly square.
const CELL_WIDTH: TermInt = 2;
const BOARD_WIDTH: TermInt = BOARD_CELLS as TermInt * CELL_WIDTH;
const BOARD_HEIGHT: TermInt = BOARD_CELLS as TermInt;

/// Wide enough for the longest menu line, tall enough for the score line
/// plus the board.
pub const MIN_WIDTH: TermInt = 50;
pub const MIN_HEIGHT: TermInt = BOARD_HEIGHT + 1;

const BORDER_CHAR: char = '▒';

type ScreenPos = (TermInt, TermInt);

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    board_origin: ScreenPos,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: ScreenPos,
    width: TermInt,
    height: TermInt,
}

fn is_border(pos: Coords) -> bool {
    let (cx, cy) = (pos.0.div_euclid(SIZE), pos.1.div_euclid(SIZE));
    cx <= 0 || cy <= 0 || cx >= BOARD_CELLS - 1 || cy >= BOARD_CELLS - 1
}

fn set_raw_mode(option: bool) -> crossterm::Result<()> {
    if option {
        terminal::enable_raw_mode()
    } else {
        terminal::disable_raw_mode()
    }
}

fn enter_screen<W, F>(out: &mut W, raw_mode: F) -> GameResult
where
    W: Write,
    F: Fn(bool) -> crossterm::Result<()>,
{
    let res = execute!(out, EnterAlternateScreen)
        .and_then(|_| raw_mode(true))
        .and_then(|_| execute!(out, cursor::Hide, cursor::DisableBlinking));

    if let Err(err) = res {
        // Keep the original error, the rollback is best effort
        let _ = leave_screen(out, raw_mode);
        return Err(err.into());
    }
    Ok(())
}

/// Runs every step even if an earlier one fails, and reports the first
/// failure.
fn leave_screen<W, F>(out: &mut W, raw_mode: F) -> GameResult
where
    W: Write,
    F: Fn(bool) -> crossterm::Result<()>,
{
    let raw = raw_mode(false);
    let screen = execute!(out, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen);
    raw?;
    screen?;
    Ok(())
}

impl TermManager {
    pub fn new() -> GameResult<Self> {
        let (width, height) = terminal::size()?;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(GameError::TerminalTooSmall {
                width,
                height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }

        let board_origin = ((width - BOARD_WIDTH) / 2, 1);
        let stdout = stdout();
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, board_origin, stdout, screen, current_msg: None })
    }

    /// On failure whatever was already switched on is switched off again.
    pub fn setup(&mut self) -> GameResult {
        enter_screen(&mut self.stdout, set_raw_mode)
    }

    pub fn restore(&mut self) -> GameResult {
        leave_screen(&mut self.stdout, set_raw_mode)
    }

    pub fn read_key_blocking(&self) -> GameResult<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn read_key_events_queue(&self) -> GameResult<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Border ring plus an empty play area.
    pub fn draw_board(&mut self) -> GameResult {
        for cy in 0..BOARD_CELLS {
            for cx in 0..BOARD_CELLS {
                self.clear_cell((cx * SIZE, cy * SIZE))?;
            }
        }

        self.flush()
    }

    /// Puts the board background back into the cell containing `pos`.
    pub fn clear_cell(&mut self, pos: Coords) -> GameResult {
        let ch = if is_border(pos) {BORDER_CHAR} else {' '};
        self.print_cell(pos, [ch, ch])
    }

    /// Draws into the cell containing `pos`. Positions off the board are
    /// skipped.
    pub fn print_cell(&mut self, pos: Coords, glyph: [char; 2]) -> GameResult {
        if let Some((x, y)) = self.cell_origin(pos) {
            self.print_at((x, y), glyph[0])?;
            self.print_at((x + 1, y), glyph[1])?;
        }
        Ok(())
    }

    /// Writes `text` on the line above the board, right-aligned with it.
    pub fn print_status(&mut self, text: &str) -> GameResult {
        let right = self.board_origin.0 + BOARD_WIDTH;
        let len = text.chars().count() as TermInt;
        let start = right.saturating_sub(len);

        for x in self.board_origin.0..start {
            self.print_at((x, 0), ' ')?;
        }
        for (i, ch) in text.chars().enumerate() {
            self.print_at((start + i as TermInt, 0), ch)?;
        }

        Ok(())
    }

    pub fn show_message(&mut self, lines: &[&str]) -> GameResult {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let longest = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0);
        let msg_width = (longest + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ')?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> GameResult {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(&ch) = self.screen.get(self.index((x, y))) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn clear(&mut self) -> GameResult {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    /// Terminal bell, standing in for a sound effect.
    pub fn bell(&mut self) -> GameResult {
        queue!(self.stdout, style::Print('\u{7}'))?;
        self.flush()
    }

    pub fn flush(&mut self) -> GameResult {
        self.stdout.flush().map_err(GameError::Io)
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn cell_origin(&self, pos: Coords) -> Option<ScreenPos> {
        let (cx, cy) = (pos.0.div_euclid(SIZE), pos.1.div_euclid(SIZE));
        if pos.0 < 0 || pos.1 < 0 || cx >= BOARD_CELLS || cy >= BOARD_CELLS {
            return None;
        }

        let x = self.board_origin.0 + cx as TermInt * CELL_WIDTH;
        let y = self.board_origin.1 + cy as TermInt;
        Some((x, y))
    }

    fn index(&self, pos: ScreenPos) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }

    fn print_at(&mut self, pos: ScreenPos, ch: char) -> GameResult {
        self.print_at_no_save(pos, ch)?;
        let i = self.index(pos);
        if let Some(cell) = self.screen.get_mut(i) {
            *cell = ch;
        }
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: ScreenPos, ch: char) -> GameResult {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}
