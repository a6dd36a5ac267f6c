//! Keyboard input handling and interactive loop.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute};
use unicode_width::UnicodeWidthStr;

use super::render::format_row;
use super::view::{Surface, TreeAction, TreeView};
use crate::ui::theme::{colors, paint, strong, Icons};

/// Convert a keyboard event to a TreeAction
pub fn key_to_action(key: KeyEvent) -> Option<TreeAction> {
    use crossterm::event::KeyCode;

    // Raw mode swallows SIGINT, so Ctrl-C arrives here.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(TreeAction::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::Down),
        KeyCode::Char(' ') | KeyCode::Enter => Some(TreeAction::Activate),
        KeyCode::Right | KeyCode::Char('l') => Some(TreeAction::Expand),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => Some(TreeAction::Collapse),
        KeyCode::Char('o') => Some(TreeAction::TogglePanel),
        KeyCode::Char('q') | KeyCode::Esc => Some(TreeAction::Quit),
        _ => None,
    }
}

/// Render the help bar showing keyboard shortcuts
pub fn render_help_bar() -> String {
    String::from(
        "[Space] Toggle / re-run    [o] Open/close panel    [q] Quit\n\
         (Use ↑↓ to navigate, →← to expand/collapse)",
    )
}

/// First visible row so that `cursor` stays inside a window of `height` rows.
pub fn scroll_offset(cursor: usize, height: usize, current: usize) -> usize {
    if height == 0 {
        return cursor;
    }
    if cursor < current {
        cursor
    } else if cursor >= current + height {
        cursor + 1 - height
    } else {
        current
    }
}

/// Lines of one frame: title, visible rows with the cursor marker, help.
pub fn frame_lines<S: Surface>(
    view: &TreeView<S>,
    title: &str,
    icons: &Icons,
    color: bool,
    offset: usize,
    height: usize,
) -> Vec<String> {
    let mut lines = vec![strong(title, color), icons.rule.repeat(40)];

    if !view.is_open() {
        lines.push(paint("Panel closed. Press o to open.", colors::GRAY, color));
    }
    for (index, row) in view.rows().iter().enumerate().skip(offset).take(height) {
        let marker = if index == view.cursor() {
            paint(icons.cursor, colors::ACTIVE, color)
        } else {
            " ".repeat(icons.cursor.width())
        };
        lines.push(format!("{marker} {}", format_row(row, icons, color)));
    }

    lines.push(icons.rule.repeat(40));
    lines.extend(render_help_bar().lines().map(str::to_string));
    lines
}

/// Raw mode with a hidden cursor, restored on drop even when a frame fails.
struct RawTerminal;

impl RawTerminal {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(out, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(
            out,
            cursor::Show,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Clear the screen and write one frame.
fn draw_frame(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    execute!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for line in lines {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

/// Run the tree view interactively until the user quits.
pub fn run_interactive<S: Surface>(
    view: &mut TreeView<S>,
    title: &str,
    icons: &Icons,
    color: bool,
) -> io::Result<()> {
    // Title, two rules and two help lines.
    const CHROME: usize = 5;

    let mut stdout = io::stdout();
    let _raw = RawTerminal::enter(&mut stdout)?;

    let mut offset = 0;
    loop {
        let height = terminal::size()
            .map(|(_, h)| usize::from(h).saturating_sub(CHROME))
            .unwrap_or(20)
            .max(1);
        offset = scroll_offset(view.cursor(), height, offset);
        draw_frame(
            &mut stdout,
            &frame_lines(view, title, icons, color, offset, height),
        )?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = key_to_action(key) {
                if view.handle_action(action) {
                    return Ok(());
                }
            }
        }
    }
}
