//! Interactive text menus over a lookup session.

pub mod display;
pub mod shell;
pub mod table;

pub use display::run_display_menu;
pub use shell::Shell;
pub use table::{CommandTable, DisplayAction, MenuOption, TopAction};

use std::io::{self, BufRead, Write};

pub(crate) const INVALID_COMMAND: &str = "INVALID COMMAND\n  Type 'h' for a list of valid commands";

/// Print `prompt` and read one line without its line ending. `None` at end of input.
pub(crate) fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    read_line(input)
}

pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
