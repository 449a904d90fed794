// src/display/console.rs

//! Raw-mode terminal display.
//!
//! Drawing goes into a [`CellBuffer`]; `present` serializes it with cursor
//! positioning and SGR color sequences and writes it to stdout in one go.

use std::io::{self, stdin, stdout, Read, Write};
use std::mem;
use std::os::unix::io::RawFd;

use anyhow::{Context, Result};
use libc::{winsize, STDIN_FILENO, TIOCGWINSZ};
use log::{debug, error, info, trace, warn};
use termios::{tcsetattr, Termios, ECHO, ICANON, ISIG, TCSANOW, VMIN, VTIME};

use super::{Cell, CellBuffer, Display};
use crate::color::ColorPairCache;
use crate::error::DisplayError;
use crate::keys::{decode_keys, KeyEvent};

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const ALT_SCREEN_ENTER: &str = "\x1b[?1049h";
const ALT_SCREEN_LEAVE: &str = "\x1b[?1049l";
const SGR_RESET: &str = "\x1b[0m";
const CLEAR_SCREEN_AND_HOME: &str = "\x1b[2J\x1b[H";

const DEFAULT_WIDTH_CHARS: u16 = 80;
const DEFAULT_HEIGHT_CHARS: u16 = 24;

pub struct ConsoleDisplay {
    original_termios: Option<Termios>,
    back: CellBuffer,
    pairs: ColorPairCache,
    input_buffer: [u8; 128],
    active: bool,
}

impl ConsoleDisplay {
    /// Switches the terminal to raw mode and the alternate screen.
    ///
    /// Reads wait at most `poll_ds` deciseconds for input. When stdin is not
    /// a terminal the display still works, without raw mode.
    pub fn new(poll_ds: u8) -> Result<Self> {
        info!("Creating new ConsoleDisplay.");
        let original_termios = match Termios::from_fd(STDIN_FILENO) {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!(
                    "Failed to get initial termios: {}. Proceeding without raw mode.",
                    e
                );
                None
            }
        };

        if let Some(ref ots) = original_termios {
            let mut raw_termios = *ots;
            raw_termios.c_lflag &= !(ECHO | ICANON | ISIG);
            raw_termios.c_iflag &=
                !(libc::IXON | libc::IXOFF | libc::ICRNL | libc::INLCR | libc::IGNCR);
            raw_termios.c_oflag &= !libc::OPOST;
            raw_termios.c_cc[VMIN] = 0;
            raw_termios.c_cc[VTIME] = poll_ds;
            tcsetattr(STDIN_FILENO, TCSANOW, &raw_termios)
                .context("ConsoleDisplay: Failed to set raw terminal attributes")?;
            debug!("ConsoleDisplay: Terminal set to raw mode (VTIME {}).", poll_ds);
        }

        let (cols, rows) = get_terminal_size_cells(STDIN_FILENO).unwrap_or_else(|e| {
            warn!("ConsoleDisplay: {:#}. Assuming {}x{}.", e, DEFAULT_WIDTH_CHARS, DEFAULT_HEIGHT_CHARS);
            (DEFAULT_WIDTH_CHARS, DEFAULT_HEIGHT_CHARS)
        });
        info!("ConsoleDisplay: Initial terminal size: {}x{} cells.", cols, rows);

        let mut display = ConsoleDisplay {
            original_termios,
            back: CellBuffer::new(cols as usize, rows as usize),
            pairs: ColorPairCache::new(),
            input_buffer: [0u8; 128],
            active: true,
        };
        display
            .write_raw(&format!("{}{}{}", ALT_SCREEN_ENTER, CURSOR_HIDE, CLEAR_SCREEN_AND_HOME))
            .context("ConsoleDisplay: Failed to enter the alternate screen")?;
        Ok(display)
    }

    /// Reads pending input and decodes it into keys.
    ///
    /// Returns `None` at end of input, which only happens when stdin is not
    /// a terminal (a raw-mode read of zero bytes is a timeout).
    pub fn poll_keys(&mut self) -> Result<Option<Vec<KeyEvent>>> {
        match stdin().read(&mut self.input_buffer) {
            Ok(0) if self.original_termios.is_none() => {
                info!("ConsoleDisplay: EOF on stdin.");
                Ok(None)
            }
            Ok(0) => Ok(Some(Vec::new())),
            Ok(bytes_read) => {
                trace!("ConsoleDisplay: Read {} bytes from stdin.", bytes_read);
                Ok(Some(decode_keys(&self.input_buffer[..bytes_read])))
            }
            Err(ref e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::Interrupted =>
            {
                trace!("ConsoleDisplay: stdin read {:?}.", e.kind());
                Ok(Some(Vec::new()))
            }
            Err(e) => Err(e).context("ConsoleDisplay: Error reading from stdin"),
        }
    }

    /// Picks up a terminal resize. Returns `true` when the size changed.
    pub fn refresh_size(&mut self) -> bool {
        match get_terminal_size_cells(STDIN_FILENO) {
            Ok((cols, rows)) => {
                let (cols, rows) = (cols as usize, rows as usize);
                if (cols, rows) == self.back.size() {
                    return false;
                }
                let (old_cols, old_rows) = self.back.size();
                info!(
                    "ConsoleDisplay: Terminal resized from {}x{} to {}x{} cells.",
                    old_cols, old_rows, cols, rows
                );
                self.back.resize(cols, rows);
                true
            }
            Err(e) => {
                warn!(
                    "ConsoleDisplay: Failed to get terminal size: {:#}. Using last known.",
                    e
                );
                false
            }
        }
    }

    /// Restores the terminal. Safe to call more than once.
    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        info!("ConsoleDisplay: Cleaning up...");
        self.write_raw(&format!("{}{}{}", SGR_RESET, CURSOR_SHOW, ALT_SCREEN_LEAVE))
            .context("ConsoleDisplay: Failed to restore the screen")?;
        if let Some(original_termios) = self.original_termios.take() {
            debug!("ConsoleDisplay: Restoring original terminal attributes.");
            tcsetattr(STDIN_FILENO, TCSANOW, &original_termios)
                .context("ConsoleDisplay: Failed to restore original terminal attributes")?;
        }
        info!("ConsoleDisplay: Cleanup complete.");
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> io::Result<()> {
        let mut out = stdout().lock();
        out.write_all(data.as_bytes())?;
        out.flush()
    }
}

impl Display for ConsoleDisplay {
    fn size(&self) -> (usize, usize) {
        self.back.size()
    }

    fn put_cell(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), DisplayError> {
        self.back.put_cell(x, y, cell)
    }

    fn clear(&mut self) {
        self.back.clear();
    }

    fn present(&mut self) -> Result<()> {
        let frame = encode_frame(&self.back, &mut self.pairs);
        trace!("ConsoleDisplay: present {} bytes.", frame.len());
        self.write_raw(&frame)
            .context("ConsoleDisplay: Failed to write frame to stdout")
    }
}

impl Drop for ConsoleDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            error!("ConsoleDisplay: Error during cleanup in drop: {:#}", e);
        }
    }
}

/// Serializes `buffer` into one terminal write.
///
/// Each row starts with an absolute cursor move; color sequences are only
/// emitted where the pair changes.
pub(crate) fn encode_frame(buffer: &CellBuffer, pairs: &mut ColorPairCache) -> String {
    let (cols, rows) = buffer.size();
    let mut out = String::with_capacity(cols * rows + rows * 8);
    for (y, row) in buffer.rows().enumerate().take(rows) {
        out.push_str(&format_cursor_position(y + 1, 1));
        let mut current = None;
        for cell in row {
            let id = pairs.pair_id(cell.fg, cell.bg);
            if current != Some(id) {
                if let Some(seq) = pairs.sequence(id) {
                    out.push_str(seq);
                }
                current = Some(id);
            }
            out.push(cell.ch);
        }
    }
    out.push_str(SGR_RESET);
    out
}

fn format_cursor_position(row_1_based: usize, col_1_based: usize) -> String {
    format!("\x1b[{};{}H", row_1_based, col_1_based)
}

fn get_terminal_size_cells(fd: RawFd) -> Result<(u16, u16)> {
    // SAFETY: `winsz` is a plain C struct the ioctl fills in.
    unsafe {
        let mut winsz: winsize = mem::zeroed();
        if libc::ioctl(fd, TIOCGWINSZ, &mut winsz) == -1 {
            return Err(anyhow::Error::from(io::Error::last_os_error())
                .context("ConsoleDisplay: ioctl(TIOCGWINSZ) failed"));
        }
        let cols = if winsz.ws_col == 0 {
            DEFAULT_WIDTH_CHARS
        } else {
            winsz.ws_col
        };
        let rows = if winsz.ws_row == 0 {
            DEFAULT_HEIGHT_CHARS
        } else {
            winsz.ws_row
        };
        Ok((cols, rows))
    }
}
