//! Output formatting and progress bars for CLI

use std::{cell::RefCell, io, io::Write, rc::Rc};

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for simulated games
pub fn create_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}

/// Print a `=== TITLE ===` banner preceded by a blank line
pub fn print_banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n=== {title} ===")
}

/// Print a section header
pub fn print_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(60))
}

/// Print a key-value pair
pub fn print_kv<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:20} {}", format!("{key}:"), value)
}

/// Share of `part` in `total` as a percentage; zero when `total` is zero
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// A writer that several adapters can hold at once.
///
/// The console player prompts and the console observer prints boards to the
/// same terminal; each gets a clone of this handle.
pub struct SharedWriter<W> {
    inner: Rc<RefCell<W>>,
}

impl<W> SharedWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Rc::new(RefCell::new(writer)),
        }
    }
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.borrow_mut().flush()
    }
}
