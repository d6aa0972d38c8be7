use crate::hotp::DIGITS;
use crate::writer::OutErr;

pub const BANNER: &str = "Ctrl+C to exit.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Overwrite the status line in place with a carriage return.
    Redraw,
    /// One status line per tick, for logs and pipes.
    Append,
}

/// Zero padded to the full digit count, e.g. 42 -> "000042".
pub fn format_code(code: u32) -> String {
    format!("{:0width$}", code, width = DIGITS as usize)
}

/// "000042" -> "000-042"
pub fn group_code(code: u32) -> String {
    let digits = format_code(code);
    let (head, tail) = digits.split_at(digits.len() / 2);
    format!("{}-{}", head, tail)
}

pub fn status_line(remaining: u64, code: u32) -> String {
    format!("Expires in: {:2}s | Code: {}", remaining, group_code(code))
}

pub struct Presenter<W: OutErr> {
    writer: W,
    mode: DisplayMode,
}

impl<W: OutErr> Presenter<W> {
    pub fn new(writer: W, mode: DisplayMode) -> Self {
        Presenter { writer, mode }
    }

    pub fn banner(&mut self) {
        self.writer.write(BANNER);
        self.writer.flush();
    }

    pub fn draw(&mut self, remaining: u64, code: u32) {
        let line = status_line(remaining, code);
        match self.mode {
            DisplayMode::Redraw => self.writer.write(&format!("\r{}", line)),
            DisplayMode::Append => self.writer.write(&format!("{}\n", line)),
        }
        self.writer.flush();
    }

    /// Ends a redrawn line so the shell prompt starts on a fresh one.
    pub fn finish(&mut self) {
        if self.mode == DisplayMode::Redraw {
            self.writer.write("\n");
            self.writer.flush();
        }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.writer
    }
}
