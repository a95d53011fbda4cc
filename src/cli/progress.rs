//! Download progress meter and fan-out writer
//!
//! The meter tracks bytes transferred against an expected total and renders
//! a refreshing single-line bar on stdout. It doubles as an `io::Write` sink
//! so it can sit beside the destination file in a fan-out writer: the file
//! branch can fail, the meter branch never does.
//!
//! Rendering is gated by a refresh rate so terminal output stays bounded no
//! matter how fast chunks arrive; `finish()` bypasses the gate for one last
//! render of the true final count.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::cli::format::format_bytes;
use crate::constants::progress::{BAR_WIDTH, DEFAULT_REFRESH_RATE};

/// Byte-accounted progress meter for one transfer
#[derive(Debug)]
pub struct ProgressMeter {
    total: u64,
    current: AtomicU64,
    show_percent: bool,
    show_bar: bool,
    refresh_rate: Duration,
    visible: bool,
    started_at: Option<Instant>,
    last_render: Option<Instant>,
}

impl ProgressMeter {
    /// Create a meter for a transfer of `total` bytes (0 = unknown)
    pub fn new(total: u64) -> Self {
        Self {
            total,
            current: AtomicU64::new(0),
            show_percent: true,
            show_bar: true,
            refresh_rate: DEFAULT_REFRESH_RATE,
            visible: true,
            started_at: None,
            last_render: None,
        }
    }

    /// Suppress terminal rendering (byte accounting still runs)
    ///
    /// Used when stdout is not an interactive terminal.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Mark the transfer start and draw the first frame; no-op if started
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
            self.render();
        }
    }

    /// Advance the counter by `n` and return the new value
    pub fn add(&mut self, n: u64) -> u64 {
        let current = self.current.fetch_add(n, Ordering::Relaxed) + n;
        self.render_if_due();
        current
    }

    /// Advance the counter by one
    pub fn increment(&mut self) -> u64 {
        self.add(1)
    }

    /// Set the counter to an absolute value (resynchronization)
    pub fn set(&mut self, n: u64) {
        self.current.store(n, Ordering::Relaxed);
        self.render_if_due();
    }

    /// Current byte count
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }

    /// Expected total (0 = unknown)
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Force one final render and move the cursor to a fresh line
    pub fn finish(&mut self) {
        if self.started_at.is_some() && self.visible {
            self.render();
            println!();
        }
    }

    fn render_if_due(&mut self) {
        if self.started_at.is_none() {
            return;
        }
        let due = match self.last_render {
            Some(at) => at.elapsed() >= self.refresh_rate,
            None => true,
        };
        if due {
            self.render();
        }
    }

    /// Draw one frame in place on stdout
    fn render(&mut self) {
        if !self.visible {
            return;
        }
        let current = self.current();
        let mut line = String::new();

        if self.total > 0 {
            let ratio = (current as f64 / self.total as f64).min(1.0);
            if self.show_percent {
                line.push_str(&format!("{:3.0}% ", ratio * 100.0));
            }
            if self.show_bar {
                let filled = (ratio * BAR_WIDTH as f64) as usize;
                line.push('[');
                line.push_str(&"=".repeat(filled));
                line.push_str(&" ".repeat(BAR_WIDTH - filled));
                line.push_str("] ");
            }
            line.push_str(&format!(
                "{} / {}",
                format_bytes(current),
                format_bytes(self.total)
            ));
        } else {
            line.push_str(&format_bytes(current));
        }

        print!("\r{}", line);
        let _ = io::stdout().flush();
        self.last_render = Some(Instant::now());
    }
}

impl Write for ProgressMeter {
    /// Count the bytes and always report them written; the meter never fails
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.add(buf.len() as u64);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fan-out writer: forwards each write to every sink, first error wins
pub struct MultiWriter<'a> {
    sinks: Vec<&'a mut dyn Write>,
}

impl<'a> MultiWriter<'a> {
    pub fn new(sinks: Vec<&'a mut dyn Write>) -> Self {
        Self { sinks }
    }
}

impl Write for MultiWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
