// LuxWatch — Console Renderer
//
// Framed, fixed-width text block per cycle. Every row is padded (or cut) to
// CONSOLE_INNER_WIDTH characters so the right border always lines up.

use std::fmt::Write as _;
use std::io::Write;

use crate::config::{CONSOLE_BAR_WIDTH, CONSOLE_INNER_WIDTH};
use crate::events::SampleCycle;
use crate::render::{bar_fill, Renderer};

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = ' ';

pub struct ConsoleRenderer<W> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, cycle: &SampleCycle) {
        let block = frame(cycle);
        if let Err(e) = self.out.write_all(block.as_bytes()).and_then(|_| self.out.flush()) {
            log::debug!("Console write failed: {}", e);
        }
    }
}

/// Build the whole text block for one cycle.
pub fn frame(cycle: &SampleCycle) -> String {
    let filled = bar_fill(cycle.instant, CONSOLE_BAR_WIDTH) as usize;
    let bar: String = (0..CONSOLE_BAR_WIDTH as usize)
        .map(|i| if i < filled { BAR_FILLED } else { BAR_EMPTY })
        .collect();

    let rows = [
        format!(" Time: {}s", cycle.elapsed_s),
        format!(" Current: {:.1} lx", cycle.instant),
        format!(" Average: {:.1} lx", cycle.smoothed),
        format!(" [{}] ", bar),
        format!(" Condition: {}", cycle.band.label()),
    ];

    let rule = "─".repeat(CONSOLE_INNER_WIDTH);
    let mut block = String::new();
    let _ = writeln!(block, "┌{}┐", rule);
    for row in &rows {
        let _ = writeln!(block, "│{}│", fit(row));
    }
    let _ = writeln!(block, "└{}┘", rule);
    block
}

/// Pad `row` to the inner width, cutting anything that would overflow it.
fn fit(row: &str) -> String {
    let clipped: String = row.chars().take(CONSOLE_INNER_WIDTH).collect();
    format!("{:<width$}", clipped, width = CONSOLE_INNER_WIDTH)
}
