//! The animated terminal view.

use crate::cli::summary;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lifemorph_lib::{Config, Engine, Grid, State, Status};
use std::{
    error::Error,
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

/// Restores the terminal when dropped, even on errors.
struct RawTerminal;

impl RawTerminal {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(RawTerminal)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct AnimationWindow {
    out: Stdout,
    status: Status,
    paused: bool,
    max_frames: u64,
    interval: Duration,
    last_frame: Instant,
}

impl AnimationWindow {
    fn new(config: &Config) -> Self {
        AnimationWindow {
            out: io::stdout(),
            status: Status::Initial,
            paused: false,
            max_frames: config.max_frames,
            interval: Duration::from_millis(config.interval_ms),
            last_frame: Instant::now(),
        }
    }

    /// Whether frames should still be computed.
    fn is_running(&self) -> bool {
        !self.paused && matches!(self.status, Status::Initial | Status::Running)
    }

    fn status_str(&self) -> &'static str {
        match self.status {
            Status::Converged => "Goal reached! Press [r] to restart or [q] to quit.",
            Status::Exhausted => "Out of frames. Press [r] to restart or [q] to quit.",
            _ if self.paused => "Paused. Press [space] to resume, [r] to restart, [q] to quit.",
            _ => "Running... Press [space] to pause, [r] to restart, [q] to quit.",
        }
    }

    fn draw_world(&mut self, grid: &Grid, rows: u16, cols: u16) -> io::Result<()> {
        let shown_cols = (cols as usize / 2).min(grid.size());
        for (y, row) in grid.rows().take(rows as usize).enumerate() {
            let line: String = row[..shown_cols]
                .iter()
                .map(|&s| match s {
                    State::Alive => "██",
                    State::Dead => "  ",
                })
                .collect();
            queue!(self.out, cursor::MoveTo(0, y as u16 + 1), Print(line))?;
        }
        Ok(())
    }

    fn draw_bar(&mut self, y: u16, cols: u16, text: &str) -> io::Result<()> {
        let text: String = format!("{:width$}", text, width = cols as usize)
            .chars()
            .take(cols as usize)
            .collect();
        queue!(
            self.out,
            cursor::MoveTo(0, y),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )
    }

    fn update(&mut self, engine: &Engine) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        queue!(self.out, terminal::Clear(ClearType::All))?;
        let top = format!(
            "Frame: {}  p: {:.2}  Cells: {}  Differ: {}",
            engine.frame(),
            engine.match_probability(),
            engine.live().cell_count(),
            engine.mismatch_count()
        );
        self.draw_bar(0, cols, &top)?;
        self.draw_world(engine.live(), rows.saturating_sub(2), cols)?;
        let bottom = self.status_str();
        self.draw_bar(rows.saturating_sub(1), cols, bottom)?;
        self.out.flush()
    }

    fn quit(&mut self) -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        self.draw_bar(rows.saturating_sub(1), cols, "Are you sure to quit? [Y/n]")?;
        self.out.flush()?;
        loop {
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                return Ok(matches!(
                    code,
                    KeyCode::Char('Y') | KeyCode::Char('y') | KeyCode::Enter
                ));
            }
        }
    }

    /// Computes one frame, or stops when the grid matches or the frames
    /// run out.
    fn advance(&mut self, engine: &mut Engine) {
        self.last_frame = Instant::now();
        if engine.is_converged() {
            self.status = Status::Converged;
        } else if engine.frame() >= self.max_frames {
            self.status = Status::Exhausted;
        } else {
            engine.step();
            self.status = engine.status();
            if self.status == Status::Running && engine.frame() >= self.max_frames {
                self.status = Status::Exhausted;
            }
        }
    }
}

/// Animates in the terminal until the user quits, then prints the last grid.
pub(crate) fn animate_with_tui(mut engine: Engine) -> Result<(), Box<dyn Error>> {
    let mut window = AnimationWindow::new(engine.config());
    {
        let _guard = RawTerminal::enter(&mut window.out)?;
        window.update(&engine)?;

        loop {
            let has_event = if window.is_running() {
                let timeout = window.interval.saturating_sub(window.last_frame.elapsed());
                event::poll(timeout)?
            } else {
                true
            };
            if !has_event {
                window.advance(&mut engine);
                window.update(&engine)?;
                continue;
            }
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        if matches!(window.status, Status::Converged | Status::Exhausted) {
                            break;
                        }
                        let was_paused = window.paused;
                        window.paused = true;
                        if window.quit()? {
                            break;
                        }
                        window.paused = was_paused;
                        window.update(&engine)?;
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        window.paused = !window.paused;
                        window.update(&engine)?;
                    }
                    KeyCode::Char('r') => {
                        engine.restart();
                        window.status = Status::Initial;
                        window.paused = false;
                        window.last_frame = Instant::now();
                        window.update(&engine)?;
                    }
                    _ => (),
                },
                Event::Resize(..) => window.update(&engine)?,
                _ => (),
            }
        }
    }

    print!("{}", engine.live());
    println!("{}", summary(&engine, window.status));
    Ok(())
}
