//! Running the animation.

use crate::args::Args;
use lifemorph_lib::{Engine, Status};
use log::info;
use std::{
    error::Error,
    io::{self, Write},
};

/// One line describing how the animation ended.
pub(crate) fn summary(engine: &Engine, status: Status) -> String {
    match status {
        Status::Converged => format!("Goal reached after {} frames.", engine.frame()),
        Status::Exhausted => format!(
            "Out of frames after {} frames, {} cells still differ.",
            engine.frame(),
            engine.mismatch_count()
        ),
        Status::Initial | Status::Running => format!("Stopped at frame {}.", engine.frame()),
    }
}

/// Animates without the TUI, writing the frames to `out`.
///
/// Writes every frame when `all` is set, otherwise only the last one.
/// The final grid is always written, even when no step was made.
fn animate_plain<W: Write>(
    mut engine: Engine,
    max_frames: u64,
    all: bool,
    out: &mut W,
) -> io::Result<Status> {
    let mut result = Ok(());
    let status = engine.run(max_frames, |frame, grid| {
        if all && result.is_ok() {
            result = writeln!(out, "Frame {}:\n{}", frame, grid);
        }
    });
    result?;
    if !all || engine.frame() == 0 {
        writeln!(out, "{}", engine.live())?;
    }
    writeln!(out, "{}", summary(&engine, status))?;
    Ok(status)
}

/// Derives the target from the image and runs the animation.
pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = &args.config;
    let source = config.pattern_source()?;
    let target = source.derive(&args.image)?;
    info!(
        "Target from {}: {} living cells out of {}",
        args.image.display(),
        target.cell_count(),
        source.size() * source.size()
    );
    let engine = config.engine(target)?;

    #[cfg(feature = "tui")]
    {
        if !args.no_tui {
            return crate::tui::animate_with_tui(engine);
        }
    }

    animate_plain(engine, config.max_frames, args.all, &mut io::stdout().lock())?;
    Ok(())
}
