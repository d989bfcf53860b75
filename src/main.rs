use clap::Parser;

use screensweeper::{CaptureError, Config, Controller, EnigoDriver, FrameSource, Theme};

/// Plays the on-screen minesweeper board described by the built-in
/// calibration: sample, deduce, click, repeat.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Compute decisions and positions but never click.
    #[arg(long)]
    noclick: bool,
    /// Reveal one random cell before the first scan.
    #[arg(long)]
    begin: bool,
    /// Log every deduction decision and loop iteration.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), CaptureError> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = Config {
        dry_run: args.noclick,
        opening_move: args.begin,
        ..Config::default()
    };
    let frames = FrameSource::new(config.monitor)?;
    let mut controller = Controller::new(config, Theme::default(), frames, EnigoDriver::new());

    let outcome = controller.run()?;
    println!("{outcome}");
    Ok(())
}
