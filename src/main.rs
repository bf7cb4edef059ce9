//! Tanx entry point
//!
//! Runs a scripted headless session on a software framebuffer and prints the
//! last frame as ASCII along with the score.
//!
//! Usage: `tanx [settings.json] [ticks]`

use std::process::ExitCode;
use std::time::Duration;

use tanx::platform::Button;
use tanx::renderer::Framebuffer;
use tanx::{FrameStatus, Game, Settings};

const DEFAULT_TICKS: u64 = 300;

/// Thumbnail size in characters
const ASCII_COLS: u32 = 80;
const ASCII_ROWS: u32 = 25;

/// Drive forward, sweep left and fire on a fixed rhythm
fn script(game: &mut Game, tick: u64, total: u64) {
    match tick {
        0 => game.press(Button::Up),
        60 => game.release(Button::Up),
        _ => {}
    }
    if tick % 8 == 0 {
        game.press(Button::Left);
    }
    if tick % 25 == 0 {
        game.press(Button::Fire);
    }
    if tick + 1 >= total {
        game.press(Button::Quit);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let total = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    let mut fb = Framebuffer::new(settings.width, settings.height);
    let mut game = Game::new(settings);

    let mut ticks = 0;
    script(&mut game, ticks, total);
    loop {
        match game.advance(&mut fb) {
            FrameStatus::Quit => break,
            FrameStatus::Waiting => std::thread::sleep(Duration::from_millis(game.remaining_ms())),
            FrameStatus::Ticked(stats) => {
                ticks += 1;
                log::trace!(
                    "tick {}: {} objects, {} sparks drawn",
                    ticks,
                    stats.objects,
                    stats.sparks
                );
                script(&mut game, ticks, total);
            }
        }
    }

    let world = game.world();
    println!("{}", fb.to_ascii(ASCII_COLS, ASCII_ROWS));
    println!(
        "ticks: {}  kills: {}  deaths: {}  objects: {}  sparks: {}  tank: {:?}",
        world.ticks,
        world.kills,
        world.deaths,
        world.objects.len(),
        world.sparks.len(),
        world.brain.phase()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tanx (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("tanx: {}", e);
            ExitCode::FAILURE
        }
    }
}
