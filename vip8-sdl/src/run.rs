use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8::Machine;

use crate::display::Display;
use crate::keymap::keymap;

/// Load the rom and drive the machine until the window closes.
///
/// The machine owns no timing, so the cadence lives here: one cycle per
/// period at the configured clock rate, sleeping off whatever is left of
/// each period. Key events are latched into the machine as they arrive
/// and frames are rendered only when the machine reports a redraw.
pub fn run(rom: &Path, clock: u32, scale: u32) -> Result<(), String> {
    let mut machine = Machine::new();

    let file = File::open(rom).map_err(|e| format!("unable to open {}: {e}", rom.display()))?;
    let mut reader = BufReader::new(file);
    let loaded = machine.load_rom(&mut reader).map_err(|e| e.to_string())?;
    info!("running {} ({loaded} bytes)", rom.display());

    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump()?;

    let period = Duration::from_secs(1) / clock.max(1);
    let mut last_cycle = Instant::now();

    'event: loop {
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(latch) = keymap(key) {
                        machine.key_press(latch);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(latch) = keymap(key) {
                        machine.key_release(latch);
                    }
                }
                _ => {}
            }
        }

        machine.cycle();
        if let Some(frame) = machine.take_frame() {
            display.render(&frame)?;
        }

        let elapsed = last_cycle.elapsed();
        if period > elapsed {
            thread::sleep(period - elapsed);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
