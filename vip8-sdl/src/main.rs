use std::path::PathBuf;
use std::process;

use clap::Parser;

mod display;
mod keymap;
mod run;

/// SDL2 frontend for the vip8 emulation core.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path of the rom image to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700)]
    clock: u32,

    /// Window pixels per framebuffer cell
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(message) = run::run(&args.rom, args.clock, args.scale) {
        log::error!("{message}");
        process::exit(1);
    }
}
