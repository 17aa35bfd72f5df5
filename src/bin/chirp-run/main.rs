// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chirp: A chip-8 interpreter in Rust
//! Runs a ROM headless for a fixed number of frames, then shows the screen

#[cfg(test)]
mod tests;

use chirp_core::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let memdump = options.memdump;
    let mut state = State::new(options)?;
    for result in &mut state {
        if let Err(e) = result {
            eprintln!("{}", e.bold().red());
            break;
        }
    }
    state.cpu.screen().print_screen();
    state.cpu.dump();
    if memdump {
        println!("{}", state.cpu.mem());
    }
    Ok(())
}

/// Parses a hexadecimal string into a key index
fn parse_key(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value, 16)
}

/// Describes the machine being run: its mode, any quirks, and the memory map
fn banner(flags: &Flags) -> String {
    let mut banner = format!("{:?}", flags.mode);
    if flags.quirks.any() {
        banner += &format!(" {:?}", flags.quirks);
    }
    banner.push('\n');
    for region in [Region::Charset, Region::Program] {
        banner += &format!("{region:<8}{:03x?}\n", region.range());
    }
    banner
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chirp.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,

    #[options(help = "Set the instructions-per-frame rate.", default = "10")]
    pub speed: usize,
    #[options(help = "Run for this many frames, then stop.", default = "600")]
    pub frames: usize,
    #[options(help = "Pace frames at the target framerate, instead of running flat out.")]
    pub realtime: bool,
    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,

    #[options(help = "Run in (Chip8, SChip) mode.")]
    pub mode: Option<Mode>,
    #[options(
        short = "v",
        help = "Use CHIP-48 style bit-shifts, which don't touch vY."
    )]
    pub shift: bool,
    #[options(
        short = "b",
        help = "Use SUPER-CHIP style indexed jump, which is indexed relative to v[adr]."
    )]
    pub jumping: bool,

    #[options(
        long = "press",
        help = "Hold down a key (0-F) for the whole run.",
        parse(try_from_str = "parse_key"),
        meta = "KEY"
    )]
    pub keys: Vec<usize>,

    #[options(help = "Hexdump memory after the run.")]
    pub memdump: bool,
}

#[derive(Debug)]
struct State {
    pub speed: usize,
    pub frames: usize,
    pub rate: Option<u64>,
    pub cpu: CPU,
    pub ft: Instant,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let mut cpu = CPU::with_mode(options.mode.unwrap_or_default());
        cpu.load_program(&options.file)?;
        cpu.flags.debug = options.debug;
        // Flip the state of the quirks
        cpu.flags.quirks.shift ^= options.shift;
        cpu.flags.quirks.stupid_jumps ^= options.jumping;
        for key in options.keys {
            cpu.set_key_state(key, true)?;
        }
        if cpu.flags.debug {
            eprint!("{}", banner(&cpu.flags));
        }
        Ok(State {
            speed: options.speed,
            frames: options.frames,
            rate: options.realtime.then_some(options.frame_rate.max(1)),
            cpu,
            ft: Instant::now(),
        })
    }
    /// Runs one frame's worth of instructions, reporting unimplemented ones as they come
    fn tick_cpu(&mut self) -> Result<()> {
        for _ in 0..self.speed {
            match self.cpu.step() {
                Err(e) if !e.is_fatal() => eprintln!("{}", e.red()),
                Err(e) => return Err(e),
                Ok(_) => (),
            }
        }
        Ok(())
    }
    fn wait_for_next_frame(&mut self) {
        if let Some(rate) = self.rate {
            let rate = Duration::from_nanos(1_000_000_000 / rate + 1);
            std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
            self.ft += rate;
        }
    }
}

impl Iterator for State {
    type Item = Result<()>;

    /// Each item is one frame: a burst of instructions, then a timer tick
    fn next(&mut self) -> Option<Self::Item> {
        if self.frames == 0 {
            return None;
        }
        self.frames -= 1;
        self.wait_for_next_frame();
        if let Err(e) = self.tick_cpu() {
            return Some(Err(e));
        }
        self.cpu.tick_timers();
        Some(Ok(()))
    }
}
