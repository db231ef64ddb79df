use std::io::Read;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{ADDR_MASK, PROGRAM_BASE, ROM_CAPACITY};
use crate::decode::decode;
use crate::error::RomError;
use crate::state::{FrameBuffer, State};

/// # Machine
///
/// Owns the full emulated hardware state plus the random source, and
/// drives the fetch-decode-execute cycle. A host embeds it by:
///
/// - loading a rom,
/// - writing key latches as its input layer sees presses and releases,
/// - calling [`cycle`](Machine::cycle) repeatedly at whatever rate it
///   wants the machine to run,
/// - taking frames to render and polling [`sound_active`](Machine::sound_active)
///   for its tone.
///
/// The machine performs no timing, sleeping or scheduling of its own and
/// never raises after a program has loaded.
pub struct Machine {
    state: State,
    rng: StdRng,
}

impl Machine {
    /// A powered-on machine with its random source seeded from the
    /// operating system.
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// A powered-on machine with a fixed random seed, for deterministic
    /// replay of a run.
    pub fn from_seed(seed: u64) -> Self {
        Machine {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Copy a rom image into memory at the program base.
    ///
    /// The image is read and validated before memory is touched: a short
    /// read or an oversized image leaves the machine exactly as it was.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, RomError> {
        let mut image = Vec::new();
        reader.read_to_end(&mut image)?;
        if image.len() > ROM_CAPACITY {
            return Err(RomError::TooLarge {
                size: image.len(),
                capacity: ROM_CAPACITY,
            });
        }
        self.state.memory[PROGRAM_BASE..PROGRAM_BASE + image.len()].copy_from_slice(&image);
        info!("loaded a {} byte rom image", image.len());
        Ok(image.len())
    }

    /// Execute one instruction and tick the timers.
    ///
    /// The program counter is advanced past the fetched word before the
    /// handler runs, so control-flow handlers see the address of the next
    /// instruction; both timers then lose one while nonzero.
    pub fn cycle(&mut self) {
        let op = self.fetch();
        self.state.opcode = op;
        self.state.pc = self.state.pc.wrapping_add(2);

        let entropy: u8 = self.rng.gen();
        self.state = decode(op)(op, &self.state, entropy);

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Latch a key down.
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad[usize::from(key & 0xF)] = true;
    }

    /// Latch a key up.
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad[usize::from(key & 0xF)] = false;
    }

    /// The framebuffer, if anything has drawn to it since the last take.
    /// Taking a frame clears the pending-redraw flag.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the host should be playing its tone right now.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Read-only view of the machine state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The big-endian word at the program counter. Memory is bytes;
    /// instructions are two of them, high byte first.
    fn fetch(&self) -> u16 {
        let hi = self.state.memory[(self.state.pc & ADDR_MASK) as usize];
        let lo = self.state.memory[(self.state.pc.wrapping_add(1) & ADDR_MASK) as usize];
        u16::from(hi) << 8 | u16::from(lo)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with_rom(rom: &[u8]) -> Machine {
        let mut machine = Machine::from_seed(0);
        let mut rom = rom;
        machine.load_rom(&mut rom).unwrap();
        machine
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let machine = machine_with_rom(&[0xAA, 0xBB]);
        assert_eq!(machine.fetch(), 0xAABB);
    }

    #[test]
    fn test_cycle_advances_pc_and_records_opcode() {
        let mut machine = machine_with_rom(&[0x61, 0x42]);
        machine.cycle();
        assert_eq!(machine.state.pc, 0x202);
        assert_eq!(machine.state.opcode, 0x6142);
        assert_eq!(machine.state.v[0x1], 0x42);
    }

    #[test]
    fn test_cycle_ticks_nonzero_timers() {
        let mut machine = machine_with_rom(&[0x61, 0x42]);
        machine.state.delay_timer = 2;
        machine.state.sound_timer = 1;
        machine.cycle();
        assert_eq!(machine.state.delay_timer, 1);
        assert_eq!(machine.state.sound_timer, 0);
        assert!(!machine.sound_active());
    }

    #[test]
    fn test_cycle_leaves_zero_timers_alone() {
        let mut machine = machine_with_rom(&[0x61, 0x42]);
        machine.cycle();
        assert_eq!(machine.state.delay_timer, 0);
        assert_eq!(machine.state.sound_timer, 0);
    }

    #[test]
    fn test_load_rom_round_trips_bytes() {
        let rom: Vec<u8> = (0..=255).collect();
        let mut machine = Machine::from_seed(0);
        let loaded = machine.load_rom(&mut rom.as_slice()).unwrap();
        assert_eq!(loaded, rom.len());
        assert_eq!(machine.state.memory[0x200..0x200 + rom.len()], rom[..]);
        assert_eq!(machine.state.pc, 0x200);
    }

    #[test]
    fn test_load_rom_rejects_oversized_image_untouched() {
        let rom = vec![0xAA; ROM_CAPACITY + 1];
        let mut machine = Machine::from_seed(0);
        let result = machine.load_rom(&mut rom.as_slice());
        assert!(matches!(result, Err(RomError::TooLarge { .. })));
        assert!(machine.state.memory[0x200..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_load_rom_accepts_largest_image() {
        let rom = vec![0xAA; ROM_CAPACITY];
        let mut machine = Machine::from_seed(0);
        assert_eq!(machine.load_rom(&mut rom.as_slice()).unwrap(), ROM_CAPACITY);
        assert_eq!(machine.state.memory[0xFFF], 0xAA);
    }

    #[test]
    fn test_key_wait_stalls_then_latches_lowest_key() {
        let mut machine = machine_with_rom(&[0xF1, 0x0A]);
        machine.cycle();
        // no key: the same word will fetch again
        assert_eq!(machine.state.pc, 0x200);

        machine.key_press(0xE);
        machine.key_press(0x3);
        machine.cycle();
        assert_eq!(machine.state.v[0x1], 0x3);
        assert_eq!(machine.state.pc, 0x202);
    }

    #[test]
    fn test_key_release_clears_latch() {
        let mut machine = Machine::from_seed(0);
        machine.key_press(0x4);
        assert!(machine.state.keypad[0x4]);
        machine.key_release(0x4);
        assert!(!machine.state.keypad[0x4]);
    }

    #[test]
    fn test_call_and_return_restore_pc() {
        // 0x200: call 0x206; 0x206: return
        let mut machine = machine_with_rom(&[0x22, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0xEE]);
        machine.cycle();
        assert_eq!(machine.state.pc, 0x206);
        assert_eq!(machine.state.sp, 1);
        machine.cycle();
        assert_eq!(machine.state.pc, 0x202);
        assert_eq!(machine.state.sp, 0);
    }

    #[test]
    fn test_zero_row_draw_scenario() {
        // V[A] = 5; I = 0x250; draw zero rows at (V0, VA)
        let mut machine = machine_with_rom(&[0x6A, 0x05, 0xA2, 0x50, 0xD0, 0xA0]);
        machine.cycle();
        machine.cycle();
        machine.cycle();
        assert_eq!(machine.state.v[0xA], 0x5);
        assert_eq!(machine.state.i, 0x250);
        assert!(machine.state.frame_buffer.iter().all(|&cell| cell == 0));
        assert_eq!(machine.state.v[0xF], 0x0);
    }

    #[test]
    fn test_take_frame_clears_pending_redraw() {
        let mut machine = machine_with_rom(&[0x00, 0xE0]);
        assert!(machine.take_frame().is_none());
        machine.cycle();
        assert!(machine.take_frame().is_some());
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_seeded_machines_agree() {
        let rom: &[u8] = &[0xC0, 0xFF];
        let mut first = machine_with_rom(rom);
        let mut second = machine_with_rom(rom);
        first.cycle();
        second.cycle();
        assert_eq!(first.state.v[0x0], second.state.v[0x0]);
    }

    #[test]
    fn test_sound_active_follows_timer() {
        let mut machine = Machine::from_seed(0);
        assert!(!machine.sound_active());
        machine.state.sound_timer = 3;
        assert!(machine.sound_active());
    }
}
