use crate::opcode::Opcode;
use crate::ops;
use crate::state::State;

/// Every instruction is a pure transition from the current state to the
/// next one. `op` is the word being executed, `entropy` a uniformly
/// random byte drawn by the driver for the one instruction that wants it.
///
/// Handlers run after the driver has already advanced the program counter
/// past the instruction, so a "skip" is a further +2 and a stall is -2.
pub type Handler = fn(op: u16, state: &State, entropy: u8) -> State;

/// Selects the handler for an instruction word.
///
/// The top nibble picks a family; families 0, 8, E and F consult a
/// secondary selector (their low nibble, or the whole low byte for
/// family F). A `match` over the nibbles keeps selection a constant-time
/// jump table. Words with no assigned handler fall through to
/// [`ops::nop`]: dispatch is permissive and never an error path.
pub fn decode(op: u16) -> Handler {
    match op.nibbles() {
        (0x0, .., 0x0) => ops::cls,
        (0x0, .., 0xE) => ops::ret,
        (0x1, ..) => ops::jp,
        (0x2, ..) => ops::call,
        (0x3, ..) => ops::se_kk,
        (0x4, ..) => ops::sne_kk,
        (0x5, .., 0x0) => ops::se_v,
        (0x6, ..) => ops::ld_kk,
        (0x7, ..) => ops::add_kk,
        (0x8, .., 0x0) => ops::ld_v,
        (0x8, .., 0x1) => ops::or_v,
        (0x8, .., 0x2) => ops::and_v,
        (0x8, .., 0x3) => ops::xor_v,
        (0x8, .., 0x4) => ops::add_v,
        (0x8, .., 0x5) => ops::sub_v,
        (0x8, .., 0x6) => ops::shr,
        (0x8, .., 0x7) => ops::subn_v,
        (0x8, .., 0xE) => ops::shl,
        (0x9, .., 0x0) => ops::sne_v,
        (0xA, ..) => ops::ld_i,
        (0xB, ..) => ops::jp_v0,
        (0xC, ..) => ops::rnd,
        (0xD, ..) => ops::drw,
        (0xE, .., 0xE) => ops::skp,
        (0xE, .., 0x1) => ops::sknp,
        (0xF, .., 0x0, 0x7) => ops::ld_from_dt,
        (0xF, .., 0x0, 0xA) => ops::wait_key,
        (0xF, .., 0x1, 0x5) => ops::ld_to_dt,
        (0xF, .., 0x1, 0x8) => ops::ld_to_st,
        (0xF, .., 0x1, 0xE) => ops::add_i,
        (0xF, .., 0x2, 0x9) => ops::ld_font,
        (0xF, .., 0x3, 0x3) => ops::bcd,
        (0xF, .., 0x5, 0x5) => ops::store_v,
        (0xF, .., 0x6, 0x5) => ops::load_v,
        _ => ops::nop,
    }
}
