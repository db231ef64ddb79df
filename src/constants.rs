/// # Memory map
///
/// The machine addresses 4096 bytes. The low 0x200 bytes are reserved for
/// the interpreter; the only thing this implementation keeps there is the
/// font sprite sheet at [`FONT_BASE`]. Programs are loaded at
/// [`PROGRAM_BASE`] and own everything above it.
pub const MEMORY_SIZE: usize = 4096;

/// Addresses are 12 bits wide; every memory access is masked down to this.
pub const ADDR_MASK: u16 = 0x0FFF;

/// Where rom images are copied and where the program counter starts.
pub const PROGRAM_BASE: usize = 0x200;

/// The largest rom image that fits above the reserved region.
pub const ROM_CAPACITY: usize = MEMORY_SIZE - PROGRAM_BASE;

/// First byte of the font sprite sheet.
pub const FONT_BASE: usize = 0x50;

/// Each font glyph is five bytes tall.
pub const FONT_GLYPH_SIZE: usize = 5;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The value of a lit framebuffer cell. Dark cells are zero, so hosts may
/// treat any nonzero cell as lit and may also blit the buffer directly as
/// 32-bit pixels.
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// Sprites for the hexadecimal digits 0..F, five bytes per glyph, each
/// byte one 8-pixel row. Copied to [`FONT_BASE`] when a machine is built
/// and addressed by the font-load instruction.
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
