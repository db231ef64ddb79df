use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vip8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::FrameBuffer;

/// # Display
///
/// The machine's 64x32 monochrome framebuffer scaled up onto an SDL
/// window. Rendering only happens when the machine hands over a frame,
/// so an idle program costs nothing to display.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video = sdl.video()?;
        let window = video
            .window(
                "vip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        Ok(Display { canvas })
    }

    /// One RGB byte triple per framebuffer cell: white when lit, black
    /// when dark. The framebuffer is already row-major, so the triples
    /// concatenate straight into texture rows.
    fn frame_to_texture_bytes(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|&cell| {
                let intensity = if cell != 0 { 0xFF } else { 0x00 };
                [intensity; 3]
            })
            .collect()
    }

    /// Upload the framebuffer as a streaming RGB24 texture and present
    /// it; scaling up to the window is left to the canvas copy.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture_bytes(frame));
            })
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vip8::constants::PIXEL_ON;

    #[test]
    fn test_frame_to_texture_bytes() {
        let mut frame: FrameBuffer = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        frame[1] = PIXEL_ON;
        // any nonzero cell counts as lit
        frame[DISPLAY_WIDTH] = 1;
        let bytes = Display::frame_to_texture_bytes(&frame);

        let mut expected = vec![0u8; DISPLAY_WIDTH * DISPLAY_HEIGHT * 3];
        expected[3..6].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
        expected[DISPLAY_WIDTH * 3..DISPLAY_WIDTH * 3 + 3].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(bytes, expected);
    }
}
