//! Tray icon image, drawn at startup

/// Edge length of the tray icon in pixels
pub const ICON_SIZE: u32 = 32;

const BLURPLE: [u8; 3] = [0x58, 0x65, 0xF2];
const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// RGBA pixels of a filled disc with a white speech dot in the middle
pub fn render_rgba(size: u32) -> Vec<u8> {
    let center = size as f32 / 2.0;
    let outer = center - 0.5;
    let inner = size as f32 / 6.0;

    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let distance = (dx * dx + dy * dy).sqrt();

            let pixel = if distance <= inner {
                [WHITE[0], WHITE[1], WHITE[2], 0xFF]
            } else if distance <= outer {
                [BLURPLE[0], BLURPLE[1], BLURPLE[2], 0xFF]
            } else {
                [0, 0, 0, 0]
            };
            pixels.extend_from_slice(&pixel);
        }
    }
    pixels
}

/// Reorder RGBA pixels into the ARGB layout used by StatusNotifierItem
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub fn rgba_to_argb(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|chunk| [chunk[3], chunk[0], chunk[1], chunk[2]])
        .collect()
}
