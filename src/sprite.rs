use base64::{engine::general_purpose, Engine as _};
use image::GenericImageView;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kitty graphics format code for PNG payloads.
const FORMAT_PNG: u32 = 100;
const CHUNK_SIZE: usize = 4096;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteData {
    /// Base64 of the undecoded PNG bytes.
    pub payload: String,
    pub width: u32,
    pub height: u32,
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (width, height) = image.dimensions();
    Ok(SpriteData {
        payload: general_purpose::STANDARD.encode(bytes),
        width,
        height,
    })
}

/// Build the kitty escape sequence that draws `sprite` over `cols` x `rows` cells.
pub fn kitty_sequence(sprite: &SpriteData, cols: u16, rows: u16) -> Result<String, String> {
    let payload = sprite.payload.as_bytes();
    let total_chunks = payload.len().div_ceil(CHUNK_SIZE);
    let mut sequences = String::new();

    for (index, chunk) in payload.chunks(CHUNK_SIZE).enumerate() {
        let more = u8::from(index + 1 < total_chunks);
        let chunk_str = std::str::from_utf8(chunk).map_err(|err| err.to_string())?;
        if index == 0 {
            let mut params = format!(
                "f={FORMAT_PNG},s={},v={},a=T,t=d",
                sprite.width, sprite.height
            );
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            if rows > 0 {
                params.push_str(&format!(",r={rows}"));
            }
            sequences.push_str(&format!("\x1b_G{params},m={more};{chunk_str}\x1b\\"));
        } else {
            sequences.push_str(&format!("\x1b_Gm={more};{chunk_str}\x1b\\"));
        }
    }
    Ok(sequences)
}

/// Largest cell box with the sprite's aspect ratio that fits `max_cols` x `max_rows`.
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.height == 0 {
        return (max_cols, max_rows);
    }
    let image_ratio = sprite.width as f32 / sprite.height as f32;
    let max_cols_f = max_cols as f32;
    let max_rows_f = max_rows as f32;
    let cols_for_max_rows = image_ratio * max_rows_f * CELL_ASPECT;
    if cols_for_max_rows <= max_cols_f {
        let cols = cols_for_max_rows.max(1.0).round() as u16;
        return (cols.max(1), max_rows.max(1));
    }
    let rows_for_max_cols = max_cols_f / (image_ratio * CELL_ASPECT);
    let rows = rows_for_max_cols.max(1.0).round() as u16;
    (max_cols.max(1), rows.min(max_rows).max(1))
}

/// Cell box for the sprite at `scale`, where `max_scale` fills the whole area.
///
/// Scales past `max_scale` are clamped so a very large sprite still fits.
pub fn sprite_fit_scaled(
    sprite: &SpriteData,
    max_cols: u16,
    max_rows: u16,
    scale: f32,
    max_scale: f32,
) -> (u16, u16) {
    let ratio = (scale / max_scale.max(f32::EPSILON)).clamp(0.05, 1.0);
    let cols = ((max_cols as f32) * ratio).floor().max(1.0) as u16;
    let rows = ((max_rows as f32) * ratio).floor().max(1.0) as u16;
    sprite_fit(sprite, cols, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(payload_len: usize) -> SpriteData {
        SpriteData {
            payload: "A".repeat(payload_len),
            width: 96,
            height: 96,
        }
    }

    #[test]
    fn test_kitty_sequence_chunks_payload() {
        let sprite = square(CHUNK_SIZE + 10);
        let sequence = kitty_sequence(&sprite, 20, 10).unwrap();
        assert!(sequence.starts_with("\x1b_Gf=100,s=96,v=96,a=T,t=d,c=20,r=10,m=1;"));
        assert!(sequence.contains("\x1b_Gm=0;"));
        assert_eq!(sequence.matches("\x1b\\").count(), 2);
    }

    #[test]
    fn test_kitty_sequence_single_chunk() {
        let sequence = kitty_sequence(&square(8), 0, 0).unwrap();
        assert_eq!(sequence, "\x1b_Gf=100,s=96,v=96,a=T,t=d,m=0;AAAAAAAA\x1b\\");
    }

    #[test]
    fn test_sprite_fit_respects_cell_aspect() {
        let sprite = square(4);
        assert_eq!(sprite_fit(&sprite, 40, 10), (20, 10));
        assert_eq!(sprite_fit(&sprite, 10, 40), (10, 5));
    }

    #[test]
    fn test_scaled_fit_grows_with_scale() {
        let sprite = square(4);
        let small = sprite_fit_scaled(&sprite, 80, 20, 1.0, 3.0);
        let large = sprite_fit_scaled(&sprite, 80, 20, 2.0, 3.0);
        let capped = sprite_fit_scaled(&sprite, 80, 20, 9.0, 3.0);
        assert!(large.1 > small.1);
        assert_eq!(capped, sprite_fit(&sprite, 80, 20));
    }
}
