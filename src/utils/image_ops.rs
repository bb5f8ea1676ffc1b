use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Asynchronously encode an image to PNG bytes using spawn_blocking.
///
/// PNG encoding is CPU-intensive and can block the async runtime if
/// done synchronously.
pub async fn encode_png_async(img: DynamicImage) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || {
        let mut png_bytes = Vec::new();
        let mut cursor = Cursor::new(&mut png_bytes);
        img.write_to(&mut cursor, ImageFormat::Png)
            .context("Failed to encode image as PNG")?;
        Ok(png_bytes)
    })
    .await
    .context("Failed to spawn blocking task for PNG encoding")?
}

/// Encode an image as an inline `data:image/png;base64,` URI.
pub async fn encode_png_data_uri_async(img: DynamicImage) -> Result<String> {
    let png_bytes = encode_png_async(img).await?;
    Ok(format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png_bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[tokio::test]
    async fn encodes_png_bytes() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            100,
            100,
            Rgba([255, 0, 0, 255]),
        ));

        let png_bytes = encode_png_async(img).await.unwrap();
        assert!(!png_bytes.is_empty());
        assert_eq!(&png_bytes[1..4], b"PNG");
    }

    #[tokio::test]
    async fn encodes_data_uri() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            1,
            1,
            Rgba([0, 255, 0, 255]),
        ));

        let uri = encode_png_data_uri_async(img).await.unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > "data:image/png;base64,".len());
    }
}
