//! Normal-map synthesis from height data
//!
//! Heights are the grayscale of each pixel. Gradients come from a 3x3
//! Sobel kernel; samples outside the image are clamped to the nearest
//! edge pixel. Coordinates are bottom-up: row 0 is the bottom image row,
//! so "top" neighbors are at `y - 1`.

use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use partforge_core::{Color, Vec3};
use tracing::debug;

use super::{TextureError, TextureResult};

/// Grayscale heights in bottom-up row order
#[derive(Debug, Clone)]
pub struct HeightField {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl HeightField {
    pub fn from_image(image: &DynamicImage) -> TextureResult<Self> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions { width, height });
        }

        let mut values = Vec::with_capacity(width as usize * height as usize);
        for row in (0..height).rev() {
            for x in 0..width {
                values.push(Color::from_rgba8(rgba.get_pixel(x, row).0).grayscale());
            }
        }
        Ok(Self { width, height, values })
    }

    /// Heights given bottom row first
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> TextureResult<Self> {
        if width == 0 || height == 0 || values.len() != width as usize * height as usize {
            return Err(TextureError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, values })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height at (x, y), clamped to the edge
    pub fn sample(&self, x: i64, y: i64) -> f32 {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        self.values[y * self.width as usize + x]
    }
}

/// How a synthesized normal is packed into RGBA
///
/// The two layouts are consumed by different readers and are not
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// `(1-x, 1-z, 1-y)` with opaque alpha, used when rewriting copied files
    Rgb,
    /// `(1-y, 1-z, 1)` with alpha `1-x`, used for `.mbm` bitmaps
    PackedAlpha,
}

impl ChannelLayout {
    fn pack(self, n: Vec3) -> Color {
        match self {
            ChannelLayout::Rgb => Color::new(1.0 - n.x, 1.0 - n.z, 1.0 - n.y, 1.0),
            ChannelLayout::PackedAlpha => Color::new(1.0 - n.y, 1.0 - n.z, 1.0, 1.0 - n.x),
        }
    }
}

/// Unit surface normal at (x, y) remapped from [-1, 1] to [0, 1]
pub fn surface_normal(field: &HeightField, x: u32, y: u32, strength: f32) -> Vec3 {
    let (x, y) = (i64::from(x), i64::from(y));
    let at = |dx: i64, dy: i64| field.sample(x + dx, y + dy);

    let (tl, t, tr) = (at(-1, -1), at(0, -1), at(1, -1));
    let (l, r) = (at(-1, 0), at(1, 0));
    let (bl, b, br) = (at(-1, 1), at(0, 1), at(1, 1));

    let dx = (tr + 2.0 * r + br) - (tl + 2.0 * l + bl);
    let dy = (bl + 2.0 * b + br) - (tl + 2.0 * t + tr);

    let n = Vec3::new(dx, strength, dy).normalize();
    Vec3::new(n.x * 0.5 + 0.5, n.y * 0.5 + 0.5, n.z * 0.5 + 0.5)
}

/// Normal map for `field`, returned in top-down image order
pub fn synthesize(field: &HeightField, strength: f32, layout: ChannelLayout) -> RgbaImage {
    let (width, height) = (field.width(), field.height());
    RgbaImage::from_fn(width, height, |x, row| {
        let y = height - 1 - row;
        let color = layout.pack(surface_normal(field, x, y, strength));
        Rgba(color.to_rgba8())
    })
}

/// Replace the image at `path` with its synthesized normal map
///
/// The result is saved as an RGB PNG under the same file name.
pub fn rewrite_in_place(path: &Path, strength: f32) -> TextureResult<()> {
    debug!(path = %path.display(), strength, "Converting to normal map");
    let source = image::open(path)?;
    let field = HeightField::from_image(&source)?;
    let normals = DynamicImage::ImageRgba8(synthesize(&field, strength, ChannelLayout::Rgb)).to_rgb8();
    normals.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Synthesize a normal map from the image at `input` and save it to
/// `output`, in the format implied by its extension
pub fn convert_file(input: &Path, output: &Path, strength: f32, layout: ChannelLayout) -> TextureResult<()> {
    let source = image::open(input)?;
    let field = HeightField::from_image(&source)?;
    let normals = DynamicImage::ImageRgba8(synthesize(&field, strength, layout));
    match layout {
        ChannelLayout::Rgb => normals.to_rgb8().save(output)?,
        ChannelLayout::PackedAlpha => normals.save(output)?,
    }
    debug!(input = %input.display(), output = %output.display(), ?layout, "Wrote normal map");
    Ok(())
}
