use std::path::Path;

use image::Rgb;

use crate::error::RenderError;

/// Packed RGB bitmap, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    rgb: Vec<u8>
}

impl Image {
    pub fn new(width: usize, height: usize) -> Self {
        Image {
            width,
            height,
            rgb: vec![0u8; width * height * 3]
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plot(&mut self, x: usize, y: usize, colour: Rgb<u8>) {
        let k = (y * self.width + x) * 3;
        self.rgb[k..k + 3].copy_from_slice(&colour.0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb<u8> {
        let k = (y * self.width + x) * 3;
        Rgb([self.rgb[k], self.rgb[k + 1], self.rgb[k + 2]])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgb
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.rgb
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        image::save_buffer(path, &self.rgb, self.width as u32, self.height as u32, image::ColorType::Rgb8)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_and_read_back() {
        let mut image = Image::new(4, 3);
        image.plot(3, 2, Rgb([1, 2, 3]));

        assert_eq!(image.pixel(3, 2), Rgb([1, 2, 3]));
        assert_eq!(image.pixel(0, 0), Rgb([0, 0, 0]));
        assert_eq!(&image.as_bytes()[33..36], &[1, 2, 3]);
    }

    #[test]
    fn rows_are_contiguous() {
        let mut image = Image::new(5, 2);
        image.as_bytes_mut()[15] = 9;

        assert_eq!(image.as_bytes().len(), 30);
        assert_eq!(image.pixel(0, 1), Rgb([9, 0, 0]));
    }
}
