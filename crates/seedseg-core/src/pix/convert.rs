//! Channel layout conversion

use super::{Channels, Pix, PixMut};
use crate::error::Result;

impl Pix {
    /// Convert to a 3-channel buffer.
    ///
    /// Gray samples are replicated into all three channels; a color
    /// buffer is returned as a cheap clone.
    pub fn to_rgb(&self) -> Result<Pix> {
        match self.channels() {
            Channels::Rgb => Ok(self.clone()),
            Channels::Gray => {
                let mut out = PixMut::new(self.width(), self.height(), Channels::Rgb)?;
                for (px, &v) in out.data_mut().chunks_exact_mut(3).zip(self.data()) {
                    px.fill(v);
                }
                Ok(out.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Channels, ColorSample, Pix};

    #[test]
    fn test_gray_to_rgb() {
        let gray = Pix::from_raw(2, 1, Channels::Gray, vec![7, 200]).unwrap();
        let rgb = gray.to_rgb().unwrap();
        assert_eq!(rgb.channels(), Channels::Rgb);
        assert_eq!(rgb.get_color(0, 0), Some(ColorSample::new(7, 7, 7)));
        assert_eq!(rgb.get_color(1, 0), Some(ColorSample::new(200, 200, 200)));
    }

    #[test]
    fn test_rgb_to_rgb_shares() {
        let rgb = Pix::new(2, 2, Channels::Rgb).unwrap();
        let same = rgb.to_rgb().unwrap();
        assert!(std::ptr::eq(rgb.data().as_ptr(), same.data().as_ptr()));
        assert!(same.sizes_equal(&rgb));
    }
}
