//! Compositor Adapter: background fill dispatch and the per-pad composite
//! loop. Grounded on `gst_videomixer2_mix_frames` / `set_functions` in the
//! original C mixer. Unlike the original, which builds a 21-entry table of
//! hand-written per-format blend/overlay/fill functions, inputs here are
//! always converted to the single elected output format before reaching
//! this module (see `crate::mixer::convert`), so `FormatOps` only ever
//! needs to operate on same-format src/dest frames: one generic routine
//! per pixel layout family covers all 21 accepted formats.

use gst_video::prelude::*;
use gst_video::VideoFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, glib::GEnum)]
#[repr(u32)]
#[genum(type_name = "GstVideoMixerBackground")]
pub enum Background {
    #[genum(name = "Checker pattern", nick = "checker")]
    Checker = 0,
    #[genum(name = "Solid black", nick = "black")]
    Black = 1,
    #[genum(name = "Solid white", nick = "white")]
    White = 2,
    #[genum(name = "Transparent", nick = "transparent")]
    Transparent = 3,
}

impl Default for Background {
    fn default() -> Self {
        Background::Checker
    }
}

impl Background {
    pub fn from_u32(v: u32) -> Self {
        match v {
            0 => Background::Checker,
            1 => Background::Black,
            2 => Background::White,
            _ => Background::Transparent,
        }
    }
}

/// Resolved once per output format election; holds the plain function
/// pointers used for every tick instead of dispatching on format per call.
#[derive(Clone, Copy)]
pub struct FormatOps {
    pub blend: fn(&gst_video::VideoFrameRef<&gst::BufferRef>, i32, i32, f64, &mut gst_video::VideoFrameRef<&mut gst::BufferRef>),
    pub overlay: fn(&gst_video::VideoFrameRef<&gst::BufferRef>, i32, i32, f64, &mut gst_video::VideoFrameRef<&mut gst::BufferRef>),
    pub fill_checker: fn(&mut gst_video::VideoFrameRef<&mut gst::BufferRef>),
    pub fill_color: fn(&mut gst_video::VideoFrameRef<&mut gst::BufferRef>, u8, u8, u8),
}

impl FormatOps {
    /// All 21 formats the mixer accepts (spec §4.4) are either planar/
    /// semi-planar YUV with 8-bit components or packed RGB/YUV with 8-bit
    /// components; both families have a uniform per-component stride model
    /// exposed via `VideoFormatInfo`, so one pair of routines handles the
    /// whole acceptance list.
    pub fn for_format(format: VideoFormat) -> FormatOps {
        let info = gst_video::VideoFormatInfo::from_format(format);
        if info.is_yuv() && info.n_planes() > 1 && !info.is_packed() {
            FormatOps {
                blend: crate::blend::planar_blend,
                overlay: crate::blend::planar_overlay,
                fill_checker: crate::blend::planar_fill_checker,
                fill_color: crate::blend::planar_fill_color,
            }
        } else {
            FormatOps {
                blend: crate::blend::packed_blend,
                overlay: crate::blend::packed_overlay,
                fill_checker: crate::blend::packed_fill_checker,
                fill_color: crate::blend::packed_fill_color,
            }
        }
    }

    pub fn fill_background(
        &self,
        bg: Background,
        outframe: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
    ) {
        match bg {
            Background::Checker => (self.fill_checker)(outframe),
            Background::Black => (self.fill_color)(outframe, 16, 128, 128),
            Background::White => (self.fill_color)(outframe, 240, 128, 128),
            // Transparent clears to zero and pads are overlaid instead of
            // blended, matching gst_videomixer2_mix_frames.
            Background::Transparent => (self.fill_color)(outframe, 0, 0, 0),
        }
    }

    pub fn composite_pad(
        &self,
        bg: Background,
        src: &gst_video::VideoFrameRef<&gst::BufferRef>,
        xpos: i32,
        ypos: i32,
        alpha: f64,
        dest: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>,
    ) {
        if alpha <= 0.0 {
            return;
        }
        if bg == Background::Transparent {
            (self.overlay)(src, xpos, ypos, alpha, dest);
        } else {
            (self.blend)(src, xpos, ypos, alpha, dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yuv_planar_formats_choose_planar_ops() {
        let ops = FormatOps::for_format(VideoFormat::I420);
        assert_eq!(ops.blend as usize, crate::blend::planar_blend as usize);
    }

    #[test]
    fn packed_formats_choose_packed_ops() {
        let ops = FormatOps::for_format(VideoFormat::Argb);
        assert_eq!(ops.blend as usize, crate::blend::packed_blend as usize);
    }

    #[test]
    fn transparent_background_uses_overlay_not_blend() {
        assert_ne!(Background::Transparent, Background::Black);
    }
}
