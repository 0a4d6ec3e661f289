//! Capability hook used by the aggregate loop to turn per-pad converted
//! frames into an output frame. Mirrors the "subclass" extension point of
//! the C base mixer, re-architected as a trait instead of a GObject class
//! hierarchy: the basic mixer only needed an identity hook, while the
//! positioned mixer (the only behavior this plugin ships) adds xpos/ypos
//! and z-order aware composition.

use glib::subclass::prelude::ObjectSubclassExt;

use crate::mixer::composite::Background;
use crate::mixer::MixerPad;

/// Extension point mirroring `gst_videomixer2_modify_src_pad_info` /
/// `gst_videomixer2_mix_frames`. A pure basic-mixer identity behavior
/// (no positioning) is kept as `BasicMixer` below for tests only; the
/// plugin only ever registers `PositionedMixer`.
pub trait MixBehavior: Send + Sync {
    /// Grow the negotiated output size to fit this pad's placement.
    /// Returns `(width, height)` the pad contributes to the output canvas.
    fn modify_output_size(&self, pad: &MixerPad, width: i32, height: i32) -> (i32, i32);

    /// Caps a subclass would prefer to additionally intersect into the
    /// downstream caps candidate set. The original C hook is defined but
    /// left unimplemented by the positioned mixer; kept for parity.
    fn preferred_input_caps(&self) -> Option<gst::Caps> {
        None
    }

    fn background(&self) -> Background;
}

pub struct PositionedMixer {
    pub background: std::sync::atomic::AtomicU32,
}

impl PositionedMixer {
    pub fn new() -> Self {
        PositionedMixer {
            background: std::sync::atomic::AtomicU32::new(Background::Checker as u32),
        }
    }

    pub fn set_background(&self, bg: Background) {
        self.background
            .store(bg as u32, std::sync::atomic::Ordering::SeqCst);
    }
}

impl MixBehavior for PositionedMixer {
    fn modify_output_size(&self, pad: &MixerPad, width: i32, height: i32) -> (i32, i32) {
        let imp = crate::mixer::pad::MixerPad::from_instance(pad);
        let settings = imp.settings.lock().unwrap();
        let w = width.max(settings.xpos + width);
        let h = height.max(settings.ypos + height);
        (w, h)
    }

    fn background(&self) -> Background {
        Background::from_u32(self.background.load(std::sync::atomic::Ordering::SeqCst))
    }
}

#[cfg(test)]
pub struct BasicMixer;

#[cfg(test)]
impl MixBehavior for BasicMixer {
    fn modify_output_size(&self, _pad: &MixerPad, width: i32, height: i32) -> (i32, i32) {
        (width, height)
    }

    fn background(&self) -> Background {
        Background::Checker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_mixer_does_not_grow_canvas() {
        let b = BasicMixer;
        // modify_output_size must not be exercised without a real pad in
        // this unit test; covered indirectly through composite tests.
        assert_eq!(b.background() as u32, Background::Checker as u32);
    }
}
