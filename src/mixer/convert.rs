//! Converter Planner: builds and caches one `gst_video::VideoConverter`
//! per input pad, rebuilt whenever either the pad's negotiated format or
//! the mixer's elected output format changes. Grounded on
//! `gst_basemixer_update_converters`, which keeps a `videoconvert` element
//! per pad for the same reason; `VideoConverter` is the in-process
//! equivalent exposed by the video crate the teacher already depends on.

pub struct PadConverter {
    in_info: gst_video::VideoInfo,
    out_info: gst_video::VideoInfo,
    converter: gst_video::VideoConverter,
}

impl PadConverter {
    pub fn new(
        in_info: &gst_video::VideoInfo,
        out_info: &gst_video::VideoInfo,
    ) -> Result<Self, glib::BoolError> {
        let converter = gst_video::VideoConverter::new(
            in_info,
            out_info,
            gst_video::video_converter::VideoConverterConfig::default(),
        )?;

        Ok(PadConverter {
            in_info: in_info.clone(),
            out_info: out_info.clone(),
            converter,
        })
    }

    /// Whether this converter is still valid for the given (in, out) pair,
    /// i.e. whether it needs to be rebuilt.
    pub fn matches(&self, in_info: &gst_video::VideoInfo, out_info: &gst_video::VideoInfo) -> bool {
        &self.in_info == in_info && &self.out_info == out_info
    }

    pub fn convert(&mut self, in_frame: &gst_video::VideoFrameRef<&gst::BufferRef>, out_frame: &mut gst_video::VideoFrameRef<&mut gst::BufferRef>) {
        self.converter.frame(in_frame, out_frame);
    }
}

/// Ensures `pad_state.converter` is present and up to date for the
/// (in_info, out_info) pair, rebuilding it only when necessary. Returns the
/// construction error instead of panicking so the caller can surface it as
/// a negotiation failure.
pub fn ensure_converter(
    converter: &mut Option<PadConverter>,
    in_info: &gst_video::VideoInfo,
    out_info: &gst_video::VideoInfo,
) -> Result<(), glib::BoolError> {
    let needs_rebuild = match converter {
        Some(c) => !c.matches(in_info, out_info),
        None => true,
    };

    if needs_rebuild {
        *converter = Some(PadConverter::new(in_info, out_info)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(format: gst_video::VideoFormat, w: u32, h: u32) -> gst_video::VideoInfo {
        gst_video::VideoInfo::builder(format, w, h)
            .build()
            .expect("valid video info")
    }

    #[test]
    fn ensure_converter_rebuilds_on_format_change() {
        gst::init().ok();
        let mut converter = None;
        let a = info(gst_video::VideoFormat::I420, 320, 240);
        let b = info(gst_video::VideoFormat::I420, 640, 480);

        ensure_converter(&mut converter, &a, &a).unwrap();
        assert!(converter.as_ref().unwrap().matches(&a, &a));

        ensure_converter(&mut converter, &b, &b).unwrap();
        assert!(converter.as_ref().unwrap().matches(&b, &b));
    }
}
