use glib::subclass::prelude::*;
use gst::prelude::*;
use gst::subclass::prelude::*;
use gst_base::prelude::*;
use gst_base::subclass::prelude::*;

use std::sync::Mutex;

use once_cell::sync::Lazy;

const DEFAULT_ZORDER: u32 = 0;
const DEFAULT_XPOS: i32 = 0;
const DEFAULT_YPOS: i32 = 0;
const DEFAULT_ALPHA: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct PadSettings {
    pub zorder: u32,
    pub xpos: i32,
    pub ypos: i32,
    pub alpha: f64,
}

impl Default for PadSettings {
    fn default() -> Self {
        PadSettings {
            zorder: DEFAULT_ZORDER,
            xpos: DEFAULT_XPOS,
            ypos: DEFAULT_YPOS,
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// A buffer accepted by the Queue Filler whose end time isn't known yet
/// (no duration supplied). Resolved once the next buffer's start arrives.
pub struct QueuedBuffer {
    pub buffer: gst::Buffer,
    pub vinfo: gst_video::VideoInfo,
    pub start_pts: gst::ClockTime,
}

/// The buffer promoted as `current` for compositing, with its timeline
/// frozen at selection (spec §3: "its `buffer_vinfo` is frozen at
/// selection").
pub struct CurrentBuffer {
    pub buffer: gst::Buffer,
    pub vinfo: gst_video::VideoInfo,
    /// Raw (pre-running-time) start timestamp, used for "from the past"
    /// comparisons against newly arriving buffers.
    pub pts: gst::ClockTime,
    pub start_time: gst::ClockTime,
    pub end_time: gst::ClockTime,
}

pub struct State {
    pub info: Option<gst_video::VideoInfo>,
    pub converter: Option<crate::mixer::convert::PadConverter>,
    /// Output-format/colorimetry, pad-width/height info the converter
    /// targets; rebuilt when `out_info` changes (spec §3 `conversion_info`).
    pub conversion_info: Option<gst_video::VideoInfo>,
    pub queued: Option<QueuedBuffer>,
    pub current: Option<CurrentBuffer>,
}

impl Default for State {
    fn default() -> Self {
        State {
            info: None,
            converter: None,
            conversion_info: None,
            queued: None,
            current: None,
        }
    }
}

pub struct MixerPad {
    pub settings: Mutex<PadSettings>,
    pub state: Mutex<State>,
}

static CAT: Lazy<gst::DebugCategory> = Lazy::new(|| {
    gst::DebugCategory::new(
        "videomixerpad",
        gst::DebugColorFlags::empty(),
        Some("Video mixer pad"),
    )
});

#[glib::object_subclass]
impl ObjectSubclass for MixerPad {
    const NAME: &'static str = "GstVideoMixerPad";
    type Type = super::MixerPad;
    type ParentType = gst_base::AggregatorPad;

    fn new() -> Self {
        Self {
            settings: Mutex::new(PadSettings::default()),
            state: Mutex::new(State::default()),
        }
    }
}

impl ObjectImpl for MixerPad {
    fn properties() -> &'static [glib::ParamSpec] {
        static PROPERTIES: Lazy<Vec<glib::ParamSpec>> = Lazy::new(|| {
            vec![
                glib::ParamSpec::new_uint(
                    "zorder",
                    "Z-Order",
                    "Z Order of the picture",
                    0,
                    u32::MAX,
                    DEFAULT_ZORDER,
                    glib::ParamFlags::READWRITE | glib::ParamFlags::CONSTRUCT,
                ),
                glib::ParamSpec::new_int(
                    "xpos",
                    "X Position",
                    "X Position of the picture",
                    i32::MIN,
                    i32::MAX,
                    DEFAULT_XPOS,
                    glib::ParamFlags::READWRITE | glib::ParamFlags::CONSTRUCT,
                ),
                glib::ParamSpec::new_int(
                    "ypos",
                    "Y Position",
                    "Y Position of the picture",
                    i32::MIN,
                    i32::MAX,
                    DEFAULT_YPOS,
                    glib::ParamFlags::READWRITE | glib::ParamFlags::CONSTRUCT,
                ),
                glib::ParamSpec::new_double(
                    "alpha",
                    "Alpha",
                    "Alpha of the picture",
                    0.0,
                    1.0,
                    DEFAULT_ALPHA,
                    glib::ParamFlags::READWRITE | glib::ParamFlags::CONSTRUCT,
                ),
            ]
        });

        PROPERTIES.as_ref()
    }

    fn set_property(
        &self,
        obj: &Self::Type,
        _id: usize,
        value: &glib::Value,
        pspec: &glib::ParamSpec,
    ) {
        let mut settings = self.settings.lock().unwrap();
        match pspec.name() {
            "zorder" => {
                let zorder = value.get().expect("type checked upstream");
                gst_debug!(CAT, obj: obj, "Setting zorder to {}", zorder);
                settings.zorder = zorder;
            }
            "xpos" => {
                let xpos = value.get().expect("type checked upstream");
                gst_debug!(CAT, obj: obj, "Setting xpos to {}", xpos);
                settings.xpos = xpos;
            }
            "ypos" => {
                let ypos = value.get().expect("type checked upstream");
                gst_debug!(CAT, obj: obj, "Setting ypos to {}", ypos);
                settings.ypos = ypos;
            }
            "alpha" => {
                let alpha = value.get().expect("type checked upstream");
                gst_debug!(CAT, obj: obj, "Setting alpha to {}", alpha);
                settings.alpha = alpha;
            }
            _ => unimplemented!(),
        }
    }

    fn property(&self, _obj: &Self::Type, _id: usize, pspec: &glib::ParamSpec) -> glib::Value {
        let settings = self.settings.lock().unwrap();
        match pspec.name() {
            "zorder" => settings.zorder.to_value(),
            "xpos" => settings.xpos.to_value(),
            "ypos" => settings.ypos.to_value(),
            "alpha" => settings.alpha.to_value(),
            _ => unimplemented!(),
        }
    }
}

impl PadImpl for MixerPad {}

impl AggregatorPadImpl for MixerPad {
    fn flush(
        &self,
        aggregator_pad: &Self::Type,
        aggregator: &gst_base::Aggregator,
    ) -> Result<gst::FlowSuccess, gst::FlowError> {
        let mut state = self.state.lock().unwrap();
        *state = State::default();
        drop(state);

        self.parent_flush(aggregator_pad, aggregator)
    }
}
