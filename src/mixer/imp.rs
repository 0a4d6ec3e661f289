use glib::subclass::prelude::*;
use gst::prelude::*;
use gst::subclass::prelude::*;
use gst_base::prelude::*;
use gst_base::subclass::prelude::*;

use once_cell::sync::Lazy;

use std::sync::Mutex;

use crate::mixer::behavior::{MixBehavior, PositionedMixer};
use crate::mixer::composite::{Background, FormatOps};
use crate::mixer::convert;
use crate::mixer::fill::{self, FillResult};
use crate::mixer::negotiation;
use crate::mixer::pad::MixerPad as MixerPadImp;
use crate::mixer::qos::Qos;
use crate::mixer::MixerPad;

static CAT: Lazy<gst::DebugCategory> = Lazy::new(|| {
    gst::DebugCategory::new(
        "videomixer",
        gst::DebugColorFlags::empty(),
        Some("Multi-input video mixer"),
    )
});

const DEFAULT_BACKGROUND: Background = Background::Checker;

struct Settings {
    background: Background,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Per-element negotiated state, held under the mixer's single coarse
/// lock (§5): the elected output format, and the sink pad list kept
/// sorted by z-order so the aggregate loop never has to re-sort mid-tick.
struct State {
    out_info: Option<gst_video::VideoInfo>,
    format_ops: Option<FormatOps>,
    pads: Vec<MixerPad>,
    newseg_pending: bool,
    /// Running time cursor for the next frame to be produced; advanced by
    /// the elected framerate's frame duration after each tick.
    out_position: gst::ClockTime,
    /// Tags accumulated from sink pads since the last tick, merged and
    /// flushed downstream at the start of the next `aggregate()` call.
    pending_tags: Option<gst::TagList>,
}

impl Default for State {
    fn default() -> Self {
        State {
            out_info: None,
            format_ops: None,
            pads: Vec::new(),
            newseg_pending: true,
            out_position: gst::ClockTime::ZERO,
            pending_tags: None,
        }
    }
}

pub struct VideoMixer {
    settings: Mutex<Settings>,
    state: Mutex<Option<State>>,
    behavior: PositionedMixer,
    qos: Qos,
}

#[glib::object_subclass]
impl ObjectSubclass for VideoMixer {
    const NAME: &'static str = "GstVideoMixer";
    type Type = super::VideoMixer;
    type ParentType = gst_base::Aggregator;

    fn new() -> Self {
        Self {
            settings: Mutex::new(Settings::default()),
            state: Mutex::new(None),
            behavior: PositionedMixer::new(),
            qos: Qos::default(),
        }
    }
}

impl ObjectImpl for VideoMixer {
    fn properties() -> &'static [glib::ParamSpec] {
        static PROPERTIES: Lazy<Vec<glib::ParamSpec>> = Lazy::new(|| {
            vec![glib::ParamSpec::new_enum(
                "background",
                "Background",
                "Background to use when not all pixels are covered",
                Background::static_type(),
                DEFAULT_BACKGROUND as i32,
                glib::ParamFlags::READWRITE,
            )]
        });

        PROPERTIES.as_ref()
    }

    fn set_property(
        &self,
        _obj: &Self::Type,
        _id: usize,
        value: &glib::Value,
        pspec: &glib::ParamSpec,
    ) {
        match pspec.name() {
            "background" => {
                let background = value.get().expect("type checked upstream");
                self.settings.lock().unwrap().background = background;
                self.behavior.set_background(background);
            }
            _ => unimplemented!(),
        }
    }

    fn property(&self, _obj: &Self::Type, _id: usize, pspec: &glib::ParamSpec) -> glib::Value {
        match pspec.name() {
            "background" => self.settings.lock().unwrap().background.to_value(),
            _ => unimplemented!(),
        }
    }
}

impl ElementImpl for VideoMixer {
    fn metadata() -> Option<&'static gst::subclass::ElementMetadata> {
        static ELEMENT_METADATA: Lazy<gst::subclass::ElementMetadata> = Lazy::new(|| {
            gst::subclass::ElementMetadata::new(
                "Video mixer",
                "Filter/Editor/Video/Compositor",
                "Composite multiple video streams into one output stream",
                "Sebastian Dröge <sebastian@centricular.com>",
            )
        });

        Some(&*ELEMENT_METADATA)
    }

    fn pad_templates() -> &'static [gst::PadTemplate] {
        static PAD_TEMPLATES: Lazy<Vec<gst::PadTemplate>> = Lazy::new(|| {
            let caps = accepted_caps();

            let src_pad_template = gst::PadTemplate::with_gtype(
                "src",
                gst::PadDirection::Src,
                gst::PadPresence::Always,
                &caps,
                gst_base::AggregatorPad::static_type(),
            )
            .unwrap();

            let sink_pad_template = gst::PadTemplate::with_gtype(
                "sink_%u",
                gst::PadDirection::Sink,
                gst::PadPresence::Request,
                &caps,
                MixerPad::static_type(),
            )
            .unwrap();

            vec![src_pad_template, sink_pad_template]
        });

        PAD_TEMPLATES.as_ref()
    }

    fn release_pad(&self, element: &Self::Type, pad: &gst::Pad) {
        gst_debug!(CAT, obj: element, "Releasing pad {:?}", pad);

        let mut state_storage = self.state.lock().unwrap();
        if let Some(ref mut state) = *state_storage {
            state.pads.retain(|p| p.upcast_ref::<gst::Pad>() != pad);
        }
        drop(state_storage);

        self.parent_release_pad(element, pad);
    }
}

impl AggregatorImpl for VideoMixer {
    fn create_new_pad(
        &self,
        agg: &Self::Type,
        templ: &gst::PadTemplate,
        req_name: Option<&str>,
        _caps: Option<&gst::Caps>,
    ) -> Option<gst_base::AggregatorPad> {
        let sink_templ = agg.pad_template("sink_%u").unwrap();
        if templ != &sink_templ {
            gst_error!(CAT, obj: agg, "Wrong pad template");
            return None;
        }

        let pad = gst::PadBuilder::<MixerPad>::from_template(templ, req_name).build();

        let mut state_storage = self.state.lock().unwrap();
        if let Some(ref mut state) = *state_storage {
            // New pads stack on top of whatever is already there, matching
            // gst_videomixer2_request_new_pad's zorder assignment.
            let zorder = state.pads.len() as u32;
            {
                let imp = MixerPadImp::from_instance(&pad);
                imp.settings.lock().unwrap().zorder = zorder;
            }
            state.pads.push(pad.clone());
            sort_by_zorder(&mut state.pads);
        }
        drop(state_storage);

        let agg_weak = agg.downgrade();
        pad.connect_notify(Some("zorder"), move |_pad, _pspec| {
            if let Some(agg) = agg_weak.upgrade() {
                let imp = VideoMixer::from_instance(&agg);
                let mut state_storage = imp.state.lock().unwrap();
                if let Some(ref mut state) = *state_storage {
                    sort_by_zorder(&mut state.pads);
                }
            }
        });

        gst_debug!(CAT, obj: agg, "Created new pad {:?}", pad);

        Some(pad.upcast())
    }

    fn start(&self, agg: &Self::Type) -> Result<(), gst::ErrorMessage> {
        *self.state.lock().unwrap() = Some(State::default());
        self.qos.reset();
        gst_debug!(CAT, obj: agg, "Started");
        Ok(())
    }

    fn stop(&self, agg: &Self::Type) -> Result<(), gst::ErrorMessage> {
        let _ = self.state.lock().unwrap().take();
        gst_debug!(CAT, obj: agg, "Stopped");
        Ok(())
    }

    fn next_time(&self, _agg: &Self::Type) -> Option<gst::ClockTime> {
        // We don't drive our own clock schedule: the aggregate loop is
        // woken up whenever a sink pad has data available.
        gst::ClockTime::NONE
    }

    fn negotiate(&self, agg: &Self::Type) -> bool {
        let pads: Vec<MixerPad> = {
            let state_storage = self.state.lock().unwrap();
            match &*state_storage {
                Some(state) => state.pads.clone(),
                None => return false,
            }
        };

        let candidate = match negotiation::compute_output_candidate(&pads, &self.behavior) {
            Some(candidate) => candidate,
            None => {
                gst_debug!(CAT, obj: agg, "No pad has caps yet, can't negotiate");
                return true;
            }
        };

        let src_pad = agg.static_pad("src").unwrap();
        let template_caps = agg.pad_template("src").unwrap().caps();

        let downstream_caps = src_pad
            .peer_query_caps(Some(&template_caps))
            .intersect(&template_caps);

        let format = match negotiation::elect_output_format(&pads, &downstream_caps) {
            Ok(format) => format,
            Err(err) => {
                gst::element_error!(agg, gst::CoreError::Negotiation, ["{}", err]);
                return false;
            }
        };

        let caps = match negotiation::build_output_caps(
            &src_pad,
            &template_caps,
            &self.behavior,
            &candidate,
            format,
        ) {
            Some(caps) => caps,
            None => {
                gst_error!(CAT, obj: agg, "Could not negotiate output caps");
                return false;
            }
        };

        let out_info = match gst_video::VideoInfo::from_caps(&caps) {
            Ok(info) => info,
            Err(_) => {
                gst_error!(CAT, obj: agg, "Negotiated caps {:?} are invalid", caps);
                return false;
            }
        };

        gst_debug!(CAT, obj: agg, "Negotiated output caps {:?}", caps);

        agg.set_src_caps(&caps);

        let mut state_storage = self.state.lock().unwrap();
        if let Some(ref mut state) = *state_storage {
            state.format_ops = Some(FormatOps::for_format(out_info.format()));
            state.out_info = Some(out_info);
            if let Err(err) = update_converters(state) {
                gst_error!(CAT, obj: agg, "Failed to build pad converters: {}", err);
                return false;
            }
        }

        true
    }

    fn clip(
        &self,
        agg: &Self::Type,
        agg_pad: &gst_base::AggregatorPad,
        mut buffer: gst::Buffer,
    ) -> Option<gst::Buffer> {
        let segment = match agg_pad.segment().downcast::<gst::ClockTime>() {
            Ok(segment) => segment,
            Err(_) => {
                gst_error!(CAT, obj: agg, "Only TIME segments supported");
                return Some(buffer);
            }
        };

        let pts = buffer.pts()?;
        let end_pts = buffer
            .duration()
            .and_then(|duration| pts.checked_add(duration));

        segment.clip(pts, end_pts).map(|(start, stop)| {
            {
                let buffer = buffer.make_mut();
                buffer.set_pts(start);
                buffer.set_duration(
                    stop.zip(start)
                        .and_then(|(stop, start)| stop.checked_sub(start)),
                );
            }
            buffer
        })
    }

    fn aggregate(
        &self,
        agg: &Self::Type,
        timeout: bool,
    ) -> Result<gst::FlowSuccess, gst::FlowError> {
        let _ = timeout;

        let pending_tags = {
            let mut state_storage = self.state.lock().unwrap();
            match &mut *state_storage {
                Some(state) => state.pending_tags.take(),
                None => return Err(gst::FlowError::Flushing),
            }
        };
        if let Some(tags) = pending_tags {
            let src_pad = agg.static_pad("src").unwrap();
            src_pad.push_event(gst::event::Tag::new(tags));
        }

        let (pads, output_start, out_info) = {
            let state_storage = self.state.lock().unwrap();
            match &*state_storage {
                Some(state) => (state.pads.clone(), state.out_position, state.out_info.clone()),
                None => return Err(gst::FlowError::Flushing),
            }
        };

        let duration = out_info.as_ref().and_then(frame_duration);
        let output_end = duration.and_then(|d| output_start.checked_add(d));
        let output_rate = agg.segment().downcast::<gst::ClockTime>().ok().map_or(1.0, |s| s.rate().abs());

        match fill::fill_queues(&pads, output_start, output_end, output_rate) {
            FillResult::NeedMoreData => Err(gst_base::AGGREGATOR_FLOW_NEED_DATA),
            FillResult::Eos => Err(gst::FlowError::Eos),
            FillResult::Error => Err(gst::FlowError::Error),
            FillResult::Ready { active } => self.produce_output(agg, output_start, &active),
        }
    }

    fn sink_event(
        &self,
        agg: &Self::Type,
        pad: &gst_base::AggregatorPad,
        event: gst::Event,
    ) -> bool {
        use gst::EventView;

        match event.view() {
            EventView::Caps(caps_event) => {
                let caps = caps_event.caps_owned();
                let info = match gst_video::VideoInfo::from_caps(&caps) {
                    Ok(info) => info,
                    Err(_) => {
                        gst_error!(CAT, obj: pad, "Failed to parse caps {:?}", caps);
                        return false;
                    }
                };

                if let Some(mixer_pad) = pad.downcast_ref::<MixerPad>() {
                    let imp = MixerPadImp::from_instance(mixer_pad);
                    imp.state.lock().unwrap().info = Some(info);
                }
            }
            EventView::Tag(tag) => {
                let tags = tag.tag_owned();
                let mut state_storage = self.state.lock().unwrap();
                if let Some(ref mut state) = *state_storage {
                    match &mut state.pending_tags {
                        Some(pending) => pending.make_mut().insert(&tags, gst::TagMergeMode::Keep),
                        None => state.pending_tags = Some(tags),
                    }
                }
                return true;
            }
            EventView::FlushStop(_) => {
                let mut state_storage = self.state.lock().unwrap();
                if let Some(ref mut state) = *state_storage {
                    state.newseg_pending = true;
                }
                self.qos.reset();
            }
            _ => (),
        }

        self.parent_sink_event(agg, pad, event)
    }

    fn sink_query(
        &self,
        agg: &Self::Type,
        pad: &gst_base::AggregatorPad,
        query: &mut gst::QueryRef,
    ) -> bool {
        use gst::QueryView;

        match query.view_mut() {
            QueryView::Caps(q) => {
                if let Some(mixer_pad) = pad.downcast_ref::<MixerPad>() {
                    let src_caps = agg.static_pad("src").and_then(|p| p.current_caps());
                    let caps = negotiation::pad_sink_getcaps(
                        mixer_pad.upcast_ref(),
                        src_caps.as_ref(),
                        q.filter(),
                    );
                    q.set_result(&caps);
                    return true;
                }
            }
            QueryView::Accept(accept) => {
                if let Some(mixer_pad) = pad.downcast_ref::<MixerPad>() {
                    let src_caps = agg.static_pad("src").and_then(|p| p.current_caps());
                    let accepted = negotiation::pad_sink_acceptcaps(
                        mixer_pad.upcast_ref(),
                        src_caps.as_ref(),
                        &accept.caps(),
                    );
                    accept.set_result(accepted);
                    return true;
                }
            }
            _ => (),
        }

        self.parent_sink_query(agg, pad, query)
    }

    fn src_query(&self, agg: &Self::Type, query: &mut gst::QueryRef) -> bool {
        use gst::QueryView;

        match query.view_mut() {
            QueryView::Duration(q) => {
                if q.format() == gst::Format::Time {
                    let mut max_duration = gst::ClockTime::NONE;
                    for sink_pad in agg.sink_pads() {
                        if let Some(peer) = sink_pad.peer() {
                            if let Some(duration) = peer.query_duration::<gst::ClockTime>() {
                                max_duration = max_duration.max(Some(duration));
                            }
                        }
                    }
                    if let Some(max_duration) = max_duration {
                        q.set(max_duration);
                    }
                    return true;
                }
                self.parent_src_query(agg, query)
            }
            QueryView::Latency(_) => self.parent_src_query(agg, query),
            _ => self.parent_src_query(agg, query),
        }
    }

    fn src_event(&self, agg: &Self::Type, event: gst::Event) -> bool {
        use gst::EventView;

        match event.view() {
            EventView::Seek(seek) => {
                let (rate, ..) = seek.get();
                if rate <= 0.0 {
                    gst_warning!(
                        CAT,
                        obj: agg,
                        "Negative or zero playback rates are not supported"
                    );
                    return false;
                }
                self.parent_src_event(agg, event)
            }
            EventView::Navigation(_) => {
                // Navigation events don't make sense on a mixer with
                // multiple inputs and no notion of which one is "current".
                gst_debug!(CAT, obj: agg, "Dropping navigation event");
                false
            }
            EventView::Qos(qos) => {
                let (_type_, proportion, diff, timestamp) = qos.get();
                let frame_duration = {
                    let state_storage = self.state.lock().unwrap();
                    state_storage
                        .as_ref()
                        .and_then(|state| state.out_info.as_ref())
                        .and_then(frame_duration)
                };
                self.qos.update(proportion, diff, timestamp, frame_duration);
                self.parent_src_event(agg, event)
            }
            _ => self.parent_src_event(agg, event),
        }
    }
}

impl gst::subclass::child_proxy::ChildProxyImpl for VideoMixer {
    fn child_by_index(&self, object: &Self::Type, index: u32) -> Option<glib::Object> {
        object
            .sink_pads()
            .get(index as usize)
            .map(|p| p.clone().upcast())
    }

    fn children_count(&self, object: &Self::Type) -> u32 {
        object.sink_pads().len() as u32
    }

    fn child_by_name(&self, object: &Self::Type, name: &str) -> Option<glib::Object> {
        object
            .sink_pads()
            .into_iter()
            .find(|p| p.name() == name)
            .map(|p| p.upcast())
    }
}

impl VideoMixer {
    fn produce_output(
        &self,
        agg: &super::VideoMixer,
        output_start: gst::ClockTime,
        active: &[MixerPad],
    ) -> Result<gst::FlowSuccess, gst::FlowError> {
        let (out_info, format_ops, background) = {
            let state_storage = self.state.lock().unwrap();
            let state = state_storage.as_ref().ok_or(gst::FlowError::Flushing)?;
            let out_info = state.out_info.clone().ok_or(gst::FlowError::NotNegotiated)?;
            let format_ops = state.format_ops.ok_or(gst::FlowError::NotNegotiated)?;
            (out_info, format_ops, self.behavior.background())
        };

        let duration = frame_duration(&out_info);

        // gst_basemixer_do_qos: jitter > 0 means this frame is already late
        // relative to the last QoS report, so skip rendering it and tell
        // downstream by how much, instead of falling further behind.
        if let Some(jitter) = self.qos.jitter(output_start) {
            if jitter > 0 {
                self.qos.record_dropped();
                gst_debug!(CAT, obj: agg, "Dropping late frame at {}, jitter {}", output_start, jitter);

                let (proportion, _) = self.qos.read();
                let (processed, dropped) = self.qos.stats();
                let qos_msg = gst::message::Qos::builder(false, output_start, output_start)
                    .timestamp(output_start)
                    .duration(duration)
                    .jitter(jitter)
                    .proportion(proportion)
                    .quality(1_000_000)
                    .stats(gst::Format::Buffers, processed as i64, dropped as i64)
                    .src(agg)
                    .build();
                let _ = agg.post_message(qos_msg);

                if let Some(duration) = duration {
                    let mut state_storage = self.state.lock().unwrap();
                    if let Some(ref mut state) = *state_storage {
                        state.out_position += duration;
                    }
                }

                return Ok(gst::FlowSuccess::Ok);
            }
        }
        self.qos.record_processed();

        let buffer_size = out_info.size();
        let mut outbuf = gst::Buffer::with_size(buffer_size).map_err(|_| gst::FlowError::Error)?;
        {
            let outbuf_mut = outbuf.get_mut().unwrap();
            outbuf_mut.set_pts(Some(output_start));
            outbuf_mut.set_duration(duration);
        }

        {
            let mut outframe =
                gst_video::VideoFrameRef::from_buffer_ref_writable(outbuf.get_mut().unwrap(), &out_info)
                    .map_err(|_| gst::FlowError::Error)?;

            format_ops.fill_background(background, &mut outframe);

            for pad in active {
                let imp = MixerPadImp::from_instance(pad);
                let mut pad_state = imp.state.lock().unwrap();
                let settings = *imp.settings.lock().unwrap();

                let (inbuf, in_info) = match &pad_state.current {
                    Some(current) => (current.buffer.clone(), current.vinfo.clone()),
                    None => continue,
                };

                // Each pad converts to its own size in the output format,
                // not the full output canvas, so compositing can place it
                // at (xpos, ypos) instead of overwriting the whole frame.
                let conversion_info = match pad_conversion_info(&in_info, &out_info) {
                    Some(info) => info,
                    None => continue,
                };
                pad_state.conversion_info = Some(conversion_info.clone());

                if let Err(err) =
                    convert::ensure_converter(&mut pad_state.converter, &in_info, &conversion_info)
                {
                    gst_error!(CAT, obj: agg, "Failed to build converter for {:?}: {}", pad, err);
                    return Err(gst::FlowError::NotNegotiated);
                }
                let converter = pad_state.converter.as_mut().unwrap();

                let in_frame =
                    match gst_video::VideoFrameRef::from_buffer_ref_readable(&inbuf, &in_info) {
                        Ok(frame) => frame,
                        Err(_) => continue,
                    };

                let mut converted =
                    match gst::Buffer::with_size(conversion_info.size()).map(|mut b| {
                        b.make_mut().set_pts(inbuf.pts());
                        b
                    }) {
                        Ok(b) => b,
                        Err(_) => continue,
                    };

                {
                    let mut converted_frame = match gst_video::VideoFrameRef::from_buffer_ref_writable(
                        converted.get_mut().unwrap(),
                        &conversion_info,
                    ) {
                        Ok(frame) => frame,
                        Err(_) => continue,
                    };
                    converter.convert(&in_frame, &mut converted_frame);
                }

                let converted_frame = match gst_video::VideoFrameRef::from_buffer_ref_readable(
                    &converted,
                    &conversion_info,
                ) {
                    Ok(frame) => frame,
                    Err(_) => continue,
                };

                format_ops.composite_pad(
                    background,
                    &converted_frame,
                    settings.xpos,
                    settings.ypos,
                    settings.alpha,
                    &mut outframe,
                );
            }
        }

        if let Some(duration) = duration {
            let mut state_storage = self.state.lock().unwrap();
            if let Some(ref mut state) = *state_storage {
                state.out_position += duration;
            }
        }

        gst_trace!(CAT, obj: agg, "Finishing output buffer {:?}", outbuf);
        agg.finish_buffer(outbuf)
    }
}

fn sort_by_zorder(pads: &mut Vec<MixerPad>) {
    pads.sort_by_key(|pad| {
        let imp = MixerPadImp::from_instance(pad);
        imp.settings.lock().unwrap().zorder
    });
}

/// One output frame's duration at the negotiated framerate, or `None` for
/// a variable/unknown framerate.
fn frame_duration(out_info: &gst_video::VideoInfo) -> Option<gst::ClockTime> {
    let fps_n = *out_info.fps().numer();
    let fps_d = *out_info.fps().denom();
    if fps_n > 0 {
        gst::ClockTime::SECOND.mul_div_floor(fps_d as u64, fps_n as u64)
    } else {
        gst::ClockTime::NONE
    }
}

/// The per-pad target `conversion_info` (spec §3): the elected output
/// format/colorimetry/framerate/pixel-aspect-ratio, but the pad's own
/// width/height rather than the full output canvas.
fn pad_conversion_info(
    in_info: &gst_video::VideoInfo,
    out_info: &gst_video::VideoInfo,
) -> Option<gst_video::VideoInfo> {
    gst_video::VideoInfo::builder(out_info.format(), in_info.width(), in_info.height())
        .fps(out_info.fps())
        .par(out_info.par())
        .colorimetry(&out_info.colorimetry())
        .build()
        .ok()
}

fn update_converters(state: &mut State) -> Result<(), glib::BoolError> {
    let out_info = match &state.out_info {
        Some(info) => info.clone(),
        None => return Ok(()),
    };

    for pad in &state.pads {
        let imp = MixerPadImp::from_instance(pad);
        let mut pad_state = imp.state.lock().unwrap();
        if let Some(in_info) = pad_state.info.clone() {
            let conversion_info = match pad_conversion_info(&in_info, &out_info) {
                Some(info) => info,
                None => continue,
            };
            convert::ensure_converter(&mut pad_state.converter, &in_info, &conversion_info)?;
            pad_state.conversion_info = Some(conversion_info);
        }
    }

    Ok(())
}

fn accepted_caps() -> gst::Caps {
    gst::Caps::builder("video/x-raw")
        .field(
            "format",
            &gst::List::new(&[
                &gst_video::VideoFormat::Ayuv.to_str(),
                &gst_video::VideoFormat::Bgra.to_str(),
                &gst_video::VideoFormat::Argb.to_str(),
                &gst_video::VideoFormat::Rgba.to_str(),
                &gst_video::VideoFormat::Abgr.to_str(),
                &gst_video::VideoFormat::Y444.to_str(),
                &gst_video::VideoFormat::Y42b.to_str(),
                &gst_video::VideoFormat::Yuy2.to_str(),
                &gst_video::VideoFormat::Uyvy.to_str(),
                &gst_video::VideoFormat::Yvyu.to_str(),
                &gst_video::VideoFormat::I420.to_str(),
                &gst_video::VideoFormat::Yv12.to_str(),
                &gst_video::VideoFormat::Nv12.to_str(),
                &gst_video::VideoFormat::Nv21.to_str(),
                &gst_video::VideoFormat::Y41b.to_str(),
                &gst_video::VideoFormat::Rgb.to_str(),
                &gst_video::VideoFormat::Bgr.to_str(),
                &gst_video::VideoFormat::Xrgb.to_str(),
                &gst_video::VideoFormat::Xbgr.to_str(),
                &gst_video::VideoFormat::Rgbx.to_str(),
                &gst_video::VideoFormat::Bgrx.to_str(),
            ]),
        )
        .field("width", &gst::IntRange::<i32>::new(1, i32::MAX))
        .field("height", &gst::IntRange::<i32>::new(1, i32::MAX))
        .field(
            "framerate",
            &gst::FractionRange::new(
                gst::Fraction::new(1, i32::MAX),
                gst::Fraction::new(i32::MAX, 1),
            ),
        )
        .build()
}
