use glib::prelude::*;

pub mod behavior;
pub mod composite;
pub mod convert;
pub mod fill;
mod imp;
pub mod negotiation;
pub mod pad;
pub mod qos;

glib::wrapper! {
    pub struct MixerPad(ObjectSubclass<pad::MixerPad>) @extends gst_base::AggregatorPad, gst::Pad, gst::Object;
}

unsafe impl Send for MixerPad {}
unsafe impl Sync for MixerPad {}

glib::wrapper! {
    pub struct VideoMixer(ObjectSubclass<imp::VideoMixer>)
        @extends gst_base::Aggregator, gst::Element, gst::Object,
        @implements gst::ChildProxy;
}

unsafe impl Send for VideoMixer {}
unsafe impl Sync for VideoMixer {}

pub fn register(plugin: &gst::Plugin) -> Result<(), glib::BoolError> {
    gst::Element::register(
        Some(plugin),
        "videomixer",
        gst::Rank::Primary,
        VideoMixer::static_type(),
    )
}
