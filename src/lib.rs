mod blend;
mod mixer;

fn plugin_init(plugin: &gst::Plugin) -> Result<(), glib::BoolError> {
    mixer::register(plugin)?;
    Ok(())
}

gst::plugin_define!(
    videomixer,
    "Multi-input video mixer/compositor",
    plugin_init,
    env!("CARGO_PKG_VERSION"),
    "LGPL",
    "videomixer",
    "videomixer",
    "https://gitlab.freedesktop.org/gstreamer/gst-plugins-good",
    "2026-07-27"
);
