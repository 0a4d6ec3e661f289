//! Negotiator: elects the output format/size/framerate from the set of
//! currently negotiated input pads and downstream constraints, and
//! answers sink-side getcaps/acceptcaps queries. Grounded on
//! `gst_basemixer_update_src_caps`, `gst_basemixer_pad_sink_getcaps` and
//! `gst_basemixer_pad_sink_acceptcaps` in the original base mixer.

use gst::prelude::*;
use gst_video::prelude::*;

use crate::mixer::behavior::MixBehavior;
use crate::mixer::pad::MixerPad as MixerPadImp;
use crate::mixer::MixerPad;

/// Candidate output geometry computed from the active input pads, before
/// it is intersected with downstream caps and fixated.
pub struct OutputCandidate {
    pub width: i32,
    pub height: i32,
    pub fps_n: i32,
    pub fps_d: i32,
}

/// Computes the output geometry that fits every active pad's placement,
/// mirroring the width/height growth loop in `gst_basemixer_update_src_caps`.
pub fn compute_output_candidate(
    pads: &[MixerPad],
    behavior: &dyn MixBehavior,
) -> Option<OutputCandidate> {
    let mut width = 0i32;
    let mut height = 0i32;
    let mut fps_n = 0i32;
    let mut fps_d = 1i32;

    for pad in pads {
        let imp = MixerPadImp::from_instance(pad);
        let state = imp.state.lock().unwrap();
        let info = match &state.info {
            Some(info) => info,
            None => continue,
        };

        let (w, h) = behavior.modify_output_size(pad, info.width() as i32, info.height() as i32);
        width = width.max(w);
        height = height.max(h);

        // Prefer the highest framerate among active pads; ties keep the
        // first one seen, matching the original's first-wins behavior
        // when no pad yet has a higher rate.
        let (n, d) = (info.fps().numer(), info.fps().denom());
        if *n > 0 && (fps_n == 0 || (*n as i64 * fps_d as i64) > (fps_n as i64 * *d as i64)) {
            fps_n = *n;
            fps_d = *d;
        }
    }

    if width == 0 || height == 0 {
        return None;
    }

    if fps_n == 0 {
        fps_n = 25;
        fps_d = 1;
    }

    Some(OutputCandidate {
        width,
        height,
        fps_n,
        fps_d,
    })
}

/// Intersects the source pad template caps with whatever downstream
/// accepts, further narrows with any behavior-specific preferred caps,
/// fixes `format` to the elected format, then fixates width/height/
/// framerate to the computed candidate.
pub fn build_output_caps(
    src_pad: &gst::Pad,
    template_caps: &gst::Caps,
    behavior: &dyn MixBehavior,
    candidate: &OutputCandidate,
    format: gst_video::VideoFormat,
) -> Option<gst::Caps> {
    let mut downstream_caps = src_pad
        .peer_query_caps(Some(template_caps))
        .intersect(template_caps);

    if let Some(preferred) = behavior.preferred_input_caps() {
        downstream_caps = downstream_caps.intersect(&preferred);
    }

    if downstream_caps.is_empty() {
        return None;
    }

    downstream_caps = downstream_caps.make_mut().to_owned();
    {
        let caps = downstream_caps.make_mut();
        for s in 0..caps.size() {
            if let Some(structure) = caps.structure_mut(s) {
                structure.set("format", &format.to_str());
                structure.set("width", &candidate.width);
                structure.set("height", &candidate.height);
                structure.set(
                    "framerate",
                    &gst::Fraction::new(candidate.fps_n, candidate.fps_d),
                );
            }
        }
    }

    let fixated = downstream_caps.fixate();
    if fixated.is_empty() {
        None
    } else {
        Some(fixated)
    }
}

/// `gst_basemixer_update_converters`'s format-election loop: counts, per
/// downstream-compatible input format, how many active pads use it;
/// restricts the election to alpha-bearing formats as soon as any input
/// pad has alpha; ties are broken by first-seen (strict `>` comparison).
/// Falls back to the fixated downstream format if no pad format survives,
/// then fails if any input has alpha but the elected format does not.
pub fn elect_output_format(
    pads: &[MixerPad],
    downstream_caps: &gst::Caps,
) -> Result<gst_video::VideoFormat, &'static str> {
    use std::collections::HashMap;

    if downstream_caps.is_empty() {
        return Err("no downstream caps available");
    }

    let mut counts: HashMap<gst_video::VideoFormat, u32> = HashMap::new();
    let mut need_alpha = false;
    let mut at_least_one_alpha = false;
    let mut best_format = gst_video::VideoFormat::Unknown;
    let mut best_count = 0u32;

    for pad in pads {
        let imp = MixerPadImp::from_instance(pad);
        let info = {
            let state = imp.state.lock().unwrap();
            match &state.info {
                Some(info) => info.clone(),
                None => continue,
            }
        };

        let format = info.format();
        if format == gst_video::VideoFormat::Unknown {
            continue;
        }

        let has_alpha = gst_video::VideoFormatInfo::from_format(format)
            .flags()
            .contains(gst_video::VideoFormatFlags::ALPHA);

        if has_alpha {
            at_least_one_alpha = true;
        }

        if need_alpha && !has_alpha {
            continue;
        }

        let mut possible_caps = match info.to_caps() {
            Ok(caps) => caps,
            Err(_) => continue,
        };
        {
            let possible = possible_caps.make_mut();
            if let Some(structure) = possible.structure_mut(0) {
                structure.remove_fields(&[
                    "width",
                    "height",
                    "framerate",
                    "pixel-aspect-ratio",
                    "interlace-mode",
                ]);
            }
        }

        if !downstream_caps.can_intersect(&possible_caps) {
            continue;
        }

        let count = {
            let entry = counts.entry(format).or_insert(0);
            *entry += 1;
            *entry
        };

        if !need_alpha && has_alpha {
            need_alpha = true;
            best_format = format;
            best_count = count;
        } else if count > best_count {
            best_format = format;
            best_count = count;
        }
    }

    if best_format == gst_video::VideoFormat::Unknown {
        let fixated = downstream_caps.clone().fixate();
        let info = gst_video::VideoInfo::from_caps(&fixated)
            .map_err(|_| "downstream caps did not fixate to a usable video format")?;
        best_format = info.format();
    }

    if at_least_one_alpha {
        let has_alpha = gst_video::VideoFormatInfo::from_format(best_format)
            .flags()
            .contains(gst_video::VideoFormatFlags::ALPHA);
        if !has_alpha {
            return Err(
                "at least one input pad has alpha, but downstream can't support alpha",
            );
        }
    }

    Ok(best_format)
}

/// `gst_basemixer_pad_sink_getcaps`: template caps intersected with the
/// current source caps (if already negotiated) and the query filter.
pub fn pad_sink_getcaps(
    pad: &gst::Pad,
    src_caps: Option<&gst::Caps>,
    filter: Option<&gst::Caps>,
) -> gst::Caps {
    let template_caps = pad
        .pad_template()
        .map(|t| t.caps())
        .unwrap_or_else(gst::Caps::new_any);

    let mut caps = template_caps;
    if let Some(src_caps) = src_caps {
        caps = caps.intersect(src_caps);
    }
    if let Some(filter) = filter {
        caps = caps.intersect(filter);
    }

    caps
}

/// `gst_basemixer_pad_sink_acceptcaps`: accept iff the proposed caps
/// intersect with what getcaps would return.
pub fn pad_sink_acceptcaps(pad: &gst::Pad, src_caps: Option<&gst::Caps>, caps: &gst::Caps) -> bool {
    let allowed = pad_sink_getcaps(pad, src_caps, None);
    !allowed.intersect(caps).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_format_caps_do_not_intersect() {
        gst::init().ok();
        let a = gst::Caps::builder("video/x-raw").field("format", &"I420").build();
        let b = gst::Caps::builder("video/x-raw").field("format", &"NV12").build();
        assert!(a.intersect(&b).is_empty());
    }
}
