//! Queue Filler: decides, for every sink pad, whether its queued buffer is
//! part of the frame currently being produced, needs to be dropped because
//! it has already expired, or whether the tick must wait for more data.
//! Grounded on `gst_basemixer_fill_queues` in the original base mixer,
//! which returns one of four states per call: all pads contributed or are
//! legitimately idle (`Ready`), at least one active pad has nothing queued
//! yet (`NeedMoreData`), every pad is EOS (`Eos`), or a pad's segment is
//! unusable (`Error`).

use gst::prelude::*;
use gst_base::prelude::*;

use crate::mixer::pad::{CurrentBuffer, QueuedBuffer};
use crate::mixer::pad::MixerPad as MixerPadImp;
use crate::mixer::MixerPad;

pub enum FillResult {
    /// Every pad is either contributing a buffer to this tick or has
    /// nothing relevant left (EOS, or alpha will be zero); `active` lists
    /// pads whose `current` buffer overlaps the output interval.
    Ready { active: Vec<MixerPad> },
    NeedMoreData,
    Eos,
    Error,
}

/// Drives one pass over all pads, processing at most one upstream buffer
/// per pad. `output_start`/`output_end` are the running-time bounds of the
/// frame currently being assembled; `output_rate` is `|segment.rate|` of
/// the output segment. Implements spec §4.2's 8-step per-pad algorithm.
pub fn fill_queues(
    pads: &[MixerPad],
    output_start: gst::ClockTime,
    output_end: Option<gst::ClockTime>,
    output_rate: f64,
) -> FillResult {
    let mut need_more = false;
    let mut all_eos = true;

    for pad in pads {
        let agg_pad: &gst_base::AggregatorPad = pad.upcast_ref();
        let imp = MixerPadImp::from_instance(pad);
        let mut pad_state = imp.state.lock().unwrap();

        let is_eos = agg_pad.is_eos();

        let peeked = agg_pad.peek_buffer();
        if peeked.is_none() {
            // Step 1: nothing new upstream. A pad with no live end_time is
            // ignored for this interval either way.
            if let Some(current) = &pad_state.current {
                if current.end_time <= output_start {
                    pad_state.current = None;
                    if is_eos {
                        need_more = true;
                    }
                } else if is_eos {
                    all_eos = false;
                }
            }
            continue;
        }

        let buffer = peeked.unwrap();

        // Step 2: un-timestamped buffers are an error.
        let pts = match buffer.pts() {
            Some(pts) => pts,
            None => return FillResult::Error,
        };

        // Step 3: "from the past" against a previously-promoted or
        // already-queued start.
        let earlier_than_current = pad_state.current.as_ref().map_or(false, |c| pts < c.pts);
        let earlier_than_queued = pad_state
            .queued
            .as_ref()
            .map_or(false, |q| pts < q.start_pts);
        if earlier_than_current || earlier_than_queued {
            agg_pad.drop_buffer();
            need_more = true;
            continue;
        }

        // Steps 4/5: resolve a previously-queued undurationed buffer, or
        // stash a fresh undurationed buffer as `queued`.
        let in_info = match pad_state.info.clone() {
            Some(info) => info,
            None => return FillResult::Error,
        };

        let (candidate_buffer, candidate_vinfo, raw_start, raw_end, fresh) =
            if let Some(queued) = pad_state.queued.take() {
                // The new arrival's start defines the queued buffer's end;
                // the new arrival itself is discarded.
                agg_pad.drop_buffer();
                (queued.buffer, queued.vinfo, queued.start_pts, pts, false)
            } else {
                match buffer.duration() {
                    None => {
                        agg_pad.drop_buffer();
                        pad_state.queued = Some(QueuedBuffer {
                            buffer,
                            vinfo: in_info,
                            start_pts: pts,
                        });
                        need_more = true;
                        continue;
                    }
                    Some(duration) => {
                        let end = match pts.checked_add(duration) {
                            Some(end) => end,
                            None => return FillResult::Error,
                        };
                        (buffer, in_info, pts, end, true)
                    }
                }
            };

        // Step 6: convert to running time, clip to segment, scale by rate.
        let segment = match agg_pad.segment().downcast::<gst::ClockTime>() {
            Ok(segment) => segment,
            Err(_) => return FillResult::Error,
        };

        let seg_start = segment.start().unwrap_or(gst::ClockTime::ZERO);
        let seg_stop = segment.stop();

        if seg_stop.map_or(false, |stop| raw_start >= stop) || raw_end < seg_start {
            if fresh {
                agg_pad.drop_buffer();
            }
            need_more = true;
            continue;
        }

        let clipped_start = raw_start.max(seg_start);
        let clipped_end = match seg_stop {
            Some(stop) => raw_end.min(stop),
            None => raw_end,
        };

        let running_start = match segment.to_running_time(clipped_start) {
            Some(t) => t,
            None => return FillResult::Error,
        };
        let running_end = match segment.to_running_time(clipped_end) {
            Some(t) => t,
            None => return FillResult::Error,
        };

        let (running_start, running_end) = if (output_rate - 1.0).abs() > f64::EPSILON {
            let scale = |t: gst::ClockTime| {
                gst::ClockTime::from_nseconds((t.nseconds() as f64 * output_rate.abs()) as u64)
            };
            (scale(running_start), scale(running_end))
        } else {
            (running_start, running_end)
        };

        // Step 8: drop buffers older than the previously-promoted end_time.
        if let Some(current) = &pad_state.current {
            if current.end_time > running_end {
                if fresh {
                    agg_pad.drop_buffer();
                }
                need_more = true;
                continue;
            }
        }

        // Step 7: promote, leave for later, or drop as too old.
        let covers_interval =
            running_end >= output_start && output_end.map_or(true, |end| running_start < end);

        if covers_interval {
            if fresh {
                agg_pad.drop_buffer();
            }
            pad_state.current = Some(CurrentBuffer {
                buffer: candidate_buffer,
                vinfo: candidate_vinfo,
                pts: raw_start,
                start_time: running_start,
                end_time: running_end,
            });
            all_eos = false;
        } else if output_end.map_or(false, |end| running_start >= end) {
            // Belongs to a future tick. Leave the native pad queue alone
            // (when fresh) so the next tick re-peeks the same buffer;
            // data resolved out of `queued` has already been consumed and
            // is dropped here, matching the original's behavior.
            all_eos = false;
        } else {
            // Entirely in the past: too old to contribute.
            if fresh {
                agg_pad.drop_buffer();
            }
            need_more = true;
            continue;
        }
    }

    if need_more {
        FillResult::NeedMoreData
    } else if all_eos {
        FillResult::Eos
    } else {
        let active = pads
            .iter()
            .filter(|pad| {
                let imp = MixerPadImp::from_instance(pad);
                imp.state.lock().unwrap().current.is_some()
            })
            .cloned()
            .collect();
        FillResult::Ready { active }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn end_before_output_start_is_in_the_past() {
        let output_start = gst::ClockTime::from_seconds(2);
        let end = gst::ClockTime::from_seconds(1);
        assert!(end <= output_start);
    }

    #[test]
    fn end_after_output_start_overlaps() {
        let output_start = gst::ClockTime::from_seconds(1);
        let end = gst::ClockTime::from_seconds(2);
        assert!(end > output_start);
    }
}
