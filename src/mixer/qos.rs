//! QoS bookkeeping. Grounded on `gst_basemixer_update_qos` /
//! `gst_basemixer_reset_qos` / `gst_basemixer_read_qos` /
//! `gst_basemixer_do_qos`. Kept behind its own lock (the "QoS object
//! lock" in the concurrency model) separate from the pad/segment lock,
//! since QoS events arrive on the streaming thread of whichever
//! downstream element is reporting them, independent of the tick that
//! produces output frames.

use std::sync::Mutex;

pub struct Qos {
    inner: Mutex<QosState>,
}

struct QosState {
    proportion: f64,
    earliest_time: Option<gst::ClockTime>,
    processed: u64,
    dropped: u64,
}

const DEFAULT_PROPORTION: f64 = 0.5;

impl Default for Qos {
    fn default() -> Self {
        Qos {
            inner: Mutex::new(QosState {
                proportion: DEFAULT_PROPORTION,
                earliest_time: gst::ClockTime::NONE,
                processed: 0,
                dropped: 0,
            }),
        }
    }
}

impl Qos {
    /// `diff > 0`: we are late by `diff`, estimate the next earliest
    /// acceptable time as `timestamp + 2*diff + frame_duration`. Otherwise
    /// `earliest_time = timestamp + diff`, matching `gst_basemixer_update_qos`.
    pub fn update(
        &self,
        proportion: f64,
        diff: gst::ClockTimeDiff,
        timestamp: gst::ClockTime,
        frame_duration: Option<gst::ClockTime>,
    ) {
        let mut state = self.inner.lock().unwrap();
        state.proportion = proportion;
        state.earliest_time = if diff > 0 {
            let two_diff = gst::ClockTime::from_nseconds(diff as u64 * 2);
            let duration = frame_duration.unwrap_or(gst::ClockTime::ZERO);
            timestamp.checked_add(two_diff).and_then(|t| t.checked_add(duration))
        } else {
            let diff = (-diff) as u64;
            if timestamp.nseconds() > diff {
                Some(timestamp - gst::ClockTime::from_nseconds(diff))
            } else {
                Some(gst::ClockTime::ZERO)
            }
        };
    }

    pub fn reset(&self) {
        let mut state = self.inner.lock().unwrap();
        state.proportion = DEFAULT_PROPORTION;
        state.earliest_time = gst::ClockTime::NONE;
        state.processed = 0;
        state.dropped = 0;
    }

    pub fn read(&self) -> (f64, Option<gst::ClockTime>) {
        let state = self.inner.lock().unwrap();
        (state.proportion, state.earliest_time)
    }

    pub fn stats(&self) -> (u64, u64) {
        let state = self.inner.lock().unwrap();
        (state.processed, state.dropped)
    }

    pub fn record_processed(&self) {
        self.inner.lock().unwrap().processed += 1;
    }

    pub fn record_dropped(&self) {
        self.inner.lock().unwrap().dropped += 1;
    }

    /// Computes `jitter = GST_CLOCK_DIFF(qostime, earliest_time)`, matching
    /// `gst_basemixer_do_qos`. A positive result means the frame is late and
    /// should be dropped; `None` means there is no observation yet, so the
    /// frame should be processed unconditionally.
    pub fn jitter(&self, qostime: gst::ClockTime) -> Option<gst::ClockTimeDiff> {
        let (_, earliest_time) = self.read();
        earliest_time.map(|earliest_time| {
            earliest_time.nseconds() as gst::ClockTimeDiff - qostime.nseconds() as gst::ClockTimeDiff
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_qos_has_no_jitter() {
        let qos = Qos::default();
        assert_eq!(qos.jitter(gst::ClockTime::from_seconds(5)), None);
    }

    #[test]
    fn reset_clears_earliest_time_and_counters() {
        let qos = Qos::default();
        qos.update(0.5, 1_000_000, gst::ClockTime::from_seconds(1), None);
        qos.record_dropped();
        assert!(qos.read().1.is_some());
        qos.reset();
        assert!(qos.read().1.is_none());
        assert_eq!(qos.stats(), (0, 0));
    }

    #[test]
    fn late_frame_has_positive_jitter() {
        let qos = Qos::default();
        // diff <= 0 path: earliest_time = timestamp + diff = 2s.
        qos.update(1.0, 0, gst::ClockTime::from_seconds(2), None);
        assert!(qos.jitter(gst::ClockTime::from_seconds(1)).unwrap() > 0);
        assert!(qos.jitter(gst::ClockTime::from_seconds(2)).unwrap() <= 0);
    }

    #[test]
    fn positive_diff_adds_two_diff_plus_frame_duration() {
        let qos = Qos::default();
        let duration = gst::ClockTime::from_mseconds(100);
        qos.update(
            1.0,
            40 * gst::ClockTime::MSECOND.nseconds() as i64,
            gst::ClockTime::from_seconds(1),
            Some(duration),
        );
        // earliest = 1s + 2*40ms + 100ms = 1.18s
        assert_eq!(qos.read().1, Some(gst::ClockTime::from_mseconds(1180)));
    }

    #[test]
    fn default_proportion_is_one_half() {
        let qos = Qos::default();
        assert_eq!(qos.read().0, 0.5);
    }
}
