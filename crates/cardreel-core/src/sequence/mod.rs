//! Clip sequencer
//!
//! Turns a set of selected clips into a playback-ready order with a
//! contiguous timeline:
//!
//! 1. optional round-robin distribution by primary category tag
//! 2. ordering pass (sequential, shuffle, or biased random)
//! 3. timeline assignment from a running clock starting at 0
//!
//! Stateless; every call works on its own copy of the input.
//!
//! # Usage
//!
//! ```
//! use cardreel_core::sequence::sequence;
//! use cardreel_core::{Clip, OrderMode, SequenceRules};
//!
//! let clips = vec![
//!     Clip::new("a", vec!["Kpop".into()], 10.0, 14.0),
//!     Clip::new("b", vec![], 0.0, 2.5),
//! ];
//! let timed = sequence(&clips, &SequenceRules::new(OrderMode::Sequential, true));
//! assert_eq!(timed[1].start_time, 4.0);
//! assert_eq!(timed[1].end_time, 6.5);
//! ```

mod distribute;
mod order;

pub use distribute::distribute_by_category;
pub use order::{biased_random_order, fisher_yates};

use rand::Rng;

use crate::types::{Clip, OrderMode, SequenceRules, TimedClip};

/// Sequence clips using the thread-local RNG for the random modes.
pub fn sequence(clips: &[Clip], rules: &SequenceRules) -> Vec<TimedClip> {
    sequence_with_rng(clips, rules, &mut rand::thread_rng())
}

/// Sequence clips with a caller-supplied RNG.
///
/// Output is always a permutation of the input by id. Malformed ranges are
/// not rejected: a non-finite bound yields NaN timing for that clip and
/// every clip after it.
pub fn sequence_with_rng<R: Rng>(
    clips: &[Clip],
    rules: &SequenceRules,
    rng: &mut R,
) -> Vec<TimedClip> {
    log::debug!(
        "sequence: {} clips, mode={}, distribute_by_category={}",
        clips.len(),
        rules.mode,
        rules.distribute_by_category
    );

    let mut ordered = if rules.distribute_by_category {
        distribute_by_category(clips.to_vec())
    } else {
        clips.to_vec()
    };

    match rules.mode {
        OrderMode::Sequential => {}
        OrderMode::Shuffle => fisher_yates(&mut ordered, rng),
        OrderMode::BiasedRandom => biased_random_order(&mut ordered, rng),
    }

    assign_timeline(ordered)
}

/// Lay clips end to end starting at 0.
pub fn assign_timeline(clips: Vec<Clip>) -> Vec<TimedClip> {
    let mut clock = 0.0;
    clips
        .into_iter()
        .map(|clip| {
            let duration = clip.source_duration();
            let start_time = clock;
            let end_time = start_time + duration;
            clock = end_time;
            TimedClip {
                clip,
                start_time,
                duration,
                end_time,
            }
        })
        .collect()
}

/// Length of the assembled output (end of the last clip, 0 when empty)
pub fn total_duration(timed: &[TimedClip]) -> f64 {
    timed.last().map(|t| t.end_time).unwrap_or(0.0)
}
