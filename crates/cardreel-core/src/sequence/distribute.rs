//! Round-robin category distribution
//!
//! Clips are bucketed by primary category tag, buckets ordered by the first
//! appearance of their tag in the input. The output takes one clip from each
//! bucket per round, so clips sharing a category end up spread out. Untagged
//! clips follow all tagged ones in their original order.

use std::collections::HashMap;

use crate::types::Clip;

/// Interleave clips by primary category tag.
///
/// Never drops or duplicates a clip. A single bucket, or input with no tags
/// at all, comes back in input order.
pub fn distribute_by_category(clips: Vec<Clip>) -> Vec<Clip> {
    let total = clips.len();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<Clip>> = Vec::new();
    let mut untagged = Vec::new();

    for clip in clips {
        let Some(tag) = clip.primary_category() else {
            untagged.push(clip);
            continue;
        };
        let idx = match bucket_index.get(tag) {
            Some(&idx) => idx,
            None => {
                bucket_index.insert(tag.to_string(), buckets.len());
                buckets.push(Vec::new());
                buckets.len() - 1
            }
        };
        buckets[idx].push(clip);
    }

    log::debug!(
        "distribute_by_category: {} buckets, {} untagged clips",
        buckets.len(),
        untagged.len()
    );

    // Drain each bucket front to back; a round visits every bucket that
    // still has clips left.
    let mut iters: Vec<_> = buckets.into_iter().map(Vec::into_iter).collect();
    let mut out = Vec::with_capacity(total);
    loop {
        let before = out.len();
        for iter in iters.iter_mut() {
            if let Some(clip) = iter.next() {
                out.push(clip);
            }
        }
        if out.len() == before {
            break;
        }
    }

    out.extend(untagged);
    out
}
