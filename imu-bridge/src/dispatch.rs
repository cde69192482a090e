//! Tag recognition and per-sentence decode routing
//!
//! Routes each framed sentence to the decoder for its tag and tracks which
//! tags have been observed since the last publish. The tag set is the
//! closed [`SentenceTag`] enum, matched exhaustively.

use tracing::{debug, warn};

use um7::{decode_attitude, decode_rate_vector, SensorReading, SentenceTag};

/// What became of one dispatched sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A recognized sentence decoded cleanly.
    Decoded(SentenceTag),
    /// A recognized sentence failed to decode; its field group was
    /// zero-filled.
    Malformed(SentenceTag),
    /// Non-empty text matching no recognized tag. Diagnostic only.
    Unrecognized,
    /// Empty input, the artifact of a non-blocking read with no data.
    Empty,
}

/// Per-cycle "observed" flags, one per recognized tag.
#[derive(Debug, Default)]
pub struct TagSeenSet {
    seen: [bool; SentenceTag::ALL.len()],
}

impl TagSeenSet {
    pub fn mark(&mut self, tag: SentenceTag) {
        self.seen[tag as usize] = true;
    }

    pub fn is_seen(&self, tag: SentenceTag) -> bool {
        self.seen[tag as usize]
    }

    pub fn all_seen(&self) -> bool {
        self.seen.iter().all(|&seen| seen)
    }

    pub fn reset(&mut self) {
        self.seen = [false; SentenceTag::ALL.len()];
    }
}

/// Routes sentences to decoders and tracks cycle progress.
#[derive(Debug, Default)]
pub struct TagDispatcher {
    seen: TagSeenSet,
}

impl TagDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one raw sentence against the shared reading.
    ///
    /// A malformed sentence still marks its tag seen: the sentence was
    /// observed and its zero-fill recorded, so a publish gate waiting on
    /// the tag is not stalled by line noise inside a recognized sentence.
    pub fn dispatch(&mut self, raw: &str, reading: &mut SensorReading) -> DispatchOutcome {
        if raw.trim().is_empty() {
            return DispatchOutcome::Empty;
        }

        let Some(tag) = SentenceTag::identify(raw) else {
            debug!("unrecognized sentence: {raw:?}");
            return DispatchOutcome::Unrecognized;
        };

        let result = match tag {
            SentenceTag::RateVector => decode_rate_vector(raw, reading),
            SentenceTag::Attitude => decode_attitude(raw, reading),
        };
        self.seen.mark(tag);

        match result {
            Ok(()) => DispatchOutcome::Decoded(tag),
            Err(err) => {
                warn!("failed to decode {} sentence: {err}", tag.marker());
                DispatchOutcome::Malformed(tag)
            }
        }
    }

    /// Whether every recognized tag has been seen since the last reset.
    pub fn all_tags_seen(&self) -> bool {
        self.seen.all_seen()
    }

    /// Start a new cycle.
    pub fn reset_cycle(&mut self) {
        self.seen.reset();
    }
}
