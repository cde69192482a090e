//! Sentence tags emitted by the UM7 in NMEA mode
//!
//! The recognized tag set is closed; dispatch matches exhaustively so a new
//! sentence family cannot be added without the compiler pointing at every
//! site that must handle it.

/// The sentence families the sensor emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceTag {
    /// `PCHRS`: gyro rate / acceleration / magnetometer vector sentence.
    RateVector,
    /// `PCHRA`: roll / pitch / yaw attitude sentence.
    Attitude,
}

impl SentenceTag {
    /// Every recognized tag, in dispatch order.
    pub const ALL: [SentenceTag; 2] = [SentenceTag::RateVector, SentenceTag::Attitude];

    /// The tag mnemonic as it appears on the wire.
    pub fn marker(&self) -> &'static str {
        match self {
            SentenceTag::RateVector => "PCHRS",
            SentenceTag::Attitude => "PCHRA",
        }
    }

    /// Identify the tag carried by a raw sentence, if any.
    ///
    /// Containment rather than prefix match: the tag follows the `$`
    /// preamble and whatever line noise survived framing.
    pub fn identify(sentence: &str) -> Option<SentenceTag> {
        SentenceTag::ALL
            .into_iter()
            .find(|tag| sentence.contains(tag.marker()))
    }
}
