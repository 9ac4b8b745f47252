//! Heuristic scoring of trailer candidates.
//!
//! A candidate must score above zero to be considered at all; the caller
//! picks the highest-scoring one.

/// One video candidate from either search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Provider video id.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Uploading channel name.
    pub channel: String,
    /// Video length in seconds, when the source reports it.
    pub duration_secs: Option<u32>,
}

/// Channels whose uploads get a trust bonus.
const TRUSTED_CHANNELS: &[&str] = &[
    "the dice tower",
    "shut up & sit down",
    "watch it played",
    "geek & sundry",
    "rotten tomatoes trailers",
    "movieclips trailers",
];

const KEYWORD_BONUS: i32 = 30;
const CHANNEL_BONUS: i32 = 20;
const SUBJECT_BONUS: i32 = 25;
const DURATION_PENALTY: i32 = 15;

/// Anything shorter is likely an ad bumper; anything longer a full playthrough.
const MIN_REASONABLE_SECS: u32 = 30;
const MAX_REASONABLE_SECS: u32 = 600;

/// Score one candidate against the lookup subject.
#[must_use]
pub fn score_candidate(candidate: &Candidate, subject: &str) -> i32 {
    let title = candidate.title.to_lowercase();
    let channel = candidate.channel.to_lowercase();
    let subject = subject.to_lowercase();

    let mut score = 0;
    if title.contains("trailer") || title.contains("how to play") {
        score += KEYWORD_BONUS;
    }
    if TRUSTED_CHANNELS.contains(&channel.as_str()) {
        score += CHANNEL_BONUS;
    }
    if !subject.is_empty() && title.contains(&subject) {
        score += SUBJECT_BONUS;
    }
    if let Some(secs) = candidate.duration_secs
        && !(MIN_REASONABLE_SECS..=MAX_REASONABLE_SECS).contains(&secs)
    {
        score -= DURATION_PENALTY;
    }
    score
}
