//! Computed fields derived once at load time.

/// Default reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of whitespace-delimited tokens in a body, never less than one
pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count().max(1)
}

/// Reading time in whole minutes, rounded up
pub fn estimated_read_time(word_count: usize, words_per_minute: usize) -> usize {
    word_count.div_ceil(words_per_minute.max(1))
}
