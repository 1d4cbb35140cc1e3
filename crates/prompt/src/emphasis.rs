//! Post-processing of generated text.

/// Emphasis marker used by Telegram-flavored Markdown.
pub const EMPHASIS_MARKER: char = '*';

/// Deletes every `marker` that has no identical neighbour and keeps runs of two or more.
///
/// Neighbours are judged on the input string, so `**Title**` survives while `*word*` loses both
/// markers. A removed marker never had a marker neighbour, so removal cannot create new pairs and
/// the pass is idempotent.
pub fn strip_lone_markers(text: &str, marker: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != marker {
                return true;
            }
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            prev == Some(marker) || next == Some(marker)
        })
        .map(|(_, &c)| c)
        .collect()
}
