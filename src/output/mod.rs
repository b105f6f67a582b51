// Output formatting: terminal display and the Markdown screening report.

pub mod markdown;
pub mod terminal;

/// Shorten `text` to `max_chars` characters, adding "..." when cut.
///
/// Works on chars, so umlauts and Arabic script never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}...")
}
