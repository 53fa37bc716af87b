// File: ./src/format.rs
//! Plain-text shaping of resolved scripture.
use crate::scripture::strip_verse_tag;

/// Joins each blank-line separated block into one paragraph.
pub fn scripture_as_prose(raw: &str) -> Vec<String> {
    raw.split("\n\n")
        .map(|block| {
            block
                .lines()
                .map(|l| strip_verse_tag(l.trim()).trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// One line per half-verse; the asterisk marks the split.
pub fn psalm_as_verses(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in raw.lines() {
        let line = strip_verse_tag(line.trim()).trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once('*') {
            Some((first, second)) => {
                out.push(first.trim().to_string());
                out.push(format!("  {}", second.trim()));
            }
            None => out.push(line.to_string()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_reflow() {
        let raw = "In the beginning\nwas the Word\n\n\nAnd the Word\nwas with God";
        assert_eq!(
            scripture_as_prose(raw),
            vec!["In the beginning was the Word", "And the Word was with God"]
        );
    }

    #[test]
    fn test_half_verses() {
        let raw = "95:1 Come, let us sing * to the LORD\nLet us shout for joy";
        assert_eq!(
            psalm_as_verses(raw),
            vec!["Come, let us sing", "  to the LORD", "Let us shout for joy"]
        );
    }
}
