//! Display helpers for recipe content.

use url::Url;

/// Split an ingredient line into name and quantity at its first digit.
///
/// `"돼지고기 200g"` becomes `("돼지고기", "200g")`. Lines that start with a
/// digit or contain none are returned whole with an empty quantity.
pub fn split_quantity(line: &str) -> (&str, &str) {
    match line.find(|c: char| c.is_ascii_digit()) {
        Some(at) if at > 0 => (line[..at].trim(), line[at..].trim()),
        _ => (line, ""),
    }
}

/// YouTube thumbnail for a watch url (`?v=<id>`).
pub fn thumbnail_for(source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    let video_id = url
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.is_empty())?;
    Some(format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_at_first_digit() {
        assert_eq!(split_quantity("돼지고기 200g"), ("돼지고기", "200g"));
        assert_eq!(split_quantity("간장 1큰술 반"), ("간장", "1큰술 반"));
        assert_eq!(split_quantity("소금 약간"), ("소금 약간", ""));
        assert_eq!(split_quantity("2 eggs"), ("2 eggs", ""));
        assert_eq!(split_quantity(""), ("", ""));
    }

    #[test]
    fn thumbnail_from_watch_url() {
        assert_eq!(
            thumbnail_for("https://www.youtube.com/watch?v=abc123&t=10").as_deref(),
            Some("https://img.youtube.com/vi/abc123/hqdefault.jpg")
        );
        assert_eq!(thumbnail_for("https://www.youtube.com/watch"), None);
        assert_eq!(thumbnail_for("not a url"), None);
    }

    proptest! {
        /// Property: the split never loses non-whitespace text.
        #[test]
        fn split_keeps_content(name in "[가-힣a-z ]{1,10}", qty in "[0-9][0-9a-z ]{0,6}") {
            let line = format!("{name}{qty}");
            let (n, q) = split_quantity(&line);
            let joined: String = format!("{n}{q}").split_whitespace().collect();
            let expected: String = line.split_whitespace().collect();
            prop_assert_eq!(joined, expected);
            prop_assert!(q.starts_with(|c: char| c.is_ascii_digit()));
        }
    }
}
