//! Search filtering and match highlighting

use super::option::DropdownOption;
use regex::RegexBuilder;

/// Case-insensitive substring test; an empty term matches everything
pub fn matches(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

/// Options whose display field contains `term`, in original order
pub fn filter_options<'a>(
    options: &'a [DropdownOption],
    field: &str,
    term: &str,
) -> Vec<&'a DropdownOption> {
    options
        .iter()
        .filter(|o| matches(&o.display_text(field), term))
        .collect()
}

/// A run of label text, either matching the search term or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

/// Split `text` around every case-insensitive occurrence of `term`
///
/// The term is matched literally. Concatenating the segments always gives
/// back `text`.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    if term.is_empty() || text.is_empty() {
        return vec![Segment::plain(text)];
    }

    let Ok(re) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return vec![Segment::plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::plain(&text[last..m.start()]));
        }
        segments.push(Segment {
            text: m.as_str(),
            matched: true,
        });
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities() -> Vec<DropdownOption> {
        ["Jakarta", "Surabaya", "Bandung", "Medan", "Semarang", "Palembang"]
            .iter()
            .enumerate()
            .map(|(i, name)| DropdownOption::labeled((i + 1).to_string(), *name))
            .collect()
    }

    fn labels(options: &[&DropdownOption]) -> Vec<String> {
        options.iter().map(|o| o.display_text("label")).collect()
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let options = cities();
        let filtered = filter_options(&options, "label", "");
        assert_eq!(filtered.len(), options.len());
        assert_eq!(filtered[0].value, "1");
        assert_eq!(filtered[5].value, "6");
    }

    #[test]
    fn test_case_insensitive_substring() {
        let options = cities();
        assert_eq!(labels(&filter_options(&options, "label", "jak")), vec!["Jakarta"]);
        assert_eq!(
            labels(&filter_options(&options, "label", "BANG")),
            vec!["Palembang"]
        );
        assert_eq!(
            labels(&filter_options(&options, "label", "an")),
            vec!["Bandung", "Medan", "Semarang", "Palembang"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let options = cities();
        assert!(filter_options(&options, "label", "xyz").is_empty());
    }

    #[test]
    fn test_filter_by_term() {
        let options = cities();
        let cases: [(&str, &[&str]); 5] = [
            ("a", &["Jakarta", "Surabaya", "Bandung", "Medan", "Semarang", "Palembang"]),
            ("SUR", &["Surabaya"]),
            ("ng", &["Bandung", "Semarang", "Palembang"]),
            ("q", &[]),
            ("medan", &["Medan"]),
        ];
        for (term, expected) in cases {
            assert_eq!(labels(&filter_options(&options, "label", term)), expected, "{term}");
        }
    }

    #[test]
    fn test_matches() {
        assert!(matches("Palembang", ""));
        assert!(matches("Palembang", "LEMB"));
        assert!(!matches("Palembang", "lembx"));
        assert!(!matches("", "a"));
    }

    #[test]
    fn test_missing_label_only_matches_empty_term() {
        let options = vec![DropdownOption::new("x")];
        assert_eq!(filter_options(&options, "label", "").len(), 1);
        assert!(filter_options(&options, "label", "x").is_empty());
    }

    #[test]
    fn test_highlight_splits_all_occurrences() {
        let segments = highlight("Semarang", "a");
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "Semarang");
        assert_eq!(segments.iter().filter(|s| s.matched).count(), 2);
        assert_eq!(
            segments[0],
            Segment {
                text: "Sem",
                matched: false
            }
        );
    }

    #[test]
    fn test_highlight_is_case_insensitive() {
        let segments = highlight("Jakarta", "JAK");
        assert_eq!(
            segments,
            vec![
                Segment {
                    text: "Jak",
                    matched: true
                },
                Segment {
                    text: "arta",
                    matched: false
                },
            ]
        );
    }

    #[test]
    fn test_highlight_treats_metacharacters_literally() {
        let segments = highlight("a.b (c)", "(c");
        assert!(segments.iter().any(|s| s.matched && s.text == "(c"));

        let segments = highlight("abc", ".");
        assert!(segments.iter().all(|s| !s.matched));
    }
}
