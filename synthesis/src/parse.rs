use simulator_core::GeneratedPost;

pub const DEFAULT_TITLE: &str = "Untitled Seattle Post";

const TITLE_PREFIX: &str = "TITLE:";
const BODY_PREFIX: &str = "BODY:";

/// Parse a labeled `TITLE:`/`BODY:` response into a post.
///
/// First match wins, no nesting: the first `TITLE:` line sets the title,
/// the first `BODY:` line starts body accumulation, and from that point
/// every line — labeled or not — is appended verbatim. A missing or empty
/// title falls back to [`DEFAULT_TITLE`]; a missing or empty body falls
/// back to the entire raw response text.
pub fn parse_generated_post(text: &str) -> GeneratedPost {
    let mut title: Option<&str> = None;
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in text.lines() {
        if in_body {
            body_lines.push(line);
        } else if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
            if title.is_none() {
                title = Some(rest.trim());
            }
        } else if let Some(rest) = line.strip_prefix(BODY_PREFIX) {
            in_body = true;
            body_lines.push(rest.trim());
        }
    }

    let title = match title {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    };

    let body = body_lines.join("\n");
    let body = if body.is_empty() {
        text.to_string()
    } else {
        body
    };

    GeneratedPost { title, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_response() {
        let post = parse_generated_post("TITLE: Foo\nBODY: bar\nbaz");
        assert_eq!(post.title, "Foo");
        assert_eq!(post.body, "bar\nbaz");
    }

    #[test]
    fn test_no_labels_falls_back_to_raw_text() {
        let raw = "Just some rambling\nwith no labels at all";
        let post = parse_generated_post(raw);
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.body, raw);
    }

    #[test]
    fn test_title_without_body_keeps_raw_body() {
        let raw = "TITLE: Only a title\nand then prose without a label";
        let post = parse_generated_post(raw);
        assert_eq!(post.title, "Only a title");
        assert_eq!(post.body, raw);
    }

    #[test]
    fn test_body_without_title_uses_default_title() {
        let post = parse_generated_post("BODY: just a body\nmore body");
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.body, "just a body\nmore body");
    }

    #[test]
    fn test_title_inside_body_is_appended_verbatim() {
        let post = parse_generated_post("TITLE: Real\nBODY: first\nTITLE: fake\nlast");
        assert_eq!(post.title, "Real");
        assert_eq!(post.body, "first\nTITLE: fake\nlast");
    }

    #[test]
    fn test_second_title_before_body_is_ignored() {
        let post = parse_generated_post("TITLE: First\nTITLE: Second\nBODY: text");
        assert_eq!(post.title, "First");
        assert_eq!(post.body, "text");
    }

    #[test]
    fn test_second_body_label_is_appended_verbatim() {
        let post = parse_generated_post("BODY: one\nBODY: two");
        assert_eq!(post.body, "one\nBODY: two");
    }

    #[test]
    fn test_tolerates_surrounding_noise_and_blank_lines() {
        let raw = "Sure! Here's your post:\n\nTITLE:   Spaced Out  \n\nBODY: line one\n\nline two\n";
        let post = parse_generated_post(raw);
        assert_eq!(post.title, "Spaced Out");
        assert_eq!(post.body, "line one\n\nline two");
    }

    #[test]
    fn test_empty_title_falls_back() {
        let post = parse_generated_post("TITLE:\nBODY: content");
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.body, "content");
    }

    #[test]
    fn test_empty_body_label_falls_back_to_raw_text() {
        let raw = "TITLE: T\nBODY:";
        let post = parse_generated_post(raw);
        assert_eq!(post.title, "T");
        assert_eq!(post.body, raw);
    }

    #[test]
    fn test_indented_labels_do_not_match() {
        // prefixes are literal; leading whitespace means no label
        let raw = "  TITLE: indented\n  BODY: also indented";
        let post = parse_generated_post(raw);
        assert_eq!(post.title, DEFAULT_TITLE);
        assert_eq!(post.body, raw);
    }
}
