/// Characters that change meaning inside inline Markdown
const SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '#', '|', '~', '!', '&'];

/// Escape config-provided text so it renders literally on one line
pub fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' | '\n' => out.push(' '),
            c if SPECIAL.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Make a link destination safe inside `( )`
pub fn escape_link(url: &str) -> String {
    url.trim()
        .replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace('<', "%3C")
        .replace('>', "%3E")
}

/// Fenced code block whose fence cannot collide with the body
pub fn code_block(body: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in body.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat((longest + 1).max(3));
    format!("{fence}\n{}\n{fence}\n", body.trim_end_matches('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_inline() {
        assert_eq!(escape_inline("plain"), "plain");
        assert_eq!(escape_inline("*bold* [x](y)"), "\\*bold\\* \\[x\\](y)");
        assert_eq!(escape_inline("two\nlines"), "two lines");
    }

    #[test]
    fn test_entities_stay_literal() {
        use pulldown_cmark::{Event, Parser};

        let escaped = escape_inline("R&amp;D");
        assert_eq!(escaped, "R\\&amp;D");

        let text: String = Parser::new(&escaped)
            .filter_map(|event| match event {
                Event::Text(text) => Some(text.into_string()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "R&amp;D");
    }

    #[test]
    fn test_escape_link() {
        assert_eq!(
            escape_link(" https://example.com/a b(c) "),
            "https://example.com/a%20b%28c%29"
        );
    }

    #[test]
    fn test_code_block_fence_outgrows_body() {
        assert_eq!(code_block("(o_o)\n"), "```\n(o_o)\n```\n");
        assert!(code_block("a ```` b").starts_with("`````\n"));
    }
}
