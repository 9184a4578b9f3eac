use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Theme;

fn top(stack: &[Style]) -> Style {
    stack.last().copied().unwrap_or_default()
}

fn flush(lines: &mut Vec<Line<'static>>, spans: &mut Vec<Span<'static>>) {
    if !spans.is_empty() {
        lines.push(Line::from(std::mem::take(spans)));
    }
}

/// Parse view markup and convert to styled ratatui Lines
pub fn parse_markdown(input: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(input, options);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style_stack = vec![Style::default().fg(theme.colors.text_primary.to_color())];
    let mut in_code_block = false;
    let mut code_block_content = String::new();
    let mut list_depth: usize = 0;
    let mut link_targets: Vec<String> = Vec::new();

    for event in parser {
        match event {
            Event::Start(tag) => {
                let current = top(&style_stack);
                let new_style = match tag {
                    Tag::Heading { .. } => {
                        flush(&mut lines, &mut spans);
                        theme.heading()
                    }
                    Tag::Emphasis => current.add_modifier(Modifier::ITALIC),
                    Tag::Strong => current.add_modifier(Modifier::BOLD),
                    Tag::Strikethrough => Style::default()
                        .fg(theme.colors.redacted.to_color())
                        .add_modifier(Modifier::CROSSED_OUT),
                    Tag::CodeBlock(_) => {
                        in_code_block = true;
                        code_block_content.clear();
                        flush(&mut lines, &mut spans);
                        Style::default().fg(theme.colors.code.to_color())
                    }
                    Tag::List(_) => {
                        list_depth += 1;
                        flush(&mut lines, &mut spans);
                        current
                    }
                    Tag::Item => {
                        let indent = "  ".repeat(list_depth.saturating_sub(1));
                        spans.push(Span::raw(indent));
                        spans.push(Span::styled(
                            "• ",
                            Style::default().fg(theme.colors.accent.to_color()),
                        ));
                        current
                    }
                    Tag::Link { dest_url, .. } => {
                        link_targets.push(dest_url.to_string());
                        spans.push(Span::styled(
                            "[",
                            Style::default().fg(theme.colors.link.to_color()),
                        ));
                        Style::default()
                            .fg(theme.colors.link.to_color())
                            .add_modifier(Modifier::UNDERLINED)
                    }
                    Tag::BlockQuote(_) => {
                        flush(&mut lines, &mut spans);
                        spans.push(Span::styled(
                            "> ",
                            Style::default().fg(theme.colors.accent.to_color()),
                        ));
                        Style::default().fg(theme.colors.success.to_color())
                    }
                    _ => current,
                };
                style_stack.push(new_style);
            }
            Event::End(tag) => {
                style_stack.pop();
                match tag {
                    TagEnd::Heading(_) | TagEnd::Paragraph => {
                        flush(&mut lines, &mut spans);
                        if list_depth == 0 {
                            lines.push(Line::default());
                        }
                    }
                    TagEnd::Item => flush(&mut lines, &mut spans),
                    TagEnd::CodeBlock => {
                        in_code_block = false;
                        let style = Style::default().fg(theme.colors.code.to_color());
                        for line in code_block_content.lines() {
                            lines.push(Line::from(Span::styled(line.to_string(), style)));
                        }
                        lines.push(Line::default());
                        code_block_content.clear();
                    }
                    TagEnd::List(_) => {
                        list_depth = list_depth.saturating_sub(1);
                        if list_depth == 0 {
                            lines.push(Line::default());
                        }
                    }
                    TagEnd::Link => {
                        let link_style = Style::default().fg(theme.colors.link.to_color());
                        spans.push(Span::styled("]", link_style));
                        if let Some(url) = link_targets.pop() {
                            spans.push(Span::styled(format!(" {}", url), theme.dim()));
                        }
                    }
                    TagEnd::BlockQuote(_) => flush(&mut lines, &mut spans),
                    _ => {}
                }
            }
            Event::Text(text) => {
                if in_code_block {
                    code_block_content.push_str(&text);
                } else {
                    spans.push(Span::styled(text.to_string(), top(&style_stack)));
                }
            }
            Event::Code(code) => {
                let style = Style::default()
                    .fg(theme.colors.code.to_color())
                    .add_modifier(Modifier::BOLD);
                spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak | Event::HardBreak => flush(&mut lines, &mut spans),
            Event::Rule => {
                flush(&mut lines, &mut spans);
                lines.push(Line::from(Span::styled("─".repeat(32), theme.dim())));
            }
            _ => {}
        }
    }

    flush(&mut lines, &mut spans);

    // Drop trailing spacer lines
    while lines.last().is_some_and(|line| line.spans.is_empty()) {
        lines.pop();
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_and_paragraphs() {
        let lines = parse_markdown("# // NOTIFICATION\n\nFROM: GHOST\n", &Theme::noir());
        assert_eq!(plain(&lines), vec!["// NOTIFICATION", "", "FROM: GHOST"]);
    }

    #[test]
    fn test_list_items_and_links() {
        let markup = "- **relay** \\[go\\]\\\n  [SOURCE_CODE](https://example.com/relay)\n";
        let lines = parse_markdown(markup, &Theme::noir());
        assert_eq!(
            plain(&lines),
            vec!["• relay [go]", "[SOURCE_CODE] https://example.com/relay"]
        );
    }

    #[test]
    fn test_code_block_keeps_art() {
        let lines = parse_markdown("```\n /\\_/\\\n( o.o )\n```\n", &Theme::phosphor());
        assert_eq!(plain(&lines), vec![" /\\_/\\", "( o.o )"]);
    }

    #[test]
    fn test_redacted_is_crossed_out() {
        let lines = parse_markdown("~~SECRET~~\n", &Theme::noir());
        let span = &lines[0].spans[0];
        assert_eq!(span.content, "SECRET");
        assert!(span.style.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
