//! Plain-text rendering of a composed [`Screen`].

use std::io::{self, Write};

use sx_core::Screen;

const WIDTH: usize = 72;

pub fn nav_line(screen: &Screen) -> String {
    let labels: Vec<String> = screen
        .nav
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else {
                b.label.to_string()
            }
        })
        .collect();
    format!("tabs: {}", labels.join("  "))
}

pub fn write_screen(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    writeln!(out, "{}", screen.title)?;
    writeln!(out, "{}", nav_line(screen))?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;
    writeln!(out, "{}", screen.content.heading)?;
    for paragraph in &screen.content.paragraphs {
        writeln!(out)?;
        for line in wrap(paragraph, WIDTH) {
            writeln!(out, "{line}")?;
        }
    }
    if !screen.content.actions.is_empty() {
        writeln!(out)?;
        for (i, button) in screen.content.actions.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, button.label)?;
        }
    }
    Ok(())
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sx_core::{MemoryStore, Page};

    fn rendered(page: &Page<MemoryStore>) -> String {
        let mut buf = Vec::new();
        write_screen(&mut buf, &page.render()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_long_word() {
        assert_eq!(wrap("x abcdefghij y", 4), vec!["x", "abcdefghij", "y"]);
    }

    #[test]
    fn test_fresh_screen_text() {
        let text = rendered(&Page::open(MemoryStore::new()));
        assert!(text.starts_with("🚀 Space Express 🚀\ntabs: [News]\n"));
        assert!(text.contains("Space Express has been founded!"));
        assert!(text.contains("  1) Start Construction"));
        assert!(text.lines().all(|l| l.chars().count() <= WIDTH));
    }

    #[test]
    fn test_nav_marks_active_tab() {
        let mut page = Page::open(MemoryStore::new());
        page.start_construction();
        assert_eq!(nav_line(&page.render()), "tabs: News  [Construction]");
    }
}
