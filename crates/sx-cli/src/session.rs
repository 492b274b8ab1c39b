//! Interactive session: one user event per input line, re-rendering the
//! page after each change. The active tab lives only as long as the session.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use sx_core::{KvStore, Page, Tab};

use crate::render::write_screen;

const HELP: &str = "\
commands:
  tab <id>        switch to a tab (news, construction, research)
  press <n>       press the n-th button on the current tab
  unlock <tech>   unlock a technology
  help            show this help
  quit            leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Tab(String),
    Press(usize),
    Unlock(String),
    Help,
    Quit,
    Blank,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Input::Blank;
    };
    let arg = parts.next();
    let extra = parts.next().is_some();

    match (cmd.to_ascii_lowercase().as_str(), arg, extra) {
        ("tab", Some(id), false) => Input::Tab(id.to_string()),
        ("press", Some(n), false) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Press(n),
            _ => Input::Invalid(format!("not a button number: {n}")),
        },
        ("unlock", Some(tech), false) => Input::Unlock(tech.to_string()),
        ("help", None, _) | ("?", None, _) => Input::Help,
        ("quit", None, _) | ("exit", None, _) => Input::Quit,
        _ => Input::Invalid(format!("unrecognized input: {}", line.trim())),
    }
}

/// Drive `page` from `input` until `quit` or end of input.
pub fn run<S: KvStore>(
    page: &mut Page<S>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    write_screen(out, &page.render()).context("failed to write screen")?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let changed = match parse_input(&line) {
            Input::Blank => false,
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                false
            }
            Input::Tab(id) => match id.parse::<Tab>() {
                Ok(tab) => {
                    page.navigate(tab);
                    true
                }
                Err(e) => {
                    tracing::debug!("rejected tab request: {e}");
                    writeln!(out, "{e}; staying on {}", page.active_tab())?;
                    false
                }
            },
            Input::Press(n) => {
                if page.press(n - 1) {
                    true
                } else {
                    writeln!(out, "no button {n} on this tab")?;
                    false
                }
            }
            Input::Unlock(tech) => {
                page.unlock(&tech);
                true
            }
            Input::Invalid(msg) => {
                writeln!(out, "{msg} (try 'help')")?;
                false
            }
        };

        if changed {
            writeln!(out)?;
            write_screen(out, &page.render()).context("failed to write screen")?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sx_core::{CONSTRUCTION, MemoryStore};

    fn play(page: &mut Page<MemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        run(page, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  "), Input::Blank);
        assert_eq!(parse_input("tab research"), Input::Tab("research".into()));
        assert_eq!(parse_input("PRESS 2"), Input::Press(2));
        assert_eq!(parse_input("unlock warp"), Input::Unlock("warp".into()));
        assert_eq!(parse_input("quit"), Input::Quit);
        assert!(matches!(parse_input("press 0"), Input::Invalid(_)));
        assert!(matches!(parse_input("press x"), Input::Invalid(_)));
        assert!(matches!(parse_input("tab"), Input::Invalid(_)));
        assert!(matches!(parse_input("tab a b"), Input::Invalid(_)));
        assert!(matches!(parse_input("dance"), Input::Invalid(_)));
    }

    #[test]
    fn test_press_start_construction() {
        let mut page = Page::open(MemoryStore::new());
        let text = play(&mut page, "press 1\n");
        assert!(page.techs().has_tech(CONSTRUCTION));
        assert_eq!(page.active_tab(), Tab::Construction);
        assert!(text.contains("tabs: News  [Construction]"));
    }

    #[test]
    fn test_unknown_tab_keeps_current() {
        let mut page = Page::open(MemoryStore::new());
        let text = play(&mut page, "press 1\ntab shipyard\n");
        assert_eq!(page.active_tab(), Tab::Construction);
        assert!(text.contains("unknown tab 'shipyard'"));
        assert!(text.contains("staying on construction"));
    }

    #[test]
    fn test_unlock_command_reveals_tab_without_switching() {
        let mut page = Page::open(MemoryStore::new());
        let text = play(&mut page, "unlock construction\n");
        assert!(page.techs().has_tech(CONSTRUCTION));
        assert_eq!(page.active_tab(), Tab::News);
        assert!(text.contains("tabs: [News]  Construction"));
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut page = Page::open(MemoryStore::new());
        play(&mut page, "quit\npress 1\n");
        assert!(!page.techs().has_tech(CONSTRUCTION));
    }

    #[test]
    fn test_missing_button_reported() {
        let mut page = Page::open(MemoryStore::new());
        let text = play(&mut page, "press 9\n");
        assert!(text.contains("no button 9 on this tab"));
        assert_eq!(page.active_tab(), Tab::News);
    }

    #[test]
    fn test_tab_switch_rerenders() {
        let mut page = Page::open(MemoryStore::new());
        let text = play(&mut page, "tab research\n");
        assert_eq!(page.active_tab(), Tab::Research);
        assert_eq!(text.matches("🚀 Space Express 🚀").count(), 2);
        assert!(text.contains("Research lab"));
    }
}
