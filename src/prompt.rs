//! Masked terminal input for passwords.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};

/// What one key press did to the secret being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretEdit {
    Typed,
    Erased,
    Ignored,
    Submit,
    Cancel,
}

pub fn apply_key(secret: &mut String, key: KeyEvent) -> SecretEdit {
    if key.kind != KeyEventKind::Press {
        return SecretEdit::Ignored;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => SecretEdit::Submit,
        KeyCode::Esc => SecretEdit::Cancel,
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => SecretEdit::Cancel,
        KeyCode::Char(c) if !ctrl => {
            secret.push(c);
            SecretEdit::Typed
        }
        KeyCode::Backspace if secret.pop().is_some() => SecretEdit::Erased,
        _ => SecretEdit::Ignored,
    }
}

/// Read one line with echo off, drawing `*` for each character.
///
/// Returns `None` if the user cancels with Esc or Ctrl-C.
pub fn read_secret(label: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;

    terminal::enable_raw_mode().context("enabling raw mode for password input")?;
    let result = read_masked(&mut stdout);
    let restored = terminal::disable_raw_mode();
    writeln!(stdout)?;
    restored.context("restoring terminal mode")?;
    result
}

fn read_masked(out: &mut impl Write) -> Result<Option<String>> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match apply_key(&mut secret, key) {
            SecretEdit::Typed => write!(out, "*")?,
            SecretEdit::Erased => write!(out, "\u{8} \u{8}")?,
            SecretEdit::Ignored => continue,
            SecretEdit::Submit => return Ok(Some(secret)),
            SecretEdit::Cancel => return Ok(None),
        }
        out.flush()?;
    }
}
