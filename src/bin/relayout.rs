// Relayout Terminal Shell
// Type on one keyboard layout and see the text another layout would produce

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{MoveToColumn, MoveToPreviousLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent as TermKey, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use parking_lot::Mutex;
use strum::IntoEnumIterator;

use relayout_core::key::ROW_LENGTHS;
use relayout_core::{
    Dialect, HookOutcome, LayoutError, LayoutName, LayoutTable, ModifierMask, PhysicalKeyId,
    RawCode, RawKeyInput, Settings, TextCapture, TranslationHook,
};

/// Keyboard layout translator
#[derive(Parser, Debug)]
#[command(name = "relayout")]
#[command(version)]
#[command(about = "Type on one keyboard layout as if it were another", long_about = None)]
struct Args {
    /// TOML settings file (default: ~/.config/relayout/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Layout of the physical keyboard
    #[arg(short, long, value_name = "LAYOUT", value_parser = LayoutName::from_name)]
    input: Option<LayoutName>,

    /// Layout to simulate
    #[arg(short, long, value_name = "LAYOUT", value_parser = LayoutName::from_name)]
    output: Option<LayoutName>,

    /// Key-code dialect of the host (standard or alternate)
    #[arg(long, value_name = "DIALECT", value_parser = Dialect::from_name)]
    dialect: Option<Dialect>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// List the built-in layouts
    #[arg(long)]
    list_layouts: bool,

    /// Print the legends of a layout and exit
    #[arg(long, value_name = "LAYOUT", value_parser = LayoutName::from_name)]
    show_layout: Option<LayoutName>,
}

/// Main application state
struct Application {
    settings: Settings,
}

impl Application {
    /// Load settings, then apply command line overrides
    fn new(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load_default().context("loading default settings")?,
        };

        if let Some(input) = args.input {
            settings.set_input(input);
        }
        if let Some(output) = args.output {
            settings.set_output(output);
        }
        if let Some(dialect) = args.dialect {
            settings.set_dialect(dialect);
        }

        log::debug!(
            "settings: input={} output={} dialect={} source={:?}",
            settings.input(),
            settings.output(),
            settings.dialect(),
            settings.source_path()
        );
        Ok(Self { settings })
    }

    /// Run the interactive loop until Esc or Ctrl+C
    fn run(&self) -> anyhow::Result<()> {
        let mut hook = self.settings.build_hook();
        let capture = Arc::new(Mutex::new(TextCapture::new()));
        {
            let capture = Arc::clone(&capture);
            hook.subscribe(move |event| {
                capture.lock().record(event);
            });
        }

        println!(
            "Typing on {} as {}. Press Esc to quit.",
            hook.input_layout(),
            hook.output_layout()
        );

        terminal::enable_raw_mode().context("enabling raw mode")?;
        let result = run_loop(&hook, &capture);
        terminal::disable_raw_mode().context("disabling raw mode")?;
        println!();

        result
    }
}

fn run_loop(hook: &TranslationHook, capture: &Mutex<TextCapture>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut lines_shown = 0;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_exit_key(&key) {
            return Ok(());
        }

        let Some(press) = raw_input_for(&key, hook.input_layout()) else {
            log::debug!("no raw code for {:?}", key.code);
            continue;
        };
        let release = RawKeyInput {
            action: relayout_core::Action::Release,
            ..press
        };

        if hook.handle(&press)? == HookOutcome::Passthrough {
            log::debug!("code {} passed through", press.raw_code);
        }
        hook.handle(&release)?;

        render(&mut stdout, &capture.lock(), &mut lines_shown)?;
    }
}

fn is_exit_key(key: &TermKey) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Rebuild the raw transition the hardware produced for a decoded terminal key.
///
/// Terminals deliver characters already decoded by the hardware layout, so
/// the character is looked up in that layout's legends. Keys outside the
/// typing area map straight to their browser codes.
fn raw_input_for(key: &TermKey, hardware: &LayoutTable) -> Option<RawKeyInput> {
    let legend = |text: &str| hardware.reverse(text);
    let (code, mut modifiers) = match key.code {
        KeyCode::Enter => legend("Enter")?,
        KeyCode::Tab => legend("Tab")?,
        KeyCode::BackTab => (legend("Tab")?.0, ModifierMask::SHIFT),
        KeyCode::Backspace => legend("Backspace")?,
        KeyCode::Char(' ') => legend("Space")?,
        KeyCode::Char(c) => legend(&c.to_string())?,
        KeyCode::F(n @ 1..=12) => (RawCode(111 + u16::from(n)), ModifierMask::NONE),
        other => (RawCode(navigation_code(other)?), ModifierMask::NONE),
    };
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers = modifiers | ModifierMask::SHIFT;
    }
    let modifiers = modifiers
        | ModifierMask::from_flags(
            false,
            key.modifiers.contains(KeyModifiers::CONTROL),
            key.modifiers.contains(KeyModifiers::ALT),
            key.modifiers.contains(KeyModifiers::SUPER),
        );
    Some(RawKeyInput::press(code).with_modifiers(modifiers))
}

fn navigation_code(code: KeyCode) -> Option<u16> {
    Some(match code {
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::Insert => 45,
        KeyCode::Delete => 46,
        _ => return None,
    })
}

fn render(out: &mut impl Write, capture: &TextCapture, lines_shown: &mut usize) -> io::Result<()> {
    let lines = capture.line_count();
    while *lines_shown < lines {
        queue!(out, Print("\r\n"))?;
        *lines_shown += 1;
    }
    if *lines_shown > lines {
        queue!(out, MoveToPreviousLine((*lines_shown - lines) as u16))?;
        *lines_shown = lines;
    }
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(capture.current_line().replace('\t', "    "))
    )?;
    out.flush()
}

fn short_label(label: Option<&str>) -> String {
    match label {
        Some(l) if l.chars().count() == 1 => l.to_string(),
        Some(l) => format!("<{}>", l),
        None => "?".to_string(),
    }
}

/// Legend rows of a layout, unshifted then shifted
fn layout_rows(table: &LayoutTable) -> Result<Vec<String>, LayoutError> {
    let mut rows = Vec::new();
    for mask in [ModifierMask::NONE, ModifierMask::SHIFT] {
        for row in 0..ROW_LENGTHS.len() as u8 {
            let labels = PhysicalKeyId::row(row)
                .map(|id| Ok(short_label(table.label(id, mask)?)))
                .collect::<Result<Vec<_>, LayoutError>>()?;
            rows.push(labels.join(" "));
        }
    }
    Ok(rows)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if args.list_layouts {
        for name in LayoutName::iter() {
            println!("{}", name);
        }
        return Ok(());
    }

    let app = Application::new(&args)?;

    if let Some(name) = args.show_layout {
        let table = name.table(app.settings.dialect());
        println!("{} ({})", table, app.settings.dialect());
        for row in layout_rows(&table)? {
            println!("  {}", row);
        }
        return Ok(());
    }

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> TermKey {
        TermKey::new(code, modifiers)
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["relayout", "--input", "Dvorak", "-o", "qwerty"]);
        assert_eq!(args.input, Some(LayoutName::Dvorak));
        assert_eq!(args.output, Some(LayoutName::Qwerty));
        assert_eq!(args.dialect, None);
        assert!(!args.verbose);
        assert!(!args.list_layouts);
    }

    #[test]
    fn test_args_reject_unknown_layout() {
        assert!(Args::try_parse_from(["relayout", "--input", "colemak"]).is_err());
        assert!(Args::try_parse_from(["relayout", "--dialect", "ie8"]).is_err());
    }

    #[test]
    fn test_raw_input_for_characters() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);

        let input = raw_input_for(&key(KeyCode::Char('q'), KeyModifiers::NONE), &qwerty).unwrap();
        assert_eq!(input.raw_code, RawCode(81));
        assert_eq!(input.modifier_mask(), ModifierMask::NONE);

        let input = raw_input_for(&key(KeyCode::Char('*'), KeyModifiers::SHIFT), &qwerty).unwrap();
        assert_eq!(input.raw_code, RawCode(56));
        assert!(input.shift);

        let input =
            raw_input_for(&key(KeyCode::Char('a'), KeyModifiers::CONTROL), &qwerty).unwrap();
        assert_eq!(input.modifier_mask(), ModifierMask::CTRL);
    }

    #[test]
    fn test_raw_input_for_named_keys() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        let code = |c| raw_input_for(&key(c, KeyModifiers::NONE), &qwerty).map(|i| i.raw_code);
        assert_eq!(code(KeyCode::Enter), Some(RawCode(13)));
        assert_eq!(code(KeyCode::Tab), Some(RawCode(9)));
        assert_eq!(code(KeyCode::Backspace), Some(RawCode(8)));
        assert_eq!(code(KeyCode::Char(' ')), Some(RawCode(32)));
        assert_eq!(code(KeyCode::F(1)), Some(RawCode(112)));
        assert_eq!(code(KeyCode::Left), Some(RawCode(37)));
        assert_eq!(code(KeyCode::Esc), None);
        assert_eq!(code(KeyCode::Char('é')), None);
    }

    #[test]
    fn test_raw_input_for_shifted_named_keys() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        for term_code in [KeyCode::Char(' '), KeyCode::Enter, KeyCode::Backspace] {
            let input = raw_input_for(&key(term_code, KeyModifiers::SHIFT), &qwerty).unwrap();
            assert!(input.shift, "{:?}", term_code);
            assert_eq!(input.modifier_mask(), ModifierMask::SHIFT);
        }

        let input = raw_input_for(&key(KeyCode::BackTab, KeyModifiers::SHIFT), &qwerty).unwrap();
        assert_eq!(input.raw_code, RawCode(9));
        assert_eq!(input.modifier_mask(), ModifierMask::SHIFT);

        let input = raw_input_for(
            &key(KeyCode::Enter, KeyModifiers::SHIFT | KeyModifiers::CONTROL),
            &qwerty,
        )
        .unwrap();
        assert_eq!(input.modifier_mask(), ModifierMask::SHIFT | ModifierMask::CTRL);
    }

    #[test]
    fn test_keys_outside_layout_pass_through_hook() {
        let settings = Settings::default();
        let hook = settings.build_hook();
        let press = raw_input_for(&key(KeyCode::F(5), KeyModifiers::NONE), hook.input_layout())
            .unwrap();
        assert_eq!(hook.handle(&press).unwrap(), HookOutcome::Passthrough);

        let press = raw_input_for(&key(KeyCode::Char('q'), KeyModifiers::NONE), hook.input_layout())
            .unwrap();
        assert_eq!(hook.handle(&press).unwrap(), HookOutcome::Suppress);
    }

    #[test]
    fn test_exit_keys() {
        assert!(is_exit_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_exit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_exit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_layout_rows() {
        let dvorak = LayoutName::Dvorak.table(Dialect::Standard);
        let rows = layout_rows(&dvorak).unwrap();
        assert_eq!(rows.len(), 10);
        assert!(rows[1].starts_with("<Tab> ' , . p y f g c r l / = \\"));
        assert!(rows[6].starts_with("<Tab> \" < > P Y"));
    }

    #[test]
    fn test_render_tracks_lines() {
        let mut capture = TextCapture::new();
        let mut out = Vec::new();
        let mut lines_shown = 0;
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        for code in [65u16, 13, 66] {
            capture.record(&relayout_core::KeyEvent::new(
                Arc::clone(&qwerty),
                RawCode(code),
                ModifierMask::NONE,
                true,
            ));
        }
        render(&mut out, &capture, &mut lines_shown).unwrap();
        assert_eq!(lines_shown, 1);
        assert!(String::from_utf8_lossy(&out).ends_with('b'));
    }
}
