//! CLI tool for turning generated text into a slide deck.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deck_core::{
    DeckAction, DeckBuilder, DeckSession, ExportedDeck, Presentation, SessionObserver,
    SessionState, SlideField,
};
use std::fs::{self, File};
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Build a slide deck from text and export it as JSON.
#[derive(Parser, Debug)]
#[command(name = "deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input text file, slides separated by blank lines ("-" for stdin)
    input: PathBuf,

    /// Deck title (default: input file name without extension)
    #[arg(short, long)]
    title: Option<String>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the exported JSON to stdout instead of writing a file
    #[arg(short, long)]
    print: bool,

    /// Browse and edit the deck from the terminal before exporting
    #[arg(short, long)]
    interactive: bool,

    /// Prefix for generated slide titles
    #[arg(long, default_value = "Slide")]
    placeholder_prefix: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let builder = DeckBuilder::new().with_placeholder_prefix(args.placeholder_prefix.as_str());
    let title = deck_title(&args.input, args.title.as_deref());
    let output_dir = get_output_dir(&args.input, args.output.as_ref())?;

    if args.interactive {
        if is_stdin(&args.input) {
            bail!("Interactive mode reads commands from stdin; pass the input as a file");
        }
        return run_interactive(&args.input, builder, &title, output_dir);
    }

    let raw_text = read_input(&args.input)?;
    let presentation = builder.build(&raw_text, &title);
    if args.verbose {
        eprintln!("  Built {} slides", presentation.slides.len());
    }

    let exported = deck_core::export(&presentation)?;
    if args.print {
        println!("{}", exported.as_str());
    } else {
        let path = write_output(&exported, &output_dir)?;
        if args.verbose {
            eprintln!("Written to: {}", path.display());
        }
    }

    Ok(())
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

/// Read the source text from a file or stdin.
fn read_input(input: &Path) -> Result<String> {
    let mut text = String::new();
    if is_stdin(input) {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {}", input.display()))?;
    }
    Ok(text)
}

/// The caller-supplied title wins; otherwise fall back to the file stem.
fn deck_title(input: &Path, title: Option<&str>) -> String {
    if let Some(title) = title {
        return title.to_string();
    }
    if is_stdin(input) {
        return "Untitled".to_string();
    }
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

/// Determine the directory exports are written to.
fn get_output_dir(input: &Path, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let dir = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.clone()
        }
        None => match input.parent() {
            Some(parent) if !is_stdin(input) && !parent.as_os_str().is_empty() => {
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        },
    };
    Ok(dir)
}

/// Write an exported deck into the output directory.
fn write_output(exported: &ExportedDeck, dir: &Path) -> Result<PathBuf> {
    exported
        .write_to_dir(dir)
        .with_context(|| format!("Failed to write {} to {}", exported.filename, dir.display()))
}

// ============ Interactive mode ============

/// Saves the deck every time an edit session is committed.
struct ExportOnCommit {
    output_dir: PathBuf,
    new_deck_requested: bool,
}

impl SessionObserver for ExportOnCommit {
    fn on_commit(&mut self, presentation: &Presentation) {
        let result = deck_core::export(presentation)
            .map_err(anyhow::Error::from)
            .and_then(|exported| write_output(&exported, &self.output_dir));
        match result {
            Ok(path) => println!("Saved to {}", path.display()),
            Err(e) => {
                log::error!("Commit of deck {} failed: {:#}", presentation.id, e);
                eprintln!("Error saving deck: {:#}", e);
            }
        }
    }

    fn on_request_new_deck(&mut self) {
        self.new_deck_requested = true;
    }
}

/// A line typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Action(DeckAction),
    Show,
    Export,
    Reload,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  n, next            next slide
  p, prev            previous slide
  jump <N>           go to slide N
  e, edit            enter edit mode / leave it and save
  title <text>       rename the deck
  slide-title <text> retitle the current slide
  content <text>     replace the current slide body (\\n for new lines)
  s, show            show the current slide
  x, export          write the deck as JSON
  new                discard this deck
  r, reload          rebuild the deck from the input file
  q, quit            exit";

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "n" | "next" => Command::Action(DeckAction::Next),
        "p" | "prev" => Command::Action(DeckAction::Previous),
        "jump" => {
            let number: usize = rest
                .parse()
                .map_err(|_| format!("not a slide number: {:?}", rest))?;
            // Slide 0 maps past the end so the session ignores it.
            Command::Action(DeckAction::JumpTo(number.checked_sub(1).unwrap_or(usize::MAX)))
        }
        "e" | "edit" => Command::Action(DeckAction::ToggleEdit),
        "title" => Command::Action(DeckAction::SetTitle(rest.to_string())),
        "slide-title" => {
            Command::Action(DeckAction::UpdateField(SlideField::Title, rest.to_string()))
        }
        "content" => Command::Action(DeckAction::UpdateField(
            SlideField::Content,
            rest.replace("\\n", "\n"),
        )),
        "new" => Command::Action(DeckAction::RequestNewDeck),
        "s" | "show" => Command::Show,
        "x" | "export" => Command::Export,
        "r" | "reload" => Command::Reload,
        "h" | "help" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => return Err(format!("unknown command: {:?} (try `help`)", other)),
    };
    Ok(command)
}

/// Render the current slide as plain text.
fn render(session: &DeckSession<ExportOnCommit>) -> String {
    let presentation = session.presentation();
    let Some(slide) = session.current_slide() else {
        return format!("{}\n\n(no slides yet)", presentation.title);
    };

    let mode = match session.state() {
        SessionState::Editing => " [editing]",
        _ => "",
    };
    let mut out = format!(
        "{} - slide {}/{}{}\n\n# {}\n",
        presentation.title,
        session.current_index() + 1,
        presentation.slides.len(),
        mode,
        slide.title
    );
    for paragraph in slide.paragraphs() {
        out.push_str(paragraph);
        out.push('\n');
    }
    if slide.has_image() {
        out.push_str(&format!("[image: {}]\n", slide.image_url));
    }
    out
}

fn run_interactive(
    input: &Path,
    builder: DeckBuilder,
    title: &str,
    output_dir: PathBuf,
) -> Result<()> {
    let raw_text = read_input(input)?;
    let observer = ExportOnCommit {
        output_dir: output_dir.clone(),
        new_deck_requested: false,
    };
    let mut session = DeckSession::with_builder(builder, &raw_text, title, observer);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_commands(&mut session, input, &output_dir, stdin.lock(), &mut stdout)
}

/// Export the live deck into `output_dir`.
fn export_session(session: &DeckSession<ExportOnCommit>, output_dir: &Path) -> Result<PathBuf> {
    let exported = session.export()?;
    write_output(&exported, output_dir)
}

/// Drive a session from command lines until `quit` or end of input.
///
/// Failed exports and reloads are reported and the loop carries on, so
/// edits in the session are never lost to an I/O error.
fn run_commands<R: BufRead, W: Write>(
    session: &mut DeckSession<ExportOnCommit>,
    input: &Path,
    output_dir: &Path,
    commands: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", render(session))?;
    for line in commands.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Action(action) => {
                session.dispatch(action);
                if std::mem::take(&mut session.observer_mut().new_deck_requested) {
                    let title = session.presentation().title.clone();
                    session.rebuild("", &title);
                    writeln!(
                        out,
                        "Deck discarded; `reload` rebuilds it from {}",
                        input.display()
                    )?;
                }
                writeln!(out, "{}", render(session))?;
            }
            Command::Show => writeln!(out, "{}", render(session))?,
            Command::Export => match export_session(session, output_dir) {
                Ok(path) => writeln!(out, "Exported to {}", path.display())?,
                Err(e) => {
                    log::error!("Export of deck {} failed: {:#}", session.presentation().id, e);
                    eprintln!("Error exporting deck: {:#}", e);
                }
            },
            Command::Reload => match read_input(input) {
                Ok(raw_text) => {
                    let title = session.presentation().title.clone();
                    session.rebuild(&raw_text, &title);
                    writeln!(out, "{}", render(session))?;
                }
                Err(e) => {
                    log::error!("Reload from {} failed: {:#}", input.display(), e);
                    eprintln!("Error reloading deck: {:#}", e);
                }
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
        out.flush().context("Failed to flush output")?;
    }

    Ok(())
}
