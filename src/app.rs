//! Terminal front end: turns typed commands into gallery operations and
//! redraws the view after every change.

use anyhow::Result;
use console::Term;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::catalog::Style;
use crate::gallery::{Gallery, Trigger};
use crate::ui::{render, GalleryView};
use crate::utils::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectStyle(Style),
    Generate,
    /// 1-based position in the history list
    History(usize),
    ToggleTour,
    Dismiss,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type ? for help)")]
    Unknown(String),
    #[error("Usage: h <number>")]
    MissingHistoryIndex,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (head, rest) = input
            .split_once(char::is_whitespace)
            .map(|(h, r)| (h, r.trim()))
            .unwrap_or((input, ""));

        match head.to_ascii_lowercase().as_str() {
            "" | "r" | "refresh" => Ok(Command::Refresh),
            "g" | "generate" | "retry" => Ok(Command::Generate),
            "t" | "tour" => Ok(Command::ToggleTour),
            "d" | "dismiss" => Ok(Command::Dismiss),
            "?" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "h" | "history" => rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Command::History)
                .ok_or(CommandError::MissingHistoryIndex),
            _ => input
                .parse::<Style>()
                .map(Command::SelectStyle)
                .map_err(|_| CommandError::Unknown(input.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    /// Command refused or informational; shown under the view
    Notice(String),
    Quit,
}

pub const HELP_TEXT: &str = "1-3 or a style name: select collection | g: generate new | \
h N: show history item N | t: start/pause auto-tour | d: dismiss error | r: redraw | q: quit";

pub struct App {
    gallery: Gallery,
}

impl App {
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    pub fn view(&self) -> GalleryView {
        GalleryView::build(self.gallery.state(), self.gallery.catalog())
    }

    /// Apply one command. Style selection and generation are refused while a
    /// generation is in flight, the same way the buttons are disabled.
    pub fn handle_command(&mut self, command: Command) -> CommandOutcome {
        let loading = self.gallery.state().is_loading;
        match command {
            Command::SelectStyle(_) | Command::Generate if loading => {
                CommandOutcome::Notice("Curating... please wait for the current artwork.".to_string())
            }
            Command::SelectStyle(style) => {
                self.gallery.select_style(style, Trigger::Manual);
                CommandOutcome::Continue
            }
            Command::Generate => {
                self.gallery.retry();
                CommandOutcome::Continue
            }
            Command::History(number) => {
                let id = self
                    .gallery
                    .state()
                    .history
                    .get(number.wrapping_sub(1))
                    .map(|art| art.id);
                match id {
                    Some(id) => {
                        self.gallery.select_history_item(id);
                        CommandOutcome::Continue
                    }
                    None => CommandOutcome::Notice(format!("No history item {}", number)),
                }
            }
            Command::ToggleTour => {
                self.gallery.toggle_auto_tour();
                CommandOutcome::Continue
            }
            Command::Dismiss => {
                self.gallery.dismiss_error();
                CommandOutcome::Continue
            }
            Command::Refresh => CommandOutcome::Continue,
            Command::Help => CommandOutcome::Notice(HELP_TEXT.to_string()),
            Command::Quit => CommandOutcome::Quit,
        }
    }

    fn draw(&self, term: &Term, notice: Option<&str>) -> Result<()> {
        term.clear_screen()?;
        term.write_str(&render(&self.view()))?;
        if let Some(notice) = notice {
            term.write_line(notice)?;
        }
        term.write_str("> ")?;
        Ok(())
    }

    /// Run until `q` or end of input.
    pub async fn run(mut self) -> Result<()> {
        let term = Term::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.draw(&term, None)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let notice = match line.parse::<Command>() {
                        Ok(command) => match self.handle_command(command) {
                            CommandOutcome::Quit => break,
                            CommandOutcome::Notice(text) => Some(text),
                            CommandOutcome::Continue => None,
                        },
                        Err(err) => Some(err.to_string()),
                    };
                    self.draw(&term, notice.as_deref())?;
                }
                event = self.gallery.next_event() => {
                    if let Some(event) = event {
                        self.gallery.apply(event);
                        self.draw(&term, None)?;
                    }
                }
            }
        }

        self.gallery.shutdown();
        logger::info("Gallery closed");
        term.write_line("")?;
        Ok(())
    }
}
