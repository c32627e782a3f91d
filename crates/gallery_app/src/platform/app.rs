use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, MouseEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use engine_logging::{engine_debug, engine_info, engine_warn, level_from_verbosity};
use gallery_core::{update, AppState, Msg};
use gallery_engine::{EngineEvent, EngineHandle, EventSink};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;

use super::config;
use super::effects::{EffectRunner, FetchQueue};
use super::ui::constants::{AUTO_SCROLL_CARDS, CARD_ROWS};
use super::ui::keys::{self, UiCommand};
use super::ui::notify::NoticeBoard;
use super::ui::render::{self, CardList, Overlay, ScreenView};
use super::ui::viewport::Viewport;
use super::ui::GallerySurface;
use crate::cli::Cli;

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = config::load(&cli)?;
    if !engine_logging::initialize(&config.log_file, level_from_verbosity(cli.verbose)) {
        eprintln!(
            "warning: cannot write log file {}; logging is off",
            config.log_file.display()
        );
    }
    engine_info!("Starting pixabay-gallery against {}", config.fetch.endpoint);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let engine = EngineHandle::new(
        config.fetch,
        Arc::new(AppEventSink {
            tx: event_tx.clone(),
        }),
    )
    .context("starting fetch engine")?;

    let terminal = setup_terminal().context("preparing the terminal")?;
    spawn_terminal_reader(event_tx);
    let result = run_loop(terminal, engine, &event_rx, cli.initial_query());
    restore_terminal().context("restoring the terminal")?;

    engine_info!("Exiting");
    result
}

fn run_loop<B: Backend>(
    terminal: Terminal<B>,
    engine: EngineHandle,
    events: &mpsc::Receiver<AppEvent>,
    initial_query: Option<String>,
) -> anyhow::Result<()> {
    let mut app = GalleryApp::new(engine, terminal)?;
    app.start(initial_query);
    app.draw()?;

    for event in events.iter() {
        if app.handle_event(event)?.is_break() {
            break;
        }
        if app.take_redraw() {
            app.draw()?;
        }
    }
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    InputClosed,
    Engine(EngineEvent),
}

struct AppEventSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for AppEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(event));
    }
}

fn spawn_terminal_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(Event::Key(key)) => AppEvent::Key(key),
            Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
            Ok(Event::Resize(_, _)) => AppEvent::Resize,
            Ok(_) => continue,
            Err(err) => {
                engine_warn!("Terminal input failed: {}", err);
                let _ = tx.send(AppEvent::InputClosed);
                return;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    });
}

/// Owns the state and the screen; routes terminal and engine events
/// through `update`.
pub(crate) struct GalleryApp<Q: FetchQueue, B: Backend> {
    state: AppState,
    runner: EffectRunner<Q, CardList, NoticeBoard>,
    viewport: Viewport,
    overlay: Overlay,
    terminal: Terminal<B>,
    redraw: bool,
}

impl<Q: FetchQueue, B: Backend> GalleryApp<Q, B> {
    pub(crate) fn new(queue: Q, terminal: Terminal<B>) -> io::Result<Self> {
        let mut app = Self {
            state: AppState::new(),
            runner: EffectRunner::new(queue, CardList::new(), NoticeBoard::new()),
            viewport: Viewport::new(0),
            overlay: Overlay::None,
            terminal,
            redraw: false,
        };
        app.fit_viewport()?;
        Ok(app)
    }

    pub(crate) fn start(&mut self, initial_query: Option<String>) {
        if let Some(query) = initial_query {
            self.dispatch(Msg::InputChanged(query));
            self.dispatch(Msg::SearchSubmitted);
        }
    }

    pub(crate) fn handle_event(&mut self, event: AppEvent) -> io::Result<ControlFlow<()>> {
        let command = match event {
            AppEvent::Key(key) => keys::map_key(key),
            AppEvent::Mouse(mouse) => keys::map_mouse(mouse),
            AppEvent::Resize => {
                self.fit_viewport()?;
                self.redraw = true;
                self.report_scroll();
                None
            }
            AppEvent::InputClosed => return Ok(ControlFlow::Break(())),
            AppEvent::Engine(EngineEvent::PageFetched {
                request_id,
                outcome,
            }) => {
                self.dispatch(Msg::PageLoaded {
                    request_id,
                    outcome,
                });
                None
            }
        };

        Ok(match command {
            Some(command) => self.handle_command(command),
            None => ControlFlow::Continue(()),
        })
    }

    /// Returns whether the screen needs repainting, clearing the flag.
    pub(crate) fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub(crate) fn draw(&mut self) -> io::Result<()> {
        let view = self.state.view();
        let screen = ScreenView {
            input: self.state.input(),
            cards: self.runner.gallery(),
            viewport: &self.viewport,
            gallery: &view,
            notice: self.runner.notifier().current(),
            overlay: self.overlay,
        };
        self.terminal.draw(|frame| render::draw(frame, &screen))?;
        Ok(())
    }

    fn handle_command(&mut self, command: UiCommand) -> ControlFlow<()> {
        self.redraw = true;
        match command {
            UiCommand::Insert(c) => {
                let mut text = self.state.input().to_string();
                text.push(c);
                self.dispatch(Msg::InputChanged(text));
            }
            UiCommand::Backspace => {
                let mut text = self.state.input().to_string();
                text.pop();
                self.dispatch(Msg::InputChanged(text));
            }
            UiCommand::ClearInput => self.dispatch(Msg::InputChanged(String::new())),
            UiCommand::Submit => self.dispatch(Msg::SearchSubmitted),
            UiCommand::LoadMore => self.dispatch(Msg::LoadMoreClicked),
            UiCommand::Scroll(scroll) => {
                self.viewport.apply(scroll, self.content_rows());
                self.report_scroll();
            }
            UiCommand::OpenFocused => {
                let number = self.viewport.focused_card() + 1;
                if self.runner.gallery().enlarged(number).is_some() {
                    engine_debug!("Opening card #{}", number);
                    self.overlay = Overlay::Lightbox(number);
                }
            }
            UiCommand::CloseOverlay => self.overlay = Overlay::None,
            UiCommand::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
            }
            UiCommand::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let summary = self.runner.run(effects);
        if state.consume_dirty() || summary.changed() {
            self.redraw = true;
        }
        self.state = state;

        if summary.cleared {
            self.viewport.reset();
            if matches!(self.overlay, Overlay::Lightbox(_)) {
                self.overlay = Overlay::None;
            }
        }
        if summary.appended > 0 {
            // New cards scroll into view; the move counts as a scroll.
            let before = self.viewport.offset();
            self.viewport
                .scroll_by(AUTO_SCROLL_CARDS * CARD_ROWS, self.content_rows());
            if self.viewport.offset() != before {
                self.report_scroll();
            }
        }
    }

    fn report_scroll(&mut self) {
        let metrics = self.viewport.metrics(self.content_rows());
        self.dispatch(Msg::Scrolled(metrics));
    }

    fn fit_viewport(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        let rows = render::gallery_rows(Rect::new(0, 0, size.width, size.height));
        let content = self.content_rows();
        self.viewport.set_height(rows, content);
        engine_debug!("Card pane is {} rows", self.viewport.height());
        Ok(())
    }

    fn content_rows(&self) -> u32 {
        u32::try_from(self.runner.gallery().len())
            .unwrap_or(u32::MAX)
            .saturating_mul(CARD_ROWS)
    }
}
