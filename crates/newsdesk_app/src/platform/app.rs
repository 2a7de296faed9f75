use std::time::Duration;

use anyhow::Context;
use desk_logging::desk_info;
use iced::{Element, Size, Subscription, Task, Theme};
use newsdesk_core::{update, AppState, AppViewModel, Msg, Page, Preferences};
use newsdesk_engine::{ClientSettings, EngineConfig};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence;
use super::ui;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Starts the dashboard. An optional first argument picks the start page (`/results`).
pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::Both);

    let client = ClientSettings::from_env().context("invalid backend settings")?;
    let preferences_path = persistence::preferences_path();
    let config = EngineConfig {
        client,
        download_dir: persistence::download_dir(),
    };
    let runner = EffectRunner::new(config, preferences_path.clone())
        .context("failed to start the backend engine")?;
    let preferences = persistence::load_preferences(&preferences_path);
    let start_page = std::env::args()
        .nth(1)
        .map(|path| Page::from_path(&path))
        .unwrap_or_default();
    desk_info!("Starting newsdesk on {}", start_page.path());

    let shell = Shell::new(runner, preferences, start_page);
    iced::application("Newsdesk", Shell::update, Shell::view)
        .subscription(Shell::subscription)
        .theme(Shell::theme)
        .window_size(Size::new(ui::constants::WINDOW_WIDTH, ui::constants::WINDOW_HEIGHT))
        .run_with(move || (shell, Task::none()))
        .context("desktop shell exited with an error")
}

#[derive(Debug, Clone)]
pub enum Message {
    Core(Msg),
    Tick,
}

struct Shell {
    state: AppState,
    view_model: AppViewModel,
    runner: EffectRunner,
}

impl Shell {
    fn new(runner: EffectRunner, preferences: Preferences, start_page: Page) -> Self {
        let mut shell = Self {
            state: AppState::new(),
            view_model: AppViewModel::default(),
            runner,
        };
        shell.dispatch(Msg::RestorePreferences(preferences));
        shell.dispatch(Msg::Navigate(start_page));
        shell
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Core(msg) => self.dispatch(msg),
            Message::Tick => {
                for msg in self.runner.drain() {
                    self.dispatch(msg);
                }
            }
        }
        Task::none()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view_model = state.view();
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn view(&self) -> Element<'_, Message> {
        ui::layout::frame(&self.view_model)
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(TICK_INTERVAL).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}
