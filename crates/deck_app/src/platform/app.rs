use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use deck_client::ClientHandle;
use eframe::egui;
use deck_core::{update, AppState, Effect, Msg, POLL_INTERVAL};
use deck_logging::deck_info;

use super::effects::EffectRunner;
use super::ui;
use super::{config, logging, persistence};

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize();
    let settings = config::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Prospect Deck",
        options,
        Box::new(move |_cc| {
            let app = DeckApp::new(settings)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|err| anyhow::anyhow!("ui error: {err}"))
}

struct DeckApp {
    state: AppState,
    runner: EffectRunner,
    buffers: ui::FormBuffers,
    /// Next poll tick, armed by `Effect::StartPollTimer`.
    poll_deadline: Option<Instant>,
    state_dir: PathBuf,
}

impl DeckApp {
    fn new(settings: deck_client::ClientSettings) -> Result<Self, deck_client::ApiError> {
        let state_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let runner = EffectRunner::new(ClientHandle::new(settings)?);

        let mut app = Self {
            state: AppState::new(),
            runner,
            buffers: ui::FormBuffers::default(),
            poll_deadline: None,
            state_dir,
        };

        let prefs = persistence::load_preferences(&app.state_dir);
        app.apply(Msg::PreferencesLoaded(prefs));
        app.apply(Msg::Started);
        app.buffers
            .seed_populate(app.state.view(Utc::now()).last_populate);
        Ok(app)
    }

    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::StartPollTimer => {
                    self.poll_deadline = Some(Instant::now() + POLL_INTERVAL);
                }
                Effect::CancelPollTimer => {
                    self.poll_deadline = None;
                }
                Effect::SavePreferences => {
                    persistence::save_preferences(&self.state_dir, &self.state.preferences());
                }
                other => self.runner.dispatch(other),
            }
        }
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(deadline) = self.poll_deadline {
            if Instant::now() >= deadline {
                self.poll_deadline = Some(Instant::now() + POLL_INTERVAL);
                self.apply(Msg::PollTicked);
            }
        }

        let now = Utc::now();
        for msg in self.runner.drain(now) {
            self.apply(msg);
        }

        let view = self.state.view(now);
        for msg in ui::render(ctx, &view, &mut self.buffers) {
            self.apply(msg);
        }

        // Keep the frame loop alive so events and ticks land without input.
        ctx.request_repaint_after(Duration::from_millis(200));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        deck_info!("shutting down");
        persistence::save_preferences(&self.state_dir, &self.state.preferences());
        self.runner.shutdown();
    }
}
