mod state;

use std::{collections::VecDeque, path::Path, time::Duration, time::Instant};

use assistant::GeminiClient;
use chrono::Utc;
use crossterm::event::{self, Event};
use engine::{AssistantError, FileBlobStore, ImagePayload, RecordStore, SmartInput};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

pub use state::*;

pub struct App {
    store: RecordStore<FileBlobStore>,
    assistant: Option<GeminiClient>,
    state: AppState,
    tx: UnboundedSender<Msg>,
    rx: UnboundedReceiver<Msg>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let today = config.today()?;
        let store = RecordStore::new(FileBlobStore::new(&config.data_dir));
        let records = store.list_all();
        tracing::info!(count = records.len(), "loaded records");

        let assistant = match GeminiClient::new(&config.assistant) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "smart add and advice disabled");
                None
            }
        };

        let state = AppState::new(records, today, assistant.is_some(), Instant::now());
        let (tx, rx) = unbounded_channel();

        Ok(Self {
            store,
            assistant,
            state,
            tx,
            rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.state.should_quit {
            while let Ok(msg) = self.rx.try_recv() {
                self.dispatch(msg);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    let action = ui::keymap::map_key(key, self.state.mode.is_typing());
                    self.dispatch(Msg::Key(action));
                }
            }
            self.dispatch(Msg::Tick(Instant::now()));

            // Let spawned assistant calls make progress between frames.
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Feeds `msg` to the state and runs the commands it produces until
    /// none are left.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue: VecDeque<Command> = self.state.update(msg).into();
        while let Some(command) = queue.pop_front() {
            if let Some(reply) = self.execute(command) {
                queue.extend(self.state.update(reply));
            }
        }
    }

    fn execute(&mut self, command: Command) -> Option<Msg> {
        match command {
            Command::Save { id, draft } => {
                let result = match id {
                    Some(id) => self.store.update(&id, draft),
                    None => self.store.create(draft, Utc::now()),
                };
                Some(match result {
                    Ok(records) => Msg::Saved(records),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to save record");
                        Msg::StoreFailed(err.to_string())
                    }
                })
            }
            Command::Delete(id) => Some(match self.store.remove(&id) {
                Ok(records) => Msg::Deleted(records),
                Err(err) => {
                    tracing::error!(error = %err, id = %id, "failed to delete record");
                    Msg::StoreFailed(err.to_string())
                }
            }),
            Command::SmartParse {
                request,
                text,
                image_path,
            } => {
                let Some(client) = self.assistant.clone() else {
                    return Some(Msg::ParseFinished {
                        request,
                        result: Err(not_configured()),
                    });
                };
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = match load_image(image_path.as_deref()) {
                        Ok(image) => {
                            let input = SmartInput { text, image };
                            engine::smart_parse(&client, &input).await
                        }
                        Err(err) => Err(err),
                    };
                    let _ = tx.send(Msg::ParseFinished { request, result });
                });
                None
            }
            Command::RequestAdvice { request } => {
                let Some(client) = self.assistant.clone() else {
                    return Some(Msg::AdviceFinished {
                        request,
                        result: Err(not_configured()),
                    });
                };
                let tx = self.tx.clone();
                let records = self.state.records.clone();
                tokio::spawn(async move {
                    let result = engine::request_advice(&client, &records).await;
                    let _ = tx.send(Msg::AdviceFinished { request, result });
                });
                None
            }
        }
    }
}

fn not_configured() -> AssistantError {
    AssistantError::NotConfigured("no API key".to_string())
}

fn load_image(path: Option<&str>) -> std::result::Result<Option<ImagePayload>, AssistantError> {
    match path.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => ImagePayload::from_path(Path::new(path)).map(Some),
        None => Ok(None),
    }
}
