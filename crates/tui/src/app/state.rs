//! Screen state and its transitions.
//!
//! [`AppState::update`] is pure: it never touches the store or the network.
//! Side effects come back as [`Command`]s for the runtime to execute, and
//! their outcomes re-enter as [`Msg`]s.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use chrono::NaiveDate;
use engine::{
    AssistantError, PurchaseStatus, RecordDraft, RecordPatch, ShoppingRecord, Statistics, view,
};

use crate::{form::FormState, ui::keymap::AppAction};

pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Bought,
    Planned,
}

impl Tab {
    pub fn status(self) -> PurchaseStatus {
        match self {
            Self::Bought => PurchaseStatus::Bought,
            Self::Planned => PurchaseStatus::Planned,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Bought => Self::Planned,
            Self::Planned => Self::Bought,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartField {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartAddState {
    pub text: String,
    pub image_path: String,
    pub focus: SmartField,
    pub pending: bool,
}

impl SmartAddState {
    fn new() -> Self {
        Self {
            text: String::new(),
            image_path: String::new(),
            focus: SmartField::Text,
            pending: false,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            SmartField::Text => &mut self.text,
            SmartField::Image => &mut self.image_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browse,
    Form(FormState),
    ConfirmDelete { id: String, name: String },
    SmartAdd(SmartAddState),
}

impl Mode {
    /// Whether printable keys are text input.
    pub fn is_typing(&self) -> bool {
        matches!(self, Mode::Form(_) | Mode::SmartAdd(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdviceState {
    pub text: Option<String>,
    pub pending: bool,
}

/// Inputs to [`AppState::update`].
#[derive(Debug)]
pub enum Msg {
    Key(AppAction),
    Tick(Instant),
    Saved(Vec<ShoppingRecord>),
    Deleted(Vec<ShoppingRecord>),
    StoreFailed(String),
    ParseFinished {
        request: u64,
        result: Result<RecordPatch, AssistantError>,
    },
    AdviceFinished {
        request: u64,
        result: Result<String, AssistantError>,
    },
}

/// Side effects requested by [`AppState::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Save {
        id: Option<String>,
        draft: RecordDraft,
    },
    Delete(String),
    SmartParse {
        request: u64,
        text: String,
        image_path: Option<String>,
    },
    RequestAdvice {
        request: u64,
    },
}

#[derive(Debug)]
pub struct AppState {
    pub records: Vec<ShoppingRecord>,
    pub stats: Statistics,
    pub tab: Tab,
    pub selected: usize,
    pub show_stats: bool,
    pub mode: Mode,
    pub advice: AdviceState,
    pub toasts: VecDeque<Toast>,
    pub today: NaiveDate,
    pub assistant_ready: bool,
    pub should_quit: bool,
    now: Instant,
    next_request: u64,
    parse_request: Option<u64>,
    advice_request: Option<u64>,
}

impl AppState {
    pub fn new(
        records: Vec<ShoppingRecord>,
        today: NaiveDate,
        assistant_ready: bool,
        now: Instant,
    ) -> Self {
        Self {
            stats: Statistics::compute(&records),
            records,
            tab: Tab::Bought,
            selected: 0,
            show_stats: false,
            mode: Mode::Browse,
            advice: AdviceState::default(),
            toasts: VecDeque::new(),
            today,
            assistant_ready,
            should_quit: false,
            now,
            next_request: 0,
            parse_request: None,
            advice_request: None,
        }
    }

    /// Records of the active tab, in display order.
    pub fn visible(&self) -> Vec<&ShoppingRecord> {
        view::by_status(&self.records, self.tab.status())
    }

    pub fn selected_record(&self) -> Option<&ShoppingRecord> {
        self.visible().get(self.selected).copied()
    }

    pub fn counts(&self) -> (usize, usize) {
        view::status_counts(&self.records)
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::Key(action) => return self.on_key(action),
            Msg::Tick(now) => {
                self.now = now;
                self.toasts.retain(|toast| toast.expires_at > now);
            }
            Msg::Saved(records) => {
                let created = matches!(&self.mode, Mode::Form(form) if form.is_new());
                self.set_records(records);
                self.mode = Mode::Browse;
                self.toast(
                    if created { "已添加" } else { "已更新" },
                    ToastLevel::Success,
                );
            }
            Msg::Deleted(records) => {
                self.set_records(records);
                self.mode = Mode::Browse;
                self.toast("已删除", ToastLevel::Success);
            }
            Msg::StoreFailed(message) => {
                tracing::error!("store write failed: {message}");
                if let Mode::Form(form) = &mut self.mode {
                    form.error = Some(message.clone());
                }
                self.toast(format!("保存失败: {message}"), ToastLevel::Error);
            }
            Msg::ParseFinished { request, result } => self.on_parsed(request, result),
            Msg::AdviceFinished { request, result } => self.on_advice(request, result),
        }
        Vec::new()
    }

    fn on_key(&mut self, action: AppAction) -> Vec<Command> {
        if action == AppAction::Quit {
            self.should_quit = true;
            return Vec::new();
        }
        match &self.mode {
            Mode::Browse => self.on_browse_key(action),
            Mode::Form(_) => self.on_form_key(action),
            Mode::ConfirmDelete { .. } => self.on_confirm_key(action),
            Mode::SmartAdd(_) => self.on_smart_add_key(action),
        }
    }

    fn on_browse_key(&mut self, action: AppAction) -> Vec<Command> {
        match action {
            AppAction::NextField | AppAction::Left | AppAction::Right => {
                self.tab = self.tab.toggled();
                self.selected = 0;
            }
            AppAction::Up | AppAction::Input('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppAction::Down | AppAction::Input('j') => {
                let len = self.visible().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
            }
            AppAction::Input('b') => {
                self.tab = Tab::Bought;
                self.selected = 0;
            }
            AppAction::Input('p') => {
                self.tab = Tab::Planned;
                self.selected = 0;
            }
            AppAction::Input('s') => self.show_stats = !self.show_stats,
            AppAction::Input('n' | 'a') => {
                let mut draft = RecordDraft::new(self.today);
                draft.status = self.tab.status();
                self.mode = Mode::Form(FormState::new(draft, None));
            }
            AppAction::Submit | AppAction::Input('e') => {
                if let Some(record) = self.selected_record() {
                    let form = FormState::new(record.to_draft(), Some(record.id.clone()));
                    self.mode = Mode::Form(form);
                }
            }
            AppAction::Input('d') => {
                if let Some(record) = self.selected_record() {
                    self.mode = Mode::ConfirmDelete {
                        id: record.id.clone(),
                        name: record.name.clone(),
                    };
                }
            }
            AppAction::Input('i') => {
                if self.assistant_ready {
                    self.mode = Mode::SmartAdd(SmartAddState::new());
                } else {
                    self.toast(notice(&AssistantError::NotConfigured(String::new())), ToastLevel::Error);
                }
            }
            AppAction::Input('g') => return self.ask_advice(),
            AppAction::Cancel | AppAction::Input('x') => self.advice.text = None,
            _ => {}
        }
        Vec::new()
    }

    fn ask_advice(&mut self) -> Vec<Command> {
        if self.advice.pending {
            return Vec::new();
        }
        if self.records.is_empty() {
            self.toast(notice(&AssistantError::NothingToSummarize), ToastLevel::Info);
            return Vec::new();
        }
        if !self.assistant_ready {
            self.toast(notice(&AssistantError::NotConfigured(String::new())), ToastLevel::Error);
            return Vec::new();
        }
        let request = self.issue_request();
        self.advice_request = Some(request);
        self.advice.pending = true;
        vec![Command::RequestAdvice { request }]
    }

    fn on_form_key(&mut self, action: AppAction) -> Vec<Command> {
        let Mode::Form(form) = &mut self.mode else {
            return Vec::new();
        };
        match action {
            AppAction::Cancel => self.mode = Mode::Browse,
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left => form.cycle(false),
            AppAction::Right => form.cycle(true),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit => match form.to_draft() {
                Ok(draft) => {
                    return vec![Command::Save {
                        id: form.editing.clone(),
                        draft,
                    }];
                }
                Err(message) => form.error = Some(message),
            },
            _ => {}
        }
        Vec::new()
    }

    fn on_confirm_key(&mut self, action: AppAction) -> Vec<Command> {
        let Mode::ConfirmDelete { id, .. } = &self.mode else {
            return Vec::new();
        };
        let id = id.clone();
        self.mode = Mode::Browse;
        match action {
            AppAction::Input('y' | 'Y') => vec![Command::Delete(id)],
            _ => Vec::new(),
        }
    }

    fn on_smart_add_key(&mut self, action: AppAction) -> Vec<Command> {
        let Mode::SmartAdd(smart) = &mut self.mode else {
            return Vec::new();
        };
        match action {
            AppAction::Cancel => {
                // A late answer for this dialog is dropped.
                self.parse_request = None;
                self.mode = Mode::Browse;
            }
            _ if smart.pending => {}
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                smart.focus = match smart.focus {
                    SmartField::Text => SmartField::Image,
                    SmartField::Image => SmartField::Text,
                };
            }
            AppAction::Backspace => {
                smart.buffer_mut().pop();
            }
            AppAction::Input(ch) => smart.buffer_mut().push(ch),
            AppAction::Submit => {
                let text = smart.text.trim().to_string();
                let image_path = Some(smart.image_path.trim().to_string())
                    .filter(|path| !path.is_empty());
                if text.is_empty() && image_path.is_none() {
                    self.toast(notice(&AssistantError::EmptyInput), ToastLevel::Info);
                    return Vec::new();
                }
                smart.pending = true;
                let request = self.issue_request();
                self.parse_request = Some(request);
                return vec![Command::SmartParse {
                    request,
                    text,
                    image_path,
                }];
            }
            _ => {}
        }
        Vec::new()
    }

    fn on_parsed(&mut self, request: u64, result: Result<RecordPatch, AssistantError>) {
        if self.parse_request != Some(request) {
            tracing::debug!(request, "ignoring stale parse result");
            return;
        }
        self.parse_request = None;
        match result {
            Ok(patch) => {
                let draft = RecordDraft::from_patch(self.today, patch);
                self.mode = Mode::Form(FormState::new(draft, None));
                self.toast("AI 已识别，请检查后保存", ToastLevel::Success);
            }
            Err(err) => {
                if let Mode::SmartAdd(smart) = &mut self.mode {
                    smart.pending = false;
                }
                tracing::warn!(error = %err, "smart add failed");
                self.toast(notice(&err), ToastLevel::Error);
            }
        }
    }

    fn on_advice(&mut self, request: u64, result: Result<String, AssistantError>) {
        if self.advice_request != Some(request) {
            return;
        }
        self.advice_request = None;
        self.advice.pending = false;
        match result {
            Ok(text) => self.advice.text = Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "advice failed");
                self.toast(format!("获取失败: {}", notice(&err)), ToastLevel::Error);
            }
        }
    }

    fn issue_request(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    fn set_records(&mut self, records: Vec<ShoppingRecord>) {
        self.stats = Statistics::compute(&records);
        self.records = records;
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toasts.push_back(Toast {
            message: message.into(),
            level,
            expires_at: self.now + TOAST_TTL,
        });
    }
}

/// Short notice shown for an assistant failure.
fn notice(err: &AssistantError) -> &'static str {
    match err {
        AssistantError::NotConfigured(_) => "未配置 AI 助手",
        AssistantError::Unavailable(_) => "服务暂时不可用",
        AssistantError::EmptyResponse
        | AssistantError::Malformed(_)
        | AssistantError::Unrecognized => "未能识别内容",
        AssistantError::InvalidImage(_) => "请上传图片文件 (最大 4 MB)",
        AssistantError::EmptyInput => "请输入描述或图片路径",
        AssistantError::NothingToSummarize => "暂无可分析的记录",
    }
}
