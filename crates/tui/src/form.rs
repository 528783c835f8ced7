//! Record form: text buffers over a [`RecordDraft`].

use engine::{
    Category, Price, PurchaseStatus, RecordDraft, UnitCostType, UsageStatus, derive_discount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    ActualPrice,
    ListPrice,
    Category,
    Status,
    PurchaseDate,
    UsageStatus,
    UnitCostType,
    UnitCost,
    Link,
    Notes,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::Name,
        FormField::ActualPrice,
        FormField::ListPrice,
        FormField::Category,
        FormField::Status,
        FormField::PurchaseDate,
        FormField::UsageStatus,
        FormField::UnitCostType,
        FormField::UnitCost,
        FormField::Link,
        FormField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "名称 *",
            Self::ActualPrice => "实付价 *",
            Self::ListPrice => "原价",
            Self::Category => "分类",
            Self::Status => "状态",
            Self::PurchaseDate => "购买日期",
            Self::UsageStatus => "使用状态",
            Self::UnitCostType => "成本类型",
            Self::UnitCost => "单位成本",
            Self::Link => "链接",
            Self::Notes => "备注",
        }
    }

    /// Choice fields cycle through values instead of taking text.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            Self::Category | Self::Status | Self::UsageStatus | Self::UnitCostType
        )
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Id of the record being edited, `None` for a new one.
    pub editing: Option<String>,
    pub name: String,
    pub actual_price: String,
    pub list_price: String,
    pub category: Category,
    pub status: PurchaseStatus,
    pub purchase_date: String,
    pub usage_status: UsageStatus,
    pub unit_cost_type: UnitCostType,
    pub unit_cost: String,
    pub link: String,
    pub notes: String,
    discount_rate: f64,
    pub focus: FormField,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(draft: RecordDraft, editing: Option<String>) -> Self {
        Self {
            editing,
            name: draft.name,
            actual_price: draft.actual_price.map(plain).unwrap_or_default(),
            list_price: optional(draft.list_price),
            category: draft.category,
            status: draft.status,
            purchase_date: draft.purchase_date,
            usage_status: draft.usage_status,
            unit_cost_type: draft.unit_cost_type,
            unit_cost: optional(draft.unit_cost),
            link: draft.link,
            notes: draft.notes,
            discount_rate: draft.discount_rate,
            focus: FormField::Name,
            error: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }

    pub fn next_field(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ALL[(i + 1) % FormField::ALL.len()];
    }

    pub fn prev_field(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ALL[(i + FormField::ALL.len() - 1) % FormField::ALL.len()];
    }

    pub fn input(&mut self, ch: char) {
        if self.focus.is_choice() {
            if ch == ' ' {
                self.cycle(true);
            }
            return;
        }
        if let Some(buffer) = self.buffer_mut() {
            buffer.push(ch);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.pop();
        }
    }

    /// Moves a choice field to its next (or previous) value.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::Category => self.category = step(&Category::ALL, self.category, forward),
            FormField::Status => {
                self.status = step(
                    &[PurchaseStatus::Planned, PurchaseStatus::Bought],
                    self.status,
                    forward,
                );
            }
            FormField::UsageStatus => {
                self.usage_status = step(&UsageStatus::ALL, self.usage_status, forward);
            }
            FormField::UnitCostType => {
                self.unit_cost_type = step(&UnitCostType::ALL, self.unit_cost_type, forward);
            }
            _ => {}
        }
    }

    /// Text shown for `field`.
    pub fn display(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::ActualPrice => self.actual_price.clone(),
            FormField::ListPrice => self.list_price.clone(),
            FormField::Category => self.category.label().to_string(),
            FormField::Status => self.status.label().to_string(),
            FormField::PurchaseDate => self.purchase_date.clone(),
            FormField::UsageStatus => self.usage_status.label().to_string(),
            FormField::UnitCostType => self.unit_cost_type.label().to_string(),
            FormField::UnitCost => self.unit_cost.clone(),
            FormField::Link => self.link.clone(),
            FormField::Notes => self.notes.clone(),
        }
    }

    /// Discount as it would be saved, derived from the typed prices.
    pub fn live_discount(&self) -> f64 {
        let list = self.list_price.trim().parse::<Price>().unwrap_or_default();
        let actual = self.actual_price.trim().parse::<Price>().unwrap_or_default();
        derive_discount(list, actual).unwrap_or(self.discount_rate)
    }

    /// Builds and validates the draft, or explains what is wrong.
    pub fn to_draft(&self) -> Result<RecordDraft, String> {
        let mut draft = RecordDraft {
            name: self.name.trim().to_string(),
            category: self.category,
            status: self.status,
            list_price: parse_optional(&self.list_price, "原价")?,
            actual_price: match self.actual_price.trim() {
                "" => None,
                raw => Some(
                    raw.parse::<Price>()
                        .map_err(|_| format!("实付价无效: {raw}"))?,
                ),
            },
            discount_rate: self.discount_rate,
            purchase_date: self.purchase_date.trim().to_string(),
            usage_status: self.usage_status,
            unit_cost_type: self.unit_cost_type,
            unit_cost: parse_optional(&self.unit_cost, "单位成本")?,
            link: self.link.trim().to_string(),
            notes: self.notes.clone(),
        };
        draft.refresh_discount();
        if draft.name.is_empty() {
            return Err("请填写名称".to_string());
        }
        if draft.actual_price.is_none() {
            return Err("请填写实付价".to_string());
        }
        draft.validate().map_err(|err| err.to_string())?;
        Ok(draft)
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::ActualPrice => Some(&mut self.actual_price),
            FormField::ListPrice => Some(&mut self.list_price),
            FormField::PurchaseDate => Some(&mut self.purchase_date),
            FormField::UnitCost => Some(&mut self.unit_cost),
            FormField::Link => Some(&mut self.link),
            FormField::Notes => Some(&mut self.notes),
            _ => None,
        }
    }
}

fn step<T: Copy + PartialEq>(values: &[T], current: T, forward: bool) -> T {
    let len = values.len();
    let i = values.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
    values[next]
}

fn plain(price: Price) -> String {
    format!("{}.{:02}", price.cents() / 100, price.cents() % 100)
}

fn optional(price: Price) -> String {
    if price.is_zero() {
        String::new()
    } else {
        plain(price)
    }
}

fn parse_optional(raw: &str, what: &str) -> Result<Price, String> {
    match raw.trim() {
        "" => Ok(Price::ZERO),
        raw => raw.parse().map_err(|_| format!("{what}无效: {raw}")),
    }
}
