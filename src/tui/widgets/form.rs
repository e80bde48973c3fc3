//! Multi-field form widget with per-field input filtering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// What a field accepts from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any character.
    Text,
    /// ASCII digits only.
    Integer,
    /// ASCII digits and a single decimal point.
    Decimal,
    /// Not typed into; the owning screen sets the value (dates, pickers).
    Choice,
}

impl FieldKind {
    /// Returns `true` if `ch` may be appended to `current`.
    fn accepts(self, current: &str, ch: char) -> bool {
        match self {
            Self::Text => true,
            Self::Integer => ch.is_ascii_digit(),
            Self::Decimal => ch.is_ascii_digit() || (ch == '.' && !current.contains('.')),
            Self::Choice => false,
        }
    }
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown in the field border.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field is needed before saving; marked with `*`.
    pub required: bool,
    /// Accepted input.
    pub kind: FieldKind,
}

impl FormField {
    /// Creates an empty field.
    pub fn new(label: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
            kind,
        }
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// A multi-field form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Appends a character to the focused field if its kind accepts it.
    ///
    /// Returns `true` if the character was inserted.
    pub fn insert_char(&mut self, ch: char) -> bool {
        match self.fields.get_mut(self.focus) {
            Some(field) if field.kind.accepts(&field.value, ch) => {
                field.value.push(ch);
                true
            }
            _ => false,
        }
    }

    /// Deletes the last character from the focused field. Choice fields are left alone.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind != FieldKind::Choice
        {
            field.value.pop();
        }
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Renders a form within the given area, one bordered row per field.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect) {
    let row_height = 3_u16;
    let constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|_| Constraint::Length(row_height))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = i == form.focus;

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };

        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = Vec::new();
        if field.kind == FieldKind::Choice {
            spans.push(Span::raw("◀ "));
            spans.push(Span::raw(&field.value));
            spans.push(Span::raw(" ▶"));
        } else {
            spans.push(Span::raw(&field.value));
            if is_focused {
                spans.push(Span::styled(
                    "\u{2588}",
                    Style::default().add_modifier(Modifier::SLOW_BLINK),
                ));
            }
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + row_height.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
