//! Text inputs that sit next to each cause's slider.
//!
//! Every cause has a buffer holding the text shown in its numeric input. An
//! unfocused buffer mirrors the percentage map and is refreshed after every
//! edit; a focused buffer holds whatever the user is typing and is left alone
//! until it is released on blur.

use crwd_calculator::format_percentage;
use crwd_types::{CauseId, PercentageMap};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Unfocused,
    Focused,
}

/// Keys the numeric inputs react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
struct InputField {
    text: String,
    state: FocusState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBuffer {
    fields: BTreeMap<CauseId, InputField>,
}

impl InputBuffer {
    /// Unfocused buffers mirroring `percentages`.
    pub fn mirror(percentages: &PercentageMap) -> Self {
        let fields = percentages
            .iter()
            .map(|(id, value)| {
                (id, InputField { text: format_percentage(value), state: FocusState::Unfocused })
            })
            .collect();
        Self { fields }
    }

    pub fn text(&self, id: CauseId) -> Option<&str> {
        self.fields.get(&id).map(|field| field.text.as_str())
    }

    pub fn state(&self, id: CauseId) -> Option<FocusState> {
        self.fields.get(&id).map(|field| field.state)
    }

    /// The cause whose input currently has focus, if any.
    pub fn focused(&self) -> Option<CauseId> {
        self.fields.iter().find(|(_, field)| field.state == FocusState::Focused).map(|(id, _)| *id)
    }

    /// Unfocused -> Focused. Returns `false` for an unknown cause.
    pub fn focus(&mut self, id: CauseId) -> bool {
        match self.fields.get_mut(&id) {
            Some(field) => {
                field.state = FocusState::Focused;
                true
            }
            None => false,
        }
    }

    /// Replaces the raw text of a focused input. Returns `false` when the
    /// input is unknown or not focused.
    pub fn set_text(&mut self, id: CauseId, text: &str) -> bool {
        match self.fields.get_mut(&id) {
            Some(field) if field.state == FocusState::Focused => {
                field.text = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Focused -> Unfocused, handing back the typed text. `None` when the
    /// input was not focused.
    pub fn release(&mut self, id: CauseId) -> Option<String> {
        let field = self.fields.get_mut(&id)?;
        if field.state != FocusState::Focused {
            return None;
        }
        field.state = FocusState::Unfocused;
        Some(field.text.clone())
    }

    /// Overwrites one input with a formatted value, whatever its focus.
    pub fn write(&mut self, id: CauseId, value: f64) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.text = format_percentage(value);
        }
    }

    /// Refreshes every unfocused input from `percentages`.
    pub fn sync(&mut self, percentages: &PercentageMap) {
        for (id, value) in percentages.iter() {
            if let Some(field) = self.fields.get_mut(&id) {
                if field.state == FocusState::Unfocused {
                    field.text = format_percentage(value);
                }
            }
        }
    }

    /// Rewrites every input from `percentages`, focused ones included.
    pub fn rewrite_all(&mut self, percentages: &PercentageMap) {
        for (id, value) in percentages.iter() {
            self.write(id, value);
        }
    }

    pub fn unfocus_all(&mut self) {
        for field in self.fields.values_mut() {
            field.state = FocusState::Unfocused;
        }
    }
}

/// Reads the leading decimal number of `text`, ignoring surrounding
/// whitespace and anything after the number (`"12.5%"` reads as 12.5).
/// Text without a leading number, or a non-finite result, reads as 0.
pub fn parse_percentage(text: &str) -> f64 {
    let trimmed = text.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (index, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }

    if !seen_digit {
        return 0.0;
    }

    trimmed[..end].parse::<f64>().ok().filter(|value| value.is_finite()).unwrap_or(0.0)
}
