use super::{accepts_numeric_input, format_vnd, parse_vnd};

/// State of an editable money field.
///
/// While the user types, the display text is whatever they entered and the
/// value follows it through `parse_vnd`. Leaving the field re-formats the
/// display from the value, so `1000` typed becomes `1.000` on blur.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    display: String,
    value: f64,
}

impl NumberField {
    pub fn new(value: f64) -> Self {
        Self {
            display: format_vnd(Some(value)),
            value,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Apply the text of the field after a keystroke.
    /// Returns false (and leaves the field untouched) when the filter rejects it.
    pub fn on_input(&mut self, text: &str) -> bool {
        if !accepts_numeric_input(text) {
            return false;
        }
        self.display = text.to_string();
        self.value = parse_vnd(text);
        true
    }

    pub fn on_blur(&mut self) {
        self.display = format_vnd(Some(self.value));
    }

    /// Value changed by something other than the user (e.g. a recomputed total).
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.display = format_vnd(Some(value));
    }
}

impl Default for NumberField {
    fn default() -> Self {
        Self::new(0.0)
    }
}
