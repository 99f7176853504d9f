#![forbid(unsafe_code)]

//! The order being built and the names of its validated fields.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Pizza size. The closed set accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// All sizes in display order.
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    /// Wire code ("S", "M", "L").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// Parse a wire code, ignoring surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|s| s.code() == value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Options offered by the size select as `(value, label)`, placeholder first.
pub const SIZE_CHOICES: [(&str, &str); 4] = [
    ("", "----Choose Size----"),
    ("S", "Small"),
    ("M", "Medium"),
    ("L", "Large"),
];

// ---------------------------------------------------------------------------
// OrderDraft
// ---------------------------------------------------------------------------

/// The in-progress, not-yet-submitted form values.
///
/// Serialises to the payload the order endpoint expects:
/// `{ "fullName": "...", "size": "...", "toppings": ["1", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub full_name: String,
    pub size: String,
    pub toppings: Vec<String>,
}

impl OrderDraft {
    /// Whether the topping identifier is already selected.
    #[must_use]
    pub fn has_topping(&self, id: &str) -> bool {
        self.toppings.iter().any(|t| t == id)
    }

    /// Append a topping unless it is already present.
    #[must_use]
    pub fn with_topping(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !self.has_topping(&id) {
            self.toppings.push(id);
        }
        self
    }

    /// Drop a topping if present.
    #[must_use]
    pub fn without_topping(mut self, id: &str) -> Self {
        self.toppings.retain(|t| t != id);
        self
    }

    /// Current value of a validated field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Size => &self.size,
        }
    }

    /// Replace the value of a validated field.
    #[must_use]
    pub fn with_value(mut self, field: Field, value: impl Into<String>) -> Self {
        match field {
            Field::FullName => self.full_name = value.into(),
            Field::Size => self.size = value.into(),
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A field that carries validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Size,
}

impl Field {
    /// Both validated fields, in form order.
    pub const ALL: [Field; 2] = [Field::FullName, Field::Size];

    /// Name used on the wire and in the rendered form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Size => "size",
        }
    }

    /// Resolve a wire name. Checkbox names and other unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Inline error message per validated field. An empty string means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    full_name: String,
    size: String,
}

impl FieldErrors {
    /// Message currently shown for `field` (empty when the field is fine).
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Size => &self.size,
        }
    }

    /// Set the message for `field`.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        *self.slot(field) = message.into();
    }

    /// Clear the message for `field`.
    pub fn clear(&mut self, field: Field) {
        self.slot(field).clear();
    }

    /// True when no field has a message.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.full_name.is_empty() && self.size.is_empty()
    }

    /// Fields that currently carry a message.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(|f| (f, self.get(f)))
            .filter(|(_, msg)| !msg.is_empty())
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Size => &mut self.size,
        }
    }
}
