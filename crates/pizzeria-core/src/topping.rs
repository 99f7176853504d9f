#![forbid(unsafe_code)]

//! The fixed topping catalog.

/// A selectable topping: a stable identifier plus its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToppingOption {
    /// Identifier sent to the server ("1".."5").
    pub id: &'static str,
    /// Label shown next to the checkbox.
    pub label: &'static str,
}

impl ToppingOption {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

/// Every topping the form offers, in display order.
pub const TOPPINGS: [ToppingOption; 5] = [
    ToppingOption::new("1", "Pepperoni"),
    ToppingOption::new("2", "Green Peppers"),
    ToppingOption::new("3", "Pineapple"),
    ToppingOption::new("4", "Mushrooms"),
    ToppingOption::new("5", "Ham"),
];

/// Look up a topping by identifier.
#[must_use]
pub fn topping_by_id(id: &str) -> Option<&'static ToppingOption> {
    TOPPINGS.iter().find(|t| t.id == id)
}

/// Whether `id` names a topping in the catalog.
#[must_use]
pub fn is_known_topping(id: &str) -> bool {
    topping_by_id(id).is_some()
}
