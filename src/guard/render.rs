//! Values transformed by the list-rendering guards.

/// One per-row action link in a list table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub key: String,
    pub label: String,
}

impl RowAction {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The ordered action links of one row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowActions(pub Vec<RowAction>);

impl RowActions {
    /// The host's stock actions: edit, quick edit, delete, view.
    pub fn standard() -> Self {
        Self(vec![
            RowAction::new("edit", "Edit"),
            RowAction::new("quickedit", "Quick Edit"),
            RowAction::new("delete", "Delete"),
            RowAction::new("view", "View"),
        ])
    }

    /// Actions with bare keys, labelled by their key.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self(
            keys.into_iter()
                .map(|k| {
                    let key = k.into();
                    RowAction::new(key.clone(), key)
                })
                .collect(),
        )
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|a| a.key.as_str()).collect()
    }

    /// Keep only actions whose key is in `allowed`, preserving order.
    pub(crate) fn retain_allowed(mut self, allowed: &[String]) -> Self {
        self.0.retain(|a| allowed.iter().any(|k| *k == a.key));
        self
    }
}

/// How the row selection checkbox renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionControl {
    /// An interactive checkbox.
    Checkbox,
    /// Blank, non-interactive cell.
    Suppressed,
}
