//! Column descriptors for resizable tables.

use serde::{Deserialize, Serialize};

/// Identifier used for persistence lookups.
pub type ColumnId = String;

/// A single column of a resizable table.
///
/// Generic over `A`, the render/display attributes the table never looks at.
/// They are carried through reconciliation and resize untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column<A = ()> {
    /// Header text.
    pub title: String,
    /// Explicit persistence key. Falls back to `title` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<ColumnId>,
    /// Width in terminal cells. `None` or zero means the column has no
    /// width baseline and cannot be resized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// `None` means resizable.
    #[serde(default, alias = "resizeable", skip_serializing_if = "Option::is_none")]
    pub resizable: Option<bool>,
    /// Opaque attributes passed to the renderer.
    #[serde(default)]
    pub attrs: A,
}

impl<A: Default> Column<A> {
    /// Creates a column with a title and width, resizable by default.
    pub fn new(title: impl Into<String>, width: u16) -> Self {
        Self {
            title: title.into(),
            key: None,
            width: Some(width),
            resizable: None,
            attrs: A::default(),
        }
    }

    /// Creates a column without a width.
    pub fn without_width(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: None,
            width: None,
            resizable: None,
            attrs: A::default(),
        }
    }
}

impl<A> Column<A> {
    /// Sets an explicit persistence key.
    pub fn with_key(mut self, key: impl Into<ColumnId>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the resizable flag explicitly.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = Some(resizable);
        self
    }

    /// Replaces the render attributes.
    pub fn with_attrs<B>(self, attrs: B) -> Column<B> {
        Column {
            title: self.title,
            key: self.key,
            width: self.width,
            resizable: self.resizable,
            attrs,
        }
    }

    /// Returns the persistence identifier: the explicit key, or the title.
    ///
    /// Returns `None` when neither is usable.
    pub fn id(&self) -> Option<&str> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => Some(key),
            _ if !self.title.is_empty() => Some(&self.title),
            _ => None,
        }
    }

    /// Returns the width if it is a usable baseline (non-zero).
    pub fn effective_width(&self) -> Option<u16> {
        self.width.filter(|w| *w > 0)
    }

    /// Returns true unless the column explicitly opted out of resizing.
    pub fn is_resizable(&self) -> bool {
        self.resizable != Some(false)
    }

    /// Returns a copy with the given width, leaving `self` untouched.
    pub fn resized(&self, width: u16) -> Self
    where
        A: Clone,
    {
        Self {
            width: Some(width),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefers_key() {
        let col: Column = Column::new("Name", 10).with_key("name");
        assert_eq!(col.id(), Some("name"));

        let col: Column = Column::new("Name", 10);
        assert_eq!(col.id(), Some("Name"));

        let col: Column = Column::new("", 10).with_key("");
        assert_eq!(col.id(), None);
    }

    #[test]
    fn test_effective_width() {
        assert_eq!(Column::<()>::new("a", 12).effective_width(), Some(12));
        assert_eq!(Column::<()>::new("a", 0).effective_width(), None);
        assert_eq!(Column::<()>::without_width("a").effective_width(), None);
    }

    #[test]
    fn test_resizable_default() {
        assert!(Column::<()>::new("a", 1).is_resizable());
        assert!(Column::<()>::new("a", 1).with_resizable(true).is_resizable());
        assert!(!Column::<()>::new("a", 1).with_resizable(false).is_resizable());
    }

    #[test]
    fn test_deserialize_legacy_flag() {
        let json = r#"[
            {"title": "Name", "key": "name", "width": 20},
            {"title": "Age", "width": 6, "resizeable": false},
            {"title": "Notes"}
        ]"#;
        let cols: Vec<Column> = serde_json::from_str(json).unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].id(), Some("name"));
        assert_eq!(cols[1].resizable, Some(false));
        assert_eq!(cols[2].width, None);
    }

    #[test]
    fn test_resized_keeps_original() {
        let col: Column<&str> = Column::<()>::new("a", 10).with_attrs("left");
        let wider = col.resized(15);
        assert_eq!(col.width, Some(10));
        assert_eq!(wider.width, Some(15));
        assert_eq!(wider.attrs, "left");
    }
}
