//! The field-type palette and the drop events it produces.
//!
//! Rendering and gesture tracking belong to the host UI. By the time a drop
//! reaches the engine it has been reduced to a [`DropEvent`]: either a reorder
//! inside the canvas, or a palette token landing at a canvas position.

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// The ordered list of field-type tokens offered for dragging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    field_types: Vec<FieldType>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            field_types: FieldType::ALL.to_vec(),
        }
    }
}

impl Palette {
    /// Creates a palette offering the given types, in order.
    pub fn new(field_types: Vec<FieldType>) -> Self {
        Self { field_types }
    }

    /// Returns the token at `index`.
    pub fn get(&self, index: usize) -> Option<FieldType> {
        self.field_types.get(index).copied()
    }

    /// Returns the position of `field_type` in the palette.
    pub fn position(&self, field_type: FieldType) -> Option<usize> {
        self.field_types.iter().position(|t| *t == field_type)
    }

    /// Returns the offered types.
    pub fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }
}

/// A completed drag-and-drop gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropEvent {
    /// A field was dragged to another position within the canvas.
    Reorder {
        /// The field's position before the drag.
        from: usize,
        /// The field's position after the drop.
        to: usize,
    },
    /// A palette token was dropped onto the canvas.
    FromPalette {
        /// The position of the token in the palette.
        palette_index: usize,
        /// The canvas position the new field is inserted at.
        to: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let p = Palette::default();
        assert_eq!(p.field_types().len(), 6);
        assert_eq!(p.get(0), Some(FieldType::Text));
        assert_eq!(p.get(5), Some(FieldType::Radio));
        assert_eq!(p.get(6), None);
        assert_eq!(p.position(FieldType::Checkbox), Some(3));
    }

    #[test]
    fn test_custom_palette() {
        let p = Palette::new(vec![FieldType::Date]);
        assert_eq!(p.get(0), Some(FieldType::Date));
        assert_eq!(p.position(FieldType::Text), None);
    }

    #[test]
    fn test_drop_event_serde() {
        let e: DropEvent =
            serde_json::from_str(r#"{"kind":"from_palette","palette_index":2,"to":0}"#).unwrap();
        assert_eq!(e, DropEvent::FromPalette { palette_index: 2, to: 0 });
        let json = serde_json::to_value(DropEvent::Reorder { from: 1, to: 0 }).unwrap();
        assert_eq!(json["kind"], "reorder");
    }
}
