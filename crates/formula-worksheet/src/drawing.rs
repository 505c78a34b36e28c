use serde::{Deserialize, Serialize};

use crate::CellRef;

/// Handle to a drawing part owned by a [`crate::Workbook`].
///
/// The wrapped value is the drawing's position in the workbook's drawing list, so the
/// drawing's part name is `xl/drawings/drawing{index + 1}.xml`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(pub(crate) usize);

impl DrawingId {
    /// 0-based position in the workbook's drawing list.
    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based part number used in `xl/drawings/drawingN.xml`.
    pub fn part_number(self) -> usize {
        self.0 + 1
    }
}

/// Two-cell anchor: the object spans from the top-left of `from` to the top-left of `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub from: CellRef,
    pub to: CellRef,
}

impl Anchor {
    /// Build an anchor, swapping corners when `to` lies above or left of `from`.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            from: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            to: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }
}

/// An object (typically a chart frame) placed on a drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingObject {
    /// Drawing-local object id (`xdr:cNvPr/@id`), starting at 1.
    pub id: u32,
    pub name: String,
    pub anchor: Anchor,
}

/// Drawing definition: the content of one `xl/drawings/drawingN.xml` part.
///
/// A worksheet references at most one drawing, but a drawing can host many objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingPart {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    objects: Vec<DrawingObject>,
}

impl DrawingPart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new object and return its drawing-local id.
    pub fn add_object(&mut self, name: impl Into<String>, anchor: Anchor) -> u32 {
        let id = self
            .objects
            .iter()
            .map(|obj| obj.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.objects.push(DrawingObject {
            id,
            name: name.into(),
            anchor,
        });
        id
    }

    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_are_allocated_sequentially() {
        let mut drawing = DrawingPart::new();
        let anchor = Anchor::new(CellRef::new(5, 3), CellRef::new(0, 0));
        assert_eq!(anchor.from, CellRef::new(0, 0));
        assert_eq!(anchor.to, CellRef::new(5, 3));

        assert_eq!(drawing.add_object("Chart 1", anchor), 1);
        assert_eq!(drawing.add_object("Chart 2", anchor), 2);
        assert_eq!(drawing.objects()[1].name, "Chart 2");
    }
}
