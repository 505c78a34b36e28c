//! Per-part relationship sets (`*.rels`).
//!
//! Each worksheet owns one [`Relationships`] set. Entries are only ever appended; ids follow
//! the `rIdN` convention and are allocated as one past the largest numeric id in the set.

use serde::{Deserialize, Serialize};

use crate::path::resolve_target;

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Which family of OOXML documents a relationship target is laid out for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// SpreadsheetML (`xl/...`).
    #[default]
    Spreadsheet,
}

/// Relationship kinds this crate knows how to lay out automatically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Worksheet,
    Drawing,
    Chart,
    Image,
    SharedStrings,
    Styles,
}

impl RelationshipType {
    /// Full relationship type URI written into the `Type` attribute.
    pub fn type_uri(self) -> String {
        let suffix = match self {
            RelationshipType::Worksheet => "worksheet",
            RelationshipType::Drawing => "drawing",
            RelationshipType::Chart => "chart",
            RelationshipType::Image => "image",
            RelationshipType::SharedStrings => "sharedStrings",
            RelationshipType::Styles => "styles",
        };
        format!("{REL_NS}/{suffix}")
    }

    /// Target of the `index`-th (1-based) part of this type, relative to the part that owns
    /// the relationship.
    ///
    /// Worksheets, shared strings and styles are owned by `xl/workbook.xml`; drawings by a
    /// worksheet; charts and images by a drawing.
    pub fn relative_target(self, doc: DocumentType, index: usize) -> String {
        match (doc, self) {
            (DocumentType::Spreadsheet, RelationshipType::Worksheet) => {
                format!("worksheets/sheet{index}.xml")
            }
            (DocumentType::Spreadsheet, RelationshipType::Drawing) => {
                format!("../drawings/drawing{index}.xml")
            }
            (DocumentType::Spreadsheet, RelationshipType::Chart) => {
                format!("../charts/chart{index}.xml")
            }
            (DocumentType::Spreadsheet, RelationshipType::Image) => {
                format!("../media/image{index}.png")
            }
            (DocumentType::Spreadsheet, RelationshipType::SharedStrings) => {
                "sharedStrings.xml".to_string()
            }
            (DocumentType::Spreadsheet, RelationshipType::Styles) => "styles.xml".to_string(),
        }
    }
}

/// A single `<Relationship>` entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    id: String,
    type_uri: String,
    target: String,
}

impl Relationship {
    /// Relationship id (e.g. `rId3`), unique within its set.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    /// Target as stored, relative to the owning part.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Target resolved to a package part name, given the part that owns this relationship.
    pub fn resolved_target(&self, source_part: &str) -> String {
        resolve_target(source_part, &self.target)
    }
}

/// An ordered, append-only relationship set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationships {
    relationships: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relationship whose type URI and target are derived from `rel_type` and the
    /// 1-based `part_index` of the target part.
    pub fn add_auto_relationship(
        &mut self,
        doc: DocumentType,
        part_index: usize,
        rel_type: RelationshipType,
    ) -> &Relationship {
        let target = rel_type.relative_target(doc, part_index);
        self.add_relationship(rel_type.type_uri(), target)
    }

    /// Register a relationship with an explicit type URI and target.
    pub fn add_relationship(
        &mut self,
        type_uri: impl Into<String>,
        target: impl Into<String>,
    ) -> &Relationship {
        let id = format!("rId{}", self.next_relationship_id());
        let rel = Relationship {
            id,
            type_uri: type_uri.into(),
            target: target.into(),
        };
        log::debug!(
            "registered relationship {} -> {} ({})",
            rel.id,
            rel.target,
            rel.type_uri
        );
        self.relationships.push(rel);
        &self.relationships[self.relationships.len() - 1]
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|rel| rel.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    fn next_relationship_id(&self) -> u32 {
        let mut max_id = 0u32;
        for rel in &self.relationships {
            if let Some(n) = rel
                .id
                .strip_prefix("rId")
                .and_then(|rest| rest.parse::<u32>().ok())
            {
                max_id = max_id.max(n);
            }
        }
        max_id.saturating_add(1)
    }
}

impl<'a> IntoIterator for &'a Relationships {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.relationships.iter()
    }
}
