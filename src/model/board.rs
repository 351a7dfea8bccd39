use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::collection::{Identified, OrderedCollection};

/// A single card. Identity is `id`; the payload never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub text: String,
}

impl Item {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A column owns its items exclusively. Items are shared by `Arc` so that a
/// column rebuilt by a commit still points at the same payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Arc<Item>>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<Item>) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    /// Same column, different item sequence.
    pub fn with_items(&self, items: Vec<Arc<Item>>) -> Self {
        Column {
            id: self.id.clone(),
            title: self.title.clone(),
            items,
        }
    }
}

impl Identified for Column {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Top-level state: the columns keyed by id plus their display order.
pub type Board = OrderedCollection<Column>;

impl OrderedCollection<Column> {
    /// Sum of item counts over every column.
    pub fn total_items(&self) -> usize {
        self.entries().values().map(|c| c.items.len()).sum()
    }

    /// Item count of the column at a display position.
    pub fn item_count_at(&self, index: usize) -> usize {
        self.at(index).map_or(0, |c| c.items.len())
    }

    /// Serializable form, in the `{ columns, columnOrder }` shape.
    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.entries().clone(),
            column_order: self.order().to_vec(),
        }
    }
}

/// Plain-data mirror of a [`Board`], used for JSON seed files and CLI output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: IndexMap<String, Arc<Column>>,
    #[serde(rename = "columnOrder")]
    pub column_order: Vec<String>,
}

impl BoardSnapshot {
    /// Convert into a board. Nothing is validated here.
    pub fn into_board(self) -> Board {
        Board::from_parts(self.column_order, self.columns)
    }
}
