use serde::{Deserialize, Serialize};
use tracing::warn;

// Field-change event sent by the form view: one named field, one raw value.
#[derive(Debug, Deserialize)]
pub struct FieldChange {
    pub name: String,
    pub value: String,
}

// Body for shoe size updates.
#[derive(Debug, Deserialize)]
pub struct ShoeSizeChange {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeEntry {
    pub id: String,
    pub size: String,
}

/// The in-progress booking form. Scalar fields keep the raw strings the view
/// sends; numeric interpretation happens in the validator at submit time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingForm {
    pub when: String, // date part, YYYY-MM-DD
    pub time: String, // time part, HH:MM
    pub people: String,
    pub lanes: String,
    pub shoes: Vec<ShoeEntry>,
    #[serde(skip)]
    next_shoe_id: u64,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `{name, value}` field-change event. Returns false for field
    /// names the form does not carry.
    pub fn apply_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "when" => self.when = value,
            "time" => self.time = value,
            "people" => self.people = value,
            "lanes" => self.lanes = value,
            other => {
                warn!("Ignoring change for unknown form field: {}", other);
                return false;
            }
        }
        true
    }

    /// Append a new shoe entry with a fresh id and an empty size. Ids are
    /// monotonic and never reused, even across add/remove cycles.
    pub fn add_shoe(&mut self) -> ShoeEntry {
        self.next_shoe_id += 1;
        let entry = ShoeEntry {
            id: format!("shoe{}", self.next_shoe_id),
            size: String::new(),
        };
        self.shoes.push(entry.clone());
        entry
    }

    /// Remove the entry matching `id`, keeping the order of the rest.
    /// Removing an unknown id is a no-op.
    pub fn remove_shoe(&mut self, id: &str) -> bool {
        let before = self.shoes.len();
        self.shoes.retain(|shoe| shoe.id != id);
        self.shoes.len() != before
    }

    /// Replace the size of the entry matching `id`. The id itself never
    /// changes. No validation here: partial values are fine while typing.
    pub fn update_size(&mut self, id: &str, size: String) -> bool {
        match self.shoes.iter_mut().find(|shoe| shoe.id == id) {
            Some(shoe) => {
                shoe.size = size;
                true
            }
            None => false,
        }
    }
}
