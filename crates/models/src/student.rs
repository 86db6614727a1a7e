use serde::{Deserialize, Serialize};

/// A registered student. `email` is unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub email: String,
}
