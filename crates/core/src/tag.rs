//! Tag entity — free-form label joined to Sources and Episodes

use serde::{Deserialize, Serialize};

use crate::ids::TagId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
