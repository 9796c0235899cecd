//! Folder entity — tree-structured grouping for Sources and Episodes

use serde::{Deserialize, Serialize};

use crate::ids::FolderId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub parent_id: Option<FolderId>,
}
