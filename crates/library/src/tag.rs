//! Tag CRUD and the source/episode association operations spec.md §3's
//! many-to-many Tag relation needs to be usable from outside the Store.

use episodeer_core::{EpisodeId, Result, SourceId, Tag, TagId};
use episodeer_store::TagRepo;

use crate::LibraryService;

impl LibraryService {
    /// Create the tag if no tag with this name exists yet, otherwise
    /// return the existing one — tag names are logically unique.
    pub async fn get_or_create_tag(&self, name: String) -> Result<Tag> {
        if let Some(existing) = TagRepo::find_by_name(&self.pool, &name).await? {
            return Ok(existing);
        }
        let tag = Tag {
            id: TagId::new(),
            name,
        };
        TagRepo::insert(&self.pool, &tag).await?;
        Ok(tag)
    }

    pub async fn delete_tag(&self, tag_id: TagId) -> Result<()> {
        TagRepo::delete(&self.pool, tag_id).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        TagRepo::list_all(&self.pool).await
    }

    pub async fn tag_source(&self, source_id: SourceId, tag_id: TagId) -> Result<()> {
        TagRepo::tag_source(&self.pool, source_id, tag_id).await
    }

    pub async fn untag_source(&self, source_id: SourceId, tag_id: TagId) -> Result<()> {
        TagRepo::untag_source(&self.pool, source_id, tag_id).await
    }

    pub async fn tags_for_source(&self, source_id: SourceId) -> Result<Vec<Tag>> {
        TagRepo::tags_for_source(&self.pool, source_id).await
    }

    pub async fn tag_episode(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<()> {
        TagRepo::tag_episode(&self.pool, episode_id, tag_id).await
    }

    pub async fn untag_episode(&self, episode_id: EpisodeId, tag_id: TagId) -> Result<()> {
        TagRepo::untag_episode(&self.pool, episode_id, tag_id).await
    }

    pub async fn tags_for_episode(&self, episode_id: EpisodeId) -> Result<Vec<Tag>> {
        TagRepo::tags_for_episode(&self.pool, episode_id).await
    }
}
