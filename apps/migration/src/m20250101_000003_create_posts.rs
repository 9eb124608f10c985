use sea_orm_migration::prelude::*;

use crate::execute_all;

/// Absent category/location count as equal values (PostgreSQL 15+). The body
/// is indexed by digest so long posts stay under the B-tree row size limit.
const UNIQUE_POST_INDEX: &str = r#"
CREATE UNIQUE INDEX unique_post
    ON posts (title, md5(text), category_id, location_id, pub_date)
    NULLS NOT DISTINCT"#;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250101_000003_create_posts"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        execute_all(
            manager,
            &[
                r#"
CREATE TABLE posts (
    id UUID PRIMARY KEY,
    author_id UUID NOT NULL,
    title VARCHAR(256) NOT NULL,
    text TEXT NOT NULL,
    pub_date TIMESTAMPTZ NOT NULL,
    category_id UUID,
    location_id UUID,
    image VARCHAR,
    is_published BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT fk_post_author
        FOREIGN KEY (author_id) REFERENCES users (id) ON DELETE CASCADE,
    CONSTRAINT fk_post_category
        FOREIGN KEY (category_id) REFERENCES categories (id) ON DELETE SET NULL,
    CONSTRAINT fk_post_location
        FOREIGN KEY (location_id) REFERENCES locations (id) ON DELETE SET NULL
)"#,
                UNIQUE_POST_INDEX,
                "CREATE INDEX idx_posts_pub_date ON posts (pub_date DESC, created_at, id)",
                "CREATE INDEX idx_posts_author ON posts (author_id)",
                "CREATE INDEX idx_posts_category ON posts (category_id)",
                r#"
CREATE TABLE comments (
    id UUID PRIMARY KEY,
    post_id UUID NOT NULL,
    author_id UUID NOT NULL,
    text TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    CONSTRAINT fk_comment_post
        FOREIGN KEY (post_id) REFERENCES posts (id) ON DELETE CASCADE,
    CONSTRAINT fk_comment_author
        FOREIGN KEY (author_id) REFERENCES users (id) ON DELETE CASCADE
)"#,
                "CREATE INDEX idx_comments_post ON comments (post_id, created_at)",
            ],
        )
        .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        execute_all(manager, &["DROP TABLE comments", "DROP TABLE posts"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_post_index_hashes_body() {
        let columns = UNIQUE_POST_INDEX
            .split_once('(')
            .and_then(|(_, rest)| rest.rsplit_once(')'))
            .map(|(columns, _)| columns)
            .unwrap();
        let columns: Vec<&str> = columns.split(',').map(str::trim).collect();

        assert_eq!(
            columns,
            vec!["title", "md5(text)", "category_id", "location_id", "pub_date"]
        );
        assert!(UNIQUE_POST_INDEX.contains("NULLS NOT DISTINCT"));
    }
}
