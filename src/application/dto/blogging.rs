use uuid::Uuid;

use crate::application::dto::pagination::SortKey;
use crate::domain::blogging::comment::Comment;
use crate::domain::blogging::post::Post;
use crate::domain::blogging::reaction::ReactionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogSortBy {
    #[default]
    CreatedAt,
    Name,
    Description,
    WebsiteUrl,
}

impl SortKey for BlogSortBy {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(Self::CreatedAt),
            "name" => Some(Self::Name),
            "description" => Some(Self::Description),
            "websiteUrl" => Some(Self::WebsiteUrl),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Name => r#"name COLLATE "C""#,
            Self::Description => r#"description COLLATE "C""#,
            Self::WebsiteUrl => r#"website_url COLLATE "C""#,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSortBy {
    #[default]
    CreatedAt,
    Title,
    ShortDescription,
    Content,
    BlogId,
    BlogName,
}

impl SortKey for PostSortBy {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "shortDescription" => Some(Self::ShortDescription),
            "content" => Some(Self::Content),
            "blogId" => Some(Self::BlogId),
            "blogName" => Some(Self::BlogName),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Title => r#"title COLLATE "C""#,
            Self::ShortDescription => r#"short_description COLLATE "C""#,
            Self::Content => r#"content COLLATE "C""#,
            Self::BlogId => "blog_id",
            Self::BlogName => r#"blog_name COLLATE "C""#,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSortBy {
    #[default]
    CreatedAt,
    Content,
}

impl SortKey for CommentSortBy {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "createdAt" => Some(Self::CreatedAt),
            "content" => Some(Self::Content),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Content => r#"content COLLATE "C""#,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    pub name_term: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BlogInput {
    pub name: String,
    pub description: String,
    pub website_url: String,
}

#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: Uuid,
}

/// A post together with the viewer's own reaction to it.
#[derive(Debug, Clone)]
pub struct PostDto {
    pub post: Post,
    pub my_status: ReactionStatus,
}

#[derive(Debug, Clone)]
pub struct CommentDto {
    pub comment: Comment,
    pub my_status: ReactionStatus,
}
