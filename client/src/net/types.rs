//! Shared wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`_id`, `authorId`, `likedBy`, ...)
//! through serde renames so the rest of the crate can use Rust naming. The
//! client never owns these records: it renders what the backend returns and
//! replaces them wholesale after a mutating call.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity provider.
///
/// Immutable for the lifetime of a sign-in; sign-in and sign-out events
/// replace it rather than mutate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Opaque, stable, provider-issued identifier.
    pub uid: String,
    /// Account email address.
    pub email: String,
    /// Avatar image URL, if the provider has one.
    #[serde(default)]
    pub display_image_url: Option<String>,
}

impl UserIdentity {
    /// Upper-case first character of the email, used for the avatar fallback.
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
    }

    /// Local part of the email address.
    pub fn short_name(&self) -> &str {
        email_local_part(&self.email)
    }
}

/// The part of an email address before `@` (the whole string if there is none).
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Which REST collection a resource belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Blog,
    Project,
}

impl ResourceKind {
    /// Path segment of the collection (`blogs`, `projects`).
    pub fn collection(self) -> &'static str {
        match self {
            Self::Blog => "blogs",
            Self::Project => "projects",
        }
    }

    /// Singular label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::Project => "Project",
        }
    }
}

/// One entry of a resource's `likedBy` set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeEntry {
    pub uid: String,
    #[serde(default)]
    pub email: String,
}

/// A comment attached to a resource, in posting order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    pub text: String,
}

/// A blog post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "authorId", alias = "ownerUid", default)]
    pub owner_uid: String,
    #[serde(rename = "authorEmail", alias = "ownerEmail", default)]
    pub owner_email: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(rename = "likedBy", default)]
    pub liked_by: Vec<LikeEntry>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A portfolio project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "techStack", default)]
    pub tech_stack: Vec<String>,
    #[serde(rename = "liveLink", default)]
    pub live_link: Option<String>,
    #[serde(rename = "githubLink", default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "ownerUid", alias = "ownerId", default)]
    pub owner_uid: String,
    #[serde(rename = "ownerEmail", default)]
    pub owner_email: String,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub likes: i64,
    #[serde(rename = "likedBy", default)]
    pub liked_by: Vec<LikeEntry>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Accessors the authorization gate and the REST client need from any
/// server-owned resource.
pub trait OwnedResource {
    const KIND: ResourceKind;

    fn id(&self) -> &str;
    fn owner_uid(&self) -> &str;
    fn liked_by(&self) -> &[LikeEntry];
    fn comments(&self) -> &[Comment];
}

impl OwnedResource for Blog {
    const KIND: ResourceKind = ResourceKind::Blog;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_uid(&self) -> &str {
        &self.owner_uid
    }
    fn liked_by(&self) -> &[LikeEntry] {
        &self.liked_by
    }
    fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

impl OwnedResource for Project {
    const KIND: ResourceKind = ResourceKind::Project;

    fn id(&self) -> &str {
        &self.id
    }
    fn owner_uid(&self) -> &str {
        &self.owner_uid
    }
    fn liked_by(&self) -> &[LikeEntry] {
        &self.liked_by
    }
    fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

/// Editable fields of a resource, sent as a multipart form on create/update.
pub trait ResourceDraft {
    const KIND: ResourceKind;

    /// Check required fields before any request is issued.
    ///
    /// # Errors
    ///
    /// Returns the user-facing message for the first missing field.
    fn validate(&self) -> Result<(), &'static str>;

    /// Text fields in submission order.
    fn form_fields(&self) -> Vec<(&'static str, String)>;
}

/// Form state for creating or editing a blog post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
}

impl BlogDraft {
    pub fn from_blog(blog: &Blog) -> Self {
        Self { title: blog.title.clone(), content: blog.content.clone() }
    }
}

impl ResourceDraft for BlogDraft {
    const KIND: ResourceKind = ResourceKind::Blog;

    fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required.");
        }
        if self.content.trim().is_empty() {
            return Err("Content is required.");
        }
        Ok(())
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.trim().to_owned()),
            ("content", self.content.trim().to_owned()),
        ]
    }
}

/// Form state for creating or editing a project.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    /// Comma-separated as typed by the user.
    pub tech_stack: String,
    pub live_link: String,
    pub github_link: String,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tech_stack: project.tech_stack.join(", "),
            live_link: project.live_link.clone().unwrap_or_default(),
            github_link: project.github_link.clone().unwrap_or_default(),
        }
    }
}

impl ResourceDraft for ProjectDraft {
    const KIND: ResourceKind = ResourceKind::Project;

    fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required.");
        }
        if self.description.trim().is_empty() {
            return Err("Description is required.");
        }
        if parse_tech_stack(&self.tech_stack).is_empty() {
            return Err("List at least one technology.");
        }
        Ok(())
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.trim().to_owned()),
            ("description", self.description.trim().to_owned()),
            ("techStack", parse_tech_stack(&self.tech_stack).join(",")),
            ("liveLink", self.live_link.trim().to_owned()),
            ("githubLink", self.github_link.trim().to_owned()),
        ]
    }
}

/// Split a comma-separated technology list, trimming entries and dropping empties.
pub fn parse_tech_stack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
