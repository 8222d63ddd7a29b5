//! Domain entities for the Catalog domain
//!
//! Projects are the catalogued titles. Genres attach to projects
//! many-to-many, links and the highlight belong to a single project, and
//! FAQs stand alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use showcase_common::Sluggable;

/// Broadcast season of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_season", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Fall => write!(f, "fall"),
        }
    }
}

/// Release format of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tv,
    Movie,
    Ova,
    Ona,
    Special,
    Music,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Tv => write!(f, "tv"),
            Category::Movie => write!(f, "movie"),
            Category::Ova => write!(f, "ova"),
            Category::Ona => write!(f, "ona"),
            Category::Special => write!(f, "special"),
            Category::Music => write!(f, "music"),
        }
    }
}

/// Editable project fields, already validated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFields {
    pub title: String,
    pub alternative_title: Option<String>,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub year: Option<i32>,
    pub season: Option<Season>,
    pub category: Option<Category>,
    pub miniature: Option<String>,
    pub cover: Option<String>,
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub alternative_title: Option<String>,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub year: Option<i32>,
    pub season: Option<Season>,
    pub category: Option<Category>,
    pub miniature: Option<String>,
    pub cover: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project. The slug starts as the base slug of the title;
    /// callers make it unique before inserting.
    pub fn new(fields: ProjectFields) -> Self {
        let now = Utc::now();
        let mut project = Project {
            id: Uuid::new_v4(),
            title: String::new(),
            slug: String::new(),
            alternative_title: None,
            synopsis: None,
            episodes: None,
            year: None,
            season: None,
            category: None,
            miniature: None,
            cover: None,
            created_at: now,
            updated_at: now,
        };
        project.apply(fields);
        project.slug = project.base_slug();
        project.updated_at = now;
        project
    }

    /// Replace every editable field. Returns whether the title changed,
    /// in which case the slug has to be regenerated.
    pub fn apply(&mut self, fields: ProjectFields) -> bool {
        let title_changed = self.title != fields.title;

        self.title = fields.title;
        self.alternative_title = fields.alternative_title;
        self.synopsis = fields.synopsis;
        self.episodes = fields.episodes;
        self.year = fields.year;
        self.season = fields.season;
        self.category = fields.category;
        self.miniature = fields.miniature;
        self.cover = fields.cover;
        self.updated_at = Utc::now();

        title_changed
    }
}

impl Sluggable for Project {
    fn slug_source(&self) -> &str {
        &self.title
    }
}

/// Genre entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Genre {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Genre {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }
}

/// Highlight entity: a featured project (at most one per project)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Highlight {
    pub id: Uuid,
    pub project_id: Uuid,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Highlight {
    pub fn new(project_id: Uuid, description: Option<String>) -> Self {
        let now = Utc::now();
        Highlight {
            id: Uuid::new_v4(),
            project_id,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, project_id: Uuid, description: Option<String>) {
        self.project_id = project_id;
        self.description = description;
        self.updated_at = Utc::now();
    }
}

/// Highlight row joined with its project title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HighlightListItem {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// External link attached to a project (streaming page, official site, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    pub fn new(project_id: Uuid, name: String, url: String) -> Self {
        let now = Utc::now();
        Link {
            id: Uuid::new_v4(),
            project_id,
            name,
            url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, project_id: Uuid, name: String, url: String) {
        self.project_id = project_id;
        self.name = name;
        self.url = url;
        self.updated_at = Utc::now();
    }
}

/// Frequently asked question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(question: String, answer: String) -> Self {
        let now = Utc::now();
        Faq {
            id: Uuid::new_v4(),
            question,
            answer,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, question: String, answer: String) {
        self.question = question;
        self.answer = answer;
        self.updated_at = Utc::now();
    }
}
