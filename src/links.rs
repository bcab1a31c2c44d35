//! Short links: slug to URL lookups and redirect resolution
//!
//! The store is a plain key-value collaborator. Slugs are not required to be
//! unique; a lookup returns the first match.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Longest slug accepted
pub const MAX_SLUG_LEN: usize = 32;
/// Status code of a successful redirect
pub const REDIRECT_STATUS: u16 = 302;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Expected {0} not found")]
    MissingField(&'static str),
    #[error("Slug is {0} characters, limit is 32")]
    SlugTooLong(usize),
    #[error("Failed to access link file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse link file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub slug: String,
    pub long_link: String,
}

impl ShortLink {
    /// Trimmed, validated pair
    pub fn new(slug: &str, long_link: &str) -> Result<Self, LinkError> {
        let slug = slug.trim();
        let long_link = long_link.trim();
        if slug.is_empty() {
            return Err(LinkError::MissingField("slug"));
        }
        if long_link.is_empty() {
            return Err(LinkError::MissingField("longLink"));
        }
        let len = slug.chars().count();
        if len > MAX_SLUG_LEN {
            return Err(LinkError::SlugTooLong(len));
        }
        Ok(Self {
            slug: slug.to_string(),
            long_link: long_link.to_string(),
        })
    }
}

pub trait LinkStore {
    fn create(&mut self, slug: &str, long_link: &str) -> Result<(), LinkError>;
    fn lookup(&self, slug: &str) -> Result<Option<String>, LinkError>;
    fn list(&self) -> Result<Vec<ShortLink>, LinkError>;
}

/// In-process store
#[derive(Default, Debug)]
pub struct MemoryLinkStore {
    links: Vec<ShortLink>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkStore for MemoryLinkStore {
    fn create(&mut self, slug: &str, long_link: &str) -> Result<(), LinkError> {
        self.links.push(ShortLink::new(slug, long_link)?);
        Ok(())
    }

    fn lookup(&self, slug: &str) -> Result<Option<String>, LinkError> {
        Ok(first_match(&self.links, slug))
    }

    fn list(&self) -> Result<Vec<ShortLink>, LinkError> {
        Ok(self.links.clone())
    }
}

fn first_match(links: &[ShortLink], slug: &str) -> Option<String> {
    links
        .iter()
        .find(|l| l.slug == slug)
        .map(|l| l.long_link.clone())
}

/// On-disk document layout
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkFile {
    #[serde(default)]
    short_links: Vec<ShortLink>,
}

/// Store backed by one JSON file, read on every call and rewritten on create
#[derive(Debug, Clone)]
pub struct JsonLinkStore {
    path: PathBuf,
}

impl JsonLinkStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<LinkFile, LinkError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(LinkFile::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LinkFile::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, file: &LinkFile) -> Result<(), LinkError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(file)?)?;
        Ok(())
    }
}

impl LinkStore for JsonLinkStore {
    fn create(&mut self, slug: &str, long_link: &str) -> Result<(), LinkError> {
        let link = ShortLink::new(slug, long_link)?;
        let mut file = self.load()?;
        info!(slug = %link.slug, path = %self.path.display(), "short link created");
        file.short_links.push(link);
        self.save(&file)
    }

    fn lookup(&self, slug: &str) -> Result<Option<String>, LinkError> {
        Ok(first_match(&self.load()?.short_links, slug))
    }

    fn list(&self) -> Result<Vec<ShortLink>, LinkError> {
        Ok(self.load()?.short_links)
    }
}

/// What the redirect edge does with an inbound path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// Send a 302 to this URL
    Found(String),
    /// Unknown slug, let the request through
    FallThrough,
}

/// Last non-empty path segment, ignoring any query string
pub fn trailing_slug(path: &str) -> Option<&str> {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
    path.split('/').filter(|s| !s.is_empty()).last()
}

pub fn resolve<S: LinkStore + ?Sized>(store: &S, path: &str) -> Result<Redirect, LinkError> {
    let Some(slug) = trailing_slug(path) else {
        return Ok(Redirect::FallThrough);
    };
    let redirect = match store.lookup(slug)? {
        Some(url) => Redirect::Found(url),
        None => Redirect::FallThrough,
    };
    debug!(path, slug, ?redirect, "resolved short link");
    Ok(redirect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        let mut store = MemoryLinkStore::new();
        assert!(matches!(
            store.create("  ", "https://example.com"),
            Err(LinkError::MissingField("slug"))
        ));
        assert!(matches!(
            store.create("abc", ""),
            Err(LinkError::MissingField("longLink"))
        ));
        assert!(store.list().map(|l| l.is_empty()).unwrap_or(false));
    }

    #[test]
    fn long_slugs_are_rejected() {
        let slug = "x".repeat(MAX_SLUG_LEN + 1);
        assert!(matches!(
            ShortLink::new(&slug, "https://example.com"),
            Err(LinkError::SlugTooLong(33))
        ));
        assert!(ShortLink::new(&slug[..MAX_SLUG_LEN], "https://example.com").is_ok());
    }

    #[test]
    fn first_match_wins() -> Result<(), LinkError> {
        let mut store = MemoryLinkStore::new();
        store.create("gh", "https://github.com")?;
        store.create("gh", "https://gitlab.com")?;
        assert_eq!(store.lookup("gh")?, Some("https://github.com".to_string()));
        assert_eq!(store.lookup("nope")?, None);
        Ok(())
    }

    #[test]
    fn trailing_slug_extraction() {
        assert_eq!(trailing_slug("/ls/abc"), Some("abc"));
        assert_eq!(trailing_slug("/ls/abc/"), Some("abc"));
        assert_eq!(trailing_slug("/ls/abc?utm=1"), Some("abc"));
        assert_eq!(trailing_slug("/"), None);
        assert_eq!(trailing_slug(""), None);
    }

    #[test]
    fn resolve_redirects_or_falls_through() -> Result<(), LinkError> {
        let mut store = MemoryLinkStore::new();
        store.create("cv", "https://example.com/resume.pdf")?;
        assert_eq!(
            resolve(&store, "/ls/cv")?,
            Redirect::Found("https://example.com/resume.pdf".into())
        );
        assert_eq!(resolve(&store, "/ls/missing")?, Redirect::FallThrough);
        assert_eq!(resolve(&store, "/")?, Redirect::FallThrough);
        Ok(())
    }

    #[test]
    fn json_field_names_match_document() -> Result<(), LinkError> {
        let link = ShortLink::new("a", "https://a.example")?;
        let text = serde_json::to_string(&link)?;
        assert_eq!(text, r#"{"slug":"a","longLink":"https://a.example"}"#);
        Ok(())
    }
}
