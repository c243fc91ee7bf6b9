use std::collections::HashMap;

use crate::error::HostError;

use super::dates;

/// A child id together with the host's ordering field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRef {
    pub uid: String,
    pub order: i64,
}

impl ChildRef {
    pub fn new(uid: impl Into<String>, order: i64) -> Self {
        Self {
            uid: uid.into(),
            order,
        }
    }
}

/// The host's block graph.
///
/// Lookups answer `None` when the host has nothing to say; that is never an
/// error. Only the two write-side operations can fail.
pub trait TreeStore {
    fn parent(&self, uid: &str) -> Option<String>;

    /// Direct children in unspecified order. `None` means the host has no
    /// child list for `uid`, which callers read as no children.
    fn ordered_children(&self, uid: &str) -> Option<Vec<ChildRef>>;

    fn exists(&self, uid: &str) -> bool;

    /// Creates the date note titled `title` and returns its id.
    fn create_date_note(&mut self, title: &str) -> Result<String, HostError>;

    fn open_block(&mut self, uid: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Default)]
struct Entry {
    parent: Option<String>,
    children: Vec<ChildRef>,
}

/// In-memory block graph.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeStore {
    entries: HashMap<String, Entry>,
    opened: Vec<String>,
    fail_creates: bool,
    fail_opens: bool,
    leaves_as_missing: bool,
}

impl MemoryTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level page.
    pub fn add_page(&mut self, uid: impl Into<String>) -> &mut Self {
        self.entries.entry(uid.into()).or_default();
        self
    }

    /// Adds `uid` under `parent` with the given ordering value. The parent
    /// is created as a page if it is not known yet.
    pub fn add_child(
        &mut self,
        parent: impl Into<String>,
        uid: impl Into<String>,
        order: i64,
    ) -> &mut Self {
        let parent = parent.into();
        let uid = uid.into();
        self.entries
            .entry(parent.clone())
            .or_default()
            .children
            .push(ChildRef::new(uid.clone(), order));
        self.entries.entry(uid).or_default().parent = Some(parent);
        self
    }

    /// Ids passed to [`TreeStore::open_block`], oldest first.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }

    /// Makes subsequent creates fail, as a host outage would.
    pub fn fail_creates(&mut self, fail: bool) {
        self.fail_creates = fail;
    }

    pub fn fail_opens(&mut self, fail: bool) {
        self.fail_opens = fail;
    }

    /// Answers `None` instead of an empty list for blocks without children,
    /// as some hosts do.
    pub fn report_leaves_as_missing(&mut self, missing: bool) {
        self.leaves_as_missing = missing;
    }
}

impl TreeStore for MemoryTreeStore {
    fn parent(&self, uid: &str) -> Option<String> {
        self.entries.get(uid)?.parent.clone()
    }

    fn ordered_children(&self, uid: &str) -> Option<Vec<ChildRef>> {
        let entry = self.entries.get(uid)?;
        if self.leaves_as_missing && entry.children.is_empty() {
            return None;
        }
        Some(entry.children.clone())
    }

    fn exists(&self, uid: &str) -> bool {
        self.entries.contains_key(uid)
    }

    fn create_date_note(&mut self, title: &str) -> Result<String, HostError> {
        if self.fail_creates {
            return Err(HostError::CreateFailed {
                title: title.to_string(),
                reason: "store unavailable".to_string(),
            });
        }
        let uid = dates::uid_from_title(title).ok_or_else(|| HostError::CreateFailed {
            title: title.to_string(),
            reason: "not a daily note title".to_string(),
        })?;
        self.add_page(uid.clone());
        Ok(uid)
    }

    fn open_block(&mut self, uid: &str) -> Result<(), HostError> {
        if self.fail_opens {
            return Err(HostError::OpenFailed {
                uid: uid.to_string(),
                reason: "store unavailable".to_string(),
            });
        }
        if !self.exists(uid) {
            return Err(HostError::OpenFailed {
                uid: uid.to_string(),
                reason: "no such block".to_string(),
            });
        }
        self.opened.push(uid.to_string());
        Ok(())
    }
}
