use std::collections::{HashMap, VecDeque};

use super::{
    clock::Clock,
    dates,
    store::{ChildRef, TreeStore},
};

/// How long a resolved context stays fresh.
pub const CACHE_TTL_MS: u64 = 5_000;

/// Most contexts kept at once before the oldest is evicted.
pub const CACHE_CAPACITY: usize = 50;

/// Upper bound on parent hops while looking for a following block.
const MAX_ASCENT: usize = 256;

/// Where a block sits in the graph: its parent, first child and siblings.
///
/// A page has no parent, no siblings and no order index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContext {
    pub uid: String,
    pub parent: Option<String>,
    pub first_child: Option<String>,
    pub siblings: Vec<String>,
    pub order: Option<usize>,
    pub is_page: bool,
    pub is_date_note: bool,
}

impl BlockContext {
    pub fn has_next_sibling(&self) -> bool {
        self.order
            .is_some_and(|order| order + 1 < self.siblings.len())
    }

    pub fn has_previous_sibling(&self) -> bool {
        self.order.is_some_and(|order| order >= 1)
    }

    pub fn next_sibling(&self) -> Option<&str> {
        let order = self.order?;
        self.siblings.get(order + 1).map(String::as_str)
    }

    /// The previous sibling, or the parent when this is the first child.
    pub fn previous_sibling(&self) -> Option<&str> {
        match self.order {
            Some(order) if order >= 1 => self.siblings.get(order - 1).map(String::as_str),
            _ => self.parent(),
        }
    }

    /// The parent block, or `None` for a page.
    pub fn parent(&self) -> Option<&str> {
        if self.is_page {
            return None;
        }
        self.parent.as_deref()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    context: BlockContext,
    stored_at: u64,
}

/// Bounded, expiring cache of resolved contexts.
#[derive(Debug, Clone)]
pub struct ContextCache {
    entries: HashMap<String, CacheEntry>,
    insertion: VecDeque<String>,
    ttl_ms: u64,
    capacity: usize,
}

impl Default for ContextCache {
    fn default() -> Self {
        Self::new(CACHE_TTL_MS, CACHE_CAPACITY)
    }
}

impl ContextCache {
    pub fn new(ttl_ms: u64, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion: VecDeque::new(),
            ttl_ms,
            capacity: capacity.max(1),
        }
    }

    /// Returns a fresh entry; an expired one is dropped on the way.
    pub fn get(&mut self, uid: &str, now_ms: u64) -> Option<BlockContext> {
        let entry = self.entries.get(uid)?;
        if now_ms.saturating_sub(entry.stored_at) < self.ttl_ms {
            return Some(entry.context.clone());
        }
        log::debug!("context cache entry for {uid} expired");
        self.remove(uid);
        None
    }

    pub fn insert(&mut self, context: BlockContext, now_ms: u64) {
        let uid = context.uid.clone();
        if self.entries.contains_key(&uid) {
            self.remove(&uid);
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.insertion.pop_front() else {
                break;
            };
            log::debug!("evicting {oldest} from context cache");
            self.entries.remove(&oldest);
        }
        self.insertion.push_back(uid.clone());
        self.entries.insert(
            uid,
            CacheEntry {
                context,
                stored_at: now_ms,
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, uid: &str) {
        self.entries.remove(uid);
        self.insertion.retain(|queued| queued != uid);
    }
}

/// Answers structural questions about blocks by querying a [`TreeStore`],
/// caching the answers for a short while.
#[derive(Debug)]
pub struct BlockGraphResolver<C: Clock> {
    clock: C,
    cache: ContextCache,
}

impl<C: Clock> BlockGraphResolver<C> {
    pub fn new(clock: C) -> Self {
        Self::with_cache(clock, ContextCache::default())
    }

    pub fn with_cache(clock: C, cache: ContextCache) -> Self {
        Self { clock, cache }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Context of `uid`, or `None` if the store doesn't know it.
    pub fn resolve<S: TreeStore + ?Sized>(&mut self, store: &S, uid: &str) -> Option<BlockContext> {
        let now = self.clock.now_ms();
        if let Some(context) = self.cache.get(uid, now) {
            return Some(context);
        }

        if !store.exists(uid) {
            return None;
        }
        let children = store.ordered_children(uid).unwrap_or_default();
        let first_child = sorted_uids(children).into_iter().next();
        let parent = store.parent(uid);

        let (siblings, order) = match &parent {
            Some(parent) => {
                let siblings = sorted_uids(store.ordered_children(parent).unwrap_or_default());
                let order = siblings.iter().position(|sibling| sibling == uid);
                (siblings, order)
            }
            None => (Vec::new(), None),
        };

        let is_page = parent.is_none();
        let context = BlockContext {
            uid: uid.to_string(),
            is_page,
            parent,
            first_child,
            siblings,
            order,
            is_date_note: is_page && dates::is_date_uid(uid),
        };
        self.cache.insert(context.clone(), now);
        Some(context)
    }

    /// The block that follows `context` in reading order once its own
    /// children are skipped: the next sibling, or the next sibling of the
    /// nearest ancestor that has one. Stops at the page.
    pub fn next_across_boundary<S: TreeStore + ?Sized>(
        &mut self,
        store: &S,
        context: &BlockContext,
    ) -> Option<String> {
        let mut current = context.clone();
        for _ in 0..MAX_ASCENT {
            if let Some(next) = current.next_sibling() {
                return Some(next.to_string());
            }
            let parent = current.parent()?.to_string();
            current = self.resolve(store, &parent)?;
            if current.is_page {
                return None;
            }
        }
        log::warn!("gave up looking for a block after {}", context.uid);
        None
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn sorted_uids(mut children: Vec<ChildRef>) -> Vec<String> {
    children.sort_by_key(|child| child.order);
    children.into_iter().map(|child| child.uid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{clock::ManualClock, store::MemoryTreeStore};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn clock() -> ManualClock {
        ManualClock::new(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn outline() -> MemoryTreeStore {
        // page
        //   a
        //     a1
        //     a2
        //   b
        let mut store = MemoryTreeStore::new();
        store
            .add_child("page", "b", 1)
            .add_child("page", "a", 0)
            .add_child("a", "a2", 7)
            .add_child("a", "a1", 3);
        store
    }

    #[test]
    fn test_resolve_orders_by_host_field() {
        let store = outline();
        let mut resolver = BlockGraphResolver::new(clock());
        let a = resolver.resolve(&store, "a").unwrap();

        assert_eq!(a.parent.as_deref(), Some("page"));
        assert_eq!(a.first_child.as_deref(), Some("a1"));
        assert_eq!(a.siblings, vec!["a", "b"]);
        assert_eq!(a.order, Some(0));
        assert!(!a.is_page);
        assert!(a.has_next_sibling());
        assert!(!a.has_previous_sibling());
    }

    #[test]
    fn test_page_has_no_siblings() {
        let store = outline();
        let mut resolver = BlockGraphResolver::new(clock());
        let page = resolver.resolve(&store, "page").unwrap();

        assert!(page.is_page);
        assert!(page.siblings.is_empty());
        assert_eq!(page.order, None);
        assert_eq!(page.parent(), None);
        assert_eq!(page.previous_sibling(), None);
    }

    #[test]
    fn test_unknown_uid_resolves_to_nothing() {
        let store = outline();
        let mut resolver = BlockGraphResolver::new(clock());
        assert_eq!(resolver.resolve(&store, "ghost"), None);
    }

    #[test]
    fn test_previous_sibling_falls_back_to_parent() {
        let store = outline();
        let mut resolver = BlockGraphResolver::new(clock());
        let a1 = resolver.resolve(&store, "a1").unwrap();
        let a2 = resolver.resolve(&store, "a2").unwrap();

        assert_eq!(a1.previous_sibling(), Some("a"));
        assert_eq!(a2.previous_sibling(), Some("a1"));
    }

    #[test]
    fn test_next_across_boundary_ascends() {
        let store = outline();
        let mut resolver = BlockGraphResolver::new(clock());

        let a1 = resolver.resolve(&store, "a1").unwrap();
        assert_eq!(resolver.next_across_boundary(&store, &a1).as_deref(), Some("a2"));

        let a2 = resolver.resolve(&store, "a2").unwrap();
        assert_eq!(resolver.next_across_boundary(&store, &a2).as_deref(), Some("b"));

        let b = resolver.resolve(&store, "b").unwrap();
        assert_eq!(resolver.next_across_boundary(&store, &b), None);
    }

    #[test]
    fn test_cached_context_expires() {
        let mut store = outline();
        let clock = clock();
        let mut resolver = BlockGraphResolver::new(&clock);

        let before = resolver.resolve(&store, "b").unwrap();
        store.add_child("page", "c", 2);

        clock.advance(CACHE_TTL_MS - 1);
        assert_eq!(resolver.resolve(&store, "b").unwrap(), before);

        clock.advance(1);
        let after = resolver.resolve(&store, "b").unwrap();
        assert_eq!(after.siblings, vec!["a", "b", "c"]);
        assert!(after.has_next_sibling());
    }

    #[test]
    fn test_clear_cache_forces_refresh() {
        let mut store = outline();
        let mut resolver = BlockGraphResolver::new(clock());
        resolver.resolve(&store, "b").unwrap();
        assert_eq!(resolver.cached(), 1);

        store.add_child("page", "c", 2);
        resolver.clear_cache();
        assert_eq!(resolver.cached(), 0);
        assert!(resolver.resolve(&store, "b").unwrap().has_next_sibling());
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = ContextCache::new(CACHE_TTL_MS, 2);
        let context = |uid: &str| BlockContext {
            uid: uid.to_string(),
            parent: None,
            first_child: None,
            siblings: Vec::new(),
            order: None,
            is_page: true,
            is_date_note: false,
        };

        cache.insert(context("one"), 0);
        cache.insert(context("two"), 1);
        cache.insert(context("three"), 2);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("one", 3), None);
        assert!(cache.get("two", 3).is_some());
        assert!(cache.get("three", 3).is_some());
    }

    #[test]
    fn test_date_note_flag() {
        let mut store = MemoryTreeStore::new();
        store.add_page("10-16-2026");
        let mut resolver = BlockGraphResolver::new(clock());
        let note = resolver.resolve(&store, "10-16-2026").unwrap();
        assert!(note.is_date_note);
        assert!(note.is_page);
    }

    #[test]
    fn test_date_shaped_block_is_not_a_date_note() {
        let mut store = MemoryTreeStore::new();
        store.add_child("page", "10-16-2026", 0);
        let mut resolver = BlockGraphResolver::new(clock());
        let block = resolver.resolve(&store, "10-16-2026").unwrap();
        assert!(!block.is_page);
        assert!(!block.is_date_note);
    }

    #[test]
    fn test_leaf_without_child_list_still_resolves() {
        let mut store = outline();
        store.report_leaves_as_missing(true);
        assert_eq!(store.ordered_children("a1"), None);

        let mut resolver = BlockGraphResolver::new(clock());
        let a1 = resolver.resolve(&store, "a1").unwrap();

        assert_eq!(a1.first_child, None);
        assert_eq!(a1.siblings, vec!["a1", "a2"]);
        assert_eq!(a1.order, Some(0));
        assert_eq!(resolver.next_across_boundary(&store, &a1).as_deref(), Some("a2"));

        let b = resolver.resolve(&store, "b").unwrap();
        assert_eq!(b.first_child, None);
        assert_eq!(b.previous_sibling(), Some("a"));
    }
}
