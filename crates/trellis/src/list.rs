//! Doubly-linked lists whose links live inside the elements.
//!
//! Elements are addressed by slotmap keys rather than pointers. A [`List`]
//! is only a head: first, last and a length. The `prev`/`next` links are
//! stored in each element's [`Links`] and reached through a [`LinkStore`].
//! Every operation except iteration is O(1) and none allocate.
//!
//! An element may be in at most one list per `Links` field. Pushing an
//! element that is still linked elsewhere corrupts both lists; remove it
//! first.

use slotmap::{Key, SlotMap};

/// Link fields embedded in a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Links<K> {
    /// Previous element.
    prev: Option<K>,
    /// Next element.
    next: Option<K>,
}

impl<K> Default for Links<K> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

impl<K: Copy> Links<K> {
    /// Previous element.
    pub fn prev(&self) -> Option<K> {
        self.prev
    }

    /// Next element.
    pub fn next(&self) -> Option<K> {
        self.next
    }
}

/// An element that carries list links.
pub trait Linked<K> {
    /// The element's links.
    fn links(&self) -> &Links<K>;
    /// The element's links, mutably.
    fn links_mut(&mut self) -> &mut Links<K>;
}

/// Storage that resolves keys to link fields.
pub trait LinkStore<K> {
    /// Links for `k`, if present.
    fn links(&self, k: K) -> Option<&Links<K>>;
    /// Links for `k` mutably, if present.
    fn links_mut(&mut self, k: K) -> Option<&mut Links<K>>;
}

impl<K: Key, T: Linked<K>> LinkStore<K> for SlotMap<K, T> {
    fn links(&self, k: K) -> Option<&Links<K>> {
        self.get(k).map(Linked::links)
    }

    fn links_mut(&mut self, k: K) -> Option<&mut Links<K>> {
        self.get_mut(k).map(Linked::links_mut)
    }
}

/// The head of an intrusive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct List<K> {
    /// First element.
    first: Option<K>,
    /// Last element.
    last: Option<K>,
    /// Element count.
    len: usize,
}

impl<K> Default for List<K> {
    fn default() -> Self {
        Self {
            first: None,
            last: None,
            len: 0,
        }
    }
}

impl<K: Copy + PartialEq> List<K> {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// First element.
    pub fn first(&self) -> Option<K> {
        self.first
    }

    /// Last element.
    pub fn last(&self) -> Option<K> {
        self.last
    }

    /// Element after `k`.
    pub fn next<S: LinkStore<K>>(&self, store: &S, k: K) -> Option<K> {
        store.links(k)?.next
    }

    /// Element before `k`.
    pub fn prev<S: LinkStore<K>>(&self, store: &S, k: K) -> Option<K> {
        store.links(k)?.prev
    }

    /// Point `k`'s next link at `next`.
    fn set_next<S: LinkStore<K>>(store: &mut S, k: K, next: Option<K>) {
        if let Some(l) = store.links_mut(k) {
            l.next = next;
        }
    }

    /// Point `k`'s prev link at `prev`.
    fn set_prev<S: LinkStore<K>>(store: &mut S, k: K, prev: Option<K>) {
        if let Some(l) = store.links_mut(k) {
            l.prev = prev;
        }
    }

    /// Append `k`.
    pub fn push_back<S: LinkStore<K>>(&mut self, store: &mut S, k: K) {
        match self.last {
            Some(last) => self.insert_after(store, last, k),
            None => self.push_only(store, k),
        }
    }

    /// Prepend `k`.
    pub fn push_front<S: LinkStore<K>>(&mut self, store: &mut S, k: K) {
        match self.first {
            Some(first) => self.insert_before(store, first, k),
            None => self.push_only(store, k),
        }
    }

    /// Insert `k` into an empty list.
    fn push_only<S: LinkStore<K>>(&mut self, store: &mut S, k: K) {
        if let Some(l) = store.links_mut(k) {
            *l = Links::default();
            self.first = Some(k);
            self.last = Some(k);
            self.len = 1;
        }
    }

    /// Insert `k` directly after `at`, which must be in this list.
    pub fn insert_after<S: LinkStore<K>>(&mut self, store: &mut S, at: K, k: K) {
        let Some(next) = store.links(at).map(|l| l.next) else {
            return;
        };
        let Some(l) = store.links_mut(k) else {
            return;
        };
        l.prev = Some(at);
        l.next = next;
        Self::set_next(store, at, Some(k));
        match next {
            Some(n) => Self::set_prev(store, n, Some(k)),
            None => self.last = Some(k),
        }
        self.len += 1;
    }

    /// Insert `k` directly before `at`, which must be in this list.
    pub fn insert_before<S: LinkStore<K>>(&mut self, store: &mut S, at: K, k: K) {
        let Some(prev) = store.links(at).map(|l| l.prev) else {
            return;
        };
        let Some(l) = store.links_mut(k) else {
            return;
        };
        l.prev = prev;
        l.next = Some(at);
        Self::set_prev(store, at, Some(k));
        match prev {
            Some(p) => Self::set_next(store, p, Some(k)),
            None => self.first = Some(k),
        }
        self.len += 1;
    }

    /// Unlink `k`, which must be in this list.
    pub fn remove<S: LinkStore<K>>(&mut self, store: &mut S, k: K) {
        let Some(l) = store.links_mut(k) else {
            return;
        };
        let Links { prev, next } = *l;
        *l = Links::default();
        match prev {
            Some(p) => Self::set_next(store, p, next),
            None => self.first = next,
        }
        match next {
            Some(n) => Self::set_prev(store, n, prev),
            None => self.last = prev,
        }
        self.len -= 1;
    }

    /// Remove and return the first element.
    pub fn pop_front<S: LinkStore<K>>(&mut self, store: &mut S) -> Option<K> {
        let k = self.first?;
        self.remove(store, k);
        Some(k)
    }

    /// Remove and return the last element.
    pub fn pop_back<S: LinkStore<K>>(&mut self, store: &mut S) -> Option<K> {
        let k = self.last?;
        self.remove(store, k);
        Some(k)
    }

    /// Unlink every element.
    pub fn clear<S: LinkStore<K>>(&mut self, store: &mut S) {
        while self.pop_front(store).is_some() {}
    }

    /// Iterate element keys front to back.
    pub fn iter<'a, S: LinkStore<K>>(&self, store: &'a S) -> Iter<'a, K, S> {
        Iter {
            store,
            cur: self.first,
            back: false,
        }
    }

    /// Iterate element keys back to front.
    pub fn iter_rev<'a, S: LinkStore<K>>(&self, store: &'a S) -> Iter<'a, K, S> {
        Iter {
            store,
            cur: self.last,
            back: true,
        }
    }
}

/// Iterator over list keys.
pub struct Iter<'a, K, S> {
    /// Link storage.
    store: &'a S,
    /// Next key to yield.
    cur: Option<K>,
    /// Walk `prev` links instead of `next`.
    back: bool,
}

impl<K: Copy, S: LinkStore<K>> Iterator for Iter<'_, K, S> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let k = self.cur?;
        let links = self.store.links(k);
        self.cur = if self.back {
            links.and_then(|l| l.prev)
        } else {
            links.and_then(|l| l.next)
        };
        Some(k)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use slotmap::new_key_type;

    use super::*;

    new_key_type! {
        struct ItemId;
    }

    #[derive(Debug)]
    struct Item {
        links: Links<ItemId>,
        value: u32,
    }

    impl Linked<ItemId> for Item {
        fn links(&self) -> &Links<ItemId> {
            &self.links
        }
        fn links_mut(&mut self) -> &mut Links<ItemId> {
            &mut self.links
        }
    }

    fn item(store: &mut SlotMap<ItemId, Item>, value: u32) -> ItemId {
        store.insert(Item {
            links: Links::default(),
            value,
        })
    }

    fn values(list: &List<ItemId>, store: &SlotMap<ItemId, Item>) -> Vec<u32> {
        list.iter(store).map(|k| store[k].value).collect()
    }

    #[test]
    fn single_push_pop() {
        let mut store = SlotMap::with_key();
        let mut list = List::new();
        let a = item(&mut store, 1);
        list.push_back(&mut store, a);
        assert_eq!(list.pop_front(&mut store), Some(a));
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.last(), None);
        assert_eq!(store[a].links, Links::default());
    }

    #[test]
    fn both_ends() {
        let mut store = SlotMap::with_key();
        let mut list = List::new();
        let ids: Vec<_> = (0..4).map(|v| item(&mut store, v)).collect();
        list.push_back(&mut store, ids[1]);
        list.push_front(&mut store, ids[0]);
        list.push_back(&mut store, ids[3]);
        list.insert_before(&mut store, ids[3], ids[2]);
        assert_eq!(values(&list, &store), vec![0, 1, 2, 3]);
        let rev: Vec<_> = list.iter_rev(&store).map(|k| store[k].value).collect();
        assert_eq!(rev, vec![3, 2, 1, 0]);
        assert_eq!(list.pop_back(&mut store), Some(ids[3]));
        assert_eq!(list.next(&store, ids[1]), Some(ids[2]));
        assert_eq!(list.prev(&store, ids[0]), None);
        list.clear(&mut store);
        assert!(list.is_empty());
        assert_eq!(store[ids[1]].links, Links::default());
    }

    proptest! {
        #[test]
        fn remove_keeps_relative_order(n in 1usize..24, picks in prop::collection::vec(any::<prop::sample::Index>(), 0..12)) {
            let mut store = SlotMap::with_key();
            let mut list = List::new();
            let mut model: Vec<ItemId> = Vec::new();
            for v in 0..n as u32 {
                let k = item(&mut store, v);
                list.push_back(&mut store, k);
                model.push(k);
            }
            for p in picks {
                if model.is_empty() {
                    break;
                }
                let k = model.remove(p.index(model.len()));
                list.remove(&mut store, k);
            }
            let got: Vec<_> = list.iter(&store).collect();
            prop_assert_eq!(&got, &model);
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.first(), model.first().copied());
            prop_assert_eq!(list.last(), model.last().copied());
        }

        #[test]
        fn insert_after_keeps_relative_order(n in 1usize..16, at in any::<prop::sample::Index>()) {
            let mut store = SlotMap::with_key();
            let mut list = List::new();
            let mut model: Vec<ItemId> = Vec::new();
            for v in 0..n as u32 {
                let k = item(&mut store, v);
                list.push_back(&mut store, k);
                model.push(k);
            }
            let i = at.index(model.len());
            let k = item(&mut store, 100);
            list.insert_after(&mut store, model[i], k);
            model.insert(i + 1, k);
            let got: Vec<_> = list.iter(&store).collect();
            prop_assert_eq!(got, model);
        }
    }
}
