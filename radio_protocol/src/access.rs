//! Static allow-list of authorized sender ids, loaded once at startup from
//! operator configuration. Checked before any cryptographic work.

/// Immutable set of allowed sender ids. Small enough that a linear scan wins
/// over anything fancier. Id 0 is reserved and never allowed.
#[derive(Debug, Clone)]
pub struct AllowList {
    ids: Vec<u8>,
}

impl AllowList {
    pub fn new(ids: impl IntoIterator<Item = u8>) -> Self {
        let mut ids: Vec<u8> = ids.into_iter().filter(|&id| id != 0).collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    pub fn is_allowed(&self, sender_id: u8) -> bool {
        sender_id != 0 && self.ids.contains(&sender_id)
    }

    pub fn ids(&self) -> &[u8] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let acl = AllowList::new([1, 7]);
        assert!(acl.is_allowed(1));
        assert!(acl.is_allowed(7));
        assert!(!acl.is_allowed(2));
        assert!(!acl.is_allowed(255));
    }

    #[test]
    fn zero_is_never_allowed() {
        let acl = AllowList::new([0, 1]);
        assert!(!acl.is_allowed(0));
        assert_eq!(acl.ids(), &[1]);
    }

    #[test]
    fn duplicates_collapse() {
        let acl = AllowList::new([3, 3, 3]);
        assert_eq!(acl.ids(), &[3]);
    }
}
