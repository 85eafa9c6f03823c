use std::collections::HashMap;

use super::DomainResolution;

/// Per-run memo of domain resolutions. Entries never expire: the cache lives
/// exactly as long as the [`DomainResolver`](super::DomainResolver) owning it.
#[derive(Debug, Default, Clone)]
pub struct ResolutionCache {
    entries: HashMap<String, DomainResolution>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, domain: &str) -> Option<&DomainResolution> {
        self.entries.get(domain)
    }

    /// First resolution wins; a later insert for the same domain is ignored.
    pub fn insert(&mut self, resolution: DomainResolution) -> &DomainResolution {
        self.entries
            .entry(resolution.domain.clone())
            .or_insert(resolution)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut cache = ResolutionCache::new();
        cache.insert(DomainResolution::valid("x.com", vec!["mx.x.com".into()]));
        let kept = cache.insert(DomainResolution::not_found("x.com"));
        assert!(kept.is_valid());
        assert_eq!(cache.len(), 1);
    }
}
