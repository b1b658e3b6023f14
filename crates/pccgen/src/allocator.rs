//! Bucket allocation for proportional PCC load splitting

use tracing::{debug, info};

use crate::types::LinkDescriptor;

/// Bucket share per link, in descriptor order, and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Allocation {
    bucket_counts: Vec<u32>,
    total_buckets: u64,
}

impl Allocation {
    /// Bucket count of each link, aligned with the descriptor list
    pub fn bucket_counts(&self) -> &[u32] {
        &self.bucket_counts
    }

    /// Size of the classifier partition
    pub fn total_buckets(&self) -> u64 {
        self.total_buckets
    }
}

/// Smallest positive speed, or 1.0 when no link has one
pub fn min_positive_speed(links: &[LinkDescriptor]) -> f64 {
    links
        .iter()
        .map(|l| l.speed_mbps)
        .filter(|s| *s > 0.0)
        .fold(None, |min: Option<f64>, s| Some(min.map_or(s, |m| m.min(s))))
        .unwrap_or(1.0)
}

/// Compute `ceil(speed / min_speed)` buckets per link, at least one each.
///
/// Non-positive speeds get a single bucket. A per-link count saturates at
/// `u32::MAX`; the total is summed in `u64` so it always equals the sum of
/// the counts.
pub fn allocate(links: &[LinkDescriptor]) -> Allocation {
    let min_speed = min_positive_speed(links);

    let bucket_counts: Vec<u32> = links
        .iter()
        .map(|link| {
            // Saturating float-to-int cast; NaN and negatives land on 0.
            let buckets = (link.speed_mbps / min_speed).ceil() as u32;
            let buckets = buckets.max(1);
            debug!(link = %link.name, speed_mbps = link.speed_mbps, buckets, "Allocated buckets");
            buckets
        })
        .collect();

    let total_buckets: u64 = bucket_counts.iter().map(|&b| u64::from(b)).sum();

    info!(
        links = links.len(),
        min_speed_mbps = min_speed,
        total_buckets,
        "Bucket allocation complete"
    );

    Allocation {
        bucket_counts,
        total_buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(name: &str, speed: f64) -> LinkDescriptor {
        LinkDescriptor::new(name, "ether1", "10.0.0.1", "8.8.8.8", speed)
    }

    #[test]
    fn test_single_link() {
        let alloc = allocate(&[link("LINK1", 1000.0)]);
        assert_eq!(alloc.bucket_counts(), &[1]);
        assert_eq!(alloc.total_buckets(), 1);
    }

    #[test]
    fn test_two_links_rounds_up() {
        let alloc = allocate(&[link("LINK1", 1000.0), link("LINK2", 600.0)]);
        assert_eq!(alloc.bucket_counts(), &[2, 1]);
        assert_eq!(alloc.total_buckets(), 3);
    }

    #[test]
    fn test_equal_speeds() {
        let links: Vec<_> = (1..=4).map(|i| link(&format!("LINK{}", i), 300.0)).collect();
        let alloc = allocate(&links);
        assert_eq!(alloc.bucket_counts(), &[1, 1, 1, 1]);
        assert_eq!(alloc.total_buckets(), 4);
    }

    #[test]
    fn test_no_links() {
        let alloc = allocate(&[]);
        assert!(alloc.bucket_counts().is_empty());
        assert_eq!(alloc.total_buckets(), 0);
    }

    #[test]
    fn test_exact_multiples() {
        let alloc = allocate(&[link("A", 1000.0), link("B", 500.0), link("C", 250.0)]);
        assert_eq!(alloc.bucket_counts(), &[4, 2, 1]);
        assert_eq!(alloc.total_buckets(), 7);
    }

    #[test]
    fn test_non_positive_speeds_get_one_bucket() {
        let alloc = allocate(&[link("A", 0.0), link("B", -10.0), link("C", 100.0)]);
        assert_eq!(alloc.bucket_counts(), &[1, 1, 1]);
        assert_eq!(alloc.total_buckets(), 3);
    }

    #[test]
    fn test_all_non_positive_uses_unit_min() {
        assert_eq!(min_positive_speed(&[link("A", 0.0), link("B", -1.0)]), 1.0);
        let alloc = allocate(&[link("A", 0.0), link("B", -1.0)]);
        assert_eq!(alloc.total_buckets(), 2);
    }

    #[test]
    fn test_nan_speed_does_not_panic() {
        let alloc = allocate(&[link("A", f64::NAN), link("B", 100.0)]);
        assert_eq!(alloc.bucket_counts(), &[1, 1]);
    }

    #[test]
    fn test_fractional_speeds() {
        let alloc = allocate(&[link("A", 1.5), link("B", 0.5)]);
        assert_eq!(alloc.bucket_counts(), &[3, 1]);
    }

    #[test]
    fn test_saturated_counts_keep_total_exact() {
        let alloc = allocate(&[link("A", 1e-9), link("B", 10.0), link("C", 10.0)]);
        assert_eq!(alloc.bucket_counts(), &[1, u32::MAX, u32::MAX]);
        assert_eq!(alloc.total_buckets(), 1 + 2 * u64::from(u32::MAX));
    }
}
