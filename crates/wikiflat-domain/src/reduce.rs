//! Claim reduction - many ranked claims in, one property value out

use crate::entity::{Claim, ReducedValue};
use crate::interpret::interpret;
use crate::rank::Rank;
use crate::resolver::IdentifierResolver;
use crate::value::{AccumulationPolicy, NormalizedValue};

/// One accumulator bucket per rank
#[derive(Debug, Clone, Default)]
pub struct RankBuckets {
    buckets: [Vec<NormalizedValue>; 3],
}

impl RankBuckets {
    /// Create empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value to the bucket of `rank` under the given policy
    pub fn accumulate(&mut self, rank: Rank, policy: AccumulationPolicy, value: NormalizedValue) {
        let bucket = &mut self.buckets[rank.index()];
        if policy == AccumulationPolicy::Replace {
            bucket.clear();
        }
        bucket.push(value);
    }

    /// Values currently held for `rank`
    pub fn bucket(&self, rank: Rank) -> &[NormalizedValue] {
        &self.buckets[rank.index()]
    }

    /// Pick the highest-priority non-empty bucket
    ///
    /// One value comes back unwrapped; several come back sorted.
    pub fn finish(self) -> Option<ReducedValue> {
        let mut values = self.buckets.into_iter().find(|bucket| !bucket.is_empty())?;

        if values.len() == 1 {
            return values.pop().map(ReducedValue::Single);
        }
        values.sort_by(|a, b| a.natural_cmp(b));
        Some(ReducedValue::List(values))
    }
}

/// Reduce all claims of one property to its final value
///
/// Claims are visited in source order. Unusable values are skipped. Entity
/// references accumulate within their rank; any other value replaces what
/// its rank held. Returns `None` when no claim produced a value.
pub fn reduce(claims: &[Claim], resolver: &IdentifierResolver) -> Option<ReducedValue> {
    let mut buckets = RankBuckets::new();

    for claim in claims {
        let Some(raw) = &claim.value else {
            continue;
        };
        let Some(value) = interpret(raw, resolver) else {
            continue;
        };
        buckets.accumulate(claim.rank, raw.accumulation(), value);
    }

    buckets.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataValue;

    fn string(rank: Rank, s: &str) -> Claim {
        Claim::with_value(rank, DataValue::String(s.into()))
    }

    fn reference(rank: Rank, id: &str) -> Claim {
        Claim::with_value(rank, DataValue::EntityId(id.into()))
    }

    fn resolver() -> IdentifierResolver {
        [("Q1", "gamma"), ("Q2", "alpha"), ("Q3", "beta")].into_iter().collect()
    }

    #[test]
    fn test_single_preferred_string() {
        let claims = vec![string(Rank::Preferred, "value")];
        let reduced = reduce(&claims, &resolver());
        assert_eq!(reduced, Some(ReducedValue::Single("value".into())));
    }

    #[test]
    fn test_preferred_beats_deprecated_in_any_order() {
        let r = resolver();
        let a = vec![string(Rank::Deprecated, "old"), string(Rank::Preferred, "new")];
        let b = vec![string(Rank::Preferred, "new"), string(Rank::Deprecated, "old")];
        assert_eq!(reduce(&a, &r), Some(ReducedValue::Single("new".into())));
        assert_eq!(reduce(&b, &r), Some(ReducedValue::Single("new".into())));
    }

    #[test]
    fn test_normal_used_without_preferred() {
        let claims = vec![string(Rank::Deprecated, "old"), string(Rank::Normal, "current")];
        assert_eq!(reduce(&claims, &resolver()), Some(ReducedValue::Single("current".into())));
    }

    #[test]
    fn test_later_scalar_overwrites_earlier() {
        let claims = vec![string(Rank::Normal, "first"), string(Rank::Normal, "second")];
        assert_eq!(reduce(&claims, &resolver()), Some(ReducedValue::Single("second".into())));
    }

    #[test]
    fn test_references_accumulate_sorted() {
        let claims = vec![
            reference(Rank::Preferred, "Q1"),
            reference(Rank::Preferred, "Q2"),
            reference(Rank::Preferred, "Q3"),
        ];
        assert_eq!(
            reduce(&claims, &resolver()),
            Some(ReducedValue::List(vec!["alpha".into(), "beta".into(), "gamma".into()]))
        );
    }

    #[test]
    fn test_duplicate_labels_are_kept() {
        let r: IdentifierResolver = [("Q1", "same"), ("Q2", "same")].into_iter().collect();
        let claims = vec![reference(Rank::Normal, "Q1"), reference(Rank::Normal, "Q2")];
        assert_eq!(
            reduce(&claims, &r),
            Some(ReducedValue::List(vec!["same".into(), "same".into()]))
        );
    }

    #[test]
    fn test_unresolved_reference_leaves_property_absent() {
        let claims = vec![reference(Rank::Preferred, "Q999")];
        assert_eq!(reduce(&claims, &resolver()), None);
    }

    #[test]
    fn test_unresolved_reference_falls_back_to_lower_rank() {
        let claims = vec![reference(Rank::Preferred, "Q999"), reference(Rank::Normal, "Q2")];
        assert_eq!(reduce(&claims, &resolver()), Some(ReducedValue::Single("alpha".into())));
    }

    #[test]
    fn test_scalar_clears_accumulated_references() {
        let claims = vec![
            reference(Rank::Normal, "Q1"),
            reference(Rank::Normal, "Q2"),
            string(Rank::Normal, "plain"),
        ];
        assert_eq!(reduce(&claims, &resolver()), Some(ReducedValue::Single("plain".into())));
    }

    #[test]
    fn test_reference_after_scalar_joins_bucket() {
        let claims = vec![string(Rank::Normal, "zeta"), reference(Rank::Normal, "Q2")];
        assert_eq!(
            reduce(&claims, &resolver()),
            Some(ReducedValue::List(vec!["alpha".into(), "zeta".into()]))
        );
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let claims = vec![
            string(Rank::Normal, "kept"),
            Claim::new(Rank::Normal, None),
            Claim::with_value(Rank::Normal, DataValue::Unsupported("math".into())),
        ];
        assert_eq!(reduce(&claims, &resolver()), Some(ReducedValue::Single("kept".into())));
    }

    #[test]
    fn test_no_claims() {
        assert_eq!(reduce(&[], &resolver()), None);
    }

    #[test]
    fn test_bucket_policies() {
        let mut buckets = RankBuckets::new();
        buckets.accumulate(Rank::Normal, AccumulationPolicy::Append, "a".into());
        buckets.accumulate(Rank::Normal, AccumulationPolicy::Append, "b".into());
        assert_eq!(buckets.bucket(Rank::Normal).len(), 2);
        buckets.accumulate(Rank::Normal, AccumulationPolicy::Replace, "c".into());
        assert_eq!(buckets.bucket(Rank::Normal), &[NormalizedValue::from("c")]);
        assert!(buckets.bucket(Rank::Preferred).is_empty());
    }
}
