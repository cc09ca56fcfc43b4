//! Mutual nearest-neighbour descriptor matching between two frames.

use bitarray::BitArray;
use space::{Knn, KnnFromBatch, LinearKnn, Metric};

use crate::pipeline::features::SizedFeature;

/// A correspondence between a query-set and a train-set feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Index into the query feature set.
    pub query: usize,
    /// Index into the train feature set.
    pub train: usize,
    /// Hamming distance between the two descriptors.
    pub distance: u32,
}

/// Matches two descriptor sets under a mutual nearest-neighbour constraint.
///
/// A pair survives only when the nearest-neighbour relation holds in both
/// directions, so every query index and every train index appears in at most
/// one match. This is the cross check classical brute-force matchers offer;
/// it trades recall for matches that are far more likely to be the same
/// ground patch seen twice.
///
/// The result is sorted by ascending distance. Either side being empty
/// yields an empty result rather than an error; the caller decides whether
/// an empty match set is fatal for its pair.
pub fn match_descriptors(query: &[SizedFeature], train: &[SizedFeature]) -> Vec<Match> {
    if query.is_empty() || train.is_empty() {
        return Vec::new();
    }

    let forward = nearest_neighbours(train, query);
    let reverse = nearest_neighbours(query, train);

    let mut matches: Vec<Match> = forward
        .into_iter()
        .enumerate()
        .filter_map(|(query_index, nearest)| {
            let (train_index, distance) = nearest?;
            let mutual = reverse[train_index].map(|(back, _)| back) == Some(query_index);
            mutual.then_some(Match {
                query: query_index,
                train: train_index,
                distance,
            })
        })
        .collect();

    // best correspondences first; stable, so equal distances keep query order
    matches.sort_by(|a, b| a.distance.cmp(&b.distance));
    matches
}

/// Nearest neighbour in `haystack` for every feature of `queries`, by index
/// and distance.
fn nearest_neighbours(
    haystack: &[SizedFeature],
    queries: &[SizedFeature],
) -> Vec<Option<(usize, u32)>> {
    // TODO: LinearKnn wants owned (point, value) pairs; find or write a
    // batch search over plain slices to drop this allocation.
    let data = haystack.iter().map(|f| (f, 1u8)).collect::<Vec<_>>();
    let search: LinearKnn<FeatureHamming, _> = KnnFromBatch::from_batch(data.iter());

    queries
        .iter()
        .map(|feature| {
            search
                .knn(&feature, 1)
                .first()
                .map(|(neighbour, _, _)| (neighbour.index, neighbour.distance))
        })
        .collect()
}

// Implementations for `space`

#[derive(Default)]
struct FeatureHamming;

impl<'f> Metric<&'f SizedFeature> for FeatureHamming {
    type Unit = u32;
    fn distance(&self, a: &&SizedFeature, b: &&SizedFeature) -> Self::Unit {
        BitArray::new(a.descriptor).distance(&BitArray::new(b.descriptor))
    }
}
