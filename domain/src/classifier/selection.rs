//! Selection of the classifier to use for answering questions

use super::entities::Classifier;
use super::value_objects::ClassifierId;

/// Pick the most recently created classifier whose status is `Available`.
///
/// The sort is stable: when two classifiers share a creation timestamp,
/// the one that appears first in `classifiers` wins.
pub fn select_latest_available(mut classifiers: Vec<Classifier>) -> Option<ClassifierId> {
    classifiers.sort_by(|a, b| b.created.cmp(&a.created));
    classifiers
        .into_iter()
        .find(|c| c.status.is_available())
        .and_then(|c| ClassifierId::new(c.classifier_id).ok())
}
