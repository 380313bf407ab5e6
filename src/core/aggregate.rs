//! Frame aggregation: collapse all faces in one frame into a group vector.
//!
//! The unit of analysis is "the audience", not "the person". Aggregation is
//! the only place per-face data exists, and it is discarded as soon as the
//! per-frame mean is computed.

use crate::detector::types::{Emotion, ExpressionVector, GroupFrameVector, EMOTION_COUNT};

/// Aggregate all per-face expression vectors from one frame into a single
/// group vector.
///
/// Returns `None` when the frame contained no faces — that is "no signal",
/// not an error, and downstream state must be left untouched. Otherwise the
/// group score for each emotion is the arithmetic mean of that emotion's
/// score across all faces.
pub fn aggregate_frame(faces: &[ExpressionVector]) -> Option<GroupFrameVector> {
    if faces.is_empty() {
        return None;
    }

    let mut sums = [0.0_f64; EMOTION_COUNT];
    for face in faces {
        for emotion in Emotion::ALL {
            sums[emotion.index()] += face.get(emotion);
        }
    }

    let count = faces.len() as f64;
    for sum in &mut sums {
        *sum /= count;
    }

    Some(GroupFrameVector::from_raw(sums))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_is_no_signal() {
        assert_eq!(aggregate_frame(&[]), None);
    }

    #[test]
    fn test_single_face_passes_through() {
        let face = ExpressionVector::from_scores([(Emotion::Happy, 0.9), (Emotion::Neutral, 0.1)]);
        let group = aggregate_frame(&[face]).unwrap();
        assert!((group.get(Emotion::Happy) - 0.9).abs() < 1e-12);
        assert!((group.get(Emotion::Neutral) - 0.1).abs() < 1e-12);
        assert_eq!(group.get(Emotion::Angry), 0.0);
    }

    #[test]
    fn test_mean_across_faces() {
        let a = ExpressionVector::from_scores([(Emotion::Happy, 1.0)]);
        let b = ExpressionVector::from_scores([(Emotion::Happy, 0.0), (Emotion::Sad, 0.6)]);
        let group = aggregate_frame(&[a, b]).unwrap();
        assert!((group.get(Emotion::Happy) - 0.5).abs() < 1e-12);
        assert!((group.get(Emotion::Sad) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_group_scores_stay_in_unit_range() {
        let faces: Vec<ExpressionVector> = (0..7)
            .map(|_| ExpressionVector::from_scores(Emotion::ALL.map(|e| (e, 1.0))))
            .collect();
        let group = aggregate_frame(&faces).unwrap();
        for emotion in Emotion::ALL {
            let score = group.get(emotion);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
