use leaching_prediction_toolbox::leaching::importance::{rank, ImportanceError, DEFAULT_TOP_N};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn rank_sorts_descending_and_truncates() {
    let ranked = rank(&names(&["A", "B", "C"]), &[0.1, 0.5, 0.4], 2).expect("rank");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "B");
    assert_eq!(ranked[0].score, 0.5);
    assert_eq!(ranked[1].name, "C");
    assert_eq!(ranked[1].score, 0.4);
}

#[test]
fn rank_keeps_all_when_fewer_than_top_n() {
    let ranked = rank(&names(&["A", "B"]), &[0.2, 0.8], DEFAULT_TOP_N).expect("rank");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "B");
}

#[test]
fn rank_is_stable_on_negative_and_tied_scores() {
    let ranked = rank(&names(&["A", "B", "C"]), &[-0.3, 0.0, -0.3], 3).expect("rank");
    assert_eq!(ranked[0].name, "B");
    assert_eq!(ranked[1].score, -0.3);
    assert_eq!(ranked[2].score, -0.3);
}

#[test]
fn rank_rejects_length_mismatch() {
    let err = rank(&names(&["A", "B"]), &[1.0], 5).expect_err("length mismatch");
    match err {
        ImportanceError::LengthMismatch { names, scores } => {
            assert_eq!(names, 2);
            assert_eq!(scores, 1);
        }
    }
}
