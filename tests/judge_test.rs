use beatmatcher::game::{HitJudge, HitResult};

#[test]
fn test_match_window_at_80_bpm() {
    // 80 BPM -> 750 ms period, hittable through the first 562.5 ms
    let judge = HitJudge::new(750.0);

    assert_eq!(judge.judge(0.0).result, HitResult::Match);
    assert_eq!(judge.judge(100.0).result, HitResult::Match);
    assert_eq!(judge.judge(562.5).result, HitResult::Match);
    assert_eq!(judge.judge(563.0).result, HitResult::Miss);
    assert_eq!(judge.judge(700.0).result, HitResult::Miss);
}

#[test]
fn test_offset_convention() {
    let judge = HitJudge::new(750.0);

    // first half period reads as early
    assert_eq!(judge.judge(100.0).offset_ms, -100.0);
    // second half reads as late relative to the next beat
    assert_eq!(judge.judge(700.0).offset_ms, 50.0);
    // past a full period the late reading goes negative
    assert_eq!(judge.judge(800.0).offset_ms, -50.0);
}

#[test]
fn test_offset_does_not_drive_classification() {
    let judge = HitJudge::new(750.0);

    // 400 ms reads as "late by 350" but is still inside the match window
    let judgement = judge.judge(400.0);
    assert_eq!(judgement.offset_ms, 350.0);
    assert_eq!(judgement.result, HitResult::Match);
}

#[test]
fn test_window_scales_with_period() {
    // 120 BPM -> 500 ms period, 375 ms window
    let judge = HitJudge::new(500.0);

    assert_eq!(judge.judge(375.0).result, HitResult::Match);
    assert_eq!(judge.judge(376.0).result, HitResult::Miss);
}

#[test]
fn test_latency_is_raw_elapsed_time() {
    let judge = HitJudge::new(750.0);

    assert_eq!(judge.judge(700.0).latency_ms, 700.0);
    assert_eq!(judge.judge(42.0).latency_ms, 42.0);
}
