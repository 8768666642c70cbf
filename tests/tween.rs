use quickcheck_macros::quickcheck;
use tween_viz::easing::{cubic_in_out, Easing};
use tween_viz::grid::GridSpec;
use tween_viz::states::{AnimationState, StateSequence};
use tween_viz::tween::{Phase, TweenState};

#[test]
fn sixty_frame_cycle() {
    let mut tween = TweenState::new(60, 4).unwrap();
    for tick in 0..60u64 {
        let frame = tween.advance(tick);
        assert_eq!(frame.current, 0);
        assert_eq!(frame.next, 1);
        assert_eq!(frame.progress, tick as f32 / 60.0);
    }
    let frame = tween.advance(60);
    assert_eq!((frame.current, frame.next), (1, 2));
    assert_eq!(frame.progress, 0.0);
}

#[test]
fn three_states_come_back_around() {
    let mut tween = TweenState::new(10, 3).unwrap();
    let start = tween.advance(0).current;
    let mut seen = Vec::new();
    for tick in 1..=30u64 {
        let frame = tween.advance(tick);
        if tick % 10 == 0 {
            seen.push(frame.current);
        }
    }
    assert_eq!(seen, vec![1, 2, 0]);
    assert_eq!(
        tween.phase(),
        Phase::Playing {
            state_index: start,
            frame_in_cycle: 0
        }
    );
}

#[test]
fn empty_or_frameless_tweens_are_rejected() {
    assert!(TweenState::new(10, 0).is_err());
    assert!(TweenState::new(0, 3).is_err());
}

#[test]
fn black_to_white_grid() {
    let grid = GridSpec::new(2, 2, 1.0, 1.0, 2.0, 2.0).unwrap();
    let count = grid.count();
    let a = AnimationState::uniform(count, [0.0; 3], 0.0);
    let b = AnimationState::uniform(count, [1.0; 3], 1.0);
    let states = StateSequence::new(vec![a.clone(), b.clone()]).unwrap();
    let mut tween = TweenState::new(10, states.len()).unwrap();

    let frame = tween.advance(0);
    let (curr, next) = states.pair(frame.current);
    assert_eq!(frame.progress, 0.0);
    assert_eq!(curr.blend(next, frame.progress, Easing::Linear), a);

    for tick in 1..5 {
        tween.advance(tick);
    }
    let frame = tween.advance(5);
    assert_eq!(frame.progress, 0.5);
    let (curr, next) = states.pair(frame.current);
    let mid = curr.blend(next, frame.progress, Easing::Linear);
    assert!(mid.scales.iter().all(|&s| s == 0.5));
    assert!(mid.colors.iter().all(|&c| c == 0.5));

    for tick in 6..10 {
        tween.advance(tick);
    }
    let frame = tween.advance(10);
    assert_eq!(frame.progress, 0.0);
    let (curr, next) = states.pair(frame.current);
    assert_eq!((curr, next), (&b, &a));
}

#[test]
fn eased_blend_matches_curve() {
    let a = AnimationState::uniform(1, [0.0; 3], 0.0);
    let b = AnimationState::uniform(1, [1.0; 3], 1.0);
    let blended = a.blend(&b, 0.25, Easing::CubicInOut);
    assert_eq!(blended.scales[0], cubic_in_out(0.25));
    assert_eq!(blended.scales[0], 0.0625);
}

#[quickcheck]
fn progress_resets_only_when_state_advances(
    frames_per_cycle: u8,
    num_states: u8,
    ticks: u16,
) -> bool {
    let frames_per_cycle = frames_per_cycle.max(1) as u64;
    let num_states = num_states.max(1) as usize;
    let mut tween = TweenState::new(frames_per_cycle, num_states).unwrap();
    let mut prev = tween.advance(0);
    for tick in 1..=ticks as u64 {
        let frame = tween.advance(tick);
        let advanced = frame.current != prev.current || num_states == 1;
        let ok = if tick % frames_per_cycle == 0 {
            frame.progress == 0.0
                && advanced
                && frame.current == (prev.current + 1) % num_states
        } else {
            frame.progress > prev.progress && frame.current == prev.current
        };
        if !ok || !(0.0..1.0).contains(&frame.progress) {
            return false;
        }
        prev = frame;
    }
    true
}
