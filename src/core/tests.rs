#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::core::clock::{Clock, ManualClock};
    use crate::core::easing::Ease;
    use crate::core::hero::{HeroPhase, HeroPlayer, HeroScript, anchors};
    use crate::core::layout::{FixedLayout, Point};
    use crate::core::pointer::{Route, Waypoint};
    use crate::core::stage::Stage;
    use crate::core::text::Typewriter;
    use crate::core::timeline::{Position, Timeline};

    const FRAME: Duration = Duration::from_millis(16);

    fn page_layout() -> FixedLayout {
        FixedLayout::new()
            .with_anchor(anchors::POINT_A, Point::new(120.0, 480.0))
            .with_anchor(anchors::POINT_B, Point::new(640.0, 220.0))
            .with_anchor(anchors::POINT_C, Point::new(900.0, 420.0))
            .with_anchor(anchors::POINT_D, Point::new(560.0, 610.0))
            .with_anchor(anchors::VIA_1, Point::new(380.0, 300.0))
            .with_anchor(anchors::VIA_2, Point::new(760.0, 560.0))
            .with_width("impress.", 182.0)
            .with_width("convert.", 176.5)
            .with_width("inspire.", 160.0)
            .with_width("scale.", 121.25)
    }

    /// Run frame by frame until finished, collecting phase changes
    fn run_to_end(player: &mut HeroPlayer, clock: &ManualClock) -> Vec<HeroPhase> {
        let mut phases = Vec::new();
        player.play(clock.now());
        while !player.is_finished() {
            phases.extend(player.tick(clock.now()));
            clock.advance(FRAME);
        }
        phases
    }

    // ========================================================================
    // Typing
    // ========================================================================

    #[test]
    fn test_typed_text_at_every_character_boundary() {
        let script = HeroScript::default();
        let writer = Typewriter::new(script.sentence, script.per_char).unwrap();
        let mut player = HeroPlayer::new(script.clone(), Box::new(page_layout())).unwrap();
        let clock = ManualClock::new();
        player.play(clock.now());

        for k in 0..=writer.char_count() {
            clock.set(script.per_char * k as u32);
            player.tick(clock.now());
            assert_eq!(
                player.view().headline.displayed(),
                writer.prefix_of(k),
                "at {k} characters"
            );
        }

        assert_eq!(clock.now(), writer.duration());
        assert_eq!(player.view().headline.displayed(), "Designs that impress.");
        assert!(player.view().headline.typing_done);
    }

    #[test]
    fn test_typing_hands_final_word_to_cycler() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        player.play(Duration::ZERO);
        player.tick(Duration::from_millis(1050));

        let headline = &player.view().headline;
        assert_eq!(headline.prefix, "Designs that ");
        assert_eq!(headline.word, "impress.");
        assert_eq!(headline.word_index, 0);
    }

    // ========================================================================
    // Heading entrance
    // ========================================================================

    #[test]
    fn test_heading_enters_after_delay_with_power3_out() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        player.play(Duration::ZERO);

        // Still waiting for the 120ms delay
        player.tick(Duration::from_millis(100));
        let heading = &player.view().heading;
        assert_eq!((heading.offset_x, heading.opacity, heading.blur), (-40.0, 0.0, 8.0));

        // Halfway through the 800ms entrance
        player.tick(Duration::from_millis(520));
        let eased = Ease::POWER3_OUT.apply(0.5);
        let heading = &player.view().heading;
        assert!((heading.offset_x - -40.0 * (1.0 - eased)).abs() < 1e-9);
        assert!((heading.opacity - eased).abs() < 1e-9);
        assert!((heading.blur - 8.0 * (1.0 - eased)).abs() < 1e-9);

        player.tick(Duration::from_millis(920));
        let heading = &player.view().heading;
        assert_eq!((heading.offset_x, heading.opacity, heading.blur), (0.0, 1.0, 0.0));
    }

    // ========================================================================
    // Pointer route
    // ========================================================================

    #[test]
    fn test_route_with_holds_takes_declared_time() {
        let layout = FixedLayout::new()
            .with_anchor("A", Point::new(0.0, 0.0))
            .with_anchor("B", Point::new(300.0, 0.0))
            .with_anchor("C", Point::new(300.0, 200.0))
            .with_anchor("D", Point::new(40.0, 90.0));
        let mut stage = Stage::new(Box::new(layout));
        let route = Route::new(vec![
            Waypoint::new("A").hold(Duration::from_millis(2000)),
            Waypoint::new("B")
                .travel(Duration::from_secs(3))
                .hold(Duration::from_millis(600)),
            Waypoint::new("C")
                .travel(Duration::from_secs(2))
                .hold(Duration::from_millis(500)),
            Waypoint::new("D").travel(Duration::from_millis(1500)),
        ]);

        let mut timeline = Timeline::new();
        let steps = route.schedule(&mut timeline, Position::At(Duration::ZERO)).unwrap();
        assert_eq!(steps.end, Duration::from_millis(9600));
        assert_eq!(route.travel_duration(), Duration::from_millis(9600));

        let clock = ManualClock::new();
        timeline.play(clock.now());
        while clock.now() < Duration::from_millis(9500) {
            timeline.tick(&mut stage, clock.now());
            clock.advance(FRAME);
        }
        assert!(!timeline.is_finished());
        assert_ne!(stage.view.cursor.position, Point::new(40.0, 90.0));

        clock.set(steps.end);
        timeline.tick(&mut stage, clock.now());
        assert!(timeline.is_finished());
        assert!(stage.view.cursor.position.distance(Point::new(40.0, 90.0)) < 1e-9);
    }

    // ========================================================================
    // Word cycle
    // ========================================================================

    #[test]
    fn test_highlight_matches_each_word_after_instant_change() {
        let layout = page_layout();
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(layout.clone())).unwrap();
        player.play(Duration::ZERO);

        let word_steps = player.sequence().steps.words.clone();
        assert_eq!(word_steps.len(), 3);

        for (i, id) in word_steps.iter().enumerate() {
            let at = player.sequence().timeline.start_of(*id).unwrap();
            player.tick(at);

            let view = player.view();
            assert_eq!(player.phase(), HeroPhase::WordCycle(i + 1));
            assert_eq!(view.headline.word_index, i + 1);
            assert_eq!(
                Some(view.highlight.width),
                crate::core::layout::Layout::text_width(&layout, &view.headline.word),
                "word {}",
                view.headline.word
            );
        }
    }

    #[test]
    fn test_highlight_enters_smoothly() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        let enter = player.sequence().steps.highlight_enter;
        let start = player.sequence().timeline.start_of(enter).unwrap();
        let end = player.sequence().timeline.end_of(enter).unwrap();

        player.play(Duration::ZERO);
        player.tick(start);
        assert_eq!(player.view().highlight.width, 0.0);

        player.tick(start + (end - start) / 2);
        let mid = player.view().highlight.width;
        assert!(mid > 0.0 && mid < 182.0);

        player.tick(end);
        assert_eq!(player.view().highlight.width, 182.0);
    }

    // ========================================================================
    // Full sequence
    // ========================================================================

    #[test]
    fn test_full_run_visits_every_phase_in_order() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        let clock = ManualClock::new();

        let phases = run_to_end(&mut player, &clock);
        assert_eq!(
            phases,
            vec![
                HeroPhase::Typing,
                HeroPhase::HighlightEnter,
                HeroPhase::WordCycle(1),
                HeroPhase::WordCycle(2),
                HeroPhase::WordCycle(3),
                HeroPhase::HighlightExit,
                HeroPhase::CtaPulse,
                HeroPhase::PointerExit,
                HeroPhase::Finished,
            ]
        );

        let view = player.view();
        assert_eq!(view.heading.opacity, 1.0);
        assert_eq!(view.heading.offset_x, 0.0);
        assert_eq!(view.highlight.width, 0.0);
        assert_eq!(view.highlight.opacity, 0.0);
        assert_eq!(view.cursor.opacity, 0.0);
        assert!((view.cta.scale - 1.0).abs() < 1e-9);
        assert!((view.cursor.scale - 1.0).abs() < 1e-9);
        assert_eq!(view.headline.displayed(), "Designs that scale.");
    }

    #[test]
    fn test_cursor_reaches_cta_before_pulse() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        let pulse = player.sequence().steps.cta_pulse;
        let at = player.sequence().timeline.start_of(pulse).unwrap();

        player.play(Duration::ZERO);
        let mut now = Duration::ZERO;
        while now < at {
            player.tick(now);
            now += FRAME;
        }
        player.tick(at);

        assert_eq!(player.phase(), HeroPhase::CtaPulse);
        assert!(player.view().cursor.position.distance(Point::new(560.0, 610.0)) < 1e-9);
        assert_eq!(player.view().cursor.opacity, 1.0);
    }

    #[test]
    fn test_missing_anchors_do_not_change_timing() {
        let script = HeroScript::default();
        let mut full = HeroPlayer::new(script.clone(), Box::new(page_layout())).unwrap();

        let mut sparse_layout = page_layout();
        sparse_layout.remove_anchor(anchors::POINT_B);
        sparse_layout.remove_anchor(anchors::VIA_2);
        let mut sparse = HeroPlayer::new(script, Box::new(sparse_layout)).unwrap();

        let full_phases = run_to_end(&mut full, &ManualClock::new());
        let sparse_phases = run_to_end(&mut sparse, &ManualClock::new());

        assert_eq!(full.duration(), sparse.duration());
        assert_eq!(full_phases, sparse_phases);
    }

    #[test]
    fn test_replay_starts_over_cleanly() {
        let mut player = HeroPlayer::new(HeroScript::default(), Box::new(page_layout())).unwrap();
        let clock = ManualClock::new();
        run_to_end(&mut player, &clock);
        assert_eq!(player.phase(), HeroPhase::Finished);

        player.play(clock.now());
        assert_eq!(player.phase(), HeroPhase::Idle);
        assert_eq!(player.view().headline.displayed(), "");
        assert_eq!(player.view().heading.opacity, 0.0);

        clock.advance(Duration::from_millis(100));
        assert_eq!(player.tick(clock.now()), vec![HeroPhase::Typing]);
        assert_eq!(player.view().headline.displayed(), "De");
    }
}
