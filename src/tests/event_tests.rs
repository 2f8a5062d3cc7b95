#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use crate::brick::{Brick, Position, Shape};
    use crate::event::{Event, EventType};

    #[test]
    fn test_default_event_is_undefined_and_zeroed() {
        let event = Event::default();
        assert_eq!(event.kind(), EventType::Undefined);
        assert_eq!(event.time(), Duration::ZERO);
        assert_eq!(event.brick_loc(), [Position::default(); 4]);
    }

    #[test]
    fn test_from_brick_is_undefined_with_snapshot() {
        let brick = Brick::with_shape(Shape::T, Position::new(60, 30));
        let event = Event::from_brick(&brick, Duration::from_millis(1500));

        assert_eq!(event.kind(), EventType::Undefined);
        assert_eq!(event.time(), Duration::from_millis(1500));
        assert_eq!(event.brick_loc(), brick.positions());
    }

    #[test]
    fn test_fully_specified_event() {
        let brick = Brick::with_shape(Shape::L, Position::new(0, 0));
        let event = Event::new(&brick, EventType::RowCompleted, Duration::from_secs(3));

        assert_eq!(event.kind(), EventType::RowCompleted);
        assert_eq!(event.time(), Duration::from_secs(3));
        assert_eq!(event.brick_loc(), brick.positions());
    }

    #[test]
    fn test_snapshot_survives_brick_moves() {
        let mut brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        let mut before = [Position::default(); 4];
        brick.get_position(&mut before);

        let event = Event::new(&brick, EventType::BrickMovingDown, Duration::ZERO);
        brick.move_by(Position::new(0, 30));

        assert_eq!(event.brick_loc(), before);
        assert_ne!(event.brick_loc(), brick.positions());

        let text = event.to_string();
        for p in before {
            assert!(text.contains(&p.to_string()), "{text} misses {p}");
        }
    }

    #[test]
    fn test_display_format() {
        let brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        let event = Event::new(&brick, EventType::BrickRotate, Duration::from_millis(1250));

        assert_eq!(
            event.to_string(),
            "BRICK_ROTATE @ 1.250s [(30,0) (30,30) (60,0) (60,30)]"
        );
    }

    #[test]
    fn test_event_without_brick() {
        let event = Event::without_brick(EventType::GameStarted, Duration::from_millis(5));
        assert_eq!(event.kind(), EventType::GameStarted);
        assert_eq!(event.brick_loc(), [Position::default(); 4]);
        assert_eq!(
            event.to_string(),
            "GAME_STARTED @ 0.005s [(0,0) (0,0) (0,0) (0,0)]"
        );
    }

    #[test]
    fn test_twenty_distinct_event_types() {
        assert_eq!(EventType::ALL.len(), 20);

        let kinds: HashSet<_> = EventType::ALL.iter().collect();
        assert_eq!(kinds.len(), 20);

        let names: HashSet<_> = EventType::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), 20);

        assert_eq!(EventType::ALL[0], EventType::Render);
        assert_eq!(EventType::ALL[19], EventType::Undefined);
        assert_eq!(EventType::default(), EventType::Undefined);
    }
}
