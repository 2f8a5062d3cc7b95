#[cfg(test)]
mod shape_tests {
    use crate::brick::{Position, SHAPE_TABLE, Shape};

    #[test]
    fn test_shape_table_matches_shape_order() {
        assert_eq!(Shape::I.cells(), [1, 3, 5, 7]);
        assert_eq!(Shape::Z.cells(), [2, 4, 5, 7]);
        assert_eq!(Shape::S.cells(), [3, 5, 4, 6]);
        assert_eq!(Shape::T.cells(), [3, 5, 4, 7]);
        assert_eq!(Shape::L.cells(), [2, 3, 5, 7]);
        assert_eq!(Shape::J.cells(), [3, 5, 7, 6]);
        assert_eq!(Shape::O.cells(), [2, 3, 4, 5]);

        for (shape, row) in Shape::ALL.iter().zip(SHAPE_TABLE.iter()) {
            assert_eq!(shape.cells(), *row);
        }
    }

    #[test]
    fn test_offsets_decode_row_and_column() {
        // I: indices 1,3,5,7 -> rows 0..4, column 1
        assert_eq!(
            Shape::I.offsets(),
            [
                Position::new(0, 30),
                Position::new(30, 30),
                Position::new(60, 30),
                Position::new(90, 30),
            ]
        );
    }

    #[test]
    fn test_random_shape_is_in_table() {
        for _ in 0..50 {
            assert!(Shape::ALL.contains(&Shape::random()));
        }
    }
}

#[cfg(test)]
mod brick_tests {
    use crate::brick::{Area, Brick, Position, Shape, fill_color};
    use crate::game::BLOCK_SIZE;

    fn play_area() -> Area {
        Area::new(300, 600)
    }

    #[test]
    fn test_every_shape_has_four_blocks_from_the_table() {
        let offset = Position::new(60, 90);
        for shape in Shape::ALL {
            let brick = Brick::with_shape(shape, offset);
            let positions = brick.positions();
            assert_eq!(positions.len(), 4);

            for (p, n) in positions.iter().zip(shape.cells()) {
                let row = i16::from(n / 2);
                let col = i16::from(n % 2);
                assert_eq!(p.x - offset.x, row * BLOCK_SIZE);
                assert_eq!(p.y - offset.y, col * BLOCK_SIZE);
            }
        }
    }

    #[test]
    fn test_o_brick_at_origin() {
        let brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        assert_eq!(
            brick.positions(),
            [
                Position::new(30, 0),
                Position::new(30, 30),
                Position::new(60, 0),
                Position::new(60, 30),
            ]
        );
    }

    #[test]
    fn test_default_constructor_uses_first_shape() {
        let brick = Brick::new(Position::new(0, 0));
        assert_eq!(brick.shape(), Shape::I);
    }

    #[test]
    fn test_color_seed_is_deterministic() {
        let a = Brick::with_color_seed(Shape::T, Position::default(), 3);
        let b = Brick::with_color_seed(Shape::T, Position::default(), 10);
        assert_eq!(a.color(), fill_color(3));
        // 3 and 10 fall in the same colour bucket
        assert_eq!(a.color(), b.color());
    }

    #[test]
    fn test_inbound() {
        let brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        assert!(brick.inbound(play_area()));

        // I blocks at x = 211, 241, 271, 301
        let brick = Brick::with_shape(Shape::I, Position::new(211, 0));
        assert_eq!(brick.positions()[3].x, 301);
        assert!(!brick.inbound(play_area()));

        let brick = Brick::with_shape(Shape::O, Position::new(-31, 0));
        assert!(!brick.inbound(play_area()));
    }

    #[test]
    fn test_inbound_is_pure() {
        let brick = Brick::with_shape(Shape::S, Position::new(120, 300));
        let before = brick.clone();

        let first = brick.inbound(play_area());
        let second = brick.inbound(play_area());

        assert_eq!(first, second);
        assert_eq!(brick, before);
    }

    #[test]
    fn test_rotate_rejected_leaves_brick_untouched() {
        // The last I block would rotate to y = -30
        let mut brick = Brick::with_shape(Shape::I, Position::new(0, 0));
        let before = brick.positions();

        assert!(!brick.rotate(play_area()));
        assert_eq!(brick.positions(), before);
    }

    #[test]
    fn test_rotate_counterclockwise_about_second_block() {
        let mut brick = Brick::with_shape(Shape::I, Position::new(0, 60));

        assert!(brick.rotate(play_area()));
        assert_eq!(
            brick.positions(),
            [
                Position::new(30, 120),
                Position::new(30, 90),
                Position::new(30, 60),
                Position::new(30, 30),
            ]
        );
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        let mut brick = Brick::with_shape(Shape::I, Position::new(60, 60));
        let start = brick.positions();

        for _ in 0..4 {
            assert!(brick.rotate(play_area()));
        }

        assert_eq!(brick.positions(), start);
    }

    #[test]
    fn test_move_round_trip() {
        let mut brick = Brick::with_shape(Shape::L, Position::new(90, 30));
        let start = brick.positions();
        let offset = Position::new(30, -60);

        brick.move_by(offset);
        for (moved, original) in brick.positions().iter().zip(start.iter()) {
            assert_eq!(*moved, *original + offset);
        }

        brick.move_by(-offset);
        assert_eq!(brick.positions(), start);
    }

    #[test]
    fn test_move_round_trip_at_extremes() {
        let mut brick = Brick::with_shape(Shape::Z, Position::new(0, 0));
        let start = brick.positions();
        let offset = Position::new(i16::MAX, i16::MIN + 1);

        brick.move_by(offset);
        brick.move_by(-offset);

        assert_eq!(brick.positions(), start);
    }

    #[test]
    fn test_move_does_not_clamp() {
        let mut brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        brick.move_by(Position::new(-90, 0));
        assert!(!brick.inbound(play_area()));
    }

    #[test]
    fn test_get_position_copies_into_buffer() {
        let brick = Brick::with_shape(Shape::J, Position::new(30, 30));
        let mut out = [Position::default(); 4];

        brick.get_position(&mut out);

        assert_eq!(out, brick.positions());
    }

    #[test]
    fn test_cells() {
        let brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        assert_eq!(
            brick.cells(),
            [Some((1, 0)), Some((1, 1)), Some((2, 0)), Some((2, 1))]
        );

        let brick = Brick::with_shape(Shape::O, Position::new(-60, 0));
        assert_eq!(brick.cells()[0], None);
    }
}

#[cfg(test)]
mod render_tests {
    use crate::brick::{Brick, Position, Shape};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::widgets::Widget;

    #[test]
    fn test_render_draws_two_columns_per_block() {
        let brick = Brick::with_shape(Shape::O, Position::new(0, 0));
        let area = Rect::new(0, 0, 20, 20);
        let mut buf = Buffer::empty(area);

        (&brick).render(area, &mut buf);

        // O occupies board columns 1-2, rows 0-1
        for (x, y) in [(2, 0), (3, 0), (4, 0), (5, 0), (2, 1), (5, 1)] {
            let cell = buf.cell((x, y)).unwrap();
            assert_eq!(cell.symbol(), "█");
            assert_eq!(cell.fg, brick.color());
        }
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((6, 0)).unwrap().symbol(), " ");
        assert_eq!(buf.cell((2, 2)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_respects_area_offset_and_clipping() {
        let brick = Brick::with_shape(Shape::I, Position::new(0, 0));
        let area = Rect::new(1, 1, 4, 4);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 10));

        (&brick).render(area, &mut buf);

        // I lies on row 1; only columns 0 and 1 fit in a 4-wide area
        assert_eq!(buf.cell((1, 2)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((4, 2)).unwrap().symbol(), "█");
        assert_eq!(buf.cell((5, 2)).unwrap().symbol(), " ");
    }

    #[test]
    fn test_render_does_not_mutate_brick() {
        let brick = Brick::with_shape(Shape::T, Position::new(30, 30));
        let before = brick.clone();
        let area = Rect::new(0, 0, 20, 20);
        let mut buf = Buffer::empty(area);

        (&brick).render(area, &mut buf);

        assert_eq!(brick, before);
    }
}
