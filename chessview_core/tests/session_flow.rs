//! 結合テスト: `Session` を通した駒の持ち上げ/配置の流れを確認する。

/// 統合テスト本体。
#[cfg(test)]
mod tests {
    use chessview_core::board::{PackedBoard, PieceKind, Square, notation_to_square};
    use chessview_core::{Gesture, Session, SessionError};

    /// テスト出力にログを流す。複数回呼ばれても良い。
    fn init_tracing() {
        let _: Result<(), _> = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    /// 表記からマスを作る（テスト用）。
    fn at(text: &str) -> Square {
        notation_to_square(text).unwrap_or_else(|err| panic!("{err}"))
    }

    /// 合法性に関係なく、クリック2回で任意の移動ができる。
    #[test]
    fn any_click_pair_moves_the_piece() {
        init_tracing();
        let mut session = Session::new();

        // 同じ色が連続して動いても、ルークが駒を飛び越えても拒否しない。
        for (from, to) in [("a1", "a5"), ("a5", "h5"), ("h5", "e8")] {
            assert_eq!(session.click(at(from)), Gesture::Selected(at(from)));
            let gesture = session.click(at(to));
            assert!(
                matches!(gesture, Gesture::Moved { .. }),
                "expected a move, got={gesture:?}"
            );
        }

        let board = session.board();
        assert_eq!(board.piece_at(at("e8")), PieceKind::WhiteRook);
        assert_eq!(board.piece_at(at("a1")), PieceKind::Empty);
        assert_eq!(board.occupied_squares().count(), 31);
    }

    /// テキスト入力とクリックを混ぜても同じ盤面になる。
    #[test]
    fn text_and_click_moves_agree() {
        init_tracing();
        let mut by_text = Session::new();
        let mut by_click = Session::new();

        let moves = ["e2e4", "e7e5", "g1f3", "b8c6"];
        for text in moves {
            let result = by_text.apply_text_move(text);
            assert!(result.is_ok(), "text move failed: {text} {result:?}");
        }

        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
            by_click.click(at(from));
            by_click.click(at(to));
        }

        assert_eq!(by_text.board(), by_click.board());
        assert_eq!(
            by_text.board().render(),
            "\
r . b q k b n r
p p p p . p p p
. . n . . . . .
. . . . p . . .
. . . . P . . .
. . . . . N . .
P P P P . P P P
R N B Q K B . R
"
        );
    }

    /// 取った駒は `Gesture::Moved` で返り、盤面からは消える。
    #[test]
    fn capture_reports_overwritten_piece() {
        init_tracing();
        let mut session = Session::with_board(PackedBoard::standard());
        let result = session.apply_text_move("d1d8");
        assert_eq!(
            result,
            Ok(Gesture::Moved {
                from: at("d1"),
                to: at("d8"),
                captured: PieceKind::BlackQueen,
            })
        );
        let queens = session
            .board()
            .occupied_squares()
            .filter(|(_square, kind)| *kind == PieceKind::BlackQueen)
            .count();
        assert_eq!(queens, 0);
    }

    /// 不正な入力は盤面を変えない。
    #[test]
    fn rejected_text_leaves_board_untouched() {
        init_tracing();
        let mut session = Session::new();
        let before = *session.board();

        assert!(matches!(
            session.apply_text_move("xx"),
            Err(SessionError::Notation(_))
        ));
        assert_eq!(
            session.apply_text_move("d4d5"),
            Err(SessionError::EmptySource(at("d4")))
        );
        assert_eq!(*session.board(), before);
    }
}
