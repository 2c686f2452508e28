use core::fmt;

use tracing::debug;

use crate::board::notation::{NotationError, parse_move};
use crate::board::packed::PackedBoard;
use crate::board::types::{PieceKind, Square};

/// 1回の入力（クリック/テキスト）の結果。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Gesture {
    /// 何も起きなかった（未選択で空きマスをクリック）。
    Ignored,
    /// 駒を持ち上げた。
    Selected(Square),
    /// 持ち上げた駒を元のマスに戻した。
    Deselected(Square),
    /// 駒を置いた。
    Moved {
        /// 移動元。
        from: Square,
        /// 移動先。
        to: Square,
        /// 移動先に元々あった駒（無ければ `Empty`）。
        captured: PieceKind,
    },
}

/// テキスト入力による移動に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    /// 指し手表記が読めない。
    Notation(NotationError),
    /// 移動元に駒が無い。
    EmptySource(Square),
}

impl fmt::Display for SessionError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Notation(err) => write!(f, "invalid move text: {err}"),
            Self::EmptySource(square) => write!(f, "no piece on {square}"),
        }
    }
}

impl core::error::Error for SessionError {
    #[inline]
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Notation(err) => Some(err),
            Self::EmptySource(_) => None,
        }
    }
}

impl From<NotationError> for SessionError {
    #[inline]
    fn from(err: NotationError) -> Self {
        Self::Notation(err)
    }
}

impl Default for Session {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// 盤面と「持ち上げ中の駒」をまとめた操作状態。
///
/// ルールは一切検査しない。クリック2回（選択→配置）で駒を動かし、
/// 移動先の駒は上書きされる。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Session {
    /// 盤面。
    board: PackedBoard,
    /// 持ち上げ中のマス。
    selected: Option<Square>,
}

impl Session {
    /// テキスト（`"e2e4"`）で駒を動かす。
    ///
    /// 成否にかかわらず選択状態は解除される。移動元と移動先が同じ場合は
    /// クリックと同じく `Gesture::Deselected` を返し、盤面は変えない。
    ///
    /// # Errors
    ///
    /// - `SessionError::Notation`: 表記が読めない場合
    /// - `SessionError::EmptySource`: 移動元に駒が無い場合
    #[inline]
    pub fn apply_text_move(&mut self, text: &str) -> Result<Gesture, SessionError> {
        self.selected = None;

        let (from, to) = parse_move(text)?;
        if self.board.piece_at(from).is_empty() {
            return Err(SessionError::EmptySource(from));
        }
        if from == to {
            return Ok(Gesture::Deselected(from));
        }

        Ok(self.drop_piece(from, to))
    }

    /// 盤面を返す。
    #[inline]
    #[must_use]
    pub const fn board(&self) -> &PackedBoard {
        &self.board
    }

    /// マスのクリックを処理する。
    ///
    /// - 未選択: 駒があれば選択する。空きマスなら何もしない。
    /// - 選択中に同じマス: 選択を解除する。
    /// - 選択中に別のマス: 駒を移動する（移動先の駒は取られる）。
    #[inline]
    pub fn click(&mut self, square: Square) -> Gesture {
        let Some(from) = self.selected else {
            if self.board.piece_at(square).is_empty() {
                return Gesture::Ignored;
            }
            self.selected = Some(square);
            return Gesture::Selected(square);
        };

        self.selected = None;
        if from == square {
            return Gesture::Deselected(square);
        }

        self.drop_piece(from, square)
    }

    /// 初期配置から始める。
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(PackedBoard::standard())
    }

    /// 初期配置・未選択に戻す。
    #[inline]
    pub fn reset(&mut self) {
        self.board = PackedBoard::standard();
        self.selected = None;
        debug!("session reset");
    }

    /// 持ち上げ中のマスを返す。
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// 任意の盤面から始める。
    #[inline]
    #[must_use]
    pub const fn with_board(board: PackedBoard) -> Self {
        Self {
            board,
            selected: None,
        }
    }

    /// `from` の駒を `to` へ置く。
    fn drop_piece(&mut self, from: Square, to: Square) -> Gesture {
        let captured = self.board.move_piece(from, to);
        debug!(%from, %to, ?captured, "piece moved");
        Gesture::Moved { from, to, captured }
    }
}
