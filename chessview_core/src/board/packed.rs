use core::fmt;

use tracing::{debug, trace};

use crate::board::types::{Color, DecodeError, PieceKind, PieceType, Square, SquareError};

/// 盤面を構成する `u64` の個数。
const WORDS: usize = 4;

/// 1ワードに収まるマス数。
const SQUARES_PER_WORD: u8 = 16;

/// 1マスあたりのビット数。
const BITS_PER_SQUARE: u32 = 4;

/// 1マス分（4ビット）のマスク。
const NIBBLE_MASK: u64 = 0xF;

/// `render` の出力長（8段 × 「8文字 + 空白7個 + 改行」）。
const RENDER_LEN: usize = 128;

/// 1段目・8段目に並ぶ駒（a列から h列の順）。
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 白の後列（1段目）。
const WHITE_BACK: u8 = 0;

/// 白のポーン列（2段目）。
const WHITE_PAWNS: u8 = 1;

/// 黒のポーン列（7段目）。
const BLACK_PAWNS: u8 = 6;

/// 黒の後列（8段目）。
const BLACK_BACK: u8 = 7;

/// 64マスの占有状態を4ビットずつ詰めた盤面。
///
/// `words[q]` がマス `16q..16q+16` を保持し、マス `s` は
/// ビット `4 * (s % 16)` から4ビットを占める。
/// 書き込みは必ず `set_piece_at` を通り `PieceKind` の値（0..=12）しか
/// 入らないため、13..=15 のビット列は現れない。
///
/// 手番・キャスリング権・棋譜は持たない（占有のみ）。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PackedBoard {
    /// 16マスずつのビット列。
    words: [u64; WORDS],
}

impl PackedBoard {
    /// 全マスを空にする。
    #[inline]
    pub fn clear(&mut self) {
        self.words = [u64::MIN; WORDS];
    }

    /// 初期配置を書き込む。
    ///
    /// 1・2・7・8段目のみを上書きし、3〜6段目はそのまま残す。
    /// 何度呼んでも結果は同じ。
    #[inline]
    pub fn initialize_standard(&mut self) {
        for (file, piece_type) in (u8::MIN..).zip(BACK_RANK) {
            self.place(file, WHITE_BACK, PieceKind::new(Color::White, piece_type));
            self.place(file, WHITE_PAWNS, PieceKind::WhitePawn);
            self.place(file, BLACK_PAWNS, PieceKind::BlackPawn);
            self.place(file, BLACK_BACK, PieceKind::new(Color::Black, piece_type));
        }
        debug!("standard position initialized");
    }

    /// 駒を `from` から `to` へ動かし、`to` に元々あった駒を返す。
    ///
    /// 合法性は一切検査しない。`from == to` の場合は何もせず `Empty` を返す。
    #[inline]
    #[must_use]
    pub fn move_piece(&mut self, from: Square, to: Square) -> PieceKind {
        if from == to {
            return PieceKind::Empty;
        }

        let moving = self.piece_at(from);
        let captured = self.piece_at(to);
        self.set_piece_at(to, moving);
        self.set_piece_at(from, PieceKind::Empty);
        captured
    }

    /// 全マスが空の盤面を返す。
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [u64::MIN; WORDS],
        }
    }

    /// 駒のあるマスを、インデックスの昇順で返す。
    #[inline]
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, PieceKind)> {
        let board = *self;
        Square::all().filter_map(move |square| {
            let piece = board.piece_at(square);
            (!piece.is_empty()).then_some((square, piece))
        })
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> PieceKind {
        let (word, shift) = locate(square);
        let bits = self.words.get(word).copied().unwrap_or(u64::MIN);
        let nibble = bits.wrapping_shr(shift) & NIBBLE_MASK;

        // 書き込み経路が 0..=12 しか入れないので復元は失敗しない。
        u8::try_from(nibble)
            .ok()
            .and_then(|value| PieceKind::from_nibble(value).ok())
            .unwrap_or(PieceKind::Empty)
    }

    /// インデックス指定で駒を返す。
    ///
    /// # Errors
    ///
    /// 64 以上の場合、`SquareError::OutOfRange` を返す。
    #[inline]
    pub fn piece_at_index(&self, index: usize) -> Result<PieceKind, SquareError> {
        Square::from_index(index).map(|square| self.piece_at(square))
    }

    /// 盤面をテキストで返す（8段目が先頭、1段目が末尾）。
    #[inline]
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(RENDER_LEN);
        for rank in (u8::MIN..Square::BOARD_LEN).rev() {
            for file in u8::MIN..Square::BOARD_LEN {
                let Some(square) = Square::from_file_rank(file, rank) else {
                    continue;
                };
                if file != u8::MIN {
                    out.push(' ');
                }
                out.push(self.piece_at(square).glyph());
            }
            out.push('\n');
        }
        out
    }

    /// 指定マスを `piece` で上書きする。
    ///
    /// 元の駒は捨てられる（取られた駒の記録はしない）。他のマスのビットは変化しない。
    #[inline]
    pub fn set_piece_at(&mut self, square: Square, piece: PieceKind) {
        let (word, shift) = locate(square);
        if let Some(bits) = self.words.get_mut(word) {
            let value = u64::from(piece.to_nibble()) & NIBBLE_MASK;
            *bits &= !NIBBLE_MASK.wrapping_shl(shift);
            *bits |= value.wrapping_shl(shift);
        }
        trace!(%square, ?piece, "square written");
    }

    /// インデックス指定で駒を書き込む。
    ///
    /// # Errors
    ///
    /// 64 以上の場合、`SquareError::OutOfRange` を返す（盤面は変化しない）。
    #[inline]
    pub fn set_piece_at_index(&mut self, index: usize, piece: PieceKind) -> Result<(), SquareError> {
        let square = Square::from_index(index)?;
        self.set_piece_at(square, piece);
        Ok(())
    }

    /// 初期配置の盤面を返す。
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.initialize_standard();
        board
    }

    /// 生のワード列から盤面を生成する。
    ///
    /// # Errors
    ///
    /// どこかのマスが 13..=15 を含む場合、`DecodeError::InvalidNibble` を返す。
    #[inline]
    pub fn try_from_words(words: [u64; WORDS]) -> Result<Self, DecodeError> {
        for bits in words {
            for slot in u8::MIN..SQUARES_PER_WORD {
                let shift = u32::from(slot).wrapping_mul(BITS_PER_SQUARE);
                let nibble = bits.wrapping_shr(shift) & NIBBLE_MASK;
                let value = u8::try_from(nibble).unwrap_or(u8::MAX);
                PieceKind::from_nibble(value)?;
            }
        }
        Ok(Self { words })
    }

    /// 生のワード列を返す。
    #[inline]
    #[must_use]
    pub const fn words(&self) -> [u64; WORDS] {
        self.words
    }

    /// 列・段を指定して書き込む（初期配置用）。
    fn place(&mut self, file: u8, rank: u8, piece: PieceKind) {
        if let Some(square) = Square::from_file_rank(file, rank) {
            self.set_piece_at(square, piece);
        }
    }
}

impl fmt::Display for PackedBoard {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// マスが属するワード番号と、ワード内のビット位置を返す。
fn locate(square: Square) -> (usize, u32) {
    let index = square.index();
    let word = index.checked_div(SQUARES_PER_WORD).unwrap_or(u8::MIN);
    let slot = index.checked_rem(SQUARES_PER_WORD).unwrap_or(u8::MIN);
    (usize::from(word), u32::from(slot).wrapping_mul(BITS_PER_SQUARE))
}
