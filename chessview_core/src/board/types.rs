use core::fmt;

/// 駒の色。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// 白（盤の下側、1段目から始まる）。
    White,
    /// 黒（盤の上側、8段目から始まる）。
    Black,
}

impl Color {
    /// 相手側の色を返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// 駒の種類（色を含まない）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PieceType {
    /// ポーン。
    Pawn,
    /// ナイト。
    Knight,
    /// ビショップ。
    Bishop,
    /// ルーク。
    Rook,
    /// クイーン。
    Queen,
    /// キング。
    King,
}

/// 1マスの占有状態。
///
/// 空きマス `Empty` と（色 × 種類）の12種、合わせて13値で閉じている。
/// 各値は 0..=12 の4ビット値に対応し、盤面表現ではこの値がそのまま格納される。
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PieceKind {
    /// 空きマス（0）。
    #[default]
    Empty,
    /// 白ポーン（1）。
    WhitePawn,
    /// 黒ポーン（2）。
    BlackPawn,
    /// 白ナイト（3）。
    WhiteKnight,
    /// 黒ナイト（4）。
    BlackKnight,
    /// 白ビショップ（5）。
    WhiteBishop,
    /// 黒ビショップ（6）。
    BlackBishop,
    /// 白ルーク（7）。
    WhiteRook,
    /// 黒ルーク（8）。
    BlackRook,
    /// 白クイーン（9）。
    WhiteQueen,
    /// 黒クイーン（10）。
    BlackQueen,
    /// 白キング（11）。
    WhiteKing,
    /// 黒キング（12）。
    BlackKing,
}

impl PieceKind {
    /// 全13値（4ビット値の昇順）。
    pub const ALL: [Self; 13] = [
        Self::Empty,
        Self::WhitePawn,
        Self::BlackPawn,
        Self::WhiteKnight,
        Self::BlackKnight,
        Self::WhiteBishop,
        Self::BlackBishop,
        Self::WhiteRook,
        Self::BlackRook,
        Self::WhiteQueen,
        Self::BlackQueen,
        Self::WhiteKing,
        Self::BlackKing,
    ];

    /// 色と種類から駒を生成する。
    #[inline]
    #[must_use]
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        match (color, piece_type) {
            (Color::White, PieceType::Pawn) => Self::WhitePawn,
            (Color::Black, PieceType::Pawn) => Self::BlackPawn,
            (Color::White, PieceType::Knight) => Self::WhiteKnight,
            (Color::Black, PieceType::Knight) => Self::BlackKnight,
            (Color::White, PieceType::Bishop) => Self::WhiteBishop,
            (Color::Black, PieceType::Bishop) => Self::BlackBishop,
            (Color::White, PieceType::Rook) => Self::WhiteRook,
            (Color::Black, PieceType::Rook) => Self::BlackRook,
            (Color::White, PieceType::Queen) => Self::WhiteQueen,
            (Color::Black, PieceType::Queen) => Self::BlackQueen,
            (Color::White, PieceType::King) => Self::WhiteKing,
            (Color::Black, PieceType::King) => Self::BlackKing,
        }
    }

    /// 4ビット値（0..=12）から駒を復元する。
    ///
    /// # Errors
    ///
    /// 13 以上の値は `DecodeError::InvalidNibble` を返す。
    #[inline]
    pub const fn from_nibble(value: u8) -> Result<Self, DecodeError> {
        let kind = match value {
            0 => Self::Empty,
            1 => Self::WhitePawn,
            2 => Self::BlackPawn,
            3 => Self::WhiteKnight,
            4 => Self::BlackKnight,
            5 => Self::WhiteBishop,
            6 => Self::BlackBishop,
            7 => Self::WhiteRook,
            8 => Self::BlackRook,
            9 => Self::WhiteQueen,
            10 => Self::BlackQueen,
            11 => Self::WhiteKing,
            12 => Self::BlackKing,
            _ => return Err(DecodeError::InvalidNibble { value }),
        };
        Ok(kind)
    }

    /// 4ビット値（0..=12）を返す。
    #[inline]
    #[must_use]
    pub const fn to_nibble(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WhitePawn => 1,
            Self::BlackPawn => 2,
            Self::WhiteKnight => 3,
            Self::BlackKnight => 4,
            Self::WhiteBishop => 5,
            Self::BlackBishop => 6,
            Self::WhiteRook => 7,
            Self::BlackRook => 8,
            Self::WhiteQueen => 9,
            Self::BlackQueen => 10,
            Self::WhiteKing => 11,
            Self::BlackKing => 12,
        }
    }

    /// 空きマスかどうかを返す。
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 駒の色を返す（空きマスは `None`）。
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::WhitePawn
            | Self::WhiteKnight
            | Self::WhiteBishop
            | Self::WhiteRook
            | Self::WhiteQueen
            | Self::WhiteKing => Some(Color::White),
            Self::BlackPawn
            | Self::BlackKnight
            | Self::BlackBishop
            | Self::BlackRook
            | Self::BlackQueen
            | Self::BlackKing => Some(Color::Black),
        }
    }

    /// 駒の種類を返す（空きマスは `None`）。
    #[inline]
    #[must_use]
    pub const fn piece_type(self) -> Option<PieceType> {
        match self {
            Self::Empty => None,
            Self::WhitePawn | Self::BlackPawn => Some(PieceType::Pawn),
            Self::WhiteKnight | Self::BlackKnight => Some(PieceType::Knight),
            Self::WhiteBishop | Self::BlackBishop => Some(PieceType::Bishop),
            Self::WhiteRook | Self::BlackRook => Some(PieceType::Rook),
            Self::WhiteQueen | Self::BlackQueen => Some(PieceType::Queen),
            Self::WhiteKing | Self::BlackKing => Some(PieceType::King),
        }
    }

    /// テキスト表示用の1文字（白は大文字、黒は小文字、空きは `.`）。
    #[inline]
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '.',
            Self::WhitePawn => 'P',
            Self::BlackPawn => 'p',
            Self::WhiteKnight => 'N',
            Self::BlackKnight => 'n',
            Self::WhiteBishop => 'B',
            Self::BlackBishop => 'b',
            Self::WhiteRook => 'R',
            Self::BlackRook => 'r',
            Self::WhiteQueen => 'Q',
            Self::BlackQueen => 'q',
            Self::WhiteKing => 'K',
            Self::BlackKing => 'k',
        }
    }

    /// `glyph` の逆変換。
    #[inline]
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        let kind = match glyph {
            '.' => Self::Empty,
            'P' => Self::WhitePawn,
            'p' => Self::BlackPawn,
            'N' => Self::WhiteKnight,
            'n' => Self::BlackKnight,
            'B' => Self::WhiteBishop,
            'b' => Self::BlackBishop,
            'R' => Self::WhiteRook,
            'r' => Self::BlackRook,
            'Q' => Self::WhiteQueen,
            'q' => Self::BlackQueen,
            'K' => Self::WhiteKing,
            'k' => Self::BlackKing,
            _ => return None,
        };
        Some(kind)
    }

    /// 駒画像のファイル名（空きマスは `None`）。
    ///
    /// 色の頭文字（`w`/`b`）と駒の小文字1文字を繋げた名前になる。
    #[inline]
    #[must_use]
    pub const fn asset_file_name(self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::WhitePawn => Some("wp.png"),
            Self::BlackPawn => Some("bp.png"),
            Self::WhiteKnight => Some("wn.png"),
            Self::BlackKnight => Some("bn.png"),
            Self::WhiteBishop => Some("wb.png"),
            Self::BlackBishop => Some("bb.png"),
            Self::WhiteRook => Some("wr.png"),
            Self::BlackRook => Some("br.png"),
            Self::WhiteQueen => Some("wq.png"),
            Self::BlackQueen => Some("bq.png"),
            Self::WhiteKing => Some("wk.png"),
            Self::BlackKing => Some("bk.png"),
        }
    }
}

/// 盤面上のマス（0..=63のインデックス）。
///
/// `rank * 8 + file` の順（a1 = 0, h1 = 7, a8 = 56, h8 = 63）。
/// 生成時に範囲チェックするため、保持している値は常に 0..=63。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Square(
    /// `rank * 8 + file` に対応する0..=63の値。
    u8,
);

impl Square {
    /// 盤の一辺の長さ。
    pub const BOARD_LEN: u8 = 8;

    /// マスの総数。
    pub const COUNT: u8 = 64;

    /// 全64マスを a1, b1, ..., h8 の順に返す。
    #[inline]
    pub fn all() -> impl Iterator<Item = Self> {
        (u8::MIN..Self::COUNT).map(Self)
    }

    /// 列（file, 0..=7）と段（rank, 0..=7）から `Square` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file >= Self::BOARD_LEN || rank >= Self::BOARD_LEN {
            return None;
        }

        let mut idx = match rank.checked_mul(Self::BOARD_LEN) {
            Some(value) => value,
            None => return None,
        };

        idx = match idx.checked_add(file) {
            Some(value) => value,
            None => return None,
        };

        Some(Self(idx))
    }

    /// `usize` のインデックスから `Square` を生成する。
    ///
    /// # Errors
    ///
    /// 64 以上の場合、`SquareError::OutOfRange` を返す。
    #[inline]
    pub fn from_index(index: usize) -> Result<Self, SquareError> {
        u8::try_from(index)
            .map_err(|_err| SquareError::OutOfRange { index })
            .and_then(Self::new)
    }

    /// 0..=63 のインデックスから `Square` を生成する。
    ///
    /// # Errors
    ///
    /// 64 以上の場合、`SquareError::OutOfRange` を返す。
    #[inline]
    pub fn new(index: u8) -> Result<Self, SquareError> {
        if index >= Self::COUNT {
            return Err(SquareError::OutOfRange {
                index: usize::from(index),
            });
        }
        Ok(Self(index))
    }

    /// 列（0 = a .. 7 = h）を返す。
    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        match self.0.checked_rem(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// 0..=63 のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 段（0 = 1段目 .. 7 = 8段目）を返す。
    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self.0.checked_div(Self::BOARD_LEN) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}

/// マスのインデックスが範囲外。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SquareError {
    /// 0..=63 に収まらない。
    OutOfRange {
        /// 渡されたインデックス。
        index: usize,
    },
}

impl fmt::Display for SquareError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::OutOfRange { index } => write!(f, "square index {index} is outside 0..=63"),
        }
    }
}

impl core::error::Error for SquareError {}

/// 4ビット値を駒へ復元できなかった理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    /// 0..=12 以外の値。
    InvalidNibble {
        /// 読み取った値。
        value: u8,
    },
}

impl fmt::Display for DecodeError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidNibble { value } => write!(f, "nibble {value} is not a piece kind"),
        }
    }
}

impl core::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use super::{Color, DecodeError, PieceKind, PieceType, Square, SquareError};

    #[test]
    fn nibble_values_follow_declaration_order() {
        for (expected, kind) in (u8::MIN..).zip(PieceKind::ALL) {
            assert_eq!(kind.to_nibble(), expected);
            assert_eq!(PieceKind::from_nibble(expected), Ok(kind));
        }
    }

    #[test]
    fn from_nibble_rejects_values_above_twelve() {
        for value in 13_u8..=15 {
            assert_eq!(
                PieceKind::from_nibble(value),
                Err(DecodeError::InvalidNibble { value })
            );
        }
        assert!(PieceKind::from_nibble(u8::MAX).is_err());
    }

    #[test]
    fn color_and_type_recompose_every_piece() {
        for kind in PieceKind::ALL {
            match (kind.color(), kind.piece_type()) {
                (Some(color), Some(piece_type)) => {
                    assert_eq!(PieceKind::new(color, piece_type), kind);
                }
                (None, None) => assert!(kind.is_empty()),
                other => panic!("inconsistent color/type for {kind:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn glyph_case_follows_color() {
        for kind in PieceKind::ALL {
            let glyph = kind.glyph();
            assert_eq!(PieceKind::from_glyph(glyph), Some(kind));
            match kind.color() {
                Some(Color::White) => assert!(glyph.is_ascii_uppercase(), "{kind:?}"),
                Some(Color::Black) => assert!(glyph.is_ascii_lowercase(), "{kind:?}"),
                None => assert_eq!(glyph, '.'),
            }
        }
        assert_eq!(PieceKind::from_glyph('x'), None);
    }

    #[test]
    fn asset_names_are_unique_and_skip_empty() {
        assert_eq!(PieceKind::Empty.asset_file_name(), None);
        assert_eq!(PieceKind::WhiteKnight.asset_file_name(), Some("wn.png"));
        assert_eq!(PieceKind::BlackKing.asset_file_name(), Some("bk.png"));

        let mut names: Vec<&str> = PieceKind::ALL
            .iter()
            .filter_map(|kind| kind.asset_file_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn square_coordinates_are_rank_major() {
        let e1 = Square::from_file_rank(4, 0);
        assert_eq!(e1.map(Square::index), Some(4));

        let a8 = Square::from_file_rank(0, 7);
        assert_eq!(a8.map(Square::index), Some(56));

        for square in Square::all() {
            assert_eq!(
                Square::from_file_rank(square.file(), square.rank()),
                Some(square)
            );
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn square_construction_is_bounds_checked() {
        assert!(Square::new(63).is_ok());
        assert_eq!(Square::new(64), Err(SquareError::OutOfRange { index: 64 }));
        assert_eq!(
            Square::from_index(1000),
            Err(SquareError::OutOfRange { index: 1000 })
        );
        assert_eq!(Square::from_file_rank(8, 0), None);
        assert_eq!(Square::from_file_rank(0, 8), None);
    }

    #[test]
    fn opponent_swaps_color() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(
            PieceKind::new(Color::White.opponent(), PieceType::Queen),
            PieceKind::BlackQueen
        );
    }
}
