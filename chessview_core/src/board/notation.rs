//! マス番号と代数表記（`"e4"` など）の相互変換。

use core::fmt;
use core::str::FromStr;

use crate::board::types::Square;

/// 列を表す文字（a..h）。
const FILES: &str = "abcdefgh";

/// 段を表す文字（1..8）。
const RANKS: &str = "12345678";

/// マス表記の文字数。
const SQUARE_LEN: usize = 2;

/// 指し手表記（`"e2e4"`）の文字数。
const MOVE_LEN: usize = 4;

/// 代数表記の解析に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum NotationError {
    /// 文字数が合わない。
    InvalidLength {
        /// 入力の文字数。
        len: usize,
    },
    /// 列が a..h ではない。
    InvalidFile(char),
    /// 段が 1..8 ではない。
    InvalidRank(char),
}

impl fmt::Display for NotationError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidLength { len } => write!(f, "unexpected notation length {len}"),
            Self::InvalidFile(file) => write!(f, "file {file:?} is not in a..h"),
            Self::InvalidRank(rank) => write!(f, "rank {rank:?} is not in 1..8"),
        }
    }
}

impl core::error::Error for NotationError {}

/// 代数表記をマスへ変換する。
///
/// インデックスは `rank * 8 + file`（`PackedBoard` と同じ並び）。
///
/// # Errors
///
/// - `NotationError::InvalidLength`: ちょうど2文字でない場合
/// - `NotationError::InvalidFile`: 1文字目が a..h でない場合
/// - `NotationError::InvalidRank`: 2文字目が 1..8 でない場合
#[inline]
pub fn notation_to_square(text: &str) -> Result<Square, NotationError> {
    let mut chars = text.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(NotationError::InvalidLength {
            len: text.chars().count(),
        });
    };

    let file_index = position_in(FILES, file).ok_or(NotationError::InvalidFile(file))?;
    let rank_index = position_in(RANKS, rank).ok_or(NotationError::InvalidRank(rank))?;

    Square::from_file_rank(file_index, rank_index).ok_or(NotationError::InvalidFile(file))
}

/// `"e2e4"` 形式の指し手を（移動元、移動先）へ変換する。前後の空白は無視する。
///
/// # Errors
///
/// 4文字でない場合は `NotationError::InvalidLength`、各マスの解析に失敗した場合は
/// `notation_to_square` と同じエラーを返す。
#[inline]
pub fn parse_move(text: &str) -> Result<(Square, Square), NotationError> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len != MOVE_LEN {
        return Err(NotationError::InvalidLength { len });
    }

    let split = trimmed
        .char_indices()
        .nth(SQUARE_LEN)
        .map_or(trimmed.len(), |(offset, _ch)| offset);
    let (from, to) = trimmed
        .split_at_checked(split)
        .ok_or(NotationError::InvalidLength { len })?;

    Ok((notation_to_square(from)?, notation_to_square(to)?))
}

/// マスを代数表記へ変換する（例: 0 → `"a1"`, 63 → `"h8"`）。
#[inline]
#[must_use]
pub fn square_to_notation(square: Square) -> String {
    square.to_string()
}

impl fmt::Display for Square {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char_at(FILES, self.file()),
            char_at(RANKS, self.rank())
        )
    }
}

impl FromStr for Square {
    type Err = NotationError;

    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        notation_to_square(text)
    }
}

/// `table` の `index` 番目の文字。`Square` の座標は常に 0..=7 なので欠けることはない。
fn char_at(table: &str, index: u8) -> char {
    table.chars().nth(usize::from(index)).unwrap_or('?')
}

/// `table` 内での `ch` の位置。
fn position_in(table: &str, ch: char) -> Option<u8> {
    table
        .chars()
        .position(|candidate| candidate == ch)
        .and_then(|pos| u8::try_from(pos).ok())
}

#[cfg(test)]
mod tests {
    use super::{NotationError, notation_to_square, parse_move, square_to_notation};
    use crate::board::types::Square;

    fn sq(index: u8) -> Square {
        Square::new(index).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn corners_map_to_expected_names() {
        assert_eq!(square_to_notation(sq(0)), "a1");
        assert_eq!(square_to_notation(sq(7)), "h1");
        assert_eq!(square_to_notation(sq(56)), "a8");
        assert_eq!(square_to_notation(sq(63)), "h8");
        assert_eq!(sq(28).to_string(), "e4");
    }

    #[test]
    fn display_and_square_to_notation_agree() {
        for square in Square::all() {
            assert_eq!(square_to_notation(square), format!("{square}"));
        }
    }

    #[test]
    fn round_trip_over_all_squares() {
        for square in Square::all() {
            let text = square_to_notation(square);
            assert_eq!(notation_to_square(&text), Ok(square), "text={text}");
        }
    }

    #[test]
    fn index_is_rank_major() {
        // b1 と a2 が入れ替わらないこと。
        assert_eq!(notation_to_square("b1"), Ok(sq(1)));
        assert_eq!(notation_to_square("a2"), Ok(sq(8)));
        assert_eq!(notation_to_square("e2"), Ok(sq(12)));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(
            notation_to_square(""),
            Err(NotationError::InvalidLength { len: 0 })
        );
        assert_eq!(
            notation_to_square("a"),
            Err(NotationError::InvalidLength { len: 1 })
        );
        assert_eq!(
            notation_to_square("a10"),
            Err(NotationError::InvalidLength { len: 3 })
        );
        assert_eq!(
            notation_to_square("i9"),
            Err(NotationError::InvalidFile('i'))
        );
        assert_eq!(
            notation_to_square("a9"),
            Err(NotationError::InvalidRank('9'))
        );
        assert_eq!(
            notation_to_square("A1"),
            Err(NotationError::InvalidFile('A'))
        );
        assert_eq!(
            notation_to_square("é1"),
            Err(NotationError::InvalidFile('é'))
        );
    }

    #[test]
    fn from_str_matches_notation_to_square() {
        assert_eq!("h8".parse::<Square>(), Ok(sq(63)));
        assert!("h0".parse::<Square>().is_err());
    }

    #[test]
    fn parse_move_splits_source_and_target() {
        assert_eq!(parse_move("e2e4"), Ok((sq(12), sq(28))));
        assert_eq!(parse_move("  g8f6\n"), Ok((sq(62), sq(45))));
        assert_eq!(
            parse_move("e2-e4"),
            Err(NotationError::InvalidLength { len: 5 })
        );
        assert_eq!(parse_move("e2z4"), Err(NotationError::InvalidFile('z')));
    }
}
