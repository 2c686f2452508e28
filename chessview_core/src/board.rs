/// 代数表記との相互変換。
pub mod notation;
/// 4ビット×64マスの盤面表現。
pub mod packed;
/// スレッド間で共有する盤面。
pub mod shared;
pub mod types;

pub type PackedBoard = packed::PackedBoard;
pub type SharedBoard = shared::SharedBoard;
pub type Square = types::Square;
pub type PieceKind = types::PieceKind;
pub type PieceType = types::PieceType;
pub type Color = types::Color;
pub type NotationError = notation::NotationError;
pub type SquareError = types::SquareError;
pub type DecodeError = types::DecodeError;

pub use notation::{notation_to_square, parse_move, square_to_notation};
