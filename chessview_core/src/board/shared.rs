use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::packed::PackedBoard;
use crate::board::types::{PieceKind, Square};

/// 複数スレッドから共有する盤面。
///
/// 1つの盤面につきロックは1つ。読み取りは共有ロック、書き込みは排他ロックを取る。
/// 1ワードに16マスが同居するため、別マスへの書き込みでも排他が必要になる。
/// `clone` は同じ盤面を指す。
#[derive(Clone, Debug, Default)]
pub struct SharedBoard {
    /// 共有される盤面。
    inner: Arc<RwLock<PackedBoard>>,
}

impl SharedBoard {
    /// 初期配置を書き込む。
    #[inline]
    pub fn initialize_standard(&self) {
        self.write().initialize_standard();
    }

    /// 駒を動かし、`to` に元々あった駒を返す。
    #[inline]
    #[must_use]
    pub fn move_piece(&self, from: Square, to: Square) -> PieceKind {
        self.write().move_piece(from, to)
    }

    /// 盤面を包む。
    #[inline]
    #[must_use]
    pub fn new(board: PackedBoard) -> Self {
        Self {
            inner: Arc::new(RwLock::new(board)),
        }
    }

    /// 指定マスの駒を返す。
    #[inline]
    #[must_use]
    pub fn piece_at(&self, square: Square) -> PieceKind {
        self.read().piece_at(square)
    }

    /// 盤面をテキストで返す。
    #[inline]
    #[must_use]
    pub fn render(&self) -> String {
        self.read().render()
    }

    /// 指定マスを上書きする。
    #[inline]
    pub fn set_piece_at(&self, square: Square, piece: PieceKind) {
        self.write().set_piece_at(square, piece);
    }

    /// 現在の盤面のコピーを返す。
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> PackedBoard {
        *self.read()
    }

    /// 共有ロックを取る。書き込みは1回のマスク付き代入なので、poison されても盤面は壊れない。
    fn read(&self) -> RwLockReadGuard<'_, PackedBoard> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// 排他ロックを取る。
    fn write(&self) -> RwLockWriteGuard<'_, PackedBoard> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
