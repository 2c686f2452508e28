//! WASM (Canvas) 向けの最小 UI。
//!
//! - `wasm32` ターゲットのみで `wasm-bindgen` / `web-sys` を有効化する。
//! - それ以外のターゲットでは、workspace の `cargo test` / `cargo clippy` を通すためにスタブを提供する。
//!
//! `App` のマス指定は全て盤面座標（`file`: 0 = a .. 7 = h, `rank`: 0 = 1段目 .. 7 = 8段目）。
//! 表示上の座標との変換は `screen_to_square` を使う。

use chessview_core::board::Square;

/// 表示座標（左上が 0, 0）をマスへ変換する。
///
/// `flipped` が false なら白が下側（左上が a8）、true なら黒が下側（左上が h1）。
#[inline]
#[must_use]
pub fn screen_to_square(flipped: bool, x: u8, y: u8) -> Option<Square> {
    let last = Square::BOARD_LEN.checked_sub(1)?;
    if flipped {
        Square::from_file_rank(last.checked_sub(x)?, y)
    } else {
        Square::from_file_rank(x, last.checked_sub(y)?)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm32_app {
    use super::screen_to_square;
    use chessview_core::board::{Color, PieceKind, PieceType, Square};
    use chessview_core::{Gesture, Session};
    use wasm_bindgen::JsValue;
    use wasm_bindgen::prelude::*;
    use web_sys::CanvasRenderingContext2d;

    /// 盤面描画のオフセット。
    const OFFSET: f64 = 8.0;

    /// 明るいマスの色。
    const LIGHT: &str = "#f0d9b5";

    /// 暗いマスの色。
    const DARK: &str = "#b58863";

    /// 選択中のマスの色。
    const SELECTED: &str = "#e0c840";

    /// Canvas 描画用の Unicode 駒文字。
    const fn figurine(piece: PieceKind) -> Option<&'static str> {
        let (Some(color), Some(piece_type)) = (piece.color(), piece.piece_type()) else {
            return None;
        };
        let text = match (color, piece_type) {
            (Color::White, PieceType::King) => "\u{2654}",
            (Color::White, PieceType::Queen) => "\u{2655}",
            (Color::White, PieceType::Rook) => "\u{2656}",
            (Color::White, PieceType::Bishop) => "\u{2657}",
            (Color::White, PieceType::Knight) => "\u{2658}",
            (Color::White, PieceType::Pawn) => "\u{2659}",
            (Color::Black, PieceType::King) => "\u{265A}",
            (Color::Black, PieceType::Queen) => "\u{265B}",
            (Color::Black, PieceType::Rook) => "\u{265C}",
            (Color::Black, PieceType::Bishop) => "\u{265D}",
            (Color::Black, PieceType::Knight) => "\u{265E}",
            (Color::Black, PieceType::Pawn) => "\u{265F}",
        };
        Some(text)
    }

    /// ブラウザ上の盤面ビューア。
    #[wasm_bindgen]
    #[derive(Debug)]
    pub struct App {
        /// 黒を下側に表示するか。
        flipped: bool,
        last: Option<Gesture>,
        session: Session,
    }

    #[wasm_bindgen]
    impl App {
        /// 初期配置から始める。`flipped` なら黒を下側に描く。
        #[wasm_bindgen(constructor)]
        pub fn new(flipped: bool) -> Self {
            Self {
                flipped,
                last: None,
                session: Session::new(),
            }
        }

        /// `(file, rank)` の駒画像ファイル名。空きマスは空文字列。
        pub fn asset_at(&self, file: u8, rank: u8) -> String {
            Square::from_file_rank(file, rank)
                .and_then(|square| self.session.board().piece_at(square).asset_file_name())
                .unwrap_or_default()
                .to_string()
        }

        /// テキスト形式の盤面（8段目が先頭）。
        pub fn board_text(&self) -> String {
            self.session.board().render()
        }

        /// クリック入力（盤面座標）。何か起きたら true。
        ///
        /// 画面上の位置から呼ぶ場合は `screen_square_file` / `screen_square_rank` で変換する。
        pub fn click(&mut self, file: u8, rank: u8) -> bool {
            let Some(square) = Square::from_file_rank(file, rank) else {
                return false;
            };

            let gesture = self.session.click(square);
            self.last = Some(gesture);
            !matches!(gesture, Gesture::Ignored)
        }

        /// 表示座標 `(x, y)` にあるマスの列。範囲外は 255。
        pub fn screen_square_file(&self, x: u8, y: u8) -> u8 {
            screen_to_square(self.flipped, x, y).map_or(u8::MAX, Square::file)
        }

        /// 表示座標 `(x, y)` にあるマスの段。範囲外は 255。
        pub fn screen_square_rank(&self, x: u8, y: u8) -> u8 {
            screen_to_square(self.flipped, x, y).map_or(u8::MAX, Square::rank)
        }

        /// 初期配置に戻す。
        pub fn reset(&mut self) {
            self.session.reset();
            self.last = None;
        }

        /// 64マス分の4ビット値（a1..h8 の順）。JS 側で独自に描画する場合に使う。
        pub fn squares(&self) -> js_sys::Uint8Array {
            let board = self.session.board();
            let values: Vec<u8> = Square::all()
                .map(|square| board.piece_at(square).to_nibble())
                .collect();
            js_sys::Uint8Array::from(values.as_slice())
        }

        /// 状態表示用の文字列を返す。
        pub fn status_text(&self) -> String {
            if let Some(square) = self.session.selected() {
                return format!("{square} selected");
            }
            match self.last {
                Some(Gesture::Moved { from, to, captured }) if captured.is_empty() => {
                    format!("{from}-{to}")
                }
                Some(Gesture::Moved { from, to, captured }) => {
                    format!("{from}x{to} ({} captured)", captured.glyph())
                }
                Some(Gesture::Deselected(square)) => format!("{square} put back"),
                _ => "click a piece".to_string(),
            }
        }

        /// `"e2e4"` 形式で駒を動かす。失敗時は理由を返す。
        pub fn text_move(&mut self, text: &str) -> Result<(), JsValue> {
            match self.session.apply_text_move(text) {
                Ok(gesture) => {
                    self.last = Some(gesture);
                    Ok(())
                }
                Err(err) => Err(JsValue::from_str(&err.to_string())),
            }
        }

        /// Canvas へ盤面を描画する。
        ///
        /// - `cell_size`: 1マスのピクセルサイズ（例: 64.0）
        pub fn render(&self, ctx: &CanvasRenderingContext2d, cell_size: f64) {
            let board_len: f64 = 8.0;
            let board_px = board_len * cell_size;
            let full = board_px + OFFSET * 2.0;

            ctx.set_fill_style(&JsValue::from_str("#302018"));
            ctx.fill_rect(0.0, 0.0, full, full);

            let board = self.session.board();
            let selected = self.session.selected();
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.set_font(&format!("{}px serif", cell_size * 0.8));

            for y in 0..8 {
                for x in 0..8 {
                    let square = match screen_to_square(self.flipped, x, y) {
                        Some(value) => value,
                        None => continue,
                    };

                    let left = OFFSET + f64::from(x) * cell_size;
                    let top = OFFSET + f64::from(y) * cell_size;
                    let light = (square.file() + square.rank()) % 2 == 1;
                    let fill = if selected == Some(square) {
                        SELECTED
                    } else if light {
                        LIGHT
                    } else {
                        DARK
                    };
                    ctx.set_fill_style(&JsValue::from_str(fill));
                    ctx.fill_rect(left, top, cell_size, cell_size);

                    if let Some(text) = figurine(board.piece_at(square)) {
                        ctx.set_fill_style(&JsValue::from_str("#000000"));
                        let _: Result<(), JsValue> = ctx.fill_text(
                            text,
                            left + cell_size / 2.0,
                            top + cell_size / 2.0,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm32_app::App;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm_stub {
    #[derive(Debug, Default)]
    pub struct App;

    impl App {
        pub fn new(_flipped: bool) -> Self {
            Self
        }

        pub fn asset_at(&self, _file: u8, _rank: u8) -> String {
            String::new()
        }

        pub fn board_text(&self) -> String {
            String::new()
        }

        pub fn click(&mut self, _file: u8, _rank: u8) -> bool {
            false
        }

        pub fn reset(&mut self) {}

        pub fn status_text(&self) -> String {
            "wasm App is available only on wasm32".to_string()
        }

        pub fn text_move(&mut self, _text: &str) -> Result<(), String> {
            Err(self.status_text())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm_stub::App;

#[cfg(test)]
mod tests {
    use super::screen_to_square;
    use chessview_core::board::{Square, notation_to_square};

    fn at(text: &str) -> Square {
        notation_to_square(text).unwrap_or_else(|err| panic!("{err}"))
    }

    #[test]
    fn white_at_bottom_when_not_flipped() {
        assert_eq!(screen_to_square(false, 0, 7), Some(at("a1")));
        assert_eq!(screen_to_square(false, 7, 0), Some(at("h8")));
        assert_eq!(screen_to_square(false, 4, 6), Some(at("e2")));
    }

    #[test]
    fn black_at_bottom_when_flipped() {
        assert_eq!(screen_to_square(true, 7, 0), Some(at("a1")));
        assert_eq!(screen_to_square(true, 0, 7), Some(at("h8")));
        assert_eq!(screen_to_square(true, 3, 1), Some(at("e2")));
    }

    #[test]
    fn every_square_has_exactly_one_screen_cell() {
        for flipped in [false, true] {
            let mut seen: Vec<Square> = (0_u8..8)
                .flat_map(|y| (0_u8..8).map(move |x| (x, y)))
                .filter_map(|(x, y)| screen_to_square(flipped, x, y))
                .collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 64, "flipped={flipped}");
        }
    }

    #[test]
    fn outside_the_board_is_rejected() {
        assert_eq!(screen_to_square(false, 8, 0), None);
        assert_eq!(screen_to_square(false, 0, 8), None);
        assert_eq!(screen_to_square(true, 8, 0), None);
        assert_eq!(screen_to_square(true, 0, 8), None);
    }
}
