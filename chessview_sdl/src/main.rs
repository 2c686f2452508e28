//! SDL で動作する最小 UI。
//!
//! - 左クリック: 駒を持ち上げる / 置く
//! - `e2e4` のように入力して Enter: テキストで駒を動かす（Backspace で1文字消す）
//! - `R`: 初期配置に戻す、`Esc`: 終了

use chessview_core::board::{Color as PieceColor, PackedBoard, PieceKind, PieceType, Square};
use chessview_core::{Gesture, Session};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 盤面のオフセット（左上）。
const OFFSET: i32 = 16;

/// 1マスのピクセルサイズ。
const CELL_SIZE: i32 = 80;

/// 盤面の一辺の長さ（マス）。
const BOARD_LEN: i32 = 8;

/// 盤面の一辺の長さ（ピクセル）。
const BOARD_PX: i32 = BOARD_LEN * CELL_SIZE;

/// ウィンドウ幅（ピクセル）。
const WINDOW_W: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// ウィンドウ高さ（ピクセル）。
const WINDOW_H: u32 = (OFFSET + BOARD_PX + OFFSET) as u32;

/// `RUST_LOG` が無いときのログ設定。
const DEFAULT_LOG_FILTER: &str = "info";

/// テキスト入力の最大文字数（`e2e4`）。
const MOVE_TEXT_LEN: usize = 4;

/// 駒文字の幅・高さ（ドット）。
const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;

/// 駒文字の1ドットのピクセルサイズ。
const GLYPH_DOT: i32 = 8;

/// 5x7 ドットの駒文字（各行の下位5ビット、左端が最上位）。
const fn glyph_rows(piece_type: PieceType) -> [u8; 7] {
    match piece_type {
        PieceType::Pawn => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000,
        ],
        PieceType::Knight => [
            0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001,
        ],
        PieceType::Bishop => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110,
        ],
        PieceType::Rook => [
            0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001,
        ],
        PieceType::Queen => [
            0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101,
        ],
        PieceType::King => [
            0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001,
        ],
    }
}

#[derive(Debug)]
struct App {
    /// 入力途中の指し手テキスト。
    pending: String,
    session: Session,
    /// タイトルバーに出す直近の結果。
    status: String,
}

impl App {
    fn new() -> Self {
        Self {
            pending: String::with_capacity(MOVE_TEXT_LEN),
            session: Session::new(),
            status: String::from("click a piece or type a move"),
        }
    }

    fn status_text(&self) -> String {
        if self.pending.is_empty() {
            format!("chessview | {}", self.status)
        } else {
            format!("chessview | move: {}_", self.pending)
        }
    }

    fn record(&mut self, gesture: Gesture) {
        self.status = match gesture {
            Gesture::Ignored => return,
            Gesture::Selected(square) => format!("{square} selected"),
            Gesture::Deselected(square) => format!("{square} put back"),
            Gesture::Moved { from, to, captured } => {
                if captured.is_empty() {
                    format!("{from}-{to}")
                } else {
                    format!("{from}x{to} ({} captured)", captured.glyph())
                }
            }
            _ => String::new(),
        };
    }

    fn reset(&mut self) {
        self.session.reset();
        self.pending.clear();
        self.status = String::from("reset");
    }

    fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            let accepted = matches!(ch, 'a'..='h' | '1'..='8');
            if accepted && self.pending.len() < MOVE_TEXT_LEN {
                self.pending.push(ch);
            }
        }
    }

    fn submit_text(&mut self) {
        let text = core::mem::take(&mut self.pending);
        match self.session.apply_text_move(&text) {
            Ok(gesture) => self.record(gesture),
            Err(err) => {
                warn!(%text, %err, "text move rejected");
                self.status = err.to_string();
            }
        }
    }

    fn try_click(&mut self, x: i32, y: i32) {
        let Some(square) = pixel_to_square(x, y) else {
            return;
        };
        let gesture = self.session.click(square);
        self.record(gesture);
    }
}

/// ウィンドウ座標をマスへ変換する（白が下側）。
fn pixel_to_square(x: i32, y: i32) -> Option<Square> {
    let file = x - OFFSET;
    let row = y - OFFSET;
    if file < 0 || row < 0 {
        return None;
    }

    let xx = file / CELL_SIZE;
    let yy = row / CELL_SIZE;
    if !(0..BOARD_LEN).contains(&xx) || !(0..BOARD_LEN).contains(&yy) {
        return None;
    }

    let file_u8 = u8::try_from(xx).ok()?;
    let rank_u8 = u8::try_from(BOARD_LEN - 1 - yy).ok()?;
    Square::from_file_rank(file_u8, rank_u8)
}

/// マス左上のウィンドウ座標。
fn square_origin(square: Square) -> (i32, i32) {
    let file = i32::from(square.file());
    let row = BOARD_LEN - 1 - i32::from(square.rank());
    (OFFSET + file * CELL_SIZE, OFFSET + row * CELL_SIZE)
}

fn draw_piece(canvas: &mut Canvas<Window>, left: i32, top: i32, piece: PieceKind) {
    let (Some(color), Some(piece_type)) = (piece.color(), piece.piece_type()) else {
        return;
    };

    let (token, ink) = match color {
        PieceColor::White => {
            (SdlColor::RGB(245, 242, 230), SdlColor::RGB(20, 20, 20))
        }
        PieceColor::Black => {
            (SdlColor::RGB(30, 30, 30), SdlColor::RGB(240, 240, 240))
        }
    };

    let inset = CELL_SIZE / 10;
    let token_rect = Rect::new(
        left + inset,
        top + inset,
        (CELL_SIZE - inset * 2) as u32,
        (CELL_SIZE - inset * 2) as u32,
    );
    canvas.set_draw_color(token);
    let _: Result<(), String> = canvas.fill_rect(token_rect);

    // 駒文字。
    let glyph_left = left + (CELL_SIZE - GLYPH_W * GLYPH_DOT) / 2;
    let glyph_top = top + (CELL_SIZE - GLYPH_H * GLYPH_DOT) / 2;
    canvas.set_draw_color(ink);
    for (dy, bits) in (0_i32..).zip(glyph_rows(piece_type)) {
        for dx in 0..GLYPH_W {
            let mask = 1_u8 << (GLYPH_W - 1 - dx);
            if bits & mask == 0 {
                continue;
            }
            let dot = Rect::new(
                glyph_left + dx * GLYPH_DOT,
                glyph_top + dy * GLYPH_DOT,
                GLYPH_DOT as u32,
                GLYPH_DOT as u32,
            );
            let _: Result<(), String> = canvas.fill_rect(dot);
        }
    }
}

fn draw_board(canvas: &mut Canvas<Window>, app: &App) {
    let board: &PackedBoard = app.session.board();
    let selected = app.session.selected();

    canvas.set_draw_color(SdlColor::RGB(48, 32, 24));
    canvas.clear();

    // マス。
    for square in Square::all() {
        let (xx, yy) = square_origin(square);
        let rect = Rect::new(xx, yy, CELL_SIZE as u32, CELL_SIZE as u32);

        let light = (square.file() + square.rank()) % 2 == 1;
        let fill = if selected == Some(square) {
            SdlColor::RGB(224, 200, 64)
        } else if light {
            SdlColor::RGB(240, 217, 181)
        } else {
            SdlColor::RGB(181, 136, 99)
        };
        canvas.set_draw_color(fill);
        let _: Result<(), String> = canvas.fill_rect(rect);
    }

    // 駒。
    for (square, piece) in board.occupied_squares() {
        let (xx, yy) = square_origin(square);
        draw_piece(canvas, xx, yy, piece);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_err| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<(), String> {
    init_tracing();

    let sdl = sdl2::init()?;
    let video = sdl.video()?;

    let window = video
        .window("chessview", WINDOW_W, WINDOW_H)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;

    video.text_input().start();

    let mut app = App::new();
    let mut event_pump = sdl.event_pump()?;
    info!(cell_size = CELL_SIZE, "viewer started");
    info!(board = %app.session.board(), "initial position");

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::R),
                    ..
                } => app.reset(),
                Event::KeyDown {
                    keycode: Some(Keycode::Return | Keycode::KpEnter),
                    ..
                } => app.submit_text(),
                Event::KeyDown {
                    keycode: Some(Keycode::Backspace),
                    ..
                } => {
                    app.pending.pop();
                }
                Event::TextInput { text, .. } => app.push_text(&text),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => app.try_click(x, y),
                _ => {}
            }
        }

        let title = app.status_text();
        let _ = canvas.window_mut().set_title(&title);
        draw_board(&mut canvas, &app);
        canvas.present();
    }

    info!(board = %app.session.board(), "viewer closed");
    Ok(())
}
