//! Minimal chess position viewer core.
//!
//! 盤面表現（`board`）と、駒の持ち上げ/配置を扱う `session` を提供します。
//! 合法手の判定は行いません。UI（`sdl` / `wasm`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// 盤面表現・マス・代数表記を提供するモジュール。
pub mod board;

/// クリック/テキスト入力による駒移動を扱うモジュール。
pub mod session;

pub type Gesture = session::Gesture;
pub type Session = session::Session;
pub type SessionError = session::SessionError;
