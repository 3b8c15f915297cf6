//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID + Phantom type
//! ID は ULID (Universally Unique Lexicographically Sortable Identifier) を使います。
//! `Id<T>` の `T` は実行時には使わないマーカー型で、コンパイル時の型安全性だけを提供します。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: timestamp が先頭にあるため、生成順序でソートできる
//! - **128-bit**: UUID と同じサイズ
//!
//! 一意性の保証は生成側（`ports::IdGenerator`）の責務です。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display / FromStr で使うプレフィックス（"project-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData なのでメモリを消費しません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    /// ULID から Id を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

/// IdParseError は文字列から ID を復元できなかったことを表す
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id '{input}': {reason}")]
pub struct IdParseError {
    pub input: String,
    pub reason: String,
}

/// `project-01H...` とプレフィックスなしの `01H...` の両方を受け付ける。
/// CLI からの入力は大文字小文字が揺れるので ULID 側の寛容なデコードに任せる。
impl<T: IdMarker> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw = trimmed.strip_prefix(T::prefix()).unwrap_or(trimmed);
        Ulid::from_string(raw)
            .map(Self::from_ulid)
            .map_err(|e| IdParseError {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Project のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProjectTag {}

impl IdMarker for ProjectTag {
    fn prefix() -> &'static str {
        "project-"
    }
}

/// Identifier of a Project (one card on the board).
pub type ProjectId = Id<ProjectTag>;
