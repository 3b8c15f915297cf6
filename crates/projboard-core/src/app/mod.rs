//! App - アプリケーション層
//!
//! ports を組み合わせて画面部品とボード全体を組み立てます。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: store の生成と view の mount
//! - **View / mount**: 基底クラスの代わりの合成ヘルパー
//! - **ProjectList / ProjectInput**: 列とフォーム

pub mod builder;
pub mod view;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::view::{ProjectInput, ProjectList, View, ViewError, mount};
