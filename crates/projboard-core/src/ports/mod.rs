//! Ports - 抽象化レイヤー
//!
//! ストア・ID 生成・時刻・subscriber をそれぞれ trait にして、
//! 実装（impls）と view（app）から差し替えられるようにしています。

pub mod project_store;
pub mod subscriber;
pub mod clock;
pub mod id_generator;

// 主要な trait を再エクスポート
pub use self::project_store::ProjectStore;
pub use self::subscriber::Subscriber;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, SequentialIdGenerator, UlidGenerator};
