//! 配列操作関数（即時評価）
//!
//! 全ての関数は入力を変更せず、新しい配列（またはスカラー）を返す。
//! キーを明記していない結果は0からの連番キーに振り直される。
//! コールバックのパニックはそのまま呼び出し側に伝播する。

pub mod collapse;
pub mod construction;
pub mod grouping;
pub mod keying;
pub mod partition;
pub mod predicates;
pub mod selection;
pub mod set;
pub mod transform;

pub use collapse::*;
pub use construction::*;
pub use grouping::*;
pub use keying::*;
pub use partition::*;
pub use predicates::*;
pub use selection::*;
pub use set::*;
pub use transform::*;
