//! # リポジトリ実装
//!
//! 永続化操作のトレイトと、そのインメモリ実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: 利用側はトレイトにのみ依存し、実装は差し替え可能
//! - **永続化後の表現を返す**: `save` は採番済み ID を含む
//!   エンティティを返し、呼び出し側の続きの処理に使わせる
//! - **書き込みはトランザクション境界内**: 変更系の操作は
//!   [`TxContext`](crate::store::TxContext) を要求する

pub mod answer_repository;
pub mod delete_history_repository;
pub mod question_repository;
pub mod user_repository;

pub use answer_repository::{AnswerRepository, InMemoryAnswerRepository};
pub use delete_history_repository::{DeleteHistoryRepository, InMemoryDeleteHistoryRepository};
pub use question_repository::{InMemoryQuestionRepository, QuestionRepository};
pub use user_repository::{InMemoryUserRepository, UserRepository};
