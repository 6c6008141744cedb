//! # ユースケース層
//!
//! QnA ドメインのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **ドメインロジックを書き込みより先に**: 失敗し得る判定はすべて
//!   ドメイン層で済ませてから永続化する
//!
//! ## モジュール構成
//!
//! - `qna`: 質問の参照・削除ユースケース

pub(crate) mod helpers;

pub mod qna;

pub use qna::QnaUseCaseImpl;
