//! # QnA ドメイン層
//!
//! Q&A サービスのビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Question, Answer）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Title,
//!   DeleteHistory）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! 中核となるビジネスロジックは、質問と配下の回答にまたがる
//! 権限チェック付きカスケード論理削除と、それに伴う削除履歴の生成である。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（ストア、外部サービス）に一切依存しない。
//! 永続化はインフラ層のリポジトリトレイトが担い、ドメイン層は
//! 復元用コンストラクタ（`from_db`）を提供するのみ。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`clock`] - 時刻プロバイダの抽象化
//! - [`user`] - ユーザーエンティティと所有者判定
//! - [`question`] - 質問エンティティ（集約ルート）
//! - [`answer`] - 回答エンティティ
//! - [`question_answers`] - 回答列のカスケード削除ラッパー
//! - [`delete_history`] - 削除履歴（監査レコード）
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::Utc;
//! use qna_domain::{
//!     question::{Question, Title},
//!     user::{Email, Password, User, UserId, UserName},
//! };
//!
//! let writer = User::new(
//!     UserId::new("javajigi")?,
//!     Password::new("password")?,
//!     UserName::new("name")?,
//!     Email::new("javajigi@slipp.net")?,
//! );
//!
//! let mut question = Question::new(Title::new("質問のタイトル")?, "本文", &writer);
//! let histories = question.delete(&writer, Utc::now())?;
//!
//! assert!(question.is_deleted());
//! assert_eq!(histories.len(), 1);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod answer;
pub mod clock;
pub mod delete_history;
pub mod error;
pub mod question;
pub mod question_answers;
pub mod user;

pub use error::DomainError;
