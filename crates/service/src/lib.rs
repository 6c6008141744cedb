//! # QnA サービス層
//!
//! ユースケースの実装を公開する。ドメイン層の判定とインフラ層の
//! 永続化を束ね、呼び出し側にはこのクレートのエラー型だけを見せる。
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```

pub mod error;
pub mod event_log;
pub mod usecase;

pub use error::ServiceError;
