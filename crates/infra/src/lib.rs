//! # QnA インフラ層
//!
//! 永続化を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! 永続化の詳細をカプセル化し、ドメイン層を保存形式の変更から保護する。
//!
//! ## 責務
//!
//! - **ストア管理**: 正規化された行を保持するインメモリストア
//! - **リポジトリ実装**: 保存・検索操作のトレイトと実装
//! - **トランザクション境界**: 書き込み操作の境界を型で強制
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`store`] - インメモリストアとトランザクション境界
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use qna_infra::{
//!     repository::{InMemoryUserRepository, UserRepository},
//!     store::{InMemoryStore, InMemoryTransactionManager, TransactionManager},
//! };
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryStore::new();
//!     let user_repository = InMemoryUserRepository::new(store);
//!     let tx_manager = InMemoryTransactionManager::new();
//!
//!     let mut tx = tx_manager.begin().await?;
//!     let saved = user_repository.save(&mut tx, &user).await?;
//!     tx.commit().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod repository;
pub mod store;

pub use error::InfraError;
pub use store::{InMemoryStore, InMemoryTransactionManager, TransactionManager, TxContext};
