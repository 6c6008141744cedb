//! # DeleteHistoryRepository
//!
//! 削除履歴の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **追記専用**: 履歴は監査証跡であり、更新・削除の操作は提供しない
//! - **一括保存**: カスケード削除は複数の履歴を一度に生成するため、
//!   保存は配列単位で受け付ける
//! - **発生順の保持**: `find_all` は保存された順序のまま返す

use async_trait::async_trait;
use qna_domain::delete_history::DeleteHistory;

use crate::{
    error::InfraError,
    store::{DeleteHistoryRow, InMemoryStore, TxContext},
};

/// 削除履歴リポジトリトレイト
#[async_trait]
pub trait DeleteHistoryRepository: Send + Sync {
    /// 削除履歴をまとめて保存する
    ///
    /// 渡された順序のまま追記する。空の配列は何もしない。
    async fn save_all(
        &self,
        tx: &mut TxContext,
        histories: &[DeleteHistory],
    ) -> Result<(), InfraError>;

    /// すべての削除履歴を保存順で取得する
    async fn find_all(&self) -> Result<Vec<DeleteHistory>, InfraError>;
}

/// インメモリ実装の DeleteHistoryRepository
#[derive(Clone)]
pub struct InMemoryDeleteHistoryRepository {
    store: InMemoryStore,
}

impl InMemoryDeleteHistoryRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeleteHistoryRepository for InMemoryDeleteHistoryRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn save_all(
        &self,
        _tx: &mut TxContext,
        histories: &[DeleteHistory],
    ) -> Result<(), InfraError> {
        let mut db = self.store.lock()?;
        db.delete_histories
            .extend(histories.iter().map(DeleteHistoryRow::from_entity));
        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<DeleteHistory>, InfraError> {
        let db = self.store.lock()?;
        db.delete_histories
            .iter()
            .map(DeleteHistoryRow::to_entity)
            .collect()
    }
}
