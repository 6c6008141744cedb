//! # UserRepository
//!
//! ユーザーの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ログイン ID が主キー**: ユーザーはシーケンス採番ではなく
//!   ログイン ID で一意に識別する
//! - **upsert セマンティクス**: 同じログイン ID での保存は
//!   プロフィールの上書きとして扱う

use async_trait::async_trait;
use qna_domain::user::{User, UserId};

use crate::{
    error::InfraError,
    store::{InMemoryStore, TxContext, UserRow},
};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを保存する（insert-or-update）
    async fn save(&self, tx: &mut TxContext, user: &User) -> Result<User, InfraError>;

    /// ログイン ID でユーザーを検索
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

    /// ログイン ID のユーザーが存在するかを確認
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, InfraError>;
}

/// インメモリ実装の UserRepository
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn save(&self, _tx: &mut TxContext, user: &User) -> Result<User, InfraError> {
        let mut db = self.store.lock()?;

        let row = UserRow::from_entity(user);
        match db.users.iter_mut().find(|u| u.id == row.id) {
            Some(existing) => *existing = row,
            None => db.users.push(row),
        }

        db.users
            .iter()
            .find(|u| u.id == user.id().as_str())
            .ok_or_else(|| {
                InfraError::unexpected(format!("保存したユーザーが見つかりません: {}", user.id()))
            })?
            .to_entity()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let db = self.store.lock()?;
        db.users
            .iter()
            .find(|u| u.id == id.as_str())
            .map(UserRow::to_entity)
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists_by_id(&self, id: &UserId) -> Result<bool, InfraError> {
        let db = self.store.lock()?;
        Ok(db.users.iter().any(|u| u.id == id.as_str()))
    }
}
