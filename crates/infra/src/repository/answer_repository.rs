//! # AnswerRepository
//!
//! 回答単体の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **質問集約と同じテーブル**: 行は [`QuestionRepository`] の集約保存と
//!   共有する。どちらの経路で保存された回答も双方から見える
//! - **単体保存では参照を書き換えない**: 回答自身が持つ質問参照を
//!   そのまま保存する（参照の確定は集約保存の責務）
//!
//! [`QuestionRepository`]: crate::repository::QuestionRepository

use async_trait::async_trait;
use qna_domain::{
    answer::{Answer, AnswerId},
    question::QuestionId,
};

use crate::{
    error::InfraError,
    store::{AnswerRow, InMemoryStore, TxContext},
};

/// 回答リポジトリトレイト
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// 回答を保存する（insert-or-update）
    ///
    /// 未採番の回答には ID を割り当てる。
    ///
    /// # 戻り値
    ///
    /// 採番済み ID を含む、永続化後の表現。
    async fn save(&self, tx: &mut TxContext, answer: &Answer) -> Result<Answer, InfraError>;

    /// ID で回答を検索
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, InfraError>;

    /// ID と削除フラグの両方が一致する回答を検索
    async fn find_by_id_and_deleted(
        &self,
        id: AnswerId,
        deleted: bool,
    ) -> Result<Option<Answer>, InfraError>;

    /// ID の回答が存在するかを確認（削除フラグは問わない）
    async fn exists_by_id(&self, id: AnswerId) -> Result<bool, InfraError>;

    /// 削除フラグが一致する回答を保存順で一覧する
    async fn find_by_deleted(&self, deleted: bool) -> Result<Vec<Answer>, InfraError>;

    /// 質問 ID と削除フラグで回答を一覧する（追加順）
    async fn find_by_question_id_and_deleted(
        &self,
        question_id: QuestionId,
        deleted: bool,
    ) -> Result<Vec<Answer>, InfraError>;
}

/// インメモリ実装の AnswerRepository
#[derive(Clone)]
pub struct InMemoryAnswerRepository {
    store: InMemoryStore,
}

impl InMemoryAnswerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn save(&self, _tx: &mut TxContext, answer: &Answer) -> Result<Answer, InfraError> {
        let mut db = self.store.lock()?;

        let answer_id = match answer.id() {
            Some(id) => id.as_i64(),
            None => db.next_answer_id(),
        };
        let question_id = answer.question_id().map(QuestionId::as_i64);
        db.upsert_answer(AnswerRow::from_entity(answer_id, question_id, answer));

        db.answers
            .iter()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| {
                InfraError::unexpected(format!("保存した回答が見つかりません: {answer_id}"))
            })?
            .to_entity()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: AnswerId) -> Result<Option<Answer>, InfraError> {
        let db = self.store.lock()?;
        db.answers
            .iter()
            .find(|a| a.id == id.as_i64())
            .map(AnswerRow::to_entity)
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, deleted))]
    async fn find_by_id_and_deleted(
        &self,
        id: AnswerId,
        deleted: bool,
    ) -> Result<Option<Answer>, InfraError> {
        let db = self.store.lock()?;
        db.answers
            .iter()
            .find(|a| a.id == id.as_i64() && a.deleted == deleted)
            .map(AnswerRow::to_entity)
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists_by_id(&self, id: AnswerId) -> Result<bool, InfraError> {
        let db = self.store.lock()?;
        Ok(db.answers.iter().any(|a| a.id == id.as_i64()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(deleted))]
    async fn find_by_deleted(&self, deleted: bool) -> Result<Vec<Answer>, InfraError> {
        let db = self.store.lock()?;
        db.answers
            .iter()
            .filter(|a| a.deleted == deleted)
            .map(AnswerRow::to_entity)
            .collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%question_id, deleted))]
    async fn find_by_question_id_and_deleted(
        &self,
        question_id: QuestionId,
        deleted: bool,
    ) -> Result<Vec<Answer>, InfraError> {
        let db = self.store.lock()?;
        db.answers
            .iter()
            .filter(|a| a.question_id == Some(question_id.as_i64()) && a.deleted == deleted)
            .map(AnswerRow::to_entity)
            .collect()
    }
}
