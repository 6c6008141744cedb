//! # QuestionRepository
//!
//! 質問集約の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **集約単位の保存**: 質問の保存時に保持している回答も一緒に保存する。
//!   復元時は answers テーブルから回答列を組み立てる
//! - **参照の確定**: 集約経由で保存された回答の質問参照は、保存先の
//!   質問 ID に確定する（未永続の質問に紐付いた回答の参照はここで埋まる）
//! - **論理削除前提**: 物理削除メソッドは提供しない

use async_trait::async_trait;
use qna_domain::question::{Question, QuestionId, Title};

use crate::{
    error::InfraError,
    store::{AnswerRow, InMemoryStore, QuestionRow, TxContext},
};

/// 質問リポジトリトレイト
///
/// 質問集約の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// 質問を保存する（insert-or-update）
    ///
    /// 未採番の質問には ID を割り当てる。保持している回答も集約の
    /// 一部として保存され、未採番の回答には ID が割り当てられる。
    ///
    /// # 戻り値
    ///
    /// 採番済み ID と確定済みの質問参照を含む、永続化後の表現。
    async fn save(&self, tx: &mut TxContext, question: &Question) -> Result<Question, InfraError>;

    /// ID で質問を検索
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, InfraError>;

    /// ID と削除フラグの両方が一致する質問を検索
    ///
    /// - `deleted = false`: アクティブな質問のみ
    /// - `deleted = true`: 削除済みの質問のみ
    async fn find_by_id_and_deleted(
        &self,
        id: QuestionId,
        deleted: bool,
    ) -> Result<Option<Question>, InfraError>;

    /// ID の質問が存在するかを確認（削除フラグは問わない）
    async fn exists_by_id(&self, id: QuestionId) -> Result<bool, InfraError>;

    /// 削除フラグが一致する質問を保存順で一覧する
    async fn find_by_deleted(&self, deleted: bool) -> Result<Vec<Question>, InfraError>;

    /// タイトルの完全一致で質問を検索
    async fn find_by_title(&self, title: &Title) -> Result<Vec<Question>, InfraError>;

    /// 本文の部分一致で質問を検索
    async fn find_by_contents_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<Question>, InfraError>;
}

/// インメモリ実装の QuestionRepository
#[derive(Clone)]
pub struct InMemoryQuestionRepository {
    store: InMemoryStore,
}

impl InMemoryQuestionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn save(&self, _tx: &mut TxContext, question: &Question) -> Result<Question, InfraError> {
        let mut db = self.store.lock()?;

        let question_id = match question.id() {
            Some(id) => id.as_i64(),
            None => db.next_question_id(),
        };
        db.upsert_question(QuestionRow::from_entity(question_id, question));

        for answer in question.answers() {
            let answer_id = match answer.id() {
                Some(id) => id.as_i64(),
                None => db.next_answer_id(),
            };
            // 集約経由の保存では、質問参照を保存先の質問に確定させる
            db.upsert_answer(AnswerRow::from_entity(answer_id, Some(question_id), answer));
        }

        let row = db
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| {
                InfraError::unexpected(format!("保存した質問が見つかりません: {question_id}"))
            })?;
        db.assemble_question(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, InfraError> {
        let db = self.store.lock()?;
        db.questions
            .iter()
            .find(|q| q.id == id.as_i64())
            .map(|row| db.assemble_question(row))
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id, deleted))]
    async fn find_by_id_and_deleted(
        &self,
        id: QuestionId,
        deleted: bool,
    ) -> Result<Option<Question>, InfraError> {
        let db = self.store.lock()?;
        db.questions
            .iter()
            .find(|q| q.id == id.as_i64() && q.deleted == deleted)
            .map(|row| db.assemble_question(row))
            .transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn exists_by_id(&self, id: QuestionId) -> Result<bool, InfraError> {
        let db = self.store.lock()?;
        Ok(db.questions.iter().any(|q| q.id == id.as_i64()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(deleted))]
    async fn find_by_deleted(&self, deleted: bool) -> Result<Vec<Question>, InfraError> {
        let db = self.store.lock()?;
        db.questions
            .iter()
            .filter(|q| q.deleted == deleted)
            .map(|row| db.assemble_question(row))
            .collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%title))]
    async fn find_by_title(&self, title: &Title) -> Result<Vec<Question>, InfraError> {
        let db = self.store.lock()?;
        db.questions
            .iter()
            .filter(|q| q.title == title.as_str())
            .map(|row| db.assemble_question(row))
            .collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(fragment))]
    async fn find_by_contents_containing(
        &self,
        fragment: &str,
    ) -> Result<Vec<Question>, InfraError> {
        let db = self.store.lock()?;
        db.questions
            .iter()
            .filter(|q| q.contents.contains(fragment))
            .map(|row| db.assemble_question(row))
            .collect()
    }
}
