//! # 回答
//!
//! 質問に対する個々の回答エンティティを定義する。
//!
//! ## 設計方針
//!
//! - **ID による逆参照**: 回答は所属する質問をオブジェクト参照ではなく
//!   [`QuestionId`] で保持する。循環参照を避け、必要時はリポジトリで
//!   解決する
//! - **論理削除**: 削除は `deleted` フラグの反転のみ。物理削除は行わない
//! - **削除権限**: 削除できるのは作成者本人のみ

use chrono::{DateTime, Utc};

use crate::{
    DomainError,
    delete_history::DeleteHistory,
    question::{Question, QuestionId},
    user::{User, UserId},
};

define_entity_id! {
    /// 回答 ID
    pub struct AnswerId;
}

/// 回答エンティティ
///
/// # 同一性
///
/// `PartialEq` は ID のみを比較する。未永続（`id` が `None`）の回答は
/// 同一性を持たず、自身の複製とも一致しない。`Eq` を実装しないのは
/// この非反射性のため。
///
/// # 所属質問への参照
///
/// `question_id` は最初の紐付けで確定し、以降は変更されない。
/// 未永続の質問に紐付けられた場合は `None` のまま保持され、
/// 質問の保存時に永続化層で確定する。
#[derive(Debug, Clone)]
pub struct Answer {
    id: Option<AnswerId>,
    writer_id: UserId,
    question_id: Option<QuestionId>,
    contents: String,
    deleted: bool,
}

/// DB から回答を復元するためのパラメータ
#[derive(Debug)]
pub struct AnswerRecord {
    pub id: AnswerId,
    pub writer_id: UserId,
    pub question_id: Option<QuestionId>,
    pub contents: String,
    pub deleted: bool,
}

impl Answer {
    /// 新しい回答を作成する
    ///
    /// 所属する質問は参照で受け取るため、構造的に非 null が保証される。
    /// 質問が未永続の場合、`question_id` は質問の保存まで未確定となる。
    pub fn new(writer: &User, question: &Question, contents: impl Into<String>) -> Self {
        Self {
            id: None,
            writer_id: writer.id().clone(),
            question_id: question.id(),
            contents: contents.into(),
            deleted: false,
        }
    }

    /// 既存のデータから回答を復元する（データベースから取得時）
    pub fn from_db(record: AnswerRecord) -> Self {
        Self {
            id: Some(record.id),
            writer_id: record.writer_id,
            question_id: record.question_id,
            contents: record.contents,
            deleted: record.deleted,
        }
    }

    pub fn id(&self) -> Option<AnswerId> {
        self.id
    }

    pub fn writer_id(&self) -> &UserId {
        &self.writer_id
    }

    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// 指定されたユーザーが作成者本人かを判定する
    pub fn is_owner(&self, user: &User) -> bool {
        user.match_user_id(&self.writer_id)
    }

    /// 所属する質問を紐付ける（最初の紐付けのみ有効）
    pub(crate) fn attach_to(&mut self, question_id: QuestionId) {
        if self.question_id.is_none() {
            self.question_id = Some(question_id);
        }
    }

    /// 回答を論理削除し、削除履歴を返す
    ///
    /// # エラー
    ///
    /// 削除を要求したユーザーが作成者でない場合は
    /// `DomainError::CannotDelete` を返し、状態は変更しない。
    ///
    /// # 冪等性
    ///
    /// 削除済みの回答への再呼び出しは定義しない。作成者からの再呼び出しは
    /// 成功して新しい履歴を生成するが、この挙動に依存してはならない。
    pub fn delete(
        &mut self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<DeleteHistory, DomainError> {
        if !self.is_owner(user) {
            return Err(DomainError::CannotDelete(
                "回答の作成者ではありません".to_string(),
            ));
        }

        self.deleted = true;
        Ok(DeleteHistory::of_answer(
            self.id,
            self.writer_id.clone(),
            now,
        ))
    }
}

impl PartialEq for Answer {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
