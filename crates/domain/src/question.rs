//! # 質問
//!
//! Q&A サービスの集約ルートとなる質問エンティティを定義する。
//!
//! ## 設計方針
//!
//! - **集約ルート**: 質問は配下の回答列を所有し、追加順を保持する
//! - **論理削除のカスケード**: 質問の削除は配下の回答すべてに波及し、
//!   1 回の削除で [質問自身の履歴, 回答の履歴...] を返す
//! - **削除権限**: 質問自体の削除可否は質問の作成者のみで判定する。
//!   配下の回答の所有者判定はカスケード中に各回答が個別に行う
//!
//! ## 削除フローの順序保証
//!
//! `delete` が返す履歴列は、先頭が質問自身、以降が回答の追加順。
//! カスケード途中で権限エラーが発生した場合はエラーを即座に伝播する
//! （フェイルファスト）。このとき処理済みの回答には削除フラグが
//! 立ったままになるため、永続化の判断は呼び出し側がトランザクション
//! 境界で行う。

use chrono::{DateTime, Utc};

use crate::{
    DomainError,
    answer::Answer,
    delete_history::DeleteHistory,
    question_answers::QuestionAnswers,
    user::{User, UserId},
};

define_entity_id! {
    /// 質問 ID
    pub struct QuestionId;
}

define_validated_string! {
    /// 質問タイトル（値オブジェクト）
    pub struct Title {
        label: "タイトル",
        max_length: 100,
    }
}

/// 質問エンティティ
///
/// # 同一性
///
/// `PartialEq` は ID のみを比較する。未永続（`id` が `None`）の質問は
/// 同一性を持たない（[`Answer`](crate::answer::Answer) と同じ規約）。
///
/// # 不変条件
///
/// - `deleted == true` の質問へ回答を追加してはならない。
///   本エンティティはチェックせず、呼び出し側の規律に委ねる
#[derive(Debug, Clone)]
pub struct Question {
    id: Option<QuestionId>,
    title: Title,
    contents: String,
    writer_id: UserId,
    deleted: bool,
    answers: Vec<Answer>,
}

/// DB から質問を復元するためのパラメータ
#[derive(Debug)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub title: Title,
    pub contents: String,
    pub writer_id: UserId,
    pub deleted: bool,
    pub answers: Vec<Answer>,
}

impl Question {
    /// 新しい質問を作成する
    ///
    /// ID は永続化層が採番するため、保存されるまで `None`。
    pub fn new(title: Title, contents: impl Into<String>, writer: &User) -> Self {
        Self {
            id: None,
            title,
            contents: contents.into(),
            writer_id: writer.id().clone(),
            deleted: false,
            answers: Vec::new(),
        }
    }

    /// 既存のデータから質問を復元する（データベースから取得時）
    pub fn from_db(record: QuestionRecord) -> Self {
        Self {
            id: Some(record.id),
            title: record.title,
            contents: record.contents,
            writer_id: record.writer_id,
            deleted: record.deleted,
            answers: record.answers,
        }
    }

    pub fn id(&self) -> Option<QuestionId> {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn writer_id(&self) -> &UserId {
        &self.writer_id
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// 指定されたユーザーが作成者本人かを判定する
    pub fn is_owner(&self, user: &User) -> bool {
        user.match_user_id(&self.writer_id)
    }

    /// 回答を追加し、回答側の質問参照を紐付ける
    ///
    /// 回答の作成者が質問の作成者である必要はないため、所有者チェックは
    /// 行わない。削除済み質問への追加防止は呼び出し側の責務。
    /// この質問が未永続の場合、紐付けは保存時に永続化層で確定する。
    pub fn add_answer(&mut self, mut answer: Answer) {
        if let Some(id) = self.id {
            answer.attach_to(id);
        }
        self.answers.push(answer);
    }

    /// 保持している回答の件数を返す
    pub fn count_of_answer(&self) -> usize {
        self.answers.len()
    }

    /// 質問を論理削除し、配下の回答へカスケードする
    ///
    /// # 処理フロー
    ///
    /// 1. 質問の作成者チェック（回答には一切触れずに失敗させる）
    /// 2. 質問自身に削除フラグを立て、履歴を生成
    /// 3. [`QuestionAnswers`] 経由で全回答を削除し、履歴を連結
    ///
    /// # エラー
    ///
    /// - 要求ユーザーが質問の作成者でない場合は `CannotDelete`（即時）
    /// - カスケード中に作成者が異なる回答があった場合も `CannotDelete`
    ///   （回答単体の削除失敗と同じ種類。処理済みの回答の削除フラグは
    ///   巻き戻さない）
    pub fn delete(
        &mut self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<Vec<DeleteHistory>, DomainError> {
        if !self.is_owner(user) {
            return Err(DomainError::CannotDelete(
                "質問の作成者ではありません".to_string(),
            ));
        }

        self.deleted = true;

        let mut histories = vec![DeleteHistory::of_question(
            self.id,
            self.writer_id.clone(),
            now,
        )];
        histories.extend(QuestionAnswers::new(&mut self.answers).delete(user, now)?);
        Ok(histories)
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
