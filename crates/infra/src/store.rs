//! # インメモリストア
//!
//! 全リポジトリが共有する組み込みデータストア。外部 DB の代替として、
//! 正規化された行構造と採番シーケンスを一つのミューテックス配下に持つ。
//!
//! ## 設計方針
//!
//! - **正規化された行**: 行はプリミティブ（`i64` / `String`）のみを持つ。
//!   エンティティへの復元時にドメインの値オブジェクトで再検証する
//! - **単一の回答テーブル**: 質問集約経由で保存された回答も、単体で
//!   保存された回答も同じ行列に入る。リポジトリをまたいだ読み取りが
//!   常に一致する
//! - **採番シーケンス**: 質問・回答の ID は初回保存時にテーブルごとの
//!   シーケンスが割り当てる
//!
//! ## トランザクション境界
//!
//! 書き込みリポジトリメソッドは [`TxContext`] を必須引数とする
//! （構造的強制）。インメモリ実装では各書き込みが即時反映されるため
//! コミットは契約上の区切りのみだが、SQL 実装では begin/commit が
//! 実トランザクションに対応する。

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use qna_domain::{
    DomainError,
    answer::{Answer, AnswerId, AnswerRecord},
    delete_history::{ContentType, DeleteHistory},
    question::{Question, QuestionId, QuestionRecord, Title},
    user::{Email, Password, User, UserId, UserName},
};

use crate::error::InfraError;

/// 永続化済みデータの復元失敗を InfraError に変換する
///
/// 行はプリミティブで保持されるため、復元時の値オブジェクト再検証が
/// 失敗する可能性がある。保存時に検証済みのデータであり、通常は発生しない。
fn restore_error(entity: &str, e: DomainError) -> InfraError {
    InfraError::unexpected(format!("{entity}の復元に失敗しました: {e}"))
}

// =============================================================================
// 行構造
// =============================================================================

/// users テーブルの行
#[derive(Clone)]
pub(crate) struct UserRow {
    pub(crate) id: String,
    pub(crate) password: String,
    pub(crate) name: String,
    pub(crate) email: String,
}

impl UserRow {
    pub(crate) fn from_entity(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            password: user.password().as_str().to_string(),
            name: user.name().as_str().to_string(),
            email: user.email().as_str().to_string(),
        }
    }

    pub(crate) fn to_entity(&self) -> Result<User, InfraError> {
        let id = UserId::new(self.id.as_str()).map_err(|e| restore_error("ユーザー", e))?;
        let password =
            Password::new(self.password.as_str()).map_err(|e| restore_error("ユーザー", e))?;
        let name = UserName::new(self.name.as_str()).map_err(|e| restore_error("ユーザー", e))?;
        let email = Email::new(self.email.as_str()).map_err(|e| restore_error("ユーザー", e))?;
        Ok(User::new(id, password, name, email))
    }
}

/// questions テーブルの行（回答は持たない。answers テーブルから組み立てる）
#[derive(Clone)]
pub(crate) struct QuestionRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) contents: String,
    pub(crate) writer_id: String,
    pub(crate) deleted: bool,
}

impl QuestionRow {
    pub(crate) fn from_entity(id: i64, question: &Question) -> Self {
        Self {
            id,
            title: question.title().as_str().to_string(),
            contents: question.contents().to_string(),
            writer_id: question.writer_id().as_str().to_string(),
            deleted: question.is_deleted(),
        }
    }

    /// 行と組み立て済みの回答列から質問エンティティを復元する
    pub(crate) fn to_entity(&self, answers: Vec<Answer>) -> Result<Question, InfraError> {
        let title = Title::new(self.title.as_str()).map_err(|e| restore_error("質問", e))?;
        let writer_id =
            UserId::new(self.writer_id.as_str()).map_err(|e| restore_error("質問", e))?;
        Ok(Question::from_db(QuestionRecord {
            id: QuestionId::from_i64(self.id),
            title,
            contents: self.contents.clone(),
            writer_id,
            deleted: self.deleted,
            answers,
        }))
    }
}

/// answers テーブルの行
#[derive(Clone)]
pub(crate) struct AnswerRow {
    pub(crate) id: i64,
    pub(crate) writer_id: String,
    pub(crate) question_id: Option<i64>,
    pub(crate) contents: String,
    pub(crate) deleted: bool,
}

impl AnswerRow {
    /// 回答エンティティから行を作る
    ///
    /// `question_id` は呼び出し側が解決して渡す。質問集約経由の保存では
    /// 保存先の質問 ID に確定させ、単体保存では回答自身の参照を使う。
    pub(crate) fn from_entity(id: i64, question_id: Option<i64>, answer: &Answer) -> Self {
        Self {
            id,
            writer_id: answer.writer_id().as_str().to_string(),
            question_id,
            contents: answer.contents().to_string(),
            deleted: answer.is_deleted(),
        }
    }

    pub(crate) fn to_entity(&self) -> Result<Answer, InfraError> {
        let writer_id =
            UserId::new(self.writer_id.as_str()).map_err(|e| restore_error("回答", e))?;
        Ok(Answer::from_db(AnswerRecord {
            id: AnswerId::from_i64(self.id),
            writer_id,
            question_id: self.question_id.map(QuestionId::from_i64),
            contents: self.contents.clone(),
            deleted: self.deleted,
        }))
    }
}

/// delete_histories テーブルの行
#[derive(Clone)]
pub(crate) struct DeleteHistoryRow {
    pub(crate) content_type: String,
    pub(crate) content_id: Option<i64>,
    pub(crate) deleted_by: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl DeleteHistoryRow {
    pub(crate) fn from_entity(history: &DeleteHistory) -> Self {
        Self {
            content_type: history.content_type.to_string(),
            content_id: history.content_id,
            deleted_by: history.deleted_by.as_str().to_string(),
            created_at: history.created_at,
        }
    }

    pub(crate) fn to_entity(&self) -> Result<DeleteHistory, InfraError> {
        let content_type = ContentType::from_str(self.content_type.as_str())
            .map_err(|e| restore_error("削除履歴", e))?;
        let deleted_by =
            UserId::new(self.deleted_by.as_str()).map_err(|e| restore_error("削除履歴", e))?;
        Ok(DeleteHistory::from_db(
            content_type,
            self.content_id,
            deleted_by,
            self.created_at,
        ))
    }
}

// =============================================================================
// ストア本体
// =============================================================================

/// ストアの内部状態（全テーブルと採番シーケンス）
#[derive(Default)]
pub(crate) struct StoreInner {
    pub(crate) users: Vec<UserRow>,
    pub(crate) questions: Vec<QuestionRow>,
    pub(crate) answers: Vec<AnswerRow>,
    pub(crate) delete_histories: Vec<DeleteHistoryRow>,
    question_seq: i64,
    answer_seq: i64,
}

impl StoreInner {
    /// 質問 ID を採番する
    pub(crate) fn next_question_id(&mut self) -> i64 {
        self.question_seq += 1;
        self.question_seq
    }

    /// 回答 ID を採番する
    pub(crate) fn next_answer_id(&mut self) -> i64 {
        self.answer_seq += 1;
        self.answer_seq
    }

    /// 質問行を ID で挿入または置換する
    pub(crate) fn upsert_question(&mut self, row: QuestionRow) {
        match self.questions.iter_mut().find(|q| q.id == row.id) {
            Some(existing) => *existing = row,
            None => self.questions.push(row),
        }
    }

    /// 回答行を ID で挿入または置換する
    ///
    /// 置換時も行の位置を保つため、回答の追加順は保存をまたいで安定する。
    pub(crate) fn upsert_answer(&mut self, row: AnswerRow) {
        match self.answers.iter_mut().find(|a| a.id == row.id) {
            Some(existing) => *existing = row,
            None => self.answers.push(row),
        }
    }

    /// 質問行と answers テーブルから質問エンティティを組み立てる
    ///
    /// 回答は行の並び順（挿入順）のまま集約に入る。
    pub(crate) fn assemble_question(&self, row: &QuestionRow) -> Result<Question, InfraError> {
        let answers = self
            .answers
            .iter()
            .filter(|a| a.question_id == Some(row.id))
            .map(AnswerRow::to_entity)
            .collect::<Result<Vec<_>, _>>()?;
        row.to_entity(answers)
    }
}

/// 共有インメモリストア
///
/// クローンはハンドルの複製であり、同じ内部状態を指す。
/// 各リポジトリにクローンを渡して全テーブルを共有させる。
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内部状態のロックを取得する
    ///
    /// ロック破損（他スレッドのパニック）は `InfraErrorKind::LockPoisoned`
    /// として呼び出し側へ伝播する。
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, InfraError> {
        self.inner.lock().map_err(|_| InfraError::lock_poisoned())
    }
}

// =============================================================================
// TxContext
// =============================================================================

/// トランザクションコンテキスト
///
/// 書き込みリポジトリメソッドの必須引数。
/// トランザクションなしの書き込みをコンパイルエラーにする（構造的強制）。
///
/// # 構造的強制とは
///
/// 「書き込みにはトランザクションを使う」というルールを規約ではなく
/// 型で守らせる。`TxContext` を必須引数にすることで、トランザクション
/// なしの書き込みはコンパイルエラーになる。
///
/// # ライフサイクル
///
/// 1. `TransactionManager::begin()` で作成
/// 2. 書き込みメソッドに `&mut TxContext` として渡す
/// 3. `commit()` で確定
///
/// インメモリ実装は書き込みを即時反映するため、ドロップ時の自動
/// ロールバックは提供しない。呼び出し側は失敗し得る処理を書き込みの
/// 前に済ませることで原子性を保つ。
pub struct TxContext(TxContextInner);

enum TxContextInner {
    InMemory,
}

impl TxContext {
    /// インメモリトランザクションを開始する
    ///
    /// `InMemoryTransactionManager` のみが使用する。
    /// ユースケース層は `TransactionManager` trait 経由で TxContext を取得する。
    pub(crate) fn begin_in_memory() -> Self {
        Self(TxContextInner::InMemory)
    }

    /// トランザクションをコミットする
    pub async fn commit(self) -> Result<(), InfraError> {
        match self.0 {
            TxContextInner::InMemory => Ok(()),
        }
    }
}

// =============================================================================
// TransactionManager
// =============================================================================

/// トランザクション管理 trait
///
/// ユースケース層が TxContext を作成するための抽象化。
/// ユースケース層はストア実装に直接依存せず、この trait 経由で
/// トランザクションを開始する。
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// トランザクションを開始し、TxContext を返す
    async fn begin(&self) -> Result<TxContext, InfraError>;
}

/// インメモリストア用 TransactionManager 実装
#[derive(Clone, Default)]
pub struct InMemoryTransactionManager;

impl InMemoryTransactionManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionManager for InMemoryTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::begin_in_memory())
    }
}
