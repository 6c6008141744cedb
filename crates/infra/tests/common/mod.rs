//! テスト共通フィクスチャ
//!
//! リポジトリ統合テストで共通利用するエンティティ生成ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use qna_domain::{
    answer::Answer,
    question::{Question, Title},
    user::{Email, Password, User, UserId, UserName},
};
use qna_infra::{
    InMemoryTransactionManager,
    TransactionManager,
    repository::{
        AnswerRepository,
        InMemoryAnswerRepository,
        InMemoryQuestionRepository,
        InMemoryUserRepository,
        QuestionRepository,
        UserRepository,
    },
};

// =============================================================================
// フィクスチャ定数
// =============================================================================

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用ユーザー javajigi を作成
pub fn javajigi() -> User {
    User::new(
        UserId::new("javajigi").unwrap(),
        Password::new("password").unwrap(),
        UserName::new("name").unwrap(),
        Email::new("javajigi@slipp.net").unwrap(),
    )
}

/// テスト用ユーザー sanjigi を作成
pub fn sanjigi() -> User {
    User::new(
        UserId::new("sanjigi").unwrap(),
        Password::new("password").unwrap(),
        UserName::new("name").unwrap(),
        Email::new("sanjigi@slipp.net").unwrap(),
    )
}

// =============================================================================
// エンティティ生成ヘルパー
// =============================================================================

/// デフォルト値で質問を作成（未採番）
pub fn create_test_question(writer: &User) -> Question {
    Question::new(Title::new("title1").unwrap(), "contents1", writer)
}

/// デフォルト値で回答を作成（未採番）
pub fn create_test_answer(writer: &User, question: &Question) -> Answer {
    Answer::new(writer, question, "Answers Contents1")
}

// =============================================================================
// 保存ヘルパー
// =============================================================================

/// トランザクション境界込みで質問を保存する
pub async fn save_question(
    repo: &InMemoryQuestionRepository,
    tx_manager: &InMemoryTransactionManager,
    question: &Question,
) -> Question {
    let mut tx = tx_manager.begin().await.expect("トランザクション開始に失敗");
    let saved = repo.save(&mut tx, question).await.expect("質問の保存に失敗");
    tx.commit().await.expect("コミットに失敗");
    saved
}

/// トランザクション境界込みで回答を保存する
pub async fn save_answer(
    repo: &InMemoryAnswerRepository,
    tx_manager: &InMemoryTransactionManager,
    answer: &Answer,
) -> Answer {
    let mut tx = tx_manager.begin().await.expect("トランザクション開始に失敗");
    let saved = repo.save(&mut tx, answer).await.expect("回答の保存に失敗");
    tx.commit().await.expect("コミットに失敗");
    saved
}

/// トランザクション境界込みでユーザーを保存する
pub async fn save_user(
    repo: &InMemoryUserRepository,
    tx_manager: &InMemoryTransactionManager,
    user: &User,
) -> User {
    let mut tx = tx_manager.begin().await.expect("トランザクション開始に失敗");
    let saved = repo.save(&mut tx, user).await.expect("ユーザーの保存に失敗");
    tx.commit().await.expect("コミットに失敗");
    saved
}
