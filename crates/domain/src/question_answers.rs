//! # 回答コレクションの削除ラッパー
//!
//! 質問配下の回答列に対するカスケード削除だけを担う一時的なラッパー。
//! 永続化されず、識別子も持たない。
//!
//! ## 借用ベースの設計
//!
//! 呼び出し側（通常は [`Question`](crate::question::Question)）が所有する
//! スライスを `&mut` で借用する。コピーを作らないため、削除フラグの変更は
//! そのまま呼び出し側のコレクションに反映される。

use chrono::{DateTime, Utc};

use crate::{DomainError, answer::Answer, delete_history::DeleteHistory, user::User};

/// 回答列のカスケード削除を行うラッパー
pub struct QuestionAnswers<'a> {
    answers: &'a mut [Answer],
}

impl<'a> QuestionAnswers<'a> {
    pub fn new(answers: &'a mut [Answer]) -> Self {
        Self { answers }
    }

    /// すべての回答を順に削除し、履歴を入力順で返す
    ///
    /// フェイルファスト: 各回答の所有者チェックは反復順に行われ、最初の
    /// 失敗でエラーをそのまま伝播する。失敗より前に処理された回答には
    /// 削除フラグが立ったまま残る（部分適用の巻き戻しはトランザクション
    /// 境界を持つ呼び出し側の責務）。
    ///
    /// 成功時は回答 1 件につき履歴 1 件が 1:1 で対応する。
    pub fn delete(
        self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<Vec<DeleteHistory>, DomainError> {
        self.answers
            .iter_mut()
            .map(|answer| answer.delete(user, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        answer::{AnswerId, AnswerRecord},
        question::QuestionId,
        user::{Email, Password, UserId, UserName},
    };

    // フィクスチャ

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn javajigi() -> User {
        User::new(
            UserId::new("javajigi").unwrap(),
            Password::new("password").unwrap(),
            UserName::new("name").unwrap(),
            Email::new("javajigi@slipp.net").unwrap(),
        )
    }

    #[fixture]
    fn sanjigi() -> User {
        User::new(
            UserId::new("sanjigi").unwrap(),
            Password::new("password").unwrap(),
            UserName::new("name").unwrap(),
            Email::new("sanjigi@slipp.net").unwrap(),
        )
    }

    fn saved_answer(id: i64, writer: &User) -> Answer {
        Answer::from_db(AnswerRecord {
            id: AnswerId::from_i64(id),
            writer_id: writer.id().clone(),
            question_id: Some(QuestionId::from_i64(1)),
            contents: format!("Answers Contents{id}"),
            deleted: false,
        })
    }

    #[rstest]
    fn test_全回答が同一作成者なら削除は入力順の履歴を返す(
        javajigi: User,
        now: DateTime<Utc>,
    ) {
        // Arrange
        let mut answers = vec![
            saved_answer(11, &javajigi),
            saved_answer(12, &javajigi),
            saved_answer(13, &javajigi),
        ];

        // Act
        let histories = QuestionAnswers::new(&mut answers).delete(&javajigi, now).unwrap();

        // Assert: 履歴は回答と 1:1 で入力順
        let ids: Vec<_> = histories.iter().map(|h| h.content_id).collect();
        assert_eq!(ids, vec![Some(11), Some(12), Some(13)]);
        assert!(answers.iter().all(Answer::is_deleted));
    }

    #[rstest]
    fn test_空の回答列の削除は空の履歴を返す(javajigi: User, now: DateTime<Utc>) {
        let mut answers: Vec<Answer> = vec![];

        let histories = QuestionAnswers::new(&mut answers).delete(&javajigi, now).unwrap();

        assert_eq!(histories, vec![]);
    }

    /// 他者の回答で最初に失敗した時点でエラーを伝播する。
    /// それより前の回答には削除フラグが残る（借用経由で呼び出し側の
    /// コレクションが直接変更されるため）
    #[rstest]
    fn test_他者の回答があると削除は途中で失敗する(
        javajigi: User,
        sanjigi: User,
        now: DateTime<Utc>,
    ) {
        // Arrange
        let mut answers = vec![
            saved_answer(11, &javajigi),
            saved_answer(12, &sanjigi),
            saved_answer(13, &javajigi),
        ];

        // Act
        let result = QuestionAnswers::new(&mut answers).delete(&javajigi, now);

        // Assert
        assert!(matches!(result, Err(DomainError::CannotDelete(_))));
        assert!(answers[0].is_deleted());
        assert!(!answers[1].is_deleted());
        assert!(!answers[2].is_deleted());
    }
}
