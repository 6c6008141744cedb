//! # QnA ユースケース
//!
//! 質問の参照と、権限チェック付きカスケード削除を実装する。

use std::sync::Arc;

use qna_domain::{
    clock::Clock,
    delete_history::DeleteHistory,
    question::{Question, QuestionId},
    user::User,
};
use qna_infra::{
    TransactionManager,
    repository::{DeleteHistoryRepository, QuestionRepository},
};

use crate::{
    error::ServiceError,
    event_log::event,
    log_business_event,
    usecase::helpers::FindResultExt,
};

/// QnA ユースケース実装
///
/// 質問の参照と削除に関するビジネスロジックを実装する。
pub struct QnaUseCaseImpl {
    question_repository: Arc<dyn QuestionRepository>,
    delete_history_repository: Arc<dyn DeleteHistoryRepository>,
    tx_manager: Arc<dyn TransactionManager>,
    clock: Arc<dyn Clock>,
}

impl QnaUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        question_repository: Arc<dyn QuestionRepository>,
        delete_history_repository: Arc<dyn DeleteHistoryRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            question_repository,
            delete_history_repository,
            tx_manager,
            clock,
        }
    }

    /// アクティブな質問を取得する
    ///
    /// ## エラー
    ///
    /// - 質問が存在しない、または削除済みの場合: `ServiceError::NotFound`
    pub async fn find_question_by_id(&self, id: QuestionId) -> Result<Question, ServiceError> {
        self.question_repository
            .find_by_id_and_deleted(id, false)
            .await
            .or_not_found("質問")
    }

    /// 質問を削除する
    ///
    /// ## 処理フロー
    ///
    /// 1. アクティブな質問を取得
    /// 2. ドメイン層で権限チェックとカスケード削除を実行
    /// 3. 質問集約と削除履歴をトランザクション境界内で保存
    ///
    /// 失敗し得る判定はすべて書き込みの前に行われるため、
    /// 権限エラー時に永続化状態は変化しない。
    ///
    /// ## エラー
    ///
    /// - 質問が存在しない、または削除済みの場合: `ServiceError::NotFound`
    /// - ログインユーザーが質問またはいずれかの回答の作成者ではない場合:
    ///   `ServiceError::Domain`
    ///
    /// ## 戻り値
    ///
    /// 生成された削除履歴。質問自身の履歴が先頭、以降は回答の追加順。
    pub async fn delete_question(
        &self,
        login_user: &User,
        id: QuestionId,
    ) -> Result<Vec<DeleteHistory>, ServiceError> {
        // 1. アクティブな質問を取得
        let mut question = self.find_question_by_id(id).await?;

        // 2. ドメイン層で権限チェックとカスケード削除
        let now = self.clock.now();
        let histories = question.delete(login_user, now)?;

        // 3. 質問集約と削除履歴を保存
        let mut tx = self.tx_manager.begin().await?;
        self.question_repository.save(&mut tx, &question).await?;
        self.delete_history_repository
            .save_all(&mut tx, &histories)
            .await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::QNA,
            event.action = event::action::QUESTION_DELETED,
            event.entity_type = event::entity_type::QUESTION,
            event.entity_id = %id,
            event.actor_id = %login_user.id(),
            event.result = event::result::SUCCESS,
            "質問削除"
        );

        Ok(histories)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use qna_domain::{
        DomainError,
        answer::{Answer, AnswerId},
        clock::FixedClock,
        question::Title,
        user::{Email, Password, User, UserId, UserName},
    };
    use qna_infra::{
        InMemoryStore,
        InMemoryTransactionManager,
        repository::{InMemoryDeleteHistoryRepository, InMemoryQuestionRepository},
    };

    use super::*;

    // ===== フィクスチャ =====

    fn test_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn javajigi() -> User {
        User::new(
            UserId::new("javajigi").unwrap(),
            Password::new("password").unwrap(),
            UserName::new("name").unwrap(),
            Email::new("javajigi@slipp.net").unwrap(),
        )
    }

    fn sanjigi() -> User {
        User::new(
            UserId::new("sanjigi").unwrap(),
            Password::new("password").unwrap(),
            UserName::new("name").unwrap(),
            Email::new("sanjigi@slipp.net").unwrap(),
        )
    }

    /// SUT と、ストアを共有するリポジトリ群を構築する
    ///
    /// リポジトリは SUT と同じストアを指すため、テストから
    /// 保存状態を直接検証できる。
    fn build_sut() -> (
        QnaUseCaseImpl,
        InMemoryQuestionRepository,
        InMemoryDeleteHistoryRepository,
        InMemoryTransactionManager,
    ) {
        let store = InMemoryStore::new();
        let question_repo = InMemoryQuestionRepository::new(store.clone());
        let history_repo = InMemoryDeleteHistoryRepository::new(store);
        let tx_manager = InMemoryTransactionManager::new();
        let sut = QnaUseCaseImpl::new(
            Arc::new(question_repo.clone()),
            Arc::new(history_repo.clone()),
            Arc::new(tx_manager.clone()),
            Arc::new(FixedClock::new(test_now())),
        );
        (sut, question_repo, history_repo, tx_manager)
    }

    /// 質問をリポジトリ経由で保存する
    async fn seed_question(
        question_repo: &InMemoryQuestionRepository,
        tx_manager: &InMemoryTransactionManager,
        question: &Question,
    ) -> Question {
        let mut tx = tx_manager.begin().await.unwrap();
        let saved = question_repo.save(&mut tx, question).await.unwrap();
        tx.commit().await.unwrap();
        saved
    }

    // ===== find_question_by_id =====

    #[tokio::test]
    async fn test_find_question_by_id_アクティブな質問を取得できる() {
        // Arrange
        let (sut, question_repo, _, tx_manager) = build_sut();
        let writer = javajigi();
        let question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        let saved = seed_question(&question_repo, &tx_manager, &question).await;

        // Act
        let found = sut.find_question_by_id(saved.id().unwrap()).await.unwrap();

        // Assert
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_find_question_by_id_存在しない場合はnot_found() {
        // Arrange
        let (sut, _, _, _) = build_sut();

        // Act
        let err = sut
            .find_question_by_id(QuestionId::from_i64(999))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_question_by_id_削除済みの場合はnot_found() {
        // Arrange
        let (sut, question_repo, _, tx_manager) = build_sut();
        let writer = javajigi();
        let question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();
        sut.delete_question(&writer, id).await.unwrap();

        // Act
        let err = sut.find_question_by_id(id).await.unwrap_err();

        // Assert
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    // ===== delete_question =====

    #[tokio::test]
    async fn test_delete_question_履歴は質問が先頭で回答が追加順に続く() {
        // Arrange
        let (sut, question_repo, history_repo, tx_manager) = build_sut();
        let writer = javajigi();
        let mut question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        question.add_answer(Answer::new(&writer, &question, "Answers Contents1"));
        question.add_answer(Answer::new(&writer, &question, "Answers Contents2"));
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();

        // Act
        let histories = sut.delete_question(&writer, id).await.unwrap();

        // Assert
        let expected = vec![
            DeleteHistory::of_question(Some(id), writer.id().clone(), test_now()),
            DeleteHistory::of_answer(
                Some(AnswerId::from_i64(1)),
                writer.id().clone(),
                test_now(),
            ),
            DeleteHistory::of_answer(
                Some(AnswerId::from_i64(2)),
                writer.id().clone(),
                test_now(),
            ),
        ];
        assert_eq!(histories, expected);

        // 履歴と削除フラグがストアに反映されている
        assert_eq!(history_repo.find_all().await.unwrap(), expected);
        let reloaded = question_repo
            .find_by_id_and_deleted(id, true)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.is_deleted());
        assert!(reloaded.answers().iter().all(Answer::is_deleted));
    }

    #[tokio::test]
    async fn test_delete_question_回答がなければ履歴は1件() {
        // Arrange
        let (sut, question_repo, history_repo, tx_manager) = build_sut();
        let writer = javajigi();
        let question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();

        // Act
        let histories = sut.delete_question(&writer, id).await.unwrap();

        // Assert
        let expected = vec![DeleteHistory::of_question(
            Some(id),
            writer.id().clone(),
            test_now(),
        )];
        assert_eq!(histories, expected);
        assert_eq!(history_repo.find_all().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_delete_question_質問の作成者以外は削除できない() {
        // Arrange
        let (sut, question_repo, history_repo, tx_manager) = build_sut();
        let writer = javajigi();
        let question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();

        // Act
        let err = sut.delete_question(&sanjigi(), id).await.unwrap_err();

        // Assert
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::CannotDelete(_))
        ));
        // 永続化状態は変化しない
        let reloaded = question_repo
            .find_by_id_and_deleted(id, false)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_deleted());
        assert!(history_repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_question_他人の回答があると削除できずストアも変化しない() {
        // Arrange
        let (sut, question_repo, history_repo, tx_manager) = build_sut();
        let writer = javajigi();
        let other = sanjigi();
        let mut question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        question.add_answer(Answer::new(&writer, &question, "Answers Contents1"));
        question.add_answer(Answer::new(&other, &question, "Answers Contents2"));
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();

        // Act
        let err = sut.delete_question(&writer, id).await.unwrap_err();

        // Assert
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::CannotDelete(_))
        ));
        // ドメイン層の判定は書き込みの前に行われるため、
        // 部分的に削除された状態は保存されない
        let reloaded = question_repo
            .find_by_id_and_deleted(id, false)
            .await
            .unwrap()
            .unwrap();
        assert!(!reloaded.is_deleted());
        assert!(reloaded.answers().iter().all(|a| !a.is_deleted()));
        assert!(history_repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_question_存在しない質問はnot_found() {
        // Arrange
        let (sut, _, _, _) = build_sut();

        // Act
        let err = sut
            .delete_question(&javajigi(), QuestionId::from_i64(999))
            .await
            .unwrap_err();

        // Assert
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_question_削除済みの質問の再削除はnot_found() {
        // Arrange
        let (sut, question_repo, _, tx_manager) = build_sut();
        let writer = javajigi();
        let question = Question::new(Title::new("title1").unwrap(), "contents1", &writer);
        let saved = seed_question(&question_repo, &tx_manager, &question).await;
        let id = saved.id().unwrap();
        sut.delete_question(&writer, id).await.unwrap();

        // Act
        let err = sut.delete_question(&writer, id).await.unwrap_err();

        // Assert
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
