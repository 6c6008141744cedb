//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換など、ユースケースで繰り返される
//! パターンを共通化する。

use qna_infra::InfraError;

use crate::error::ServiceError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, ServiceError>` に変換する
///
/// `find_by_id` 等の `Option` を返すリポジトリメソッドの結果を、
/// `ServiceError::NotFound` または `ServiceError::Database` に変換する。
///
/// ```ignore
/// // Before
/// let question = self.question_repository.find_by_id_and_deleted(id, false).await
///     .map_err(ServiceError::Database)?
///     .ok_or_else(|| ServiceError::NotFound("質問が見つかりません".to_string()))?;
///
/// // After
/// let question = self.question_repository.find_by_id_and_deleted(id, false).await
///     .or_not_found("質問")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `ServiceError::NotFound`、`InfraError` の場合は
    /// `ServiceError::Database` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, ServiceError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, ServiceError> {
        self.map_err(ServiceError::Database)?
            .ok_or_else(|| ServiceError::NotFound(format!("{}が見つかりません", entity_name)))
    }
}
