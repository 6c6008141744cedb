//! # サービス層エラー定義
//!
//! ユースケースの実行で発生するエラーを定義する。

use qna_domain::DomainError;
use qna_infra::InfraError;
use thiserror::Error;

/// サービス層で発生するエラー
///
/// ドメイン層・インフラ層のエラーは `#[from]` で対応する variant に
/// 変換され、呼び出し側はこの型だけを扱えばよい。
#[derive(Debug, Error)]
pub enum ServiceError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// ドメインルール違反
    ///
    /// 削除権限エラー（[`DomainError::CannotDelete`]）はこの variant に
    /// 包まれたまま、メッセージを変えずに呼び出し側へ伝播する。
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ドメインエラーはメッセージを変えずに表示される() {
        let domain_err = DomainError::CannotDelete("質問の作成者ではありません".to_string());
        let expected = domain_err.to_string();

        let err = ServiceError::from(domain_err);

        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_not_foundはリソース名を含むメッセージになる() {
        let err = ServiceError::NotFound("質問が見つかりません".to_string());

        assert_eq!(
            err.to_string(),
            "リソースが見つかりません: 質問が見つかりません"
        );
    }
}
