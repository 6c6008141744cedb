//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **削除ワークフロー中心**: この層の業務エラーは削除権限違反
//!   （[`DomainError::CannotDelete`]）のみ。「見つからない」は検索を担う
//!   サービス層の関心事であり、ドメイン層では定義しない
//!
//! ## 使用例
//!
//! ```rust
//! use qna_domain::DomainError;
//!
//! fn validate_contents(contents: &str) -> Result<(), DomainError> {
//!     if contents.is_empty() {
//!         return Err(DomainError::Validation("本文は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// 上位層でこのエラーを受け取り、利用者向けの失敗応答に変換する。
///
/// # 設計判断
///
/// - `thiserror` を使用し、`std::error::Error` トレイトを自動実装
/// - 各バリアントに `#[error(...)]` で人間可読なメッセージを定義
/// - ドメイン層はリトライや回復を行わず、そのまま呼び出し側へ伝播させる
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 値オブジェクトの構築時に入力値がビジネスルールに違反している
    /// 場合に使用する。
    ///
    /// # 例
    ///
    /// - 必須フィールドが未入力
    /// - 文字数制限の超過
    /// - 不正なフォーマット
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 削除権限エラー
    ///
    /// コンテンツの削除を要求したユーザーが作成者と一致しない場合に
    /// 使用する。質問・回答の削除は作成者本人のみが行える。
    ///
    /// カスケード削除（質問 + 配下の回答）の途中で発生した場合も、
    /// このエラーがそのまま呼び出し側へ伝播する。回答単体の削除失敗と
    /// 同じ種類のエラーとして観測できる。
    #[error("削除する権限がありません: {0}")]
    CannotDelete(String),
}
