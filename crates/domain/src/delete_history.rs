//! # 削除履歴
//!
//! 質問・回答の削除が成功するたびに 1 件生成される監査レコード。
//!
//! ## 設計方針
//!
//! - **不変**: 構築後の変更操作を持たない。永続化は追記のみ
//! - **値による等価性**: 4 フィールドすべての値で比較する
//!   （監査の突き合わせ・テストで使用）
//! - **削除者 = 所有者**: 削除権限チェックにより削除実行者と
//!   コンテンツ所有者は常に一致するため、記録するのは所有者 ID のみ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{DomainError, answer::AnswerId, question::QuestionId, user::UserId};

/// 削除されたコンテンツの種別
///
/// 文字列表現（小文字）は永続化とログ出力で使用する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    /// 質問
    Question,
    /// 回答
    Answer,
}

impl std::str::FromStr for ContentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(Self::Question),
            "answer" => Ok(Self::Answer),
            _ => Err(DomainError::Validation(format!(
                "不正なコンテンツ種別: {}",
                s
            ))),
        }
    }
}

/// 削除履歴
///
/// 削除されたコンテンツの種別・ID・所有者・削除日時を記録する。
/// 質問と回答の ID 型を `i64` に落として一つのレコード型で扱う
/// （どちらの型かは `content_type` が示す）。
///
/// `content_id` が `None` になるのは未永続（ID 未採番）のエンティティを
/// 削除した場合のみ。サービス層の削除フローは永続済みエンティティを
/// ロードしてから削除するため、通常は常に `Some` となる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteHistory {
    pub content_type: ContentType,
    pub content_id: Option<i64>,
    pub deleted_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl DeleteHistory {
    /// 質問の削除履歴を作成する
    pub fn of_question(
        content_id: Option<QuestionId>,
        deleted_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content_type: ContentType::Question,
            content_id: content_id.map(QuestionId::as_i64),
            deleted_by,
            created_at,
        }
    }

    /// 回答の削除履歴を作成する
    pub fn of_answer(
        content_id: Option<AnswerId>,
        deleted_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content_type: ContentType::Answer,
            content_id: content_id.map(AnswerId::as_i64),
            deleted_by,
            created_at,
        }
    }

    /// 永続化済みのデータから削除履歴を復元する
    pub fn from_db(
        content_type: ContentType,
        content_id: Option<i64>,
        deleted_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content_type,
            content_id,
            deleted_by,
            created_at,
        }
    }
}
