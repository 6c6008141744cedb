//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: [`UserId`] は文字列ハンドルをラップし、
//!   所有者判定の唯一のプリミティブとして機能する
//! - **PII 保護**: パスワードとユーザー名は `Debug` 出力でマスクされる
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 同一性
//!
//! ユーザーの同一性は `id`（ハンドル）のみで判定する。プロフィール項目の
//! 差異は同一性に影響しない。質問・回答の削除権限チェックはすべて
//! [`User::match_user_id`] を経由する。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use qna_domain::user::{Email, Password, User, UserId, UserName};
//!
//! let user = User::new(
//!     UserId::new("javajigi")?,
//!     Password::new("password")?,
//!     UserName::new("name")?,
//!     Email::new("javajigi@slipp.net")?,
//! );
//!
//! assert!(user.match_user_id(&UserId::new("javajigi")?));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// ユーザー ID（一意識別子）
///
/// 登録時にユーザー自身が定めるログインハンドル。質問・回答の採番 ID と
/// 異なりアプリケーション側で生成されるため、数値ではなく文字列を
/// ラップする。所有者判定はこの型の等価比較で行う。
///
/// # バリデーション
///
/// - 前後の空白は除去
/// - 空文字列ではない
/// - 最大 20 文字
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct UserId(String);

impl UserId {
    /// ユーザー ID を作成する
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("ユーザー ID は必須です".to_string()));
        }

        if value.chars().count() > 20 {
            return Err(DomainError::Validation(
                "ユーザー ID は 20 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

define_validated_string! {
    /// パスワード（値オブジェクト）
    ///
    /// 本ドメインでは不透明な資格情報として保持するのみで、
    /// ハッシュ化・照合は扱わない。`Debug` 出力はマスクされる。
    pub struct Password {
        label: "パスワード",
        max_length: 20,
        pii: true,
    }
}

define_validated_string! {
    /// ユーザー名（表示名）
    ///
    /// 個人情報のため `Debug` 出力はマスクされる。
    pub struct UserName {
        label: "ユーザー名",
        max_length: 20,
        pii: true,
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式であること
    /// - 最大 50 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.chars().count() > 50 {
            return Err(DomainError::Validation(
                "メールアドレスは 50 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// 質問・回答の作成者を表現する。登録・認証は外部のアプリケーション層が
/// 担い、本ドメインは所有者判定のための同一性のみを提供する。
///
/// # 同一性
///
/// `PartialEq` は `id` のみを比較する手動実装。プロフィール項目
/// （パスワード・名前・メールアドレス）が異なっていても、同じハンドルを
/// 持つユーザーは同一とみなす。
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    password: Password,
    name: UserName,
    email: Email,
}

impl User {
    /// 新しいユーザーを作成する
    ///
    /// 値オブジェクトは生成時に検証済みのため、このコンストラクタ自体は
    /// 失敗しない。
    pub fn new(id: UserId, password: Password, name: UserName, email: Email) -> Self {
        Self {
            id,
            password,
            name,
            email,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// 自身の ID が指定された ID と一致するかを判定する
    ///
    /// 削除権限チェックの唯一のプリミティブ。例外的な状態は存在せず、
    /// 純粋な比較のみを行う。
    pub fn match_user_id(&self, other: &UserId) -> bool {
        self.id == *other
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
