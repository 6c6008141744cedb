//! # Clock（時刻プロバイダ）
//!
//! 削除履歴のタイムスタンプ生成で `Utc::now()` を直接呼ばず、
//! テストで固定時刻を注入可能にするための抽象化。
//! エンティティのメソッドは `DateTime<Utc>` を引数で受け取り、
//! 時刻の読み取りは呼び出し側（ユースケース層）が本トレイト経由で行う。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
