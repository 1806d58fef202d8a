//! 종목 정의.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 스캔 대상 종목 (코드, 종목명).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// 단축코드 (6자리, 예: 005930)
    pub code: String,
    /// 종목명 (한글)
    pub name: String,
}

impl Instrument {
    /// 새 종목을 생성합니다.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// 종목 코드 기준으로 중복을 제거합니다.
///
/// 처음 등장한 종목이 남고 입력 순서는 유지됩니다.
pub fn dedup_by_code(instruments: Vec<Instrument>) -> Vec<Instrument> {
    let mut seen = HashSet::with_capacity(instruments.len());
    instruments
        .into_iter()
        .filter(|i| seen.insert(i.code.clone()))
        .collect()
}
