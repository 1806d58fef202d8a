//! # Pearl Analytics
//!
//! 종목 하나의 일봉 시계열로부터 PearlScore를 계산합니다.
//!
//! - [`indicators`]: MA, RSI, MACD, ATR, OBV 지표 엔진
//! - [`trend_arrow`]: 5일 이동평균 대비 허용 오차 밴드 추세 분류
//! - [`pearl_score`]: 거래량 급증, 추세 강도, 모멘텀, 변동성을 결합한 복합 점수
//! - [`pipeline`]: 위 단계를 묶어 종목별 `ScoreRecord` 생성

pub mod error;
pub mod indicators;
pub mod pearl_score;
pub mod pipeline;
pub mod trend_arrow;

pub use error::{ScoreError, ScoreResult};
pub use indicators::{IndicatorEngine, IndicatorError, IndicatorResult};
pub use pearl_score::{PearlScore, PearlScorer, ScoreInputs};
pub use pipeline::{score_instrument, PearlPipeline};
pub use trend_arrow::TrendClassifier;
