//! 스크리닝을 위한 도메인 모델.

mod instrument;
mod market_data;
mod score;

pub use instrument::*;
pub use market_data::*;
pub use score::*;
