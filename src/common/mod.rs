//! 공통 모듈
//!
//! 주소/금액/페이로드 검증, 표시용 포맷팅, 십진수 연산 및
//! 타임스탬프 처리 기능을 포함합니다.

// 검증
pub mod abi;
pub mod validation;

// 포맷팅
pub mod formatting;
pub mod math;
pub mod time;

// Re-export main types and functions
pub use abi::*;
pub use formatting::*;
pub use math::*;
pub use time::*;
pub use validation::*;
