//! 공통 유틸리티 모듈
//!
//! 이 모듈은 프로젝트 전체에서 공통으로 사용되는
//! 포맷팅, 원격 응답 검증, 시간 표시 함수를 포함합니다.

pub mod formatting;
pub mod time;
pub mod validation;

// Re-export main functions
pub use formatting::*;
pub use time::*;
pub use validation::*;
