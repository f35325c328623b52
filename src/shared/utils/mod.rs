/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 지갑 키/주소 생성
/// - 요청 값 검증 및 정규화
pub mod address_generator;
pub mod validation;
