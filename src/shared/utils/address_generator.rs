/// 지갑 키/주소 생성기
/// Wallet key material and address generator
///
/// 규칙:
/// - private key: 32바이트 랜덤값의 hex 문자열
/// - public key: hex(sha256(private key 문자열))
/// - address: "0x" + hex(sha256(public key 문자열)) 앞 40자
///
/// 같은 private key를 가져오면 항상 같은 주소가 나옴

use rand::RngCore;
use sha2::{Digest, Sha256};

/// 주소 충돌 시 재생성 최대 횟수
/// Max attempts when generated key material collides with an existing address
pub const MAX_GENERATION_ATTEMPTS: u32 = 5;

/// 주소 hex 길이 (0x 제외)
pub const ADDRESS_HEX_LEN: usize = 40;

/// 지갑 키 재료
/// Wallet key material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

impl KeyMaterial {
    /// 새 랜덤 키 생성
    /// Generate fresh random key material
    pub fn generate() -> Self {
        Self::from_private_key(&generate_private_key())
    }

    /// private key에서 public key와 주소 유도
    /// Derive public key and address from an imported private key
    pub fn from_private_key(private_key: &str) -> Self {
        let public_key = derive_public_key(private_key);
        let address = derive_address(&public_key);

        Self {
            private_key: private_key.to_string(),
            public_key,
            address,
        }
    }

    /// private key와 public key를 모두 받은 경우 (주소는 public key에서 유도)
    /// Caller supplied both halves; the address follows the public key
    pub fn from_parts(private_key: &str, public_key: &str) -> Self {
        Self {
            private_key: private_key.to_string(),
            public_key: public_key.to_string(),
            address: derive_address(public_key),
        }
    }
}

/// 32바이트 랜덤 비밀 키 (hex)
pub fn generate_private_key() -> String {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    hex::encode(secret)
}

pub fn derive_public_key(private_key: &str) -> String {
    hex::encode(Sha256::digest(private_key.as_bytes()))
}

/// 단방향 해시를 고정 길이 hex로 잘라 0x 접두사를 붙임
/// One-way hash truncated to 40 hex chars, `0x`-prefixed
pub fn derive_address(public_key: &str) -> String {
    let digest = hex::encode(Sha256::digest(public_key.as_bytes()));
    format!("0x{}", &digest[..ADDRESS_HEX_LEN])
}
