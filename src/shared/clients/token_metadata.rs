use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// ERC-20 함수 selector (keccak256 앞 4바이트)
const SYMBOL_SELECTOR: &str = "0x95d89b41";
const NAME_SELECTOR: &str = "0x06fdde03";
const DECIMALS_SELECTOR: &str = "0x313ce567";

/// 컨트랙트 토큰 메타데이터
/// On-chain token metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractMetadata {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

/// 온체인 토큰 메타데이터 조회
/// On-chain token-metadata collaborator
#[async_trait]
pub trait TokenMetadataLookup: Send + Sync {
    async fn lookup(&self, contract_address: &str) -> Result<ContractMetadata>;
}

// 이더리움 JSON-RPC 클라이언트 (eth_call만 사용)
// Ethereum JSON-RPC client
pub struct EthRpcClient {
    http_client: reqwest::Client,
    rpc_url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl EthRpcClient {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// eth_call 실행 후 반환 데이터(hex) 반환
    /// Run a read-only contract call and return the raw hex result
    async fn eth_call(&self, contract_address: &str, data: &str) -> Result<String> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": contract_address, "data": data }, "latest"],
        });

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to Ethereum RPC")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Ethereum RPC returned error: {} - {}", status, body);
        }

        let body: RpcResponse = response
            .json()
            .await
            .context("Failed to parse Ethereum RPC response")?;

        if let Some(err) = body.error {
            bail!("eth_call failed ({}): {}", err.code, err.message);
        }

        body.result.ok_or_else(|| anyhow!("eth_call returned no result"))
    }
}

#[async_trait]
impl TokenMetadataLookup for EthRpcClient {
    async fn lookup(&self, contract_address: &str) -> Result<ContractMetadata> {
        let (symbol, name, decimals) = tokio::try_join!(
            self.eth_call(contract_address, SYMBOL_SELECTOR),
            self.eth_call(contract_address, NAME_SELECTOR),
            self.eth_call(contract_address, DECIMALS_SELECTOR),
        )?;

        Ok(ContractMetadata {
            symbol: decode_abi_string(&symbol).context("Failed to decode symbol()")?,
            name: decode_abi_string(&name).context("Failed to decode name()")?,
            decimals: decode_abi_u8(&decimals).context("Failed to decode decimals()")?,
        })
    }
}

fn decode_hex(raw: &str) -> Result<Vec<u8>> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(stripped).context("Invalid hex in RPC result")
}

/// 32바이트 워드를 usize로 (상위 바이트는 0이어야 함)
fn word_to_usize(word: &[u8]) -> Result<usize> {
    let (high, low) = word.split_at(24);
    if high.iter().any(|b| *b != 0) {
        bail!("ABI word out of range");
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    Ok(u64::from_be_bytes(buf) as usize)
}

/// ABI `string` 반환값 디코딩 (구형 `bytes32` 반환도 지원)
/// Decode an ABI-encoded `string`, falling back to legacy `bytes32` returns
pub fn decode_abi_string(raw: &str) -> Result<String> {
    let bytes = decode_hex(raw)?;

    if bytes.is_empty() {
        bail!("Empty result (address is not a contract?)");
    }

    // bytes32 (예: MKR): 뒤쪽 0 패딩 제거
    if bytes.len() == 32 {
        let end = bytes.iter().rposition(|b| *b != 0).map(|i| i + 1).unwrap_or(0);
        return String::from_utf8(bytes[..end].to_vec()).context("bytes32 is not UTF-8");
    }

    if bytes.len() < 64 {
        bail!("ABI string too short: {} bytes", bytes.len());
    }

    let offset = word_to_usize(&bytes[..32])?;
    let len_end = offset.checked_add(32).ok_or_else(|| anyhow!("ABI offset overflow"))?;
    let len_word = bytes
        .get(offset..len_end)
        .ok_or_else(|| anyhow!("ABI offset out of bounds"))?;
    let len = word_to_usize(len_word)?;
    let data = bytes
        .get(len_end..len_end.saturating_add(len))
        .filter(|d| d.len() == len)
        .ok_or_else(|| anyhow!("ABI string data out of bounds"))?;

    String::from_utf8(data.to_vec()).context("ABI string is not UTF-8")
}

/// ABI `uint8` 반환값 디코딩
/// Decode an ABI-encoded `uint8`
pub fn decode_abi_u8(raw: &str) -> Result<u8> {
    let bytes = decode_hex(raw)?;
    if bytes.len() != 32 {
        bail!("Expected a 32-byte word, got {} bytes", bytes.len());
    }
    let value = word_to_usize(&bytes)?;
    u8::try_from(value).context("decimals() out of uint8 range")
}
