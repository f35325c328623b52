use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};

// Import models for OpenAPI schema
use crate::domains::admin::models::*;
use crate::domains::auth::models::*;
use crate::domains::token::models::*;
use crate::domains::transfer::models::*;
use crate::domains::wallet::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::signin,
        crate::domains::auth::handlers::auth_handler::get_me,
        crate::domains::wallet::handlers::wallet_handler::create_wallet,
        crate::domains::wallet::handlers::wallet_handler::get_wallet,
        crate::domains::token::handlers::token_handler::list_wallet_tokens,
        crate::domains::token::handlers::token_handler::get_token,
        crate::domains::token::handlers::token_handler::list_token_transactions,
        crate::domains::token::handlers::token_handler::lookup_contract,
        crate::domains::token::handlers::token_handler::add_token,
        crate::domains::transfer::handlers::transfer_handler::transfer,
        crate::domains::admin::handlers::admin_handler::inject,
        crate::domains::admin::handlers::admin_handler::burn,
        crate::domains::admin::handlers::admin_handler::list_injections
    ),
    components(schemas(
        SigninRequest,
        SigninResponse,
        SessionResponse,
        Wallet,
        CreateWalletRequest,
        CreateWalletResponse,
        WalletResponse,
        Token,
        Transaction,
        TransactionType,
        TransactionStatus,
        WalletTokensResponse,
        TokenDetailResponse,
        TransactionsResponse,
        ContractTokenResponse,
        AddTokenRequest,
        AddTokenResponse,
        TransferRequest,
        TransferResponse,
        TokenInjection,
        InjectionKind,
        InjectRequest,
        InjectResponse,
        BurnRequest,
        BurnResponse,
        InjectionsResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Wallet session endpoints"),
        (name = "Wallets", description = "Wallet creation and lookup"),
        (name = "Tokens", description = "Token balances, history and contract import"),
        (name = "Transfers", description = "Wallet-to-wallet transfers"),
        (name = "Admin", description = "Mint and burn (requires x-admin-key)")
    ),
    info(
        title = "Wallet API Server",
        description = "Custodial demo wallet ledger",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "AdminKey",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-admin-key"))),
            );
        }
    }
}
