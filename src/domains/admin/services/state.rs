// Admin domain state
// 관리자 도메인 상태
use crate::shared::database::Database;
use crate::domains::admin::services::AdminService;

/// Admin domain state
/// admin_key: 관리자 요청 헤더와 비교할 공유 비밀값
#[derive(Clone)]
pub struct AdminState {
    pub admin_service: AdminService,
    pub admin_key: String,
}

impl AdminState {
    pub fn new(db: Database, admin_key: String) -> Self {
        Self {
            admin_service: AdminService::new(db),
            admin_key,
        }
    }
}
