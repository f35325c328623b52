// Transfer domain state
// 송금 도메인 상태
use crate::shared::database::Database;
use crate::domains::transfer::services::TransferService;

#[derive(Clone)]
pub struct TransferState {
    pub transfer_service: TransferService,
}

impl TransferState {
    pub fn new(db: Database) -> Self {
        Self {
            transfer_service: TransferService::new(db),
        }
    }
}
