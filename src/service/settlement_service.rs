// service/settlement_service.rs
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{attendancedb::AttendanceExt, db::DBClient, jobdb::JobExt, paymentdb::PaymentExt},
    dtos::paymentdtos::{
        PaymentDetailDto, PaymentResponseDto, SettlementResponseDto, SettlePaymentDto,
    },
    models::{
        paymentmodel::{PaymentMethod, PaymentStatus},
        usermodel::User,
    },
    service::error::ServiceError,
    utils::currency::{paise_to_decimal, rupees_to_paise, split_evenly},
};

/// One (worker, amount) share per attendance-verified worker. Shares are
/// computed in paise so they always sum to the authorized total exactly.
pub fn compute_shares(total_rupees: f64, workers: &[Uuid]) -> Vec<(Uuid, BigDecimal)> {
    let total_paise = rupees_to_paise(total_rupees);
    split_evenly(total_paise, workers.len())
        .into_iter()
        .zip(workers.iter())
        .map(|(paise, worker_id)| (*worker_id, paise_to_decimal(paise)))
        .collect()
}

/// Splits a farmer-authorized payment across the workers who attended a
/// job and records per-worker payment rows.
#[derive(Clone)]
pub struct SettlementService {
    db_client: Arc<DBClient>,
}

impl SettlementService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn settle(
        &self,
        farmer: &User,
        body: SettlePaymentDto,
    ) -> Result<SettlementResponseDto, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(body.job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(body.job_id))?;

        if job.farmer_id != farmer.id {
            return Err(ServiceError::UnauthorizedJobAccess(farmer.id, job.id));
        }

        let workers = self.db_client.distinct_workers_for_job(job.id).await?;
        if workers.is_empty() {
            return Err(ServiceError::NoAttendance(job.id));
        }

        let shares = compute_shares(body.amount, &workers);

        let (status, paid_at) = match body.method {
            PaymentMethod::Cash => (PaymentStatus::Completed, Some(Utc::now())),
            // External settlement confirms UPI later; rows start pending.
            PaymentMethod::Upi => (PaymentStatus::Pending, None),
        };

        let payments = self
            .db_client
            .create_settlement(
                job.id,
                farmer.id,
                &shares,
                body.method,
                status,
                body.transaction_id,
                paid_at,
            )
            .await?;

        tracing::info!(
            job_id = %job.id,
            worker_count = workers.len(),
            amount = body.amount,
            method = body.method.to_str(),
            "settlement recorded"
        );

        Ok(SettlementResponseDto {
            job_id: job.id,
            total_amount: body.amount,
            worker_count: workers.len(),
            payments: payments.iter().map(PaymentResponseDto::from_payment).collect(),
        })
    }

    pub async fn history(&self, user_id: Uuid) -> Result<Vec<PaymentDetailDto>, ServiceError> {
        let rows = self.db_client.payments_for_user(user_id, 50).await?;
        Ok(rows.iter().map(PaymentDetailDto::from_row).collect())
    }

    pub async fn details(&self, payment_id: Uuid) -> Result<PaymentDetailDto, ServiceError> {
        let row = self
            .db_client
            .get_payment_detail(payment_id)
            .await?
            .ok_or(ServiceError::PaymentNotFound(payment_id))?;

        Ok(PaymentDetailDto::from_row(&row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::{FromPrimitive, Zero};

    fn workers(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn shares_sum_to_total_for_uneven_split() {
        let w = workers(3);
        let shares = compute_shares(500.0, &w);

        assert_eq!(shares.len(), 3);
        let sum: BigDecimal = shares.iter().map(|(_, amt)| amt.clone()).sum();
        assert_eq!(sum, BigDecimal::from_f64(500.0).unwrap().with_scale(2));
    }

    #[test]
    fn single_worker_takes_full_amount() {
        let w = workers(1);
        let shares = compute_shares(500.0, &w);
        assert_eq!(shares[0].1, BigDecimal::from_f64(500.0).unwrap().with_scale(2));
    }

    #[test]
    fn shares_preserve_worker_order() {
        let w = workers(4);
        let shares = compute_shares(1000.0, &w);
        let ids: Vec<Uuid> = shares.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, w);
    }

    #[test]
    fn no_workers_means_no_shares() {
        assert!(compute_shares(500.0, &[]).is_empty());
    }

    #[test]
    fn no_share_is_negative_or_zero_for_positive_total() {
        let w = workers(7);
        for (_, amt) in compute_shares(0.05, &w) {
            assert!(amt >= BigDecimal::zero());
        }
    }
}
