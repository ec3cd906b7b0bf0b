use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::paymentdb::PaymentDetailRow,
    models::paymentmodel::{Payment, PaymentMethod, PaymentStatus},
    utils::currency::decimal_to_f64,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettlePaymentDto {
    pub job_id: Uuid,

    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,

    // Enum deserialization rejects anything outside {cash, upi}.
    pub method: PaymentMethod,

    #[validate(length(min = 1, max = 255, message = "Transaction reference too long"))]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponseDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub worker_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl PaymentResponseDto {
    pub fn from_payment(p: &Payment) -> Self {
        PaymentResponseDto {
            id: p.id,
            job_id: p.job_id,
            worker_id: p.worker_id,
            amount: decimal_to_f64(&p.amount),
            method: p.method,
            status: p.status,
            transaction_ref: p.transaction_ref.clone(),
            paid_at: p.paid_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponseDto {
    pub job_id: Uuid,
    pub total_amount: f64,
    pub worker_count: usize,
    pub payments: Vec<PaymentResponseDto>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailDto {
    pub id: Uuid,
    pub job_id: Uuid,
    pub work_type: String,
    pub farmer_id: Uuid,
    pub farmer_name: String,
    pub worker_id: Uuid,
    pub worker_name: String,
    pub worker_phone: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PaymentDetailDto {
    pub fn from_row(row: &PaymentDetailRow) -> Self {
        PaymentDetailDto {
            id: row.id,
            job_id: row.job_id,
            work_type: row.work_type.to_owned(),
            farmer_id: row.farmer_id,
            farmer_name: row.farmer_name.to_owned(),
            worker_id: row.worker_id,
            worker_name: row.worker_name.to_owned(),
            worker_phone: row.worker_phone.to_owned(),
            amount: decimal_to_f64(&row.amount),
            method: row.method,
            status: row.status,
            transaction_ref: row.transaction_ref.clone(),
            paid_at: row.paid_at,
            created_at: row.created_at,
        }
    }
}
