// service/job_service.rs
use std::sync::Arc;

use bigdecimal::{BigDecimal, FromPrimitive};
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, jobdb::JobExt, groupdb::GroupExt, userdb::UserExt},
    dtos::jobdtos::{CreateJobDto, JobResponseDto},
    events::{EventHub, EVENT_JOB_NEW_OFFER},
    models::{
        jobmodel::WorkerType,
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
    utils::currency::decimal_to_f64,
};

/// Owns job creation and the pending→matched transition.
#[derive(Clone)]
pub struct JobService {
    db_client: Arc<DBClient>,
    events: EventHub,
}

impl JobService {
    pub fn new(db_client: Arc<DBClient>, events: EventHub) -> Self {
        Self { db_client, events }
    }

    pub async fn create_job(
        &self,
        farmer: &User,
        body: CreateJobDto,
    ) -> Result<JobResponseDto, ServiceError> {
        if farmer.role != UserRole::Farmer {
            return Err(ServiceError::Forbidden(
                "Only farmers can post jobs".to_string(),
            ));
        }

        let pay_per_day = BigDecimal::from_f64(body.pay_per_day)
            .ok_or_else(|| ServiceError::Validation("Invalid pay per day".to_string()))?
            .with_scale(2);

        let job = self
            .db_client
            .create_job(
                farmer.id,
                body.work_type,
                body.worker_type.unwrap_or(WorkerType::Individual),
                body.workers_needed.unwrap_or(1),
                pay_per_day,
                body.location_village,
                body.location_lat,
                body.location_lon,
            )
            .await?;

        // Every connected client hears about new offers; no topic scoping.
        self.events.publish_global(
            EVENT_JOB_NEW_OFFER,
            json!({
                "jobId": job.id,
                "workType": job.work_type,
                "payPerDay": decimal_to_f64(&job.pay_per_day),
                "farmerName": farmer.name,
            }),
        );

        Ok(JobResponseDto::from_job(&job, farmer, None))
    }

    /// Up to 20 pending jobs, newest first. Despite the name there is no
    /// geofilter yet; the listing is a placeholder ranking.
    pub async fn list_nearby_jobs(&self) -> Result<Vec<JobResponseDto>, ServiceError> {
        let rows = self.db_client.get_pending_jobs_with_farmer(20).await?;
        Ok(rows.iter().map(JobResponseDto::from_listing_row).collect())
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<JobResponseDto, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let farmer = self
            .db_client
            .get_user(Some(job.farmer_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(job.farmer_id))?;

        let acceptance = self.db_client.get_job_acceptance(job_id).await?;

        Ok(JobResponseDto::from_job(&job, &farmer, acceptance))
    }

    /// A group takes a pending job, acting through its leader.
    pub async fn accept_as_group(
        &self,
        group_id: Uuid,
        job_id: Uuid,
        acting_user: &User,
    ) -> Result<JobResponseDto, ServiceError> {
        let group = self
            .db_client
            .get_group(group_id)
            .await?
            .ok_or(ServiceError::GroupNotFound(group_id))?;

        if group.leader_id != acting_user.id {
            return Err(ServiceError::NotGroupLeader(acting_user.id, group_id));
        }

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        // Conditional transition: of any concurrent accepts, exactly one
        // sees a row come back.
        let matched = self
            .db_client
            .try_match_job(job_id)
            .await?
            .ok_or(ServiceError::InvalidJobStatus(job_id, job.status))?;

        let acceptance = self
            .db_client
            .create_job_acceptance(job_id, Some(group_id), None, acting_user.id)
            .await?;

        tracing::info!(
            job_id = %job_id,
            group_id = %group_id,
            leader_id = %acting_user.id,
            "job matched to group"
        );

        let farmer = self
            .db_client
            .get_user(Some(matched.farmer_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(matched.farmer_id))?;

        Ok(JobResponseDto::from_job(&matched, &farmer, Some(acceptance)))
    }

    /// A single worker takes a pending job for themselves.
    pub async fn accept_job(
        &self,
        job_id: Uuid,
        worker: &User,
    ) -> Result<JobResponseDto, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        if job.farmer_id == worker.id {
            return Err(ServiceError::Forbidden(
                "You cannot accept your own job".to_string(),
            ));
        }

        let matched = self
            .db_client
            .try_match_job(job_id)
            .await?
            .ok_or(ServiceError::InvalidJobStatus(job_id, job.status))?;

        let acceptance = self
            .db_client
            .create_job_acceptance(job_id, None, Some(worker.id), worker.id)
            .await?;

        tracing::info!(job_id = %job_id, worker_id = %worker.id, "job matched to worker");

        let farmer = self
            .db_client
            .get_user(Some(matched.farmer_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(matched.farmer_id))?;

        Ok(JobResponseDto::from_job(&matched, &farmer, Some(acceptance)))
    }
}
