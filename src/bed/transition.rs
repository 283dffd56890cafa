//! 床位生命周期迁移
//! Bed lifecycle transitions
//!
//! ```text
//! Available   --assign-->    Occupied
//! Occupied    --discharge--> Maintenance
//! Maintenance --clean-->     Available
//! ```

use super::model::{Bed, BedState};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// A requested lifecycle transition.
///
/// Each variant moves a bed from exactly one source state to exactly one
/// target state; no state is ever skipped.
///
/// 请求的生命周期迁移。每个变体只从一个源状态迁移到一个目标状态，不跳过任何状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 分配病人
    /// Assign a patient
    Assign {
        patient_name: String,
        urgency_level: String,
    },
    /// 病人出院
    /// Discharge the patient
    Discharge,
    /// 清洁完成
    /// Cleaning finished
    Clean,
}

impl Transition {
    pub fn assign(patient_name: impl Into<String>, urgency_level: impl Into<String>) -> Self {
        Transition::Assign {
            patient_name: patient_name.into(),
            urgency_level: urgency_level.into(),
        }
    }

    /// Stable, human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Transition::Assign { .. } => "assign",
            Transition::Discharge => "discharge",
            Transition::Clean => "clean",
        }
    }

    /// The only state this transition may start from.
    pub const fn required_source(&self) -> BedState {
        match self {
            Transition::Assign { .. } => BedState::Available,
            Transition::Discharge => BedState::Occupied,
            Transition::Clean => BedState::Maintenance,
        }
    }

    pub const fn target(&self) -> BedState {
        match self {
            Transition::Assign { .. } => BedState::Occupied,
            Transition::Discharge => BedState::Maintenance,
            Transition::Clean => BedState::Available,
        }
    }

    /// Reason reported when the guard fails.
    pub const fn rejection(&self) -> &'static str {
        match self {
            Transition::Assign { .. } => "bed not available",
            Transition::Discharge => "no patient to discharge",
            Transition::Clean => "bed not in maintenance",
        }
    }

    /// Computes the bed that results from applying this transition at `now`.
    ///
    /// Checks the guard against `current`, applies every field change to a
    /// copy and verifies the occupancy invariant on the result. `current` is
    /// never modified, so a failure leaves nothing half-applied.
    ///
    /// 计算在 `now` 时刻应用此迁移后的床位。检查守卫、在副本上应用全部字段变更，
    /// 并验证结果满足占用不变式。失败时不会留下部分修改。
    pub fn apply(&self, current: &Bed, now: DateTime<Utc>) -> Result<Bed> {
        if current.state != self.required_source() {
            return Err(Error::InvalidTransition {
                transition: self.label(),
                state: current.state,
                reason: self.rejection(),
            });
        }

        let mut next = current.clone();
        next.state = self.target();
        next.updated_at = now;
        match self {
            Transition::Assign {
                patient_name,
                urgency_level,
            } => {
                next.patient_name = Some(patient_name.clone());
                next.urgency_level = Some(urgency_level.clone());
                next.assigned_at = Some(now);
            }
            Transition::Discharge => {
                next.discharged_at = Some(now);
            }
            Transition::Clean => {
                next.patient_name = None;
                next.urgency_level = None;
                next.assigned_at = None;
                next.discharged_at = None;
            }
        }

        if !next.is_consistent() {
            return Err(Error::InvalidRecord(format!(
                "patient name and urgency level do not match state {}",
                next.state
            )));
        }
        Ok(next)
    }
}
