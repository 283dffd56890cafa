//! 床位数据模型
//! Bed data model
//!
//! A `Bed` is only ever changed by [`Transition::apply`](super::Transition::apply),
//! so its fields are private and exposed through accessors.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a bed. Immutable for the bed's lifetime.
/// 由存储分配的床位标识符，在床位生命周期内不可变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BedId(pub u64);

impl fmt::Display for BedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 床位状态
/// Bed state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BedState {
    /// 空闲，可分配病人
    /// Free and ready for a patient
    #[default]
    Available,
    /// 已有病人占用
    /// A patient is assigned
    Occupied,
    /// 出院后等待清洁
    /// Awaiting cleaning after discharge
    Maintenance,
}

impl BedState {
    /// Every state, in lifecycle order.
    pub const ALL: [BedState; 3] = [
        BedState::Available,
        BedState::Occupied,
        BedState::Maintenance,
    ];

    /// Stable lowercase label, as stored and exported.
    pub const fn label(self) -> &'static str {
        match self {
            BedState::Available => "available",
            BedState::Occupied => "occupied",
            BedState::Maintenance => "maintenance",
        }
    }

    /// 是否空闲
    /// Whether the bed is free for a patient
    pub const fn is_available(self) -> bool {
        matches!(self, BedState::Available)
    }

    /// 是否已占用
    /// Whether a patient is assigned
    pub const fn is_occupied(self) -> bool {
        matches!(self, BedState::Occupied)
    }

    /// 是否等待清洁
    /// Whether the bed is awaiting cleaning
    pub const fn is_maintenance(self) -> bool {
        matches!(self, BedState::Maintenance)
    }
}

impl fmt::Display for BedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BedState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BedState::ALL
            .into_iter()
            .find(|state| state.label() == s)
            .ok_or_else(|| Error::UnknownState(s.to_string()))
    }
}

/// A snapshot of one bed record.
///
/// 单个床位记录的快照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bed {
    pub(super) id: BedId,
    pub(super) bed_number: String,
    pub(super) state: BedState,
    pub(super) patient_name: Option<String>,
    pub(super) urgency_level: Option<String>,
    pub(super) assigned_at: Option<DateTime<Utc>>,
    pub(super) discharged_at: Option<DateTime<Utc>>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl Bed {
    /// Builds a freshly provisioned bed in state `Available`.
    ///
    /// The bed number is trimmed and must not be blank. Uniqueness is the
    /// store's responsibility.
    ///
    /// 构建一个新开通的、处于 `Available` 状态的床位。床号会去除首尾空白且不能为空。
    pub fn provisioned(id: BedId, bed_number: &str, now: DateTime<Utc>) -> Result<Self> {
        let bed_number = Self::normalize_bed_number(bed_number)?;
        Ok(Self {
            id,
            bed_number: bed_number.to_string(),
            state: BedState::Available,
            patient_name: None,
            urgency_level: None,
            assigned_at: None,
            discharged_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Trims a bed number and rejects it if blank.
    ///
    /// 去除床号首尾空白，为空时拒绝。
    pub fn normalize_bed_number(bed_number: &str) -> Result<&str> {
        let bed_number = bed_number.trim();
        if bed_number.is_empty() {
            return Err(Error::InvalidRecord("bed number must be present".into()));
        }
        Ok(bed_number)
    }

    /// 床位ID
    /// Store-assigned id
    pub fn id(&self) -> BedId {
        self.id
    }

    /// 床号
    /// Unique bed number
    pub fn bed_number(&self) -> &str {
        &self.bed_number
    }

    /// 当前状态
    /// Current lifecycle state
    pub fn state(&self) -> BedState {
        self.state
    }

    /// 病人姓名，仅在占用及清洁前保留
    /// Patient name, kept while occupied and until cleaned
    pub fn patient_name(&self) -> Option<&str> {
        self.patient_name.as_deref()
    }

    /// 紧急程度
    /// Urgency level, present alongside the patient name
    pub fn urgency_level(&self) -> Option<&str> {
        self.urgency_level.as_deref()
    }

    /// 分配时间
    /// When the current patient was assigned
    pub fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
    }

    /// 出院时间
    /// When the patient was discharged
    pub fn discharged_at(&self) -> Option<DateTime<Utc>> {
        self.discharged_at
    }

    /// 开通时间
    /// When the bed was provisioned
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 最后提交时间
    /// When the record was last committed
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 是否空闲
    /// Whether the bed is free for a patient
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// 是否已占用
    /// Whether a patient is assigned
    pub fn is_occupied(&self) -> bool {
        self.state.is_occupied()
    }

    /// 是否等待清洁
    /// Whether the bed is awaiting cleaning
    pub fn is_maintenance(&self) -> bool {
        self.state.is_maintenance()
    }

    /// Checks the occupancy invariant against this snapshot.
    pub fn is_consistent(&self) -> bool {
        occupancy_is_consistent(
            self.state,
            self.patient_name.as_deref(),
            self.urgency_level.as_deref(),
        )
    }
}

/// The occupancy invariant shared by every transition's post-condition.
///
/// - `Occupied`: patient name and urgency level both present and not blank.
/// - `Available`: both absent.
/// - `Maintenance`: both present or both absent. Discharge keeps the previous
///   occupant's data until the bed is cleaned.
///
/// 所有迁移后置条件共用的占用不变式。
pub fn occupancy_is_consistent(
    state: BedState,
    patient_name: Option<&str>,
    urgency_level: Option<&str>,
) -> bool {
    let present = |field: Option<&str>| field.is_some_and(|value| !value.trim().is_empty());
    match state {
        BedState::Occupied => present(patient_name) && present(urgency_level),
        BedState::Available => patient_name.is_none() && urgency_level.is_none(),
        BedState::Maintenance => patient_name.is_some() == urgency_level.is_some(),
    }
}
