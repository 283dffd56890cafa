//! End-to-end bed lifecycle through the public API.

pub mod common;

use bedflow::{BedState, Error};
use common::harness::{Ward, assert_consistent};

#[tokio::test]
async fn test_full_cycle_round_trip() {
    let ward = Ward::new(&["ICU-1"]).await;
    let manager = &ward.manager;
    let before = ward.beds[0].clone();
    let id = before.id();

    let occupied = manager.assign_patient(id, "J. Doe", "critical").await.unwrap();
    assert_eq!(occupied.state(), BedState::Occupied);
    assert_eq!(occupied.patient_name(), Some("J. Doe"));
    assert_eq!(occupied.urgency_level(), Some("critical"));
    assert!(occupied.assigned_at().is_some());

    let maintenance = manager.discharge_patient(id).await.unwrap();
    assert_eq!(maintenance.state(), BedState::Maintenance);
    assert!(maintenance.discharged_at().is_some());
    assert_eq!(maintenance.patient_name(), Some("J. Doe"));
    assert_eq!(maintenance.assigned_at(), occupied.assigned_at());

    let after = manager.mark_cleaned(id).await.unwrap();
    assert_eq!(after.state(), BedState::Available);
    assert_eq!(after.id(), before.id());
    assert_eq!(after.bed_number(), before.bed_number());
    assert_eq!(after.patient_name(), before.patient_name());
    assert_eq!(after.urgency_level(), before.urgency_level());
    assert_eq!(after.assigned_at(), before.assigned_at());
    assert_eq!(after.discharged_at(), before.discharged_at());
    assert_eq!(after.created_at(), before.created_at());
    assert!(after.updated_at() >= before.updated_at());

    assert_consistent(&manager.list_beds().await.unwrap());
}

#[tokio::test]
async fn test_no_state_is_skipped() {
    let ward = Ward::new(&["W-1"]).await;
    let manager = &ward.manager;
    let id = ward.beds[0].id();

    manager.assign_patient(id, "J. Doe", "critical").await.unwrap();

    // Occupied cannot go straight back to Available.
    let err = manager.mark_cleaned(id).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition {
            state: BedState::Occupied,
            ..
        }
    ));
    assert_eq!(err.to_string(), "bed not in maintenance");
    assert_eq!(manager.bed(id).await.unwrap().state(), BedState::Occupied);
}

#[tokio::test]
async fn test_maintenance_bed_cannot_take_a_patient() {
    let ward = Ward::new(&["W-1"]).await;
    let manager = &ward.manager;
    let id = ward.beds[0].id();

    manager.assign_patient(id, "J. Doe", "critical").await.unwrap();
    let maintenance = manager.discharge_patient(id).await.unwrap();

    let err = manager.assign_patient(id, "R. Roe", "low").await.unwrap_err();
    assert_eq!(err.to_string(), "bed not available");
    assert!(err.is_client_error());
    assert_eq!(manager.bed(id).await.unwrap(), maintenance);
}

#[tokio::test]
async fn test_beds_are_independent() {
    let ward = Ward::new(&["A", "B", "C"]).await;
    let manager = &ward.manager;
    let [a, b, c] = [ward.beds[0].id(), ward.beds[1].id(), ward.beds[2].id()];

    manager.assign_patient(a, "P. A", "low").await.unwrap();
    manager.assign_patient(b, "P. B", "high").await.unwrap();
    manager.discharge_patient(b).await.unwrap();

    let states: Vec<_> = manager
        .list_beds()
        .await
        .unwrap()
        .iter()
        .map(|bed| (bed.bed_number().to_string(), bed.state()))
        .collect();
    assert_eq!(
        states,
        [
            ("A".to_string(), BedState::Occupied),
            ("B".to_string(), BedState::Maintenance),
            ("C".to_string(), BedState::Available),
        ]
    );
    assert_eq!(manager.bed(c).await.unwrap(), ward.beds[2]);
}
