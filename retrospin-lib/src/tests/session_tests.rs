use super::*;
use crate::drive::FixedDrive;
use crate::fakes::{BrokenMount, FakeDrives, ScriptedReader};
use crate::index::TitleEntry;
use std::time::Duration;

fn index(rows: &[(&str, &str, &str)]) -> TitleIndex {
    let mut index = TitleIndex::new();
    for (system, serial, title) in rows {
        index.insert(system, serial, title);
    }
    index
}

/// Write a fake raw device whose first sector carries a Saturn product number.
fn saturn_device(dir: &Path, serial: &str) -> PathBuf {
    let mut sector = vec![0u8; 2048 * 4];
    sector[0..16].copy_from_slice(b"SEGA SEGASATURN ");
    let field = format!("{:<10}", serial);
    sector[32..42].copy_from_slice(field.as_bytes());
    let path = dir.join("sr0");
    std::fs::write(&path, &sector).unwrap();
    path
}

fn blank_device(dir: &Path) -> PathBuf {
    let path = dir.join("sr0");
    std::fs::write(&path, vec![0u8; 2048 * 4]).unwrap();
    path
}

fn broken_psx(mount: &BrokenMount, mount_point: &Path) -> PsxReader {
    PsxReader::with_facility(Box::new(mount.clone()))
        .with_mount_point(mount_point)
        .with_attempts(2)
        .with_retry_delay(Duration::ZERO)
}

#[test]
fn absent_drive_runs_no_reader() {
    let drives = FakeDrives::absent();
    let saturn = ScriptedReader::returning(System::Saturn, "MK-81051");
    let psx = ScriptedReader::returning(System::Psx, "SLUS-00515");
    let mut session = DiscSession::new(Box::new(drives.clone()), Ok(TitleIndex::new()));
    session.register(saturn.clone()).register(psx.clone());

    let outcome = session.probe();
    match &outcome {
        DiscOutcome::Unmatched(disc) => {
            assert_eq!(disc.reason, UnmatchedReason::DriveNotFound);
            assert_eq!(disc.serial, None);
            assert_eq!(disc.drive, None);
        }
        other => panic!("unexpected outcome: {other}"),
    }
    assert_eq!(saturn.calls(), 0);
    assert_eq!(psx.calls(), 0);
    assert_eq!(drives.locates(), 1);
    assert!(session.state().is_terminal());
}

#[test]
fn empty_tray_is_no_disc() {
    let saturn = ScriptedReader::returning(System::Saturn, "MK-81051");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::empty_tray("/dev/sr0")),
        Ok(TitleIndex::new()),
    );
    session.register(saturn.clone());

    let outcome = session.probe();
    assert_eq!(
        outcome,
        DiscOutcome::Unmatched(
            UnmatchedDisc::new(UnmatchedReason::NoDiscPresent).with_drive("/dev/sr0")
        )
    );
    assert_eq!(saturn.calls(), 0);
}

#[test]
fn saturn_disc_resolves_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let device = saturn_device(dir.path(), "MK-81051");
    let mount = BrokenMount::default();

    let mut session = DiscSession::new(
        Box::new(FixedDrive::new(&device)),
        Ok(index(&[("ss", "MK-81051", "Sega Rally Championship (USA)")])),
    );
    session
        .register(SaturnReader::new())
        .register(MegaCdReader::new())
        .register(broken_psx(&mount, &dir.path().join("mnt")));

    let outcome = session.probe();
    assert_eq!(
        outcome,
        DiscOutcome::Resolved(ResolvedDisc {
            drive: device.clone(),
            title: "Sega Rally Championship (USA)".to_string(),
            system: System::Saturn,
            serial: "MK-81051".to_string(),
        })
    );
    assert_eq!(mount.mounts(), 0);
    assert!(matches!(session.state(), ProbeState::Resolved(_)));
}

#[test]
fn psx_mount_failures_end_unmatched_without_leak() {
    let dir = tempfile::tempdir().unwrap();
    let device = blank_device(dir.path());
    let mount = BrokenMount::default();

    let mut session = DiscSession::new(
        Box::new(FixedDrive::new(&device)),
        Ok(index(&[("psx", "SLUS-00515", "Metal Gear Solid")])),
    );
    session
        .register(SaturnReader::new())
        .register(MegaCdReader::new())
        .register(broken_psx(&mount, &dir.path().join("mnt")));

    let outcome = session.probe();
    match &outcome {
        DiscOutcome::Unmatched(disc) => {
            assert_eq!(disc.reason, UnmatchedReason::NoSerial);
            assert_eq!(disc.serial, None);
            assert_eq!(disc.drive.as_deref(), Some(device.as_path()));
        }
        other => panic!("unexpected outcome: {other}"),
    }
    // two attempts, two filesystem types each
    assert_eq!(mount.mounts(), 4);
    assert!(mount.unmounts() >= 2);
    assert!(mount.is_clean());
}

#[test]
fn readers_run_in_probe_order() {
    let psx = ScriptedReader::returning(System::Psx, "SLUS-00515");
    let mega_cd = ScriptedReader::new(System::MegaCd);
    let saturn = ScriptedReader::new(System::Saturn);
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(index(&[("psx", "SLUS-00515", "Metal Gear Solid")])),
    );
    session
        .register(psx.clone())
        .register(mega_cd.clone())
        .register(saturn.clone());
    assert_eq!(
        session.systems(),
        vec![System::Saturn, System::MegaCd, System::Psx]
    );

    let outcome = session.probe();
    assert_eq!(outcome.title(), Some("Metal Gear Solid"));
    assert_eq!(outcome.system(), Some(System::Psx));
    assert_eq!((saturn.calls(), mega_cd.calls(), psx.calls()), (1, 1, 1));
}

#[test]
fn first_serial_stops_the_sequence() {
    let saturn = ScriptedReader::returning(System::Saturn, "T-70065");
    let psx = ScriptedReader::returning(System::Psx, "SLUS-00515");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(TitleIndex::new()),
    );
    session.register(saturn.clone()).register(psx.clone());

    let outcome = session.probe();
    assert_eq!(
        outcome,
        DiscOutcome::Unmatched(
            UnmatchedDisc::new(UnmatchedReason::NoTitle)
                .with_drive("/dev/sr0")
                .with_serial(System::Saturn, "T-70065")
        )
    );
    assert_eq!(psx.calls(), 0);
}

#[test]
fn retry_recovers_between_attempts_only() {
    let psx = ScriptedReader::new(System::Psx).with_attempts(2);
    psx.push(Err(ProbeError::mount_failed(["iso9660", "udf"])));
    psx.push(Ok("slus_005.15".to_string()));
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(index(&[("psx", "SLUS-00515", "Metal Gear Solid")])),
    );
    session.register(psx.clone());

    let outcome = session.probe();
    assert_eq!(psx.calls(), 2);
    assert_eq!(psx.recovers(), 1);
    // `.` survives normalization, so this serial is unknown
    assert_eq!(outcome.serial(), Some("SLUS005.15"));
    assert!(!outcome.is_resolved());
}

#[test]
fn retry_budget_is_respected() {
    let psx = ScriptedReader::new(System::Psx).with_attempts(3);
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(TitleIndex::new()),
    );
    session.register(psx.clone());

    let outcome = session.probe();
    assert_eq!(psx.calls(), 3);
    assert_eq!(psx.recovers(), 2);
    assert_eq!(outcome.serial(), None);
}

#[test]
fn serial_is_normalized_before_lookup() {
    let saturn = ScriptedReader::returning(System::Saturn, " mk-81051 ");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(index(&[("ss", "MK-81051", "Sega Rally Championship (USA)")])),
    );
    session.register(saturn);

    let outcome = session.probe();
    assert_eq!(outcome.serial(), Some("MK-81051"));
    assert!(outcome.is_resolved());
}

#[test]
fn unavailable_index_still_probes() {
    let saturn = ScriptedReader::returning(System::Saturn, "MK-81051");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Err(ProbeError::index_unavailable("no store")),
    );
    session.register(saturn.clone());
    assert!(session.index().is_none());

    let outcome = session.probe();
    assert_eq!(
        outcome,
        DiscOutcome::Unmatched(
            UnmatchedDisc::new(UnmatchedReason::IndexUnavailable)
                .with_drive("/dev/sr0")
                .with_serial(System::Saturn, "MK-81051")
        )
    );
    assert_eq!(saturn.calls(), 1);
}

struct Decline {
    calls: usize,
}

impl Disambiguator for Decline {
    fn choose(&mut self, _: &[TitleEntry], _: System, _: &str) -> Option<String> {
        self.calls += 1;
        None
    }
}

#[test]
fn declined_prompt_is_no_selection() {
    let psx = ScriptedReader::returning(System::Psx, "SLUS-00515");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(index(&[
            ("psx", "SLUS-00515", "Disc 1"),
            ("psx", "SLUS-00515B", "Disc 1 (Rev B)"),
        ])),
    )
    .with_disambiguator(Box::new(Decline { calls: 0 }));
    session.register(psx);

    let outcome = session.probe();
    match outcome {
        DiscOutcome::Unmatched(disc) => assert_eq!(disc.reason, UnmatchedReason::NoSelection),
        other => panic!("unexpected outcome: {other}"),
    }
}

#[test]
fn default_prompt_takes_first_candidate() {
    let psx = ScriptedReader::returning(System::Psx, "SLUS-00515");
    let mut session = DiscSession::new(
        Box::new(FakeDrives::with_disc("/dev/sr0")),
        Ok(index(&[
            ("psx", "SLUS-00515B", "Disc 1 (Rev B)"),
            ("psx", "SLUS-00515", "Disc 1"),
        ])),
    );
    session.register(psx);
    assert_eq!(session.probe().title(), Some("Disc 1"));
}

#[test]
fn probe_drive_skips_discovery() {
    let drives = FakeDrives::with_disc("/dev/sr1");
    let saturn = ScriptedReader::returning(System::Saturn, "MK-81051");
    let mut session = DiscSession::new(
        Box::new(drives.clone()),
        Ok(index(&[("ss", "MK-81051", "Sega Rally")])),
    );
    session.register(saturn);

    let outcome = session.probe_drive(Path::new("/dev/sr1"));
    assert!(outcome.is_resolved());
    assert_eq!(drives.locates(), 0);
}

#[test]
fn from_settings_registers_all_systems() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.index.db_path = Some(dir.path().join("missing.db"));

    let session = DiscSession::from_settings(&settings, Box::new(FakeDrives::absent()));
    assert_eq!(
        session.systems(),
        vec![System::Saturn, System::MegaCd, System::Psx]
    );
    assert!(session.index().is_none());
    assert_eq!(session.state(), &ProbeState::Idle);
}
