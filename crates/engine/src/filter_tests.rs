// SPDX-License-Identifier: MIT

use upkeep_adapters::{FakeNotifyAdapter, FakeProcessAdapter};
use upkeep_core::CommandError;

use super::*;

fn filter_at(
    bin: impl Into<PathBuf>,
) -> (FilterUpdate<FakeProcessAdapter, FakeNotifyAdapter>, FakeProcessAdapter, FakeNotifyAdapter) {
    let processes = FakeProcessAdapter::new();
    let notifier = FakeNotifyAdapter::new();
    let filter = FilterUpdate::new(processes.clone(), notifier.clone()).bin(bin);
    (filter, processes, notifier)
}

#[tokio::test]
async fn absent_binary_skips_without_notifying() {
    let dir = tempfile::tempdir().unwrap();
    let (filter, processes, notifier) = filter_at(dir.path().join("pihole"));

    assert_eq!(filter.run().await, FilterOutcome::Skipped);
    assert!(processes.executed().is_empty());
    assert_eq!(notifier.attempts(), 0);
}

#[tokio::test]
async fn present_binary_runs_its_updater_elevated() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("pihole");
    std::fs::write(&bin, "#!/bin/sh\n").unwrap();
    let (filter, processes, notifier) = filter_at(&bin);
    processes.script_success("Everything is up to date!");

    let outcome = filter.run().await;
    assert_eq!(outcome, FilterOutcome::Updated("Everything is up to date!".into()));

    let executed = processes.executed();
    assert_eq!(executed.len(), 1);
    assert!(executed[0].elevate);
    assert_eq!(executed[0].args(), ["-up"]);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "DNS Filter Update Successful");
    assert!(sent[0].body.contains("Everything is up to date!"));
}

#[tokio::test]
async fn failed_updater_notifies_the_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("pihole");
    std::fs::write(&bin, "#!/bin/sh\n").unwrap();
    let (filter, processes, notifier) = filter_at(&bin);
    processes.script_failure(CommandError::ExitNonZero {
        code: 1,
        stderr: "self-update refused".to_string(),
    });

    let outcome = filter.run().await;
    assert!(matches!(outcome, FilterOutcome::Failed(_)));

    let sent = notifier.sent();
    assert_eq!(sent[0].subject, "DNS Filter Update Failed");
    assert!(sent[0].body.contains("Error: exit status 1: self-update refused"));
}

#[tokio::test]
async fn notification_failure_does_not_change_the_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let bin = dir.path().join("pihole");
    std::fs::write(&bin, "#!/bin/sh\n").unwrap();
    let (filter, processes, notifier) = filter_at(&bin);
    processes.script_success("updated");
    notifier.fail_with("relay unreachable");

    let outcome = filter.run().await;
    assert_eq!(outcome, FilterOutcome::Updated("updated".into()));
    assert_eq!(notifier.attempts(), 1);
}
